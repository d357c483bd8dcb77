//! Hand-built shapes and interfaces shared by the unit tests.
//!
//! Written without the attribute macros so the library tests run with
//! default features off.

use core::any::Any;
use core::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, OnceLock};

use crate::adapter::Adapter;
use crate::reflect::{Interface, InterfaceInfo, Object, Shape, arg};

// =============================================================================
// Counter: structurally satisfies `Tally`, declares nothing
// =============================================================================

pub(crate) struct Counter {
    label: String,
    hits: AtomicI64,
}

impl Counter {
    pub(crate) fn new(label: &str) -> Self {
        Counter {
            label: label.to_string(),
            hits: AtomicI64::new(0),
        }
    }

    pub(crate) fn hits(&self) -> i64 {
        self.hits.load(Ordering::SeqCst)
    }

    pub(crate) fn add(&self, n: i64) -> i64 {
        self.hits.fetch_add(n, Ordering::SeqCst) + n
    }
}

impl Object for Counter {
    fn shape(&self) -> &Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<Counter>("Counter")
                .getter("Label", |c: &Counter, (): ()| c.label.clone())
                .getter("Hits", |c: &Counter, (): ()| c.hits())
                .method("add", |c: &Counter, (n,): (i64,)| c.add(n))
                .method("add", |c: &Counter, (n,): (i32,)| c.add(i64::from(n)))
                .build()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn into_object(self: Arc<Self>) -> Arc<dyn Object> {
        self
    }
}

pub(crate) trait Tally: Object {
    fn hits(&self) -> i64;
    fn add(&self, n: i64) -> i64;
}

impl Interface for dyn Tally {
    fn info() -> &'static InterfaceInfo {
        static INFO: OnceLock<InterfaceInfo> = OnceLock::new();
        INFO.get_or_init(|| {
            InterfaceInfo::builder::<dyn Tally>("Tally")
                .getter::<i64>("Hits")
                .method::<(i64,), i64>("add")
                .build()
        })
    }

    fn from_adapter(adapter: Arc<Adapter<Self>>) -> Arc<Self> {
        adapter
    }
}

impl fmt::Debug for dyn Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Tally").field(&Object::shape(self).name()).finish()
    }
}

impl Tally for Adapter<dyn Tally> {
    fn hits(&self) -> i64 {
        self.forward(0, Vec::new())
    }

    fn add(&self, n: i64) -> i64 {
        self.forward(1, vec![arg(n)])
    }
}

// =============================================================================
// Label: implements `Named` itself and says so in its shape
// =============================================================================

pub(crate) struct Label {
    text: String,
}

impl Label {
    pub(crate) fn new(text: &str) -> Self {
        Label { text: text.to_string() }
    }
}

impl Object for Label {
    fn shape(&self) -> &Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<Label>("Label")
                .getter("Label", |l: &Label, (): ()| l.text.clone())
                .implements::<dyn Named>(|l: Arc<Label>| -> Arc<dyn Named> { l })
                .build()
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync> {
        self
    }

    fn into_object(self: Arc<Self>) -> Arc<dyn Object> {
        self
    }
}

pub(crate) trait Named: Object {
    fn label(&self) -> String;
}

impl Named for Label {
    fn label(&self) -> String {
        self.text.clone()
    }
}

impl Interface for dyn Named {
    fn info() -> &'static InterfaceInfo {
        static INFO: OnceLock<InterfaceInfo> = OnceLock::new();
        INFO.get_or_init(|| InterfaceInfo::builder::<dyn Named>("Named").getter::<String>("Label").build())
    }

    fn from_adapter(adapter: Arc<Adapter<Self>>) -> Arc<Self> {
        adapter
    }
}

impl fmt::Debug for dyn Named {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Named").field(&Object::shape(self).name()).finish()
    }
}

impl Named for Adapter<dyn Named> {
    fn label(&self) -> String {
        self.forward(0, Vec::new())
    }
}
