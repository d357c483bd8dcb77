//! Descriptors written by hand, without the attribute macros.

use std::any::Any;
use std::sync::{Arc, Mutex, OnceLock};

use quack::{Adapter, AdapterCache, Interface, InterfaceInfo, Object, Shape, arg};

trait Queue: Object {
    fn push(&self, item: String);
    fn len(&self) -> usize;
}

impl Interface for dyn Queue {
    fn info() -> &'static InterfaceInfo {
        static INFO: OnceLock<InterfaceInfo> = OnceLock::new();
        INFO.get_or_init(|| {
            InterfaceInfo::builder::<dyn Queue>("Queue")
                .method::<(String,), ()>("push")
                .getter::<usize>("Count")
                .build()
        })
    }

    fn from_adapter(adapter: Arc<Adapter<Self>>) -> Arc<Self> {
        adapter
    }
}

impl Queue for Adapter<dyn Queue> {
    fn push(&self, item: String) {
        self.forward(0, vec![arg(item)])
    }

    fn len(&self) -> usize {
        self.forward(1, Vec::new())
    }
}

struct Backlog {
    items: Mutex<Vec<String>>,
}

impl Object for Backlog {
    fn shape(&self) -> &Shape {
        static SHAPE: OnceLock<Shape> = OnceLock::new();
        SHAPE.get_or_init(|| {
            Shape::builder::<Backlog>("Backlog")
                .method("push", |b: &Backlog, (item,): (String,)| b.items.lock().unwrap().push(item))
                .getter("Count", |b: &Backlog, (): ()| b.items.lock().unwrap().len())
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

#[test]
fn test_hand_written_descriptors_adapt() {
    let cache = AdapterCache::new();
    let backlog = Arc::new(Backlog { items: Mutex::new(Vec::new()) });
    let queue = cache.adapt::<dyn Queue>(Arc::clone(&backlog).into_object()).unwrap();

    queue.push("a".to_string());
    queue.push("b".to_string());

    assert_eq!(queue.len(), 2);
    assert_eq!(*backlog.items.lock().unwrap(), ["a", "b"]);
    assert_eq!(queue.shape().name(), "Backlog.Queue.Adapter");
}
