//! Values that hold another value are unwrapped once before adaptation.

use std::sync::Arc;

use quack::prelude::*;
use quack::AdapterCache;

#[quack::interface]
trait Named {
    #[quack(get = "Name")]
    fn name(&self) -> String;
}

#[quack::interface]
trait Labeled {
    #[quack(get = "Label")]
    fn label(&self) -> String;
}

// Implements `Named` itself.
struct Plain {
    name: String,
}

#[quack::shape(implements(Named))]
impl Plain {
    #[quack(get = "Name")]
    pub fn name(&self) -> String {
        self.name.clone()
    }
}

impl Named for Plain {
    fn name(&self) -> String {
        self.name.clone()
    }
}

// Matches `Named` structurally only.
struct Tagged {
    tag: String,
}

#[quack::shape]
impl Tagged {
    #[quack(get = "Name")]
    pub fn name(&self) -> String {
        self.tag.clone()
    }
}

struct Wrapper<T> {
    inner: Arc<T>,
}

macro_rules! wrapper {
    ($wrapper:ident, $inner:ty) => {
        struct $wrapper(Wrapper<$inner>);

        #[quack::shape(holds)]
        impl $wrapper {
            #[quack(get = "Label")]
            pub fn label(&self) -> String {
                "wrapper".to_string()
            }
        }

        impl Holder for $wrapper {
            type Value = $inner;

            fn value(&self) -> Arc<$inner> {
                Arc::clone(&self.0.inner)
            }
        }
    };
}

wrapper!(HoldsPlain, Plain);
wrapper!(HoldsTagged, Tagged);
wrapper!(HoldsHolder, HoldsTagged);

#[test]
fn test_inner_value_satisfying_directly_is_returned() {
    let plain = Arc::new(Plain { name: "inner".into() });
    let holder = Arc::new(HoldsPlain(Wrapper { inner: Arc::clone(&plain) }));
    let cache = AdapterCache::new();

    let named = holder.adapt_in::<dyn Named>(&cache).unwrap();

    assert_eq!(named.name(), "inner");
    assert!(std::ptr::addr_eq(Arc::as_ptr(&named), Arc::as_ptr(&plain)));
    assert!(cache.is_empty());
}

#[test]
fn test_adapter_is_synthesized_against_inner_value() {
    let tagged = Arc::new(Tagged { tag: "t".into() });
    let holder = Arc::new(HoldsTagged(Wrapper { inner: Arc::clone(&tagged) }));

    let named = holder.adapt::<dyn Named>().unwrap();

    assert_eq!(named.name(), "t");
    assert_eq!(named.shape().name(), "Tagged.Named.Adapter");
    assert!(std::ptr::addr_eq(Arc::as_ptr(&named.held_value().unwrap()), Arc::as_ptr(&tagged)));
}

#[test]
fn test_wrapper_members_are_not_consulted_after_unwrap() {
    let holder = Arc::new(HoldsTagged(Wrapper { inner: Arc::new(Tagged { tag: "t".into() }) }));
    let err = holder.adapt_in::<dyn Labeled>(&AdapterCache::new()).unwrap_err();

    assert_eq!(err.concrete(), "Tagged");
}

#[test]
fn test_only_one_level_is_unwrapped() {
    let inner = Arc::new(HoldsTagged(Wrapper { inner: Arc::new(Tagged { tag: "deep".into() }) }));
    let outer = Arc::new(HoldsHolder(Wrapper { inner }));

    let labeled = outer.adapt::<dyn Labeled>().unwrap();
    assert_eq!(labeled.label(), "wrapper");
    assert_eq!(labeled.shape().name(), "HoldsTagged.Labeled.Adapter");

    let err = outer.adapt_in::<dyn Named>(&AdapterCache::new()).unwrap_err();
    assert_eq!(err.concrete(), "HoldsTagged");
}
