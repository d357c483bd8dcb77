//! The `Object` trait: what every adaptable value exposes at runtime.

use core::any::{Any, TypeId};
use std::sync::Arc;

use super::shape::Shape;

/// A value with a runtime [`Shape`].
///
/// Usually generated by `#[quack::shape]` on the type's inherent `impl`
/// block. Every `#[quack::interface]` trait has `Object` as a supertrait, so
/// an `Arc<dyn Trait>` can always be handed back to `adapt`.
///
/// Values are shared, never borrowed mutably: state that must change through
/// an adapter lives behind interior mutability.
pub trait Object: Any + Send + Sync {
    /// Member table of the value's runtime type.
    fn shape(&self) -> &Shape;

    fn as_any(&self) -> &dyn Any;

    fn into_any(self: Arc<Self>) -> Arc<dyn Any + Send + Sync>;

    fn into_object(self: Arc<Self>) -> Arc<dyn Object>;

    /// The "holds a value" capability: the payload this value wraps, if any.
    fn held_value(&self) -> Option<Arc<dyn Object>> {
        None
    }

    /// Direct satisfaction of `interface` (the `TypeId` of a `dyn Trait`).
    ///
    /// Returns a boxed `Arc<dyn Trait>` when the value's type implements the
    /// trait itself and declared so in its shape.
    fn cast_to(self: Arc<Self>, interface: TypeId) -> Option<Box<dyn Any>> {
        let cast = self.shape().caster(interface)?;
        cast(self.into_any())
    }
}

/// A value that holds another value of type `Value`.
///
/// Adaptation unwraps a holder once before synthesizing an adapter, so the
/// adapter forwards to the payload rather than to the wrapper. Declare it on
/// a shape with `#[quack::shape(holds)]`.
pub trait Holder {
    type Value: Object + ?Sized;

    fn value(&self) -> Arc<Self::Value>;
}
