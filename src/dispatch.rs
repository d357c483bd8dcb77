//! # Layer 2: Dispatch
//!
//! `adapt::<T>(value)` resolves in three steps:
//!
//! ```text
//! 1. value satisfies T directly?          -> value as Arc<T>
//! 2. value holds an inner value?          -> unwrap once, retry 1
//! 3. cache.get_or_create(shape, T::info)  -> AdapterType::instantiate(value)
//! ```
//!
//! Step 3 uses the unwrapped value when step 2 applied, so an adapter never
//! forwards to another adapter.

use core::any::TypeId;
use std::sync::Arc;

use tracing::trace;

use crate::adapter::AdapterCache;
use crate::error::AdaptError;
use crate::reflect::{Interface, Object};

/// Adapt `value` to the interface `T` using the global cache.
///
/// ```ignore
/// #[quack::interface]
/// trait Named {
///     #[quack(get = "Name")]
///     fn name(&self) -> String;
/// }
///
/// let named: Arc<dyn Named> = quack::adapt::<dyn Named>(value)?;
/// ```
pub fn adapt<T: Interface + ?Sized>(value: Arc<dyn Object>) -> Result<Arc<T>, AdaptError> {
    AdapterCache::global().adapt::<T>(value)
}

/// Return `value` as `Arc<T>` if its type satisfies `T` without an adapter.
pub fn direct<T: Interface + ?Sized>(value: &Arc<dyn Object>) -> Option<Arc<T>> {
    let cast = Arc::clone(value).cast_to(TypeId::of::<T>())?;
    cast.downcast::<Arc<T>>().ok().map(|arc| *arc)
}

impl AdapterCache {
    /// Adapt `value` to `T`, memoizing in this cache.
    pub fn adapt<T: Interface + ?Sized>(&self, value: Arc<dyn Object>) -> Result<Arc<T>, AdaptError> {
        if let Some(satisfied) = direct::<T>(&value) {
            trace!(value = value.shape().name(), "value satisfies interface directly");
            return Ok(satisfied);
        }

        let value = match value.held_value() {
            Some(inner) => {
                if let Some(satisfied) = direct::<T>(&inner) {
                    trace!(value = inner.shape().name(), "held value satisfies interface directly");
                    return Ok(satisfied);
                }
                inner
            }
            None => value,
        };

        let interface = T::info();
        let ty = self
            .get_or_create(value.shape(), interface)
            .map_err(|source| AdaptError::new(value.shape().name(), interface.name(), source))?;

        ty.instantiate::<T>(Arc::clone(&value))
            .map_err(|source| AdaptError::new(value.shape().name(), interface.name(), source))
    }
}

/// `value.adapt::<dyn Trait>()` for any shared object.
pub trait AdaptExt {
    /// Adapt through the global cache.
    fn adapt<T: Interface + ?Sized>(&self) -> Result<Arc<T>, AdaptError>;

    /// Adapt through the given cache.
    fn adapt_in<T: Interface + ?Sized>(&self, cache: &AdapterCache) -> Result<Arc<T>, AdaptError>;
}

impl<O: Object + ?Sized> AdaptExt for Arc<O> {
    fn adapt<T: Interface + ?Sized>(&self) -> Result<Arc<T>, AdaptError> {
        adapt::<T>(Arc::clone(self).into_object())
    }

    fn adapt_in<T: Interface + ?Sized>(&self, cache: &AdapterCache) -> Result<Arc<T>, AdaptError> {
        cache.adapt::<T>(Arc::clone(self).into_object())
    }
}
