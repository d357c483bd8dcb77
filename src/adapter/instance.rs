//! Adapter instances.

use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;
use std::sync::Arc;

use crate::error::{AdaptError, InvokeError, SynthesisError};
use crate::reflect::{Args, Holder, Interface, Object, Shape, ShapeKey};

use super::synthesize::AdapterType;

/// An instance of a synthesized adapter type implementing the interface `I`.
///
/// Holds the adapted value by shared handle, never by copy: state reached
/// through the adapter is the value's own state, observed live.
pub struct Adapter<I: ?Sized> {
    value: Arc<dyn Object>,
    ty: Arc<AdapterType>,
    _interface: PhantomData<fn() -> Arc<I>>,
}

impl<I: Interface + ?Sized> Adapter<I> {
    pub(crate) fn new(value: Arc<dyn Object>, ty: Arc<AdapterType>) -> Self {
        Adapter {
            value,
            ty,
            _interface: PhantomData,
        }
    }

    pub fn adapter_type(&self) -> &AdapterType {
        &self.ty
    }

    /// Adapt the held value to another interface.
    pub fn implement<U: Interface + ?Sized>(&self) -> Result<Arc<U>, AdaptError> {
        crate::adapt::<U>(Arc::clone(&self.value))
    }

    /// Forward interface slot `slot` to the held value.
    ///
    /// Called by the bodies `#[quack::interface]` generates.
    ///
    /// # Panics
    ///
    /// If the slot does not exist or returns something other than `R`.
    /// Synthesis checks both, so this only fires on a hand-written
    /// `Interface` impl whose slot numbering disagrees with its descriptor.
    #[doc(hidden)]
    pub fn forward<R: 'static>(&self, slot: usize, args: Args) -> R {
        match self.try_forward(slot, args) {
            Ok(value) => value,
            Err(err) => panic!("`{}` failed to forward slot {slot}: {err}", self.ty.name()),
        }
    }

    fn try_forward<R: 'static>(&self, slot: usize, args: Args) -> Result<R, InvokeError> {
        let thunk = self.ty.slot(slot).ok_or(InvokeError::Slot { slot })?;
        thunk(&*self.value, args)?
            .downcast::<R>()
            .map(|value| *value)
            .map_err(|_| InvokeError::ReturnType {
                expected: core::any::type_name::<R>(),
            })
    }
}

impl AdapterType {
    /// Wrap `value` in an adapter of this type.
    ///
    /// `I` must be the interface this type was synthesized for, and `value`
    /// must have exactly the shape it was synthesized against. An adapter
    /// around the same concrete type does not qualify.
    pub fn instantiate<I: Interface + ?Sized>(self: &Arc<Self>, value: Arc<dyn Object>) -> Result<Arc<I>, SynthesisError> {
        let for_interface = matches!(
            self.key(),
            ShapeKey::Synthesized { interface, .. } if interface == TypeId::of::<I>()
        );
        if !for_interface {
            return Err(SynthesisError::ForeignInterface {
                adapter: self.name().to_string(),
                interface: I::info().name().to_string(),
            });
        }
        if value.shape().key() != self.source() {
            return Err(SynthesisError::ForeignValue {
                adapter: self.name().to_string(),
                value: value.shape().name().to_string(),
            });
        }
        Ok(I::from_adapter(Arc::new(Adapter::new(value, Arc::clone(self)))))
    }
}

impl<I: Interface + ?Sized> Object for Adapter<I> {
    fn shape(&self) -> &Shape {
        self.ty.shape()
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

    fn held_value(&self) -> Option<Arc<dyn Object>> {
        Some(Arc::clone(&self.value))
    }

    /// An adapter directly satisfies exactly the interface it was built for.
    fn cast_to(self: Arc<Self>, interface: TypeId) -> Option<Box<dyn Any>> {
        if interface == TypeId::of::<I>() {
            Some(Box::new(I::from_adapter(self)) as Box<dyn Any>)
        } else {
            None
        }
    }
}

impl<I: Interface + ?Sized> Holder for Adapter<I> {
    type Value = dyn Object;

    fn value(&self) -> Arc<dyn Object> {
        Arc::clone(&self.value)
    }
}

impl<I: ?Sized> fmt::Debug for Adapter<I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Adapter")
            .field("type", &self.ty.name())
            .field("value", &self.value.shape().name())
            .finish()
    }
}
