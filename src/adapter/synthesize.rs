//! Adapter synthesis.
//!
//! Builds, for one (concrete shape, interface) pair, the forwarding table of
//! an adapter type:
//!
//! ```text
//! interface member i  --matcher-->  concrete member  --thunk-->  slot i
//! ```
//!
//! Synthesis is all-or-nothing. If the interface is impure, or any member is
//! unresolved or returns an incompatible type, no `AdapterType` is produced.

use core::any::Any;
use std::sync::Arc;

use crate::error::{InvokeError, SynthesisError};
use crate::reflect::{Args, InterfaceInfo, Member, Object, Shape, ShapeKey, Thunk};

use super::matcher;

/// A synthesized adapter type for one (concrete type, interface) pair.
///
/// Immutable once built. Instances are created with [`Adapter`](super::Adapter)
/// around a held value; the type itself holds no value.
pub struct AdapterType {
    source: ShapeKey,
    slots: Vec<Thunk>,
    shape: Shape,
}

impl AdapterType {
    /// Shape of the adapter itself. Its members forward through the held value.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn name(&self) -> &str {
        self.shape.name()
    }

    pub fn key(&self) -> ShapeKey {
        self.shape.key()
    }

    /// Key of the shape this type was synthesized against. Only values of
    /// exactly that shape can be held by its instances.
    pub fn source(&self) -> ShapeKey {
        self.source
    }

    /// Number of forwarding slots, one per interface member.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Concrete member body behind slot `slot`.
    pub fn slot(&self, slot: usize) -> Option<&Thunk> {
        self.slots.get(slot)
    }
}

impl core::fmt::Debug for AdapterType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AdapterType")
            .field("name", &self.shape.name())
            .field("slots", &self.slots.len())
            .finish()
    }
}

/// Synthesize the adapter type forwarding `interface` to `concrete`.
pub fn synthesize(concrete: &Shape, interface: &InterfaceInfo) -> Result<AdapterType, SynthesisError> {
    if let Some(member) = interface.provided().next() {
        return Err(SynthesisError::NotAnInterface {
            interface: interface.name().to_string(),
            member: member.name().to_string(),
        });
    }

    let mut slots = Vec::with_capacity(interface.members().len());
    let mut members = Vec::with_capacity(interface.members().len());

    for wanted in interface.members() {
        let (_, found) = matcher::find(wanted, concrete).ok_or_else(|| SynthesisError::UnresolvedMember {
            concrete: concrete.name().to_string(),
            interface: interface.name().to_string(),
            member: wanted.to_string(),
        })?;

        if found.sig().ret() != wanted.ret() {
            return Err(SynthesisError::IncompatibleReturn {
                concrete: concrete.name().to_string(),
                interface: interface.name().to_string(),
                member: wanted.name().to_string(),
                expected: wanted.ret().name(),
                found: found.sig().ret().name(),
            });
        }

        let target = Arc::clone(found.thunk());
        members.push(Member::new(wanted.clone(), through_held_value(Arc::clone(&target))));
        slots.push(target);
    }

    let key = ShapeKey::Synthesized {
        concrete: concrete.key().concrete(),
        interface: interface.id(),
    };
    let name = format!("{}.{}.Adapter", concrete.name(), interface.name());

    Ok(AdapterType {
        source: concrete.key(),
        slots,
        shape: Shape::synthesized(key, name, members),
    })
}

/// Member body of the adapter type: load the held value, call the target.
fn through_held_value(target: Thunk) -> Thunk {
    Arc::new(move |receiver: &dyn Object, args: Args| -> Result<Box<dyn Any>, InvokeError> {
        let value = receiver.held_value().ok_or_else(|| InvokeError::Receiver {
            expected: "adapter",
            found: receiver.shape().name().to_string(),
        })?;
        target(&*value, args)
    })
}
