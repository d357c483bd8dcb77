//! Capability interface descriptors.

use core::any::TypeId;
use core::marker::PhantomData;
use std::borrow::Cow;
use std::sync::Arc;

use super::sig::{MemberKind, MemberSig, Params, Property, collect_properties};
use crate::adapter::Adapter;

/// A capability interface, implemented for `dyn Trait`.
///
/// Generated by `#[quack::interface]`. Implementing it by hand means
/// providing the descriptor and, separately, `impl Trait for Adapter<dyn Trait>`
/// whose bodies call [`Adapter::forward`] with the member's slot index.
pub trait Interface: 'static {
    /// Ordered member list of the interface.
    fn info() -> &'static InterfaceInfo;

    /// Upcast a typed adapter to the interface object.
    fn from_adapter(adapter: Arc<Adapter<Self>>) -> Arc<Self>;
}

/// Descriptor of a capability interface.
///
/// Slot `i` of every adapter synthesized for this interface forwards
/// `members()[i]`.
#[derive(Debug)]
pub struct InterfaceInfo {
    id: TypeId,
    name: Cow<'static, str>,
    members: Vec<MemberSig>,
    provided: Vec<usize>,
}

impl InterfaceInfo {
    pub fn builder<I: ?Sized + 'static>(name: impl Into<Cow<'static, str>>) -> InterfaceBuilder<I> {
        InterfaceBuilder {
            info: InterfaceInfo {
                id: TypeId::of::<I>(),
                name: name.into(),
                members: Vec::new(),
                provided: Vec::new(),
            },
            _marker: PhantomData,
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[MemberSig] {
        &self.members
    }

    /// A pure interface declares signatures only: no member carries a body.
    pub fn is_pure(&self) -> bool {
        self.provided.is_empty()
    }

    /// Members declared with a provided (default) body.
    pub fn provided(&self) -> impl Iterator<Item = &MemberSig> {
        self.provided.iter().map(|&i| &self.members[i])
    }

    pub fn properties(&self) -> Vec<Property<'_>> {
        collect_properties(&self.members)
    }
}

/// Builder for [`InterfaceInfo`]; `I` is the `dyn Trait` being described.
pub struct InterfaceBuilder<I: ?Sized> {
    info: InterfaceInfo,
    _marker: PhantomData<fn() -> Box<I>>,
}

impl<I: ?Sized + 'static> InterfaceBuilder<I> {
    /// Declare a member taking `P` and returning `R`.
    pub fn member<P: Params, R: 'static>(mut self, kind: MemberKind) -> Self {
        self.info.members.push(MemberSig::of::<P, R>(kind));
        self
    }

    /// Declare a member that has a provided body in the trait.
    pub fn provided<P: Params, R: 'static>(mut self, kind: MemberKind) -> Self {
        self.info.provided.push(self.info.members.len());
        self.info.members.push(MemberSig::of::<P, R>(kind));
        self
    }

    pub fn method<P: Params, R: 'static>(self, name: impl Into<Cow<'static, str>>) -> Self {
        self.member::<P, R>(MemberKind::method(name))
    }

    pub fn getter<R: 'static>(self, property: impl Into<Cow<'static, str>>) -> Self {
        self.member::<(), R>(MemberKind::getter(property))
    }

    pub fn setter<V: 'static>(self, property: impl Into<Cow<'static, str>>) -> Self {
        self.member::<(V,), ()>(MemberKind::setter(property))
    }

    pub fn index_getter<P: Params, R: 'static>(self) -> Self {
        self.member::<P, R>(MemberKind::IndexGetter)
    }

    /// The last element of `P` is the assigned value.
    pub fn index_setter<P: Params>(self) -> Self {
        self.member::<P, ()>(MemberKind::IndexSetter)
    }

    pub fn build(self) -> InterfaceInfo {
        self.info
    }
}
