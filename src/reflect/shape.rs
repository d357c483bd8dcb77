//! Runtime member tables.
//!
//! A [`Shape`] is what the synthesizer matches against: the ordered members
//! of one runtime type, each a [`MemberSig`] paired with a [`Thunk`] that
//! invokes the member on a receiver of that type.

use core::any::{Any, TypeId};
use core::fmt;
use core::marker::PhantomData;
use std::borrow::Cow;
use std::sync::Arc;

use super::interface::Interface;
use super::object::Object;
use super::sig::{Args, MemberKind, MemberSig, Params, Property, TypeSig, collect_properties};
use crate::error::InvokeError;

/// A bound member body: receiver plus erased arguments in, erased result out.
pub type Thunk = Arc<dyn Fn(&dyn Object, Args) -> Result<Box<dyn Any>, InvokeError> + Send + Sync>;

/// Converts an erased `Arc<T>` into a boxed `Arc<dyn Trait>`.
pub(crate) type Caster = Arc<dyn Fn(Arc<dyn Any + Send + Sync>) -> Option<Box<dyn Any>> + Send + Sync>;

/// Identity of a runtime type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKey {
    /// A Rust type described by its own shape.
    Native(TypeId),
    /// An adapter synthesized for a (concrete type, interface) pair.
    Synthesized { concrete: TypeId, interface: TypeId },
}

impl ShapeKey {
    /// The Rust type the shape ultimately describes.
    pub fn concrete(&self) -> TypeId {
        match self {
            ShapeKey::Native(id) => *id,
            ShapeKey::Synthesized { concrete, .. } => *concrete,
        }
    }

    pub fn is_synthesized(&self) -> bool {
        matches!(self, ShapeKey::Synthesized { .. })
    }
}

// =============================================================================
// Member
// =============================================================================

/// One concrete member: its signature and its body.
#[derive(Clone)]
pub struct Member {
    sig: MemberSig,
    thunk: Thunk,
}

impl Member {
    pub fn new(sig: MemberSig, thunk: Thunk) -> Self {
        Member { sig, thunk }
    }

    pub fn sig(&self) -> &MemberSig {
        &self.sig
    }

    pub fn thunk(&self) -> &Thunk {
        &self.thunk
    }

    pub fn invoke(&self, receiver: &dyn Object, args: Args) -> Result<Box<dyn Any>, InvokeError> {
        (self.thunk)(receiver, args)
    }
}

impl fmt::Debug for Member {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Member").field(&format_args!("{}", self.sig)).finish()
    }
}

struct DirectCast {
    interface: TypeId,
    cast: Caster,
}

// =============================================================================
// Shape
// =============================================================================

/// The member table of one runtime type.
pub struct Shape {
    key: ShapeKey,
    name: Cow<'static, str>,
    members: Vec<Member>,
    casts: Vec<DirectCast>,
}

impl Shape {
    /// Start describing the Rust type `T`.
    pub fn builder<T: Any + Send + Sync>(name: impl Into<Cow<'static, str>>) -> ShapeBuilder<T> {
        ShapeBuilder {
            name: name.into(),
            members: Vec::new(),
            casts: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Shape of a synthesized adapter type.
    pub(crate) fn synthesized(key: ShapeKey, name: String, members: Vec<Member>) -> Self {
        Shape {
            key,
            name: Cow::Owned(name),
            members,
            casts: Vec::new(),
        }
    }

    pub fn key(&self) -> ShapeKey {
        self.key
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    /// First member with the given name, regardless of parameters.
    pub fn member(&self, name: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.sig.name() == name)
    }

    pub fn properties(&self) -> Vec<Property<'_>> {
        collect_properties(self.members.iter().map(Member::sig))
    }

    /// Whether the type declared a direct implementation of `interface`.
    pub fn implements(&self, interface: TypeId) -> bool {
        self.casts.iter().any(|c| c.interface == interface)
    }

    pub(crate) fn caster(&self, interface: TypeId) -> Option<Caster> {
        self.casts
            .iter()
            .find(|c| c.interface == interface)
            .map(|c| Arc::clone(&c.cast))
    }

    /// Invoke a member by name, picking the first one whose parameter types
    /// equal the runtime types of `args`.
    pub fn call(&self, receiver: &dyn Object, name: &str, args: Args) -> Result<Box<dyn Any>, InvokeError> {
        let member = self
            .members
            .iter()
            .find(|m| m.sig.name() == name && m.sig.accepts(&args))
            .ok_or_else(|| InvokeError::UnknownMember {
                shape: self.name.to_string(),
                member: name.to_string(),
            })?;
        member.invoke(receiver, args)
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("members", &self.members)
            .field("implements", &self.casts.len())
            .finish()
    }
}

// =============================================================================
// ShapeBuilder
// =============================================================================

/// Builder for the [`Shape`] of a Rust type `T`.
///
/// ```ignore
/// Shape::builder::<Point>("Point")
///     .getter("X", |p: &Point, (): ()| p.x)
///     .method("scale", |p: &Point, (k,): (f64,)| p.scaled(k))
///     .build()
/// ```
pub struct ShapeBuilder<T> {
    name: Cow<'static, str>,
    members: Vec<Member>,
    casts: Vec<DirectCast>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Any + Send + Sync> ShapeBuilder<T> {
    /// Add a member of the given kind whose body is `f`.
    pub fn member<P, R, F>(mut self, kind: MemberKind, f: F) -> Self
    where
        P: Params,
        R: 'static,
        F: Fn(&T, P) -> R + Send + Sync + 'static,
    {
        let sig = MemberSig::new(kind, P::signature(), TypeSig::of::<R>());
        let thunk: Thunk = Arc::new(move |receiver: &dyn Object, args: Args| -> Result<Box<dyn Any>, InvokeError> {
            let this = receiver
                .as_any()
                .downcast_ref::<T>()
                .ok_or_else(|| InvokeError::Receiver {
                    expected: core::any::type_name::<T>(),
                    found: receiver.shape().name().to_string(),
                })?;
            let params = P::unpack(args)?;
            Ok(Box::new(f(this, params)) as Box<dyn Any>)
        });
        self.members.push(Member { sig, thunk });
        self
    }

    pub fn method<P, R, F>(self, name: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        P: Params,
        R: 'static,
        F: Fn(&T, P) -> R + Send + Sync + 'static,
    {
        self.member(MemberKind::method(name), f)
    }

    pub fn getter<R, F>(self, property: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        R: 'static,
        F: Fn(&T, ()) -> R + Send + Sync + 'static,
    {
        self.member(MemberKind::getter(property), f)
    }

    pub fn setter<V, F>(self, property: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        V: 'static,
        F: Fn(&T, (V,)) + Send + Sync + 'static,
    {
        self.member(MemberKind::setter(property), f)
    }

    pub fn index_getter<P, R, F>(self, f: F) -> Self
    where
        P: Params,
        R: 'static,
        F: Fn(&T, P) -> R + Send + Sync + 'static,
    {
        self.member(MemberKind::IndexGetter, f)
    }

    /// The last element of `P` is the assigned value.
    pub fn index_setter<P, F>(self, f: F) -> Self
    where
        P: Params,
        F: Fn(&T, P) + Send + Sync + 'static,
    {
        self.member(MemberKind::IndexSetter, f)
    }

    /// Declare that `T` implements the interface `I` itself.
    ///
    /// Adapting a `T` to `I` then returns the value unchanged.
    pub fn implements<I>(mut self, cast: fn(Arc<T>) -> Arc<I>) -> Self
    where
        I: Interface + ?Sized,
    {
        let caster: Caster = Arc::new(move |any: Arc<dyn Any + Send + Sync>| {
            let this = any.downcast::<T>().ok()?;
            Some(Box::new(cast(this)) as Box<dyn Any>)
        });
        self.casts.push(DirectCast {
            interface: TypeId::of::<I>(),
            cast: caster,
        });
        self
    }

    pub fn build(self) -> Shape {
        Shape {
            key: ShapeKey::Native(TypeId::of::<T>()),
            name: self.name,
            members: self.members,
            casts: self.casts,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
