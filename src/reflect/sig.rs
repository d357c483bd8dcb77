//! Member signatures.
//!
//! A [`MemberSig`] is the matching key of the structural system: a member
//! name plus the exact sequence of parameter types. The return type rides
//! along for the compatibility check performed at synthesis time.
//!
//! Property and indexer accessors are ordinary members under their accessor
//! names:
//!
//! ```text
//! property `ID`   -> get_ID()         / set_ID(value)
//! indexer         -> get_Item(i, j)   / set_Item(i, j, value)
//! ```

use core::any::{Any, TypeId};
use core::fmt;
use core::hash::{Hash, Hasher};
use std::borrow::Cow;

use crate::error::InvokeError;

/// Name used for indexer accessors (`get_Item` / `set_Item`).
pub const INDEXER: &str = "Item";

/// Type-erased argument list handed to a member thunk.
pub type Args = Vec<Box<dyn Any>>;

/// Box a single argument for [`Args`].
#[inline]
pub fn arg<T: Any>(value: T) -> Box<dyn Any> {
    Box::new(value)
}

// =============================================================================
// TypeSig
// =============================================================================

/// Identity and display name of a parameter or return type.
///
/// Equality and hashing use the [`TypeId`] only.
#[derive(Clone, Copy)]
pub struct TypeSig {
    id: TypeId,
    name: &'static str,
}

impl TypeSig {
    pub fn of<T: ?Sized + 'static>() -> Self {
        TypeSig {
            id: TypeId::of::<T>(),
            name: core::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_unit(&self) -> bool {
        self.id == TypeId::of::<()>()
    }
}

impl PartialEq for TypeSig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeSig {}

impl Hash for TypeSig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

impl fmt::Display for TypeSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

// =============================================================================
// MemberKind / MemberSig
// =============================================================================

/// What a member is, as declared.
///
/// The kind only decides the member's name; matching itself never looks at
/// it, so a plain method called `get_ID` satisfies a getter of `ID`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Method(Cow<'static, str>),
    Getter(Cow<'static, str>),
    Setter(Cow<'static, str>),
    IndexGetter,
    IndexSetter,
}

impl MemberKind {
    pub fn method(name: impl Into<Cow<'static, str>>) -> Self {
        MemberKind::Method(name.into())
    }

    pub fn getter(property: impl Into<Cow<'static, str>>) -> Self {
        MemberKind::Getter(property.into())
    }

    pub fn setter(property: impl Into<Cow<'static, str>>) -> Self {
        MemberKind::Setter(property.into())
    }

    /// The accessor-level member name.
    pub fn member_name(&self) -> Cow<'static, str> {
        match self {
            MemberKind::Method(name) => name.clone(),
            MemberKind::Getter(property) => Cow::Owned(format!("get_{property}")),
            MemberKind::Setter(property) => Cow::Owned(format!("set_{property}")),
            MemberKind::IndexGetter => Cow::Owned(format!("get_{INDEXER}")),
            MemberKind::IndexSetter => Cow::Owned(format!("set_{INDEXER}")),
        }
    }

    /// The property (or indexer) this accessor belongs to.
    pub fn property(&self) -> Option<&str> {
        match self {
            MemberKind::Method(_) => None,
            MemberKind::Getter(property) | MemberKind::Setter(property) => Some(property),
            MemberKind::IndexGetter | MemberKind::IndexSetter => Some(INDEXER),
        }
    }

    pub fn is_getter(&self) -> bool {
        matches!(self, MemberKind::Getter(_) | MemberKind::IndexGetter)
    }

    pub fn is_setter(&self) -> bool {
        matches!(self, MemberKind::Setter(_) | MemberKind::IndexSetter)
    }
}

/// Name, parameter types and return type of one member.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MemberSig {
    name: Cow<'static, str>,
    kind: MemberKind,
    params: Vec<TypeSig>,
    ret: TypeSig,
}

impl MemberSig {
    pub fn new(kind: MemberKind, params: Vec<TypeSig>, ret: TypeSig) -> Self {
        MemberSig {
            name: kind.member_name(),
            kind,
            params,
            ret,
        }
    }

    /// Signature of a member taking `P` and returning `R`.
    pub fn of<P: Params, R: 'static>(kind: MemberKind) -> Self {
        MemberSig::new(kind, P::signature(), TypeSig::of::<R>())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &MemberKind {
        &self.kind
    }

    pub fn params(&self) -> &[TypeSig] {
        &self.params
    }

    pub fn ret(&self) -> TypeSig {
        self.ret
    }

    /// Whether `args` carries exactly the parameter types of this member.
    pub fn accepts(&self, args: &[Box<dyn Any>]) -> bool {
        self.params.len() == args.len()
            && self
                .params
                .iter()
                .zip(args)
                .all(|(param, arg)| param.id() == (**arg).type_id())
    }
}

impl fmt::Display for MemberSig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{param}")?;
        }
        f.write_str(")")?;
        if !self.ret.is_unit() {
            write!(f, " -> {}", self.ret)?;
        }
        Ok(())
    }
}

// =============================================================================
// Property view
// =============================================================================

/// Accessors regrouped under the property (or indexer) they belong to.
#[derive(Clone, Copy, Debug)]
pub struct Property<'a> {
    name: &'a str,
    getter: Option<&'a MemberSig>,
    setter: Option<&'a MemberSig>,
}

impl<'a> Property<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    pub fn getter(&self) -> Option<&'a MemberSig> {
        self.getter
    }

    pub fn setter(&self) -> Option<&'a MemberSig> {
        self.setter
    }

    pub fn is_indexer(&self) -> bool {
        self.name == INDEXER
    }

    /// Index parameters: all getter params, or all setter params but the value.
    pub fn index_params(&self) -> &'a [TypeSig] {
        match (self.getter, self.setter) {
            (Some(getter), _) => getter.params(),
            (None, Some(setter)) => {
                let params = setter.params();
                &params[..params.len().saturating_sub(1)]
            }
            (None, None) => &[],
        }
    }

    pub fn value_type(&self) -> Option<TypeSig> {
        self.getter
            .map(MemberSig::ret)
            .or_else(|| self.setter.and_then(|s| s.params().last().copied()))
    }
}

/// Group accessor signatures into properties, in order of first appearance.
pub fn collect_properties<'a>(sigs: impl IntoIterator<Item = &'a MemberSig>) -> Vec<Property<'a>> {
    let mut properties: Vec<Property<'a>> = Vec::new();
    for sig in sigs {
        let Some(name) = sig.kind().property() else {
            continue;
        };
        let index = match properties.iter().position(|p| p.name == name) {
            Some(index) => index,
            None => {
                properties.push(Property { name, getter: None, setter: None });
                properties.len() - 1
            }
        };
        let property = &mut properties[index];
        if sig.kind().is_getter() && property.getter.is_none() {
            property.getter = Some(sig);
        } else if sig.kind().is_setter() && property.setter.is_none() {
            property.setter = Some(sig);
        }
    }
    properties
}

// =============================================================================
// Params: typed parameter tuples
// =============================================================================

/// A tuple of parameter types that can describe itself and be rebuilt from
/// an [`Args`] list.
pub trait Params: Sized + 'static {
    fn signature() -> Vec<TypeSig>;
    fn unpack(args: Args) -> Result<Self, InvokeError>;
}

fn take<T: 'static>(arg: Option<Box<dyn Any>>, index: usize) -> Result<T, InvokeError> {
    let expected = core::any::type_name::<T>();
    arg.ok_or(InvokeError::ArgumentType { index, expected })?
        .downcast::<T>()
        .map(|value| *value)
        .map_err(|_| InvokeError::ArgumentType { index, expected })
}

impl Params for () {
    fn signature() -> Vec<TypeSig> {
        Vec::new()
    }

    fn unpack(args: Args) -> Result<Self, InvokeError> {
        if args.is_empty() {
            Ok(())
        } else {
            Err(InvokeError::Arity { expected: 0, found: args.len() })
        }
    }
}

macro_rules! impl_params {
    ($($name:ident $index:tt),+) => {
        impl<$($name: 'static),+> Params for ($($name,)+) {
            fn signature() -> Vec<TypeSig> {
                vec![$(TypeSig::of::<$name>()),+]
            }

            fn unpack(args: Args) -> Result<Self, InvokeError> {
                let expected = [$($index),+].len();
                if args.len() != expected {
                    return Err(InvokeError::Arity { expected, found: args.len() });
                }
                let mut args = args.into_iter();
                Ok(($(take::<$name>(args.next(), $index)?,)+))
            }
        }
    };
}

impl_params!(A 0);
impl_params!(A 0, B 1);
impl_params!(A 0, B 1, C 2);
impl_params!(A 0, B 1, C 2, D 3);
impl_params!(A 0, B 1, C 2, D 3, E 4);
impl_params!(A 0, B 1, C 2, D 3, E 4, F 5);
impl_params!(A 0, B 1, C 2, D 3, E 4, F 5, G 6);
impl_params!(A 0, B 1, C 2, D 3, E 4, F 5, G 6, H 7);

// =============================================================================
// Tests
// =============================================================================
