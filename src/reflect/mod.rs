//! # Layer 0: Reflection
//!
//! Runtime descriptors standing in for the type information the adapter
//! layer needs:
//! - `sig.rs`: member signatures, accessor naming and typed parameter tuples.
//! - `shape.rs`: member tables of concrete types (`Shape`, `Member`, thunks).
//! - `interface.rs`: capability interface descriptors (`InterfaceInfo`).
//! - `object.rs`: the `Object` and `Holder` traits values implement.

pub mod interface;
pub mod object;
pub mod shape;
pub mod sig;

pub use interface::{Interface, InterfaceBuilder, InterfaceInfo};
pub use object::{Holder, Object};
pub use shape::{Member, Shape, ShapeBuilder, ShapeKey, Thunk};
pub use sig::{Args, INDEXER, MemberKind, MemberSig, Params, Property, TypeSig, arg};
