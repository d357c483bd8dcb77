//! # quack
//!
//! Structural interface adaptation: use any value through a trait it never
//! implemented, as long as its shape has the trait's members.
//!
//! ## Architecture
//!
//! ### 1. Descriptors
//! Types expose a runtime [`Shape`] (their public members, each a typed
//! thunk). Traits expose an [`InterfaceInfo`] (their ordered member
//! signatures). Property accessors use the names `get_X`/`set_X`, indexers
//! `get_Item`/`set_Item`.
//!
//! ### 2. Synthesis
//! For an unseen `(concrete type, interface)` pair, every interface member
//! is matched by name and parameter types against the concrete shape. The
//! first match wins. The result is an [`AdapterType`]: one forwarding slot
//! per interface member.
//!
//! ### 3. Dispatch
//! [`adapt`] tries, in order: direct satisfaction, one level of holder
//! unwrapping, then the cached or freshly synthesized adapter type.
//!
//! ```text
//! +-------------------------------------------------------------------+
//! |  Layer 0: Reflection                                              |
//! |  - TypeSig, MemberSig, Params, Shape, InterfaceInfo, Object       |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 1: Adapters                                                |
//! |  - matcher, synthesize, AdapterType, AdapterCache, Adapter<I>     |
//! +-------------------------------------------------------------------+
//!                                |
//!                                v
//! +-------------------------------------------------------------------+
//! |  Layer 2: User API                                                |
//! |  - adapt, AdaptExt, #[interface], #[shape]                        |
//! +-------------------------------------------------------------------+
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicI64, Ordering};
//! use quack::prelude::*;
//!
//! #[quack::interface]
//! trait Account {
//!     #[quack(get = "Balance")]
//!     fn balance(&self) -> i64;
//!     fn deposit(&self, amount: i64);
//! }
//!
//! struct Wallet { cents: AtomicI64 }
//!
//! #[quack::shape]
//! impl Wallet {
//!     #[quack(get = "Balance")]
//!     pub fn balance(&self) -> i64 { self.cents.load(Ordering::SeqCst) }
//!     pub fn deposit(&self, amount: i64) { self.cents.fetch_add(amount, Ordering::SeqCst); }
//! }
//!
//! let wallet = Arc::new(Wallet { cents: AtomicI64::new(0) });
//! let account = wallet.adapt::<dyn Account>()?;
//! account.deposit(250);
//! assert_eq!(wallet.balance(), 250);
//! ```

// Allow `::quack` paths emitted by the macros to resolve inside the crate
extern crate self as quack;

// =============================================================================
// Layer 0: Reflection
// =============================================================================
pub mod reflect;

// =============================================================================
// Layer 1: Adapters
// =============================================================================
pub mod adapter;

// =============================================================================
// Layer 2: Dispatch
// =============================================================================
pub mod dispatch;

pub mod error;

#[cfg(test)]
mod fixtures;

// =============================================================================
// Re-exports at Crate Root
// =============================================================================

pub use adapter::{Adapter, AdapterCache, AdapterType};
pub use dispatch::{AdaptExt, adapt, direct};
pub use error::{AdaptError, InvokeError, SynthesisError};
pub use reflect::{
    Args, Holder, INDEXER, Interface, InterfaceInfo, MemberKind, MemberSig, Object, Shape, ShapeKey,
    TypeSig, arg,
};

#[cfg(feature = "derive")]
pub use macros::{interface, shape};

/// Common items for adapting values.
pub mod prelude {
    pub use crate::dispatch::{AdaptExt, adapt};
    pub use crate::error::AdaptError;
    pub use crate::reflect::{Holder, Interface, Object};
}
