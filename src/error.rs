//! Error types.
//!
//! ```text
//! AdaptError            surfaced by adapt::<T>()
//!   └── SynthesisError  NotAnInterface | UnresolvedMember | IncompatibleReturn
//!                       | ForeignValue | ForeignInterface
//!
//! InvokeError           dynamic member invocation (Shape::call, thunks)
//! ```

use thiserror::Error;

/// Why an adapter could not be synthesized for a (type, interface) pair.
///
/// Failures are never cached: a later request for the same pair runs
/// synthesis again and fails the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SynthesisError {
    #[error("`{interface}` is not a pure interface: `{member}` has a provided body")]
    NotAnInterface { interface: String, member: String },

    #[error("`{concrete}` has no member matching `{member}` required by `{interface}`")]
    UnresolvedMember {
        concrete: String,
        interface: String,
        member: String,
    },

    #[error("`{concrete}::{member}` returns `{found}` but `{interface}` expects `{expected}`")]
    IncompatibleReturn {
        concrete: String,
        interface: String,
        member: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("adapter type `{adapter}` cannot hold a `{value}`")]
    ForeignValue { adapter: String, value: String },

    #[error("adapter type `{adapter}` does not implement `{interface}`")]
    ForeignInterface { adapter: String, interface: String },
}

/// A failed adaptation. No adapter object exists when this is returned.
#[derive(Debug, Clone, Error)]
#[error("cannot adapt `{concrete}` to `{interface}`")]
pub struct AdaptError {
    concrete: String,
    interface: String,
    #[source]
    source: SynthesisError,
}

impl AdaptError {
    pub fn new(concrete: impl Into<String>, interface: impl Into<String>, source: SynthesisError) -> Self {
        AdaptError {
            concrete: concrete.into(),
            interface: interface.into(),
            source,
        }
    }

    pub fn concrete(&self) -> &str {
        &self.concrete
    }

    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// The underlying synthesis failure.
    pub fn kind(&self) -> &SynthesisError {
        &self.source
    }

    pub fn into_kind(self) -> SynthesisError {
        self.source
    }
}

/// Failure while invoking a member through its type-erased thunk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("`{shape}` has no member `{member}` accepting the given arguments")]
    UnknownMember { shape: String, member: String },

    #[error("expected {expected} argument(s), got {found}")]
    Arity { expected: usize, found: usize },

    #[error("argument {index} is not a `{expected}`")]
    ArgumentType { index: usize, expected: &'static str },

    #[error("receiver `{found}` is not a `{expected}`")]
    Receiver { expected: &'static str, found: String },

    #[error("return value is not a `{expected}`")]
    ReturnType { expected: &'static str },

    #[error("adapter has no slot {slot}")]
    Slot { slot: usize },
}
