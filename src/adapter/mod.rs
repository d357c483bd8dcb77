//! # Layer 1: Adapters
//!
//! ```text
//! matcher.rs     interface member -> first structurally matching concrete member
//! synthesize.rs  (Shape, InterfaceInfo) -> AdapterType, all-or-nothing
//! cache.rs       (ShapeKey, TypeId) -> Arc<AdapterType>, publish-if-absent
//! instance.rs    Adapter<dyn Trait>: held value + forwarding table
//! ```

pub mod cache;
pub mod instance;
pub mod matcher;
pub mod synthesize;

pub use cache::{AdapterCache, CacheKey};
pub use instance::Adapter;
pub use synthesize::{AdapterType, synthesize};
