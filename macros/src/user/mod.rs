//! User-facing macro implementations
//!
//! | Macro | Usage | Purpose |
//! |-------|-------|---------|
//! | `#[interface]` | on trait | Interface descriptor + adapter forwarding impl |
//! | `#[shape]` | on inherent impl | Runtime shape (`impl Object`) of a type |

pub mod interface;
pub mod shape;

pub use interface::{expand_interface, InterfaceArgs};
pub use shape::{expand_shape, ShapeArgs};
