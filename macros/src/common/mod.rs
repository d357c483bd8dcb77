// Common utilities shared by both attribute macros
//
// This module contains:
// - attrs: `#[quack(..)]` member attribute parsing
// - signature: exposability checks and parameter/return extraction

pub mod attrs;
pub mod signature;

pub use attrs::MemberAttrs;
pub use signature::analyze;
