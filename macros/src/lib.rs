//! Procedural macros for the quack structural adaptation system
//!
//! | Macro | Target | Purpose |
//! |-------|--------|---------|
//! | `#[interface]` | trait | Describe a capability interface and let adapters implement it |
//! | `#[shape]` | inherent impl | Describe a concrete type's public members |
//!
//! ## Example
//!
//! ```ignore
//! #[quack::interface]
//! trait Identified {
//!     #[quack(get = "ID")]
//!     fn id(&self) -> i32;
//! }
//!
//! struct Customer { id: i32 }
//!
//! #[quack::shape]
//! impl Customer {
//!     #[quack(get = "ID")]
//!     pub fn id(&self) -> i32 { self.id }
//! }
//!
//! // Customer never implemented Identified:
//! let identified = quack::adapt::<dyn Identified>(Arc::new(Customer { id: 7 }))?;
//! assert_eq!(identified.id(), 7);
//! ```

use proc_macro::TokenStream;
use syn::parse_macro_input;

// =============================================================================
// Module Declarations (two-tier: common / user)
// =============================================================================

mod common;
mod user;

// =============================================================================
// User-facing Macros (user/)
// =============================================================================

/// Turn a trait into a capability interface.
///
/// Adds `quack::Object` as a supertrait and generates the interface
/// descriptor plus `impl Trait for quack::Adapter<dyn Trait>`.
///
/// Member attributes:
/// - `#[quack(name = "X")]` exposes the method under another name
/// - `#[quack(get = "P")]` / `#[quack(set = "P")]` declare property accessors
/// - `#[quack(index_get)]` / `#[quack(index_set)]` declare indexer accessors
///
/// A method with a default body is recorded as provided; adapting to such an
/// interface fails with `SynthesisError::NotAnInterface`.
///
/// Rejected at compile time: generic traits or methods, associated types and
/// consts, methods without a `&self` receiver, and borrowed or `impl Trait`
/// parameter and return types.
///
/// Optional argument: `#[quack::interface(name = "IAccount")]` overrides the
/// interface name used in errors and adapter names.
#[proc_macro_attribute]
pub fn interface(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = user::InterfaceArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as syn::ItemTrait);
    match user::expand_interface(args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

/// Publish the runtime shape of a type from its inherent impl block.
///
/// Generates `impl quack::Object for Type`. Every `pub fn` taking `&self`
/// with owned parameter types becomes a member; accessor attributes are the
/// same as on `#[interface]`, plus `#[quack(skip)]`.
///
/// Arguments:
/// - `implements(TraitA, TraitB)`: the type implements these interfaces
///   itself, so adapting to them returns the value unchanged
/// - `holds`: the type holds another value (via its `quack::Holder` impl)
///   which adaptation unwraps once
/// - `name = "X"`: shape name used in errors and adapter names
#[proc_macro_attribute]
pub fn shape(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut args = user::ShapeArgs::default();
    let parser = syn::meta::parser(|meta| args.parse(meta));
    parse_macro_input!(attr with parser);

    let item = parse_macro_input!(item as syn::ItemImpl);
    match user::expand_shape(args, item) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
