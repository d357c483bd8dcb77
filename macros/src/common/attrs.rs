//! `#[quack(..)]` member attributes
//!
//! ```text
//! #[quack(name = "Reset")]   plain method under another name
//! #[quack(get = "ID")]       getter of property ID   -> get_ID
//! #[quack(set = "ID")]       setter of property ID   -> set_ID
//! #[quack(index_get)]        indexer getter          -> get_Item
//! #[quack(index_set)]        indexer setter          -> set_Item
//! #[quack(skip)]             not part of the shape
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{Attribute, Error, Ident, LitStr};

use super::signature::Exposed;

#[derive(Default)]
pub enum Accessor {
    #[default]
    Method,
    Get(LitStr),
    Set(LitStr),
    IndexGet,
    IndexSet,
}

/// Parsed `#[quack(..)]` attributes of one method.
#[derive(Default)]
pub struct MemberAttrs {
    origin: Option<Attribute>,
    pub skip: bool,
    pub name: Option<LitStr>,
    pub accessor: Accessor,
}

impl MemberAttrs {
    /// Parse and remove every `#[quack(..)]` attribute from `attrs`.
    pub fn take(attrs: &mut Vec<Attribute>) -> syn::Result<Self> {
        let (ours, rest): (Vec<_>, Vec<_>) = std::mem::take(attrs)
            .into_iter()
            .partition(|attr| attr.path().is_ident("quack"));
        *attrs = rest;

        let mut out = MemberAttrs::default();
        for attr in &ours {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    out.skip = true;
                    return Ok(());
                }
                if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse()?);
                    return Ok(());
                }

                let accessor = if meta.path.is_ident("get") {
                    Accessor::Get(meta.value()?.parse()?)
                } else if meta.path.is_ident("set") {
                    Accessor::Set(meta.value()?.parse()?)
                } else if meta.path.is_ident("index_get") {
                    Accessor::IndexGet
                } else if meta.path.is_ident("index_set") {
                    Accessor::IndexSet
                } else {
                    return Err(meta.error(
                        "expected `name`, `get`, `set`, `index_get`, `index_set` or `skip`",
                    ));
                };
                if !matches!(out.accessor, Accessor::Method) {
                    return Err(meta.error("a member has at most one accessor role"));
                }
                out.accessor = accessor;
                Ok(())
            })?;
        }
        out.origin = ours.into_iter().next();
        Ok(out)
    }

    /// Whether the method carried any `#[quack(..)]` attribute.
    pub fn is_present(&self) -> bool {
        self.origin.is_some()
    }

    pub fn error(&self, fallback: &Ident, message: &str) -> Error {
        match &self.origin {
            Some(attr) => Error::new_spanned(attr, message),
            None => Error::new_spanned(fallback, message),
        }
    }

    /// Arity and return checks for accessor roles.
    pub fn check(&self, exposed: &Exposed) -> syn::Result<()> {
        let arity = exposed.params.len();
        let unit = exposed.returns_unit();
        let problem = match &self.accessor {
            Accessor::Method => None,
            _ if self.name.is_some() => Some("`name` applies to plain methods; accessors are named by their property"),
            Accessor::Get(_) if arity != 0 || unit => Some("a getter takes no parameters and returns a value"),
            Accessor::Set(_) if arity != 1 || !unit => Some("a setter takes exactly one parameter and returns nothing"),
            Accessor::IndexGet if arity == 0 || unit => Some("an indexer getter takes the index and returns a value"),
            Accessor::IndexSet if arity < 2 || !unit => {
                Some("an indexer setter takes the index then the value and returns nothing")
            }
            _ => None,
        };
        match problem {
            Some(message) => Err(self.error(&exposed.ident, message)),
            None => Ok(()),
        }
    }

    /// `::quack::MemberKind` expression for the method `ident`.
    pub fn kind_tokens(&self, ident: &Ident) -> TokenStream2 {
        match &self.accessor {
            Accessor::Method => {
                let name = match &self.name {
                    Some(name) => name.value(),
                    None => ident.unraw().to_string(),
                };
                quote!(::quack::MemberKind::method(#name))
            }
            Accessor::Get(property) => quote!(::quack::MemberKind::getter(#property)),
            Accessor::Set(property) => quote!(::quack::MemberKind::setter(#property)),
            Accessor::IndexGet => quote!(::quack::MemberKind::IndexGetter),
            Accessor::IndexSet => quote!(::quack::MemberKind::IndexSetter),
        }
    }
}
