//! `#[quack::interface]` on a trait
//!
//! ```ignore
//! #[quack::interface]
//! pub trait Account {
//!     #[quack(get = "Balance")]
//!     fn balance(&self) -> i64;
//!     fn deposit(&self, amount: i64);
//! }
//! ```
//!
//! expands to the trait (with `::quack::Object` added as a supertrait) plus:
//!
//! ```ignore
//! impl ::quack::Interface for dyn Account {
//!     fn info() -> &'static ::quack::InterfaceInfo { /* get_Balance, deposit */ }
//!     fn from_adapter(adapter: Arc<Adapter<Self>>) -> Arc<Self> { adapter }
//! }
//!
//! impl Debug for dyn Account { /* Account("Wallet.Account.Adapter") */ }
//!
//! impl Account for ::quack::Adapter<dyn Account> {
//!     fn balance(&self) -> i64 { /* forward slot 0 */ }
//!     fn deposit(&self, amount: i64) { /* forward slot 1 */ }
//! }
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Error, FnArg, ItemTrait, LitStr, Pat, PatIdent, TraitItem, TypeParamBound, parse_quote};

use crate::common::{MemberAttrs, analyze};

// =============================================================================
// Arguments: #[quack::interface(name = "..")]
// =============================================================================

#[derive(Default)]
pub struct InterfaceArgs {
    name: Option<LitStr>,
}

impl InterfaceArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
            Ok(())
        } else {
            Err(meta.error("expected `name = \"..\"`"))
        }
    }
}

// =============================================================================
// Expansion
// =============================================================================

pub fn expand_interface(args: InterfaceArgs, mut item: ItemTrait) -> syn::Result<TokenStream2> {
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(Error::new_spanned(&item.generics, "generic traits cannot be interfaces"));
    }
    if let Some(token) = &item.unsafety {
        return Err(Error::new_spanned(token, "unsafe traits cannot be interfaces"));
    }
    if let Some(token) = &item.auto_token {
        return Err(Error::new_spanned(token, "auto traits cannot be interfaces"));
    }
    check_supertraits(&item)?;
    if !has_object_bound(&item) {
        item.supertraits.push(parse_quote!(::quack::Object));
    }
    if item.colon_token.is_none() {
        item.colon_token = Some(Default::default());
    }

    let ident = item.ident.clone();
    let name = match args.name {
        Some(name) => name.value(),
        None => ident.unraw().to_string(),
    };

    let mut descriptors = Vec::new();
    let mut forwards = Vec::new();

    for trait_item in &mut item.items {
        let method = match trait_item {
            TraitItem::Fn(method) => method,
            other => return Err(Error::new_spanned(other, "interfaces declare methods only")),
        };

        let attrs = MemberAttrs::take(&mut method.attrs)?;
        if attrs.skip {
            return Err(attrs.error(&method.sig.ident, "every interface member is part of the contract and cannot be skipped"));
        }
        let exposed = analyze(&method.sig, false)?;
        attrs.check(&exposed)?;

        let kind = attrs.kind_tokens(&exposed.ident);
        let params = exposed.params_type();
        let ret = exposed.ret_type();
        let slot = descriptors.len();

        // A provided body makes the interface impure; synthesis refuses it,
        // so no adapter ever needs a forwarder for it.
        if method.default.is_some() {
            descriptors.push(quote!(.provided::<#params, #ret>(#kind)));
            continue;
        }
        descriptors.push(quote!(.member::<#params, #ret>(#kind)));

        let bindings = exposed.bindings();
        let mut sig = method.sig.clone();
        for (input, binding) in sig.inputs.iter_mut().skip(1).zip(&bindings) {
            if let FnArg::Typed(typed) = input {
                *typed.pat = Pat::Ident(PatIdent {
                    attrs: Vec::new(),
                    by_ref: None,
                    mutability: None,
                    ident: binding.clone(),
                    subpat: None,
                });
            }
        }
        forwards.push(quote! {
            #sig {
                ::quack::Adapter::<dyn #ident>::forward::<#ret>(
                    self,
                    #slot,
                    ::std::vec![#(::quack::arg(#bindings)),*],
                )
            }
        });
    }

    Ok(quote! {
        #item

        impl ::quack::Interface for dyn #ident {
            fn info() -> &'static ::quack::InterfaceInfo {
                static INFO: ::std::sync::OnceLock<::quack::InterfaceInfo> = ::std::sync::OnceLock::new();
                INFO.get_or_init(|| {
                    ::quack::InterfaceInfo::builder::<dyn #ident>(#name)
                        #(#descriptors)*
                        .build()
                })
            }

            fn from_adapter(
                adapter: ::std::sync::Arc<::quack::Adapter<Self>>,
            ) -> ::std::sync::Arc<Self> {
                adapter
            }
        }

        impl ::core::fmt::Debug for dyn #ident {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.debug_tuple(#name)
                    .field(&::quack::Object::shape(self).name())
                    .finish()
            }
        }

        impl #ident for ::quack::Adapter<dyn #ident> {
            #(#forwards)*
        }
    })
}

// Matching is flat over the trait's own members, so only marker bounds
// (and `Object` itself) may appear as supertraits.
fn check_supertraits(item: &ItemTrait) -> syn::Result<()> {
    for bound in &item.supertraits {
        let allowed = match bound {
            TypeParamBound::Lifetime(lifetime) => lifetime.ident == "static",
            TypeParamBound::Trait(bound) => bound
                .path
                .segments
                .last()
                .is_some_and(|segment| ["Send", "Sync", "Any", "Object"].iter().any(|name| segment.ident == name)),
            _ => false,
        };
        if !allowed {
            return Err(Error::new_spanned(
                bound,
                "interfaces are matched over their own members only; supertraits are limited to `Send`, `Sync`, `Any`, `Object` and `'static`",
            ));
        }
    }
    Ok(())
}

fn has_object_bound(item: &ItemTrait) -> bool {
    item.supertraits.iter().any(|bound| match bound {
        TypeParamBound::Trait(bound) => bound.path.segments.last().is_some_and(|segment| segment.ident == "Object"),
        _ => false,
    })
}
