//! `#[quack::shape]` on an inherent impl block
//!
//! Every `pub fn` with a `&self` receiver and owned parameter types becomes a
//! member of the type's runtime shape. Other methods (constructors, private
//! helpers, `&mut self`) are left out silently unless they carry a
//! `#[quack(..)]` attribute, which turns the omission into an error.
//!
//! ```ignore
//! #[quack::shape(implements(Named), holds)]
//! impl Wallet {
//!     pub fn new() -> Self { .. }             // no receiver: not a member
//!     #[quack(get = "Balance")]
//!     pub fn balance(&self) -> i64 { .. }     // get_Balance
//!     pub fn deposit(&self, amount: i64) { .. }
//! }
//! ```

use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::meta::ParseNestedMeta;
use syn::{Error, ImplItem, ItemImpl, LitStr, Path, Type, Visibility};

use crate::common::{MemberAttrs, analyze};

// =============================================================================
// Arguments: #[quack::shape(implements(A, B), holds, name = "..")]
// =============================================================================

#[derive(Default)]
pub struct ShapeArgs {
    name: Option<LitStr>,
    implements: Vec<Path>,
    holds: bool,
}

impl ShapeArgs {
    pub fn parse(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("holds") {
            self.holds = true;
            Ok(())
        } else if meta.path.is_ident("name") {
            self.name = Some(meta.value()?.parse()?);
            Ok(())
        } else if meta.path.is_ident("implements") {
            meta.parse_nested_meta(|inner| {
                self.implements.push(inner.path);
                Ok(())
            })
        } else {
            Err(meta.error("expected `implements(..)`, `holds` or `name = \"..\"`"))
        }
    }
}

// =============================================================================
// Expansion
// =============================================================================

pub fn expand_shape(args: ShapeArgs, mut item: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(Error::new_spanned(path, "#[quack::shape] goes on an inherent impl block"));
    }
    if !item.generics.params.is_empty() || item.generics.where_clause.is_some() {
        return Err(Error::new_spanned(&item.generics, "generic types cannot have a shape"));
    }

    let self_ty = (*item.self_ty).clone();
    let name = match args.name {
        Some(name) => name.value(),
        None => type_name(&self_ty)?,
    };

    let mut members = Vec::new();
    for impl_item in &mut item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let attrs = MemberAttrs::take(&mut method.attrs)?;
        if attrs.skip {
            continue;
        }
        let explicit = attrs.is_present();

        if !matches!(method.vis, Visibility::Public(_)) {
            if explicit {
                return Err(attrs.error(&method.sig.ident, "only `pub` methods can be members"));
            }
            continue;
        }
        let exposed = match analyze(&method.sig, true) {
            Ok(exposed) => exposed,
            Err(err) if explicit => return Err(err),
            Err(_) => continue,
        };
        attrs.check(&exposed)?;

        let kind = attrs.kind_tokens(&exposed.ident);
        let ident = &exposed.ident;
        let params = &exposed.params;
        let bindings = exposed.bindings();
        members.push(quote! {
            .member(#kind, |this: &#self_ty, (#(#bindings,)*): (#(#params,)*)| {
                <#self_ty>::#ident(this #(, #bindings)*)
            })
        });
    }

    let casts = args.implements.iter().map(|path| {
        quote! {
            .implements::<dyn #path>(
                |this: ::std::sync::Arc<#self_ty>| -> ::std::sync::Arc<dyn #path> { this }
            )
        }
    });

    let held = args.holds.then(|| {
        quote! {
            fn held_value(&self) -> ::core::option::Option<::std::sync::Arc<dyn ::quack::Object>> {
                ::core::option::Option::Some(::quack::Object::into_object(::quack::Holder::value(self)))
            }
        }
    });

    Ok(quote! {
        #item

        impl ::quack::Object for #self_ty {
            fn shape(&self) -> &::quack::Shape {
                static SHAPE: ::std::sync::OnceLock<::quack::Shape> = ::std::sync::OnceLock::new();
                SHAPE.get_or_init(|| {
                    ::quack::Shape::builder::<#self_ty>(#name)
                        #(#members)*
                        #(#casts)*
                        .build()
                })
            }

            fn as_any(&self) -> &dyn ::core::any::Any {
                self
            }

            fn into_any(
                self: ::std::sync::Arc<Self>,
            ) -> ::std::sync::Arc<dyn ::core::any::Any + ::core::marker::Send + ::core::marker::Sync> {
                self
            }

            fn into_object(self: ::std::sync::Arc<Self>) -> ::std::sync::Arc<dyn ::quack::Object> {
                self
            }

            #held
        }
    })
}

fn type_name(ty: &Type) -> syn::Result<String> {
    if let Type::Path(path) = ty {
        if let Some(segment) = path.path.segments.last() {
            return Ok(segment.ident.unraw().to_string());
        }
    }
    Err(Error::new_spanned(ty, "cannot name this type; pass `name = \"..\"`"))
}
