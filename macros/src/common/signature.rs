//! Method signature analysis
//!
//! Decides whether a method can cross an adapter boundary and extracts the
//! parameter and return types the descriptors are built from.
//!
//! ```text
//! fn name(&self, a: A, b: B) -> R
//!         ^^^^^  ^^^^^^^^^^     ^
//!         |      owned types    owned type, `()` when omitted
//!         shared receiver only
//! ```

use proc_macro2::{TokenStream as TokenStream2, TokenTree};
use quote::{ToTokens, format_ident, quote};
use syn::{Error, FnArg, Ident, ReturnType, Signature, Type};

/// Largest parameter list the runtime `Params` tuples cover.
pub const MAX_PARAMS: usize = 8;

const BORROWED: &str = "borrowed types cannot cross an adapter; use an owned or `'static` type";

/// A method that can be exposed as a member.
pub struct Exposed {
    pub ident: Ident,
    pub params: Vec<Type>,
    pub ret: Option<Type>,
}

impl Exposed {
    /// `__arg0, __arg1, ..` bindings, one per parameter.
    pub fn bindings(&self) -> Vec<Ident> {
        (0..self.params.len()).map(|i| format_ident!("__arg{}", i)).collect()
    }

    /// The parameter tuple type, `()` for no parameters.
    pub fn params_type(&self) -> TokenStream2 {
        let params = &self.params;
        quote!((#(#params,)*))
    }

    pub fn ret_type(&self) -> TokenStream2 {
        match &self.ret {
            Some(ty) => ty.to_token_stream(),
            None => quote!(()),
        }
    }

    pub fn returns_unit(&self) -> bool {
        match &self.ret {
            None => true,
            Some(Type::Tuple(tuple)) => tuple.elems.is_empty(),
            Some(_) => false,
        }
    }
}

/// Check `sig` and extract its exposed form.
///
/// `allow_self` admits `Self` in parameter and return types; it is only
/// meaningful inside a concrete type's own impl block.
pub fn analyze(sig: &Signature, allow_self: bool) -> syn::Result<Exposed> {
    if let Some(token) = &sig.asyncness {
        return Err(Error::new_spanned(token, "async methods cannot be exposed"));
    }
    if let Some(token) = &sig.unsafety {
        return Err(Error::new_spanned(token, "unsafe methods cannot be exposed"));
    }
    if let Some(variadic) = &sig.variadic {
        return Err(Error::new_spanned(variadic, "variadic methods cannot be exposed"));
    }
    if !sig.generics.params.is_empty() || sig.generics.where_clause.is_some() {
        return Err(Error::new_spanned(&sig.generics, "generic methods cannot be exposed"));
    }

    let receiver = sig
        .receiver()
        .ok_or_else(|| Error::new_spanned(&sig.ident, "exposed methods need a `&self` receiver"))?;
    if receiver.reference.is_none() || receiver.mutability.is_some() {
        return Err(Error::new_spanned(
            receiver,
            "exposed methods need a `&self` receiver; keep mutable state behind interior mutability",
        ));
    }

    let mut params = Vec::new();
    for input in sig.inputs.iter().skip(1) {
        if let FnArg::Typed(typed) = input {
            check_owned(&typed.ty, allow_self)?;
            params.push((*typed.ty).clone());
        }
    }
    if params.len() > MAX_PARAMS {
        return Err(Error::new_spanned(
            &sig.inputs,
            format!("exposed methods take at most {MAX_PARAMS} parameters"),
        ));
    }

    let ret = match &sig.output {
        ReturnType::Default => None,
        ReturnType::Type(_, ty) => {
            check_owned(ty, allow_self)?;
            Some((**ty).clone())
        }
    };

    Ok(Exposed {
        ident: sig.ident.clone(),
        params,
        ret,
    })
}

fn check_owned(ty: &Type, allow_self: bool) -> syn::Result<()> {
    match borrow_in(ty.to_token_stream(), allow_self) {
        Some(reason) => Err(Error::new_spanned(ty, reason)),
        None => Ok(()),
    }
}

// Token walk rather than a type visitor: any non-'static lifetime, bare
// reference or `impl` anywhere inside the type disqualifies it.
fn borrow_in(tokens: TokenStream2, allow_self: bool) -> Option<&'static str> {
    let mut iter = tokens.into_iter().peekable();
    while let Some(tree) = iter.next() {
        match tree {
            TokenTree::Group(group) => {
                if let Some(reason) = borrow_in(group.stream(), allow_self) {
                    return Some(reason);
                }
            }
            TokenTree::Punct(punct) if punct.as_char() == '&' => match iter.peek() {
                Some(TokenTree::Punct(next)) if next.as_char() == '\'' => {}
                _ => return Some(BORROWED),
            },
            TokenTree::Punct(punct) if punct.as_char() == '\'' => match iter.next() {
                Some(TokenTree::Ident(lifetime)) if lifetime == "static" => {}
                _ => return Some(BORROWED),
            },
            TokenTree::Ident(ident) if ident == "impl" => {
                return Some("`impl Trait` types cannot cross an adapter");
            }
            TokenTree::Ident(ident) if ident == "Self" && !allow_self => {
                return Some("`Self` cannot appear in an interface member");
            }
            _ => {}
        }
    }
    None
}
