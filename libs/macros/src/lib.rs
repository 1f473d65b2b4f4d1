//! Procedural macros shared by the fomodel crates.

use proc_macro::TokenStream;
use proc_macro2::Literal;
use quote::{quote, ToTokens};
use syn::{parse, FnArg, ItemFn, Pat};

/// Wrap a function body in `log::trace!` messages reporting
/// the arguments it was called with and the value it produced.
///
/// Takes a single string literal naming the log target,
/// e.g. `#[traced("fomodel::interpretation")]`.
/// Arguments must implement `Debug` and `Copy` (parser inputs are `&str`).
#[proc_macro_attribute]
pub fn traced(attrs: TokenStream, item: TokenStream) -> TokenStream {
    let target: Literal = match parse(attrs) {
        Ok(literal) => literal,
        Err(..) => panic!("#[traced] takes one string literal naming the log target"),
    };

    let mut function: ItemFn = match parse(item) {
        Ok(function) => function,
        Err(..) => panic!("#[traced] can only be applied to functions"),
    };

    let arguments = function
        .sig
        .inputs
        .iter()
        .filter_map(|input| match input {
            FnArg::Typed(typed) => match &*typed.pat {
                Pat::Ident(pattern) => Some(pattern.ident.clone()),
                _ => None,
            },
            FnArg::Receiver(_) => None,
        })
        .collect::<Vec<_>>();

    let name = function.sig.ident.to_string();
    let statements = &function.block.stmts;
    let block = quote! {{
        let __traced_arguments = (#(#arguments,)*);
        log::trace!(target: #target, "{}{:?}", #name, __traced_arguments);
        let result = { #(#statements)* };
        log::trace!(target: #target, "{}{:?} -> {:?}", #name, __traced_arguments, result);
        result
    }};

    function.block = match parse(block.into()) {
        Ok(block) => block,
        Err(..) => panic!("#[traced] produced an invalid function body"),
    };
    function.to_token_stream().into()
}
