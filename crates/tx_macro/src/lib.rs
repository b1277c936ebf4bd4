extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, FnArg, ItemFn, Pat, PatType};

/// Runs the body inside a transaction opened on the `tx` argument.
/// `Ok` commits the staged history, `Err` discards it.
#[proc_macro_attribute]
pub fn tx(_args: TokenStream, input: TokenStream) -> TokenStream {
    let input_fn = parse_macro_input!(input as ItemFn);
    let attrs = &input_fn.attrs;
    let vis = &input_fn.vis;
    let block = &input_fn.block;
    let fn_name = &input_fn.sig.ident;
    let generics = &input_fn.sig.generics;
    let where_clause = &input_fn.sig.generics.where_clause;
    let fn_args = &input_fn.sig.inputs;
    let fn_return = &input_fn.sig.output;

    let arg_list: Vec<_> = fn_args
        .iter()
        .map(|arg| match arg {
            FnArg::Typed(PatType { pat, .. }) => match pat.as_ref() {
                Pat::Ident(ident) => {
                    let ident = &ident.ident;
                    quote! { #ident }
                }
                pat => quote! { #pat },
            },
            FnArg::Receiver(_) => quote!(self),
        })
        .collect();

    let wrapped_fn_name = quote::format_ident!("{}_inner", fn_name);
    let gen = quote! {
        fn #wrapped_fn_name #generics (#fn_args) #fn_return #where_clause {
            #block
        }

        #(#attrs)*
        #vis fn #fn_name #generics (#fn_args) #fn_return #where_clause {
            tx.start_transaction();
            match Self::#wrapped_fn_name(#(#arg_list),*) {
                Ok(result) => {
                    tx.commit_transaction();
                    Ok(result)
                }
                Err(e) => {
                    tx.abort_transaction();
                    Err(e)
                }
            }
        }
    };

    TokenStream::from(gen)
}
