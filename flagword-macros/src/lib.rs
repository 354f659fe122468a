use syn::parse_macro_input;

use crate::gen::label_set_impl;

mod ast;
mod gen;

#[proc_macro]
pub fn label_set(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
    label_set_impl(parse_macro_input!(tokens)).into()
}
