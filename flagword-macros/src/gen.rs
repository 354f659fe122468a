use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Error, Fields, LitStr, Result};

use crate::ast::{is_label_attr, parse_label_attr, Input};

pub fn label_set_impl(input: Input) -> TokenStream {
    match generate(input) {
        Ok(result) => result,
        Err(e) => e.into_compile_error(),
    }
}

fn generate(input: Input) -> Result<TokenStream> {
    let crate_path = input.crate_path;
    let mut item = input.item;

    if !item.generics.params.is_empty() {
        return Err(Error::new(
            item.generics.span(),
            "label sets cannot be generic",
        ));
    }

    let mut labels = Vec::new();
    let mut seen: BTreeMap<String, LitStr> = BTreeMap::new();
    for variant in &mut item.variants {
        if !matches!(variant.fields, Fields::Unit) {
            return Err(Error::new(
                variant.fields.span(),
                "label set variants cannot have fields",
            ));
        }

        let mut label = None;
        for attr in variant.attrs.iter().filter(|attr| is_label_attr(attr)) {
            if label.is_some() {
                return Err(Error::new(attr.span(), "duplicate `label` attribute"));
            }
            label = Some(parse_label_attr(attr)?);
        }
        variant.attrs.retain(|attr| !is_label_attr(attr));

        let label =
            label.unwrap_or_else(|| LitStr::new(&variant.ident.to_string(), variant.ident.span()));
        if let Some(previous) = seen.insert(label.value(), label.clone()) {
            let mut error = Error::new(
                label.span(),
                format!("label {:?} is used more than once", label.value()),
            );
            error.combine(Error::new(previous.span(), "first used here"));
            return Err(error);
        }
        labels.push((variant.ident.clone(), label));
    }

    let name = &item.ident;
    let label_entries = labels.iter().map(|(variant, label)| {
        quote! { #crate_path::Label::new(#label, #name::#variant as u64) }
    });
    let match_arms = labels.iter().enumerate().map(|(index, (variant, _))| {
        quote! { #name::#variant => <Self as #crate_path::LabelSet>::LABELS[#index] }
    });

    Ok(quote! {
        #item

        impl #crate_path::LabelSet for #name {
            const LABELS: &'static [#crate_path::Label] = &[#(#label_entries),*];

            fn label(self) -> #crate_path::Label {
                match self {
                    #(#match_arms,)*
                }
            }
        }
    })
}
