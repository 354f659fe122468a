use syn::parse::{Parse, ParseStream};
use syn::{parenthesized, token, Attribute, ItemEnum, LitStr, Path, Result, Token};

pub struct Input {
    _paren_token: token::Paren,
    pub crate_path: Path,
    _comma_token: Token![,],
    pub item: ItemEnum,
}

impl Parse for Input {
    fn parse(input: ParseStream) -> Result<Self> {
        let content;
        Ok(Input {
            _paren_token: parenthesized!(content in input),
            crate_path: content.parse()?,
            _comma_token: content.parse()?,
            item: content.parse()?,
        })
    }
}

/// Returns whether an attribute is a `#[label(...)]` override.
pub fn is_label_attr(attr: &Attribute) -> bool {
    attr.path().is_ident("label")
}

/// Parses the string out of a `#[label("...")]` attribute.
pub fn parse_label_attr(attr: &Attribute) -> Result<LitStr> {
    attr.parse_args()
}
