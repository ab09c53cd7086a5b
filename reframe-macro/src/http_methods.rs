use proc_macro::TokenStream;
use quote::format_ident;

/// Method tags accepted by `#[route(method = "...")]`. Each one is also the
/// name of a shorthand handler attribute.
pub const SUPPORTED_METHODS: [&str; 6] = ["get", "post", "put", "patch", "delete", "all"];

/// `HttpMethod` variant for a lowercase method tag.
pub fn method_variant(tag: &str) -> syn::Ident {
    let mut chars = tag.chars();
    let variant: String = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    };
    format_ident!("{}", variant)
}

pub fn http_method_attribute(_method: &str, _attr: TokenStream, item: TokenStream) -> TokenStream {
    // Inside a #[routes] impl these attributes are read and stripped before
    // they expand. Anywhere else the item passes through unchanged.
    item
}
