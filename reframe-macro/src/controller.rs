use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    ext::IdentExt, parse::Parse, parse::ParseStream, parse_macro_input, punctuated::Punctuated,
    Attribute, ImplItem, ItemImpl, ItemStruct, LitStr, Meta, Token,
};

use crate::http_methods::{method_variant, SUPPORTED_METHODS};

struct ControllerArgs {
    /// `false` for a bare `#[controller]`, which records no options at all.
    annotated: bool,
    prefix: Option<String>,
    middlewares: Option<Vec<String>>,
}

impl Parse for ControllerArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let annotated = !input.is_empty();
        let mut prefix = None;
        let mut middlewares = None;
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            // `defaults` gives options with neither field set.
            if name == "defaults" {
                if input.peek(Token![,]) {
                    input.parse::<Token![,]>()?;
                }
                continue;
            }
            input.parse::<Token![=]>()?;
            if name == "prefix" {
                let lit: LitStr = input.parse()?;
                prefix = Some(lit.value());
            } else if name == "middlewares" {
                let content;
                syn::bracketed!(content in input);
                let items: Punctuated<LitStr, Token![,]> =
                    content.parse_terminated(<LitStr as Parse>::parse, Token![,])?;
                middlewares = Some(items.iter().map(LitStr::value).collect());
            } else {
                return Err(syn::Error::new(
                    name.span(),
                    "expected `prefix = \"...\"`, `middlewares = [\"...\"]` or `defaults`",
                ));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        Ok(ControllerArgs {
            annotated,
            prefix,
            middlewares,
        })
    }
}

pub fn controller_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ControllerArgs);
    let input = parse_macro_input!(item as ItemStruct);
    let expanded = generate_controller_impl(args.annotated.then_some(&args), &input);
    TokenStream::from(expanded)
}

fn generate_controller_impl(args: Option<&ControllerArgs>, input: &ItemStruct) -> TokenStream2 {
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let options = match args {
        Some(args) => {
            let prefix = match &args.prefix {
                Some(prefix) => quote! { ::core::option::Option::Some(::std::string::String::from(#prefix)) },
                None => quote! { ::core::option::Option::None },
            };
            let middlewares = match &args.middlewares {
                Some(names) => quote! {
                    ::core::option::Option::Some(::std::vec![#(::std::string::String::from(#names)),*])
                },
                None => quote! { ::core::option::Option::None },
            };
            quote! {
                ::core::option::Option::Some(::reframe::ControllerOptions {
                    prefix: #prefix,
                    middlewares: #middlewares,
                })
            }
        }
        None => quote! { ::core::option::Option::None },
    };

    quote! {
        #input
        impl #impl_generics ::reframe::Controller for #struct_name #ty_generics #where_clause {
            fn controller_annotation() -> ::reframe::ControllerAnnotation {
                ::reframe::annotate_controller(#options)
            }
        }
    }
}

struct RouteArgs {
    method: LitStr,
    path: Option<LitStr>,
}

impl Parse for RouteArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut method = None;
        let mut path = None;
        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;
            if name == "method" {
                method = Some(input.parse::<LitStr>()?);
            } else if name == "path" {
                path = Some(input.parse::<LitStr>()?);
            } else {
                return Err(syn::Error::new(
                    name.span(),
                    "expected `method = \"...\"` or `path = \"...\"`",
                ));
            }
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }
        let method =
            method.ok_or_else(|| input.error("#[route] requires `method = \"...\"`"))?;
        Ok(RouteArgs { method, path })
    }
}

struct RouteInfo {
    member: String,
    method: String,
    path: Option<LitStr>,
}

pub fn routes_attribute(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemImpl);
    let expanded = generate_routes_impl(input).unwrap_or_else(|err| err.to_compile_error());
    TokenStream::from(expanded)
}

fn generate_routes_impl(mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[routes] must be placed on an inherent impl block",
        ));
    }

    let mut routes: Vec<RouteInfo> = Vec::new();
    for item in input.items.iter_mut() {
        if let ImplItem::Fn(method) = item {
            let member = method.sig.ident.unraw().to_string();
            for attr in &method.attrs {
                if let Some((http_method, path)) = extract_route_attr(attr)? {
                    routes.push(RouteInfo {
                        member: member.clone(),
                        method: http_method,
                        path,
                    });
                }
            }
            method.attrs.retain(|attr| !is_route_attr(attr));
        }
    }

    let annotations = routes.iter().map(|route| {
        let member = &route.member;
        let variant = method_variant(&route.method);
        let path = match &route.path {
            Some(path) => quote! { ::core::option::Option::Some(#path) },
            None => quote! { ::core::option::Option::None },
        };
        quote! {
            (#member, ::reframe::annotate_method(::reframe::HttpMethod::#variant, #path))
        }
    });

    let self_ty = &input.self_ty;
    let (impl_generics, _, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        #input
        impl #impl_generics ::reframe::Routes for #self_ty #where_clause {
            fn route_annotations() -> ::std::vec::Vec<(&'static str, ::reframe::MethodAnnotation)> {
                ::std::vec![#(#annotations),*]
            }
        }
    })
}

/// Method tag and optional path of a handler attribute, or `None` for
/// attributes that are not handler annotations.
fn extract_route_attr(attr: &Attribute) -> syn::Result<Option<(String, Option<LitStr>)>> {
    let Some(ident) = attr.path().get_ident() else {
        return Ok(None);
    };
    let name = ident.to_string();

    if SUPPORTED_METHODS.contains(&name.as_str()) {
        let path = match &attr.meta {
            Meta::Path(_) => None,
            Meta::List(list) if list.tokens.is_empty() => None,
            Meta::List(_) => Some(attr.parse_args::<LitStr>()?),
            Meta::NameValue(_) => {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("expected #[{name}] or #[{name}(\"/path\")]"),
                ))
            }
        };
        return Ok(Some((name, path)));
    }

    if name == "route" {
        let args = attr.parse_args::<RouteArgs>()?;
        let method = args.method.value();
        if !SUPPORTED_METHODS.contains(&method.as_str()) {
            return Err(syn::Error::new(
                args.method.span(),
                format!(
                    "unsupported HTTP method `{method}`, expected one of: {}",
                    SUPPORTED_METHODS.join(", ")
                ),
            ));
        }
        return Ok(Some((method, args.path)));
    }

    Ok(None)
}

fn is_route_attr(attr: &Attribute) -> bool {
    attr.path().get_ident().map_or(false, |ident| {
        let name = ident.to_string();
        name == "route" || SUPPORTED_METHODS.contains(&name.as_str())
    })
}
