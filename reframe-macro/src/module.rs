use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{
    parse::Parse, parse::ParseStream, parse_macro_input, Attribute, ItemStruct, Path, Token,
};

struct ModuleItem {
    attrs: Vec<Attribute>,
    path: Path,
}

impl Parse for ModuleItem {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let path = input.parse()?;
        Ok(ModuleItem { attrs, path })
    }
}

struct ModuleArgs {
    imports: Vec<ModuleItem>,
    controllers: Vec<ModuleItem>,
}

impl Parse for ModuleArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut imports = Vec::new();
        let mut controllers = Vec::new();

        while !input.is_empty() {
            let name: syn::Ident = input.parse()?;
            input.parse::<Token![=]>()?;

            // Parse array: [Item1, Item2, ...]
            let content;
            syn::bracketed!(content in input);
            let items = content.parse_terminated(ModuleItem::parse, Token![,])?;

            if name == "imports" {
                imports = items.into_iter().collect();
            } else if name == "controllers" {
                controllers = items.into_iter().collect();
            } else {
                return Err(syn::Error::new(
                    name.span(),
                    "expected `imports = [...]` or `controllers = [...]`",
                ));
            }

            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
            }
        }

        Ok(ModuleArgs {
            imports,
            controllers,
        })
    }
}

pub fn module_attribute(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = parse_macro_input!(attr as ModuleArgs);
    let input = parse_macro_input!(item as ItemStruct);
    TokenStream::from(generate_module_impl(&args, &input))
}

fn generate_module_impl(args: &ModuleArgs, input: &ItemStruct) -> TokenStream2 {
    let struct_name = &input.ident;

    // Imported modules register first so their controllers keep their place
    // ahead of this module's in the route table.
    let import_registrations = args.imports.iter().map(|item| {
        let attrs = &item.attrs;
        let path = &item.path;
        quote! {
            #(#attrs)*
            <#path as ::reframe::Module>::register(registry)?;
        }
    });

    let controller_registrations = args.controllers.iter().map(|item| {
        let attrs = &item.attrs;
        let path = &item.path;
        quote! {
            #(#attrs)*
            registry.register::<#path>()?;
        }
    });

    quote! {
        #input
        impl ::reframe::Module for #struct_name {
            fn register(registry: &::reframe::RouteRegistry) -> ::reframe::Result<()> {
                #(#import_registrations)*
                #(#controller_registrations)*
                ::core::result::Result::Ok(())
            }
        }
    }
}
