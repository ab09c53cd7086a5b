use proc_macro::TokenStream;

mod controller;
mod http_methods;
mod module;

/// Attribute macro for annotating a controller type
///
/// Without arguments the controller is left unannotated: no prefix and no
/// middleware metadata is recorded for it. `#[controller(defaults)]` records
/// both keys with no value.
///
/// # Example
/// ```ignore
/// use reframe::controller;
///
/// #[controller(prefix = "/users", middlewares = ["auth", "audit"])]
/// pub struct UserController;
/// ```
#[proc_macro_attribute]
pub fn controller(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::controller_attribute(attr, item)
}

/// Attribute macro collecting the handler annotations of an impl block
///
/// Recognizes `#[get]`, `#[post]`, `#[put]`, `#[patch]`, `#[delete]` and
/// `#[all]`, each with an optional path (default `"/"`), plus the general
/// form `#[route(method = "...", path = "...")]`.
///
/// # Example
/// ```ignore
/// #[routes]
/// impl UserController {
///     #[get("/:id")]
///     fn find(&self) { /* ... */ }
///
///     #[route(method = "post", path = "/")]
///     fn create(&self) { /* ... */ }
/// }
/// ```
#[proc_macro_attribute]
pub fn routes(attr: TokenStream, item: TokenStream) -> TokenStream {
    controller::routes_attribute(attr, item)
}

/// Attribute macro for grouping controllers into a module
///
/// # Example
/// ```ignore
/// use reframe::module;
///
/// #[module(
///     imports = [AdminModule],
///     controllers = [UserController, OrderController],
/// )]
/// pub struct AppModule;
/// ```
#[proc_macro_attribute]
pub fn module(attr: TokenStream, item: TokenStream) -> TokenStream {
    module::module_attribute(attr, item)
}

/// HTTP GET handler attribute, read by `#[routes]`; a no-op elsewhere
#[proc_macro_attribute]
pub fn get(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("get", attr, item)
}

/// HTTP POST handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn post(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("post", attr, item)
}

/// HTTP PUT handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn put(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("put", attr, item)
}

/// HTTP PATCH handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn patch(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("patch", attr, item)
}

/// HTTP DELETE handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn delete(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("delete", attr, item)
}

/// Any-method handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn all(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("all", attr, item)
}

/// General handler attribute, read by `#[routes]`
#[proc_macro_attribute]
pub fn route(attr: TokenStream, item: TokenStream) -> TokenStream {
    http_methods::http_method_attribute("route", attr, item)
}
