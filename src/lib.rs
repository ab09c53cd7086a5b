//! # Reframe
//!
//! Declarative routing metadata for controller types.
//!
//! Controllers and their handlers are annotated with an HTTP method, a path,
//! a controller prefix and a list of middleware names. The annotations are
//! collected into an explicit [`RouteRegistry`] at startup; a dispatching
//! framework reads them back to build its routing table. Nothing here
//! matches requests or runs middlewares.
//!
//! ## Features
//!
//! - **Annotation operations**: `for_get`, `for_post`, ... and
//!   `annotate_controller`, usable without macros
//! - **Attribute macros**: `#[controller]`, `#[routes]` with `#[get]`, `#[post]`, ...
//! - **Explicit metadata store**: values addressed by (type, optional handler, key)
//! - **Route table**: prefix-joined paths with middleware names, exportable as JSON
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use reframe::prelude::*;
//!
//! #[controller(prefix = "/users", middlewares = ["auth"])]
//! pub struct UserController;
//!
//! #[routes]
//! impl UserController {
//!     #[get]
//!     fn list(&self) {}
//!
//!     #[post("/")]
//!     fn create(&self) {}
//!
//!     #[route(method = "delete", path = "/:id")]
//!     fn remove(&self) {}
//! }
//!
//! #[module(controllers = [UserController])]
//! pub struct AppModule;
//!
//! fn main() -> reframe::Result<()> {
//!     let registry = RouteRegistry::from_env()?;
//!     AppModule::register(&registry)?;
//!     println!("{}", registry.route_table_json()?);
//!     Ok(())
//! }
//! ```

pub mod annotate;
pub mod config;
pub mod controller;
pub mod error;
pub mod http;
pub mod metadata;
pub mod module;
pub mod router;

// Re-export core types
pub use annotate::{
    ControllerAnnotation, ControllerDescriptor, ControllerOptions, MethodAnnotation,
    RouteDescriptor, annotate_controller, annotate_method, for_all, for_delete, for_get,
    for_patch, for_post, for_put,
};
pub use config::{OverwritePolicy, RegistryConfig};
pub use controller::{Controller, Routes};
pub use error::{ReframeError, Result};
pub use http::HttpMethod;
pub use metadata::{MetadataStore, MetadataValue, TargetId};
pub use module::Module;
pub use router::{RouteDefinition, RouteRegistry};

// Re-export macros
pub use reframe_macro::{all, controller, delete, get, module, patch, post, put, route, routes};

/// Prelude module for convenient imports
///
/// ```
/// use reframe::prelude::*;
/// ```
pub mod prelude {
    pub use crate::annotate::{
        ControllerAnnotation, ControllerOptions, MethodAnnotation, RouteDescriptor,
        annotate_controller, annotate_method, for_all, for_delete, for_get, for_patch, for_post,
        for_put,
    };
    pub use crate::config::{OverwritePolicy, RegistryConfig};
    pub use crate::controller::{Controller, Routes};
    pub use crate::error::{ReframeError, Result};
    pub use crate::http::{HandlerShape, HttpMethod, JsonResponse, RequestShape, ResponseShape};
    pub use crate::metadata::{MetadataStore, MetadataValue, TargetId};
    pub use crate::module::Module;
    pub use crate::router::{RouteDefinition, RouteRegistry};
    pub use crate::{all, controller, delete, get, module, patch, post, put, route, routes};
}
