use crate::error::Result;
use crate::router::RouteRegistry;

/// Trait for groups of controllers registered together
///
/// Modules are typically defined using the `#[module]` macro, which automatically
/// implements this trait and registers every listed controller.
///
/// # Example
/// ```ignore
/// use reframe::module;
///
/// #[module(controllers = [UserController, OrderController])]
/// pub struct AppModule;
/// ```
pub trait Module {
    /// Register all controllers in this module
    fn register(registry: &RouteRegistry) -> Result<()>;
}
