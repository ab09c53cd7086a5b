//! Route registry.
//!
//! The registry owns the metadata store. Setup code registers controllers
//! and handlers explicitly (or through [`Controller`] / [`Routes`] impls
//! generated by the macros), and a dispatching framework reads the result
//! back, either key by key or as a flattened [`RouteDefinition`] table.

use crate::annotate::{
    ControllerDescriptor, ControllerOptions, MethodAnnotation, RouteDescriptor, annotate_controller,
};
use crate::config::RegistryConfig;
use crate::controller::{Controller, Routes};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::metadata::{MetadataStore, MetadataValue, TargetId};
use serde::Serialize;

/// One handler with its controller's prefix and middlewares applied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteDefinition {
    pub controller: &'static str,
    pub handler: String,
    pub method: HttpMethod,
    pub path: String,
    pub middlewares: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RouteRegistry {
    store: MetadataStore,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            store: MetadataStore::with_config(config),
        }
    }

    /// A registry configured from `REFRAME_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::with_config(RegistryConfig::from_env()?))
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    /// Annotate `C` as a controller. `None` leaves it unannotated.
    pub fn register_controller<C: ?Sized + 'static>(
        &self,
        options: Option<ControllerOptions>,
    ) -> Result<&Self> {
        annotate_controller(options).apply::<C>(&self.store)?;
        Ok(self)
    }

    /// Annotate handler `member` of `C`.
    pub fn register_route<C: ?Sized + 'static>(
        &self,
        member: &str,
        route: RouteDescriptor,
    ) -> Result<&Self> {
        MethodAnnotation::from(route).apply::<C>(&self.store, member)?;
        Ok(self)
    }

    /// Apply every handler annotation `C` declares.
    pub fn register_routes<C: Routes>(&self) -> Result<&Self> {
        for (member, annotation) in C::route_annotations() {
            annotation.apply::<C>(&self.store, member)?;
        }
        Ok(self)
    }

    /// Apply the controller annotation and every handler annotation of `C`.
    pub fn register<C: Controller + Routes>(&self) -> Result<&Self> {
        C::controller_annotation().apply::<C>(&self.store)?;
        self.register_routes::<C>()?;
        tracing::info!(
            controller = std::any::type_name::<C>(),
            routes = self.store.members(TargetId::of::<C>()).len(),
            "Registered controller"
        );
        Ok(self)
    }

    /// Raw lookup of one key on `C` or one of its handlers.
    pub fn metadata<C: ?Sized + 'static>(
        &self,
        member: Option<&str>,
        key: &str,
    ) -> Option<MetadataValue> {
        self.store.get(TargetId::of::<C>(), member, key)
    }

    pub fn controller_descriptor<C: ?Sized + 'static>(&self) -> Option<ControllerDescriptor> {
        ControllerDescriptor::read(&self.store, TargetId::of::<C>())
    }

    pub fn route_descriptor<C: ?Sized + 'static>(&self, member: &str) -> Option<RouteDescriptor> {
        RouteDescriptor::read(&self.store, TargetId::of::<C>(), member)
    }

    /// Handlers of `C` in registration order.
    pub fn routes_of<C: ?Sized + 'static>(&self) -> Vec<(String, RouteDescriptor)> {
        self.routes_of_target(TargetId::of::<C>())
    }

    /// Every registered handler, grouped by controller in registration order.
    pub fn route_table(&self) -> Vec<RouteDefinition> {
        let mut table = Vec::new();
        for target in self.store.targets() {
            let controller = ControllerDescriptor::read(&self.store, target).unwrap_or_default();
            let prefix = controller.prefix.as_deref().unwrap_or("");
            let middlewares = controller.middlewares.unwrap_or_default();

            for (handler, route) in self.routes_of_target(target) {
                table.push(RouteDefinition {
                    controller: target.name(),
                    handler,
                    method: route.method,
                    path: join_path(prefix, &route.path),
                    middlewares: middlewares.clone(),
                });
            }
        }
        table
    }

    pub fn route_table_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.route_table())?)
    }

    fn routes_of_target(&self, target: TargetId) -> Vec<(String, RouteDescriptor)> {
        self.store
            .members(target)
            .into_iter()
            .filter_map(|member| {
                let route = RouteDescriptor::read(&self.store, target, &member)?;
                Some((member, route))
            })
            .collect()
    }
}

/// Join a controller prefix and a handler path with a single `/` between
/// non-empty segments. Runs of `/` inside either part collapse to one, and the
/// result always starts with `/`.
pub fn join_path(prefix: &str, path: &str) -> String {
    let segments: Vec<&str> = [prefix, path]
        .iter()
        .flat_map(|s| s.split('/'))
        .filter(|s| !s.is_empty())
        .collect();
    format!("/{}", segments.join("/"))
}
