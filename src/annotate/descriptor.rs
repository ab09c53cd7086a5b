use crate::http::HttpMethod;
use crate::metadata::{self, MetadataStore, MetadataValue, TargetId};
use serde::{Deserialize, Serialize};

/// Path used when a route annotation does not name one.
pub const DEFAULT_PATH: &str = "/";

/// Method and path of one handler.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RouteDescriptor {
    pub method: HttpMethod,
    pub path: String,
}

impl RouteDescriptor {
    pub fn new(method: HttpMethod, path: Option<&str>) -> Self {
        Self {
            method,
            path: path.unwrap_or(DEFAULT_PATH).to_string(),
        }
    }

    /// Read the descriptor written for `(target, member)`, if both keys hold
    /// values of the expected kind.
    pub fn read(store: &MetadataStore, target: TargetId, member: &str) -> Option<Self> {
        let method = store
            .get(target, Some(member), metadata::METHOD)?
            .as_method()?;
        let path = store.get(target, Some(member), metadata::PATH)?;
        Some(Self {
            method,
            path: path.as_str()?.to_string(),
        })
    }
}

/// Options given to a controller annotation.
///
/// Passing `None` instead of a `ControllerOptions` leaves the controller
/// unannotated; passing `Some(ControllerOptions::default())` defines both
/// keys without values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middlewares: Option<Vec<String>>,
}

impl ControllerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Append one middleware name, keeping order.
    pub fn middleware(mut self, name: impl Into<String>) -> Self {
        self.middlewares
            .get_or_insert_with(Vec::new)
            .push(name.into());
        self
    }

    pub fn middlewares<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.middlewares = Some(names.into_iter().map(Into::into).collect());
        self
    }
}

/// Controller-level metadata as read back from a store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControllerDescriptor {
    pub prefix: Option<String>,
    pub middlewares: Option<Vec<String>>,
}

impl ControllerDescriptor {
    /// `None` when neither controller key is defined on `target`.
    pub fn read(store: &MetadataStore, target: TargetId) -> Option<Self> {
        let prefix = store.get(target, None, metadata::PREFIX);
        let middlewares = store.get(target, None, metadata::MIDDLEWARES);
        if prefix.is_none() && middlewares.is_none() {
            return None;
        }
        Some(Self {
            prefix: prefix.as_ref().and_then(MetadataValue::as_str).map(str::to_string),
            middlewares: middlewares
                .as_ref()
                .and_then(MetadataValue::as_list)
                .map(<[String]>::to_vec),
        })
    }
}

impl From<ControllerOptions> for ControllerDescriptor {
    fn from(options: ControllerOptions) -> Self {
        Self {
            prefix: options.prefix,
            middlewares: options.middlewares,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_descriptor_defaults_path() {
        let route = RouteDescriptor::new(HttpMethod::Get, None);
        assert_eq!(route.path, "/");
        let route = RouteDescriptor::new(HttpMethod::Get, Some(""));
        assert_eq!(route.path, "");
    }

    #[test]
    fn test_options_builder_keeps_order() {
        let options = ControllerOptions::new()
            .prefix("/api")
            .middleware("auth")
            .middleware("audit");
        assert_eq!(options.prefix.as_deref(), Some("/api"));
        assert_eq!(
            options.middlewares,
            Some(vec!["auth".to_string(), "audit".to_string()])
        );

        let replaced = options.middlewares(["rate-limit"]);
        assert_eq!(replaced.middlewares, Some(vec!["rate-limit".to_string()]));
    }

    #[test]
    fn test_options_deserialize_with_missing_fields() {
        let options: ControllerOptions = serde_json::from_str(r#"{"prefix":"/v1"}"#).unwrap();
        assert_eq!(options, ControllerOptions::new().prefix("/v1"));
    }

    #[test]
    fn test_read_ignores_mistyped_values() {
        struct Target;
        let target = TargetId::of::<Target>();
        let store = MetadataStore::new();
        store.define(target, Some("find"), metadata::PATH, "/x").unwrap();
        store.define(target, Some("find"), metadata::METHOD, "get").unwrap();

        assert!(RouteDescriptor::read(&store, target, "find").is_none());
    }
}
