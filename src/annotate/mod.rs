//! Annotation operations.
//!
//! Each function returns an annotation value; applying it writes metadata
//! into a [`MetadataStore`]. Handler annotations write `"path"` and
//! `"method"` on `(controller, handler)`, controller annotations write
//! `"prefix"` and `"middlewares"` on the controller itself.
//!
//! ```
//! use reframe::annotate::{annotate_controller, for_post, ControllerOptions};
//! use reframe::metadata::{MetadataStore, TargetId};
//!
//! struct UserController;
//!
//! let store = MetadataStore::new();
//! annotate_controller(Some(ControllerOptions::new().prefix("/users")))
//!     .apply::<UserController>(&store)
//!     .unwrap();
//! for_post(Some("/")).apply::<UserController>(&store, "create").unwrap();
//!
//! let target = TargetId::of::<UserController>();
//! assert_eq!(store.get(target, Some("create"), "method").unwrap().as_method(),
//!            Some(reframe::http::HttpMethod::Post));
//! ```

mod descriptor;

pub use descriptor::{ControllerDescriptor, ControllerOptions, DEFAULT_PATH, RouteDescriptor};

use crate::error::Result;
use crate::http::HttpMethod;
use crate::metadata::{self, MetadataStore, TargetId};

/// Handler-level annotation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodAnnotation {
    route: RouteDescriptor,
}

impl MethodAnnotation {
    /// Build an annotation from a textual method tag.
    ///
    /// # Errors
    /// Returns `UnsupportedMethod` unless `method` is one of
    /// `get`, `post`, `put`, `patch`, `delete`, `all`.
    pub fn parse(method: &str, path: Option<&str>) -> Result<Self> {
        Ok(annotate_method(HttpMethod::from_tag(method)?, path))
    }

    pub fn route(&self) -> &RouteDescriptor {
        &self.route
    }

    pub fn apply<C: ?Sized + 'static>(&self, store: &MetadataStore, member: &str) -> Result<()> {
        self.apply_to(store, TargetId::of::<C>(), member)
    }

    /// Seal `member` and record its path and method.
    pub fn apply_to(&self, store: &MetadataStore, target: TargetId, member: &str) -> Result<()> {
        store.seal(target, member);
        store.define(target, Some(member), metadata::PATH, self.route.path.as_str())?;
        store.define(target, Some(member), metadata::METHOD, self.route.method)
    }
}

impl From<RouteDescriptor> for MethodAnnotation {
    fn from(route: RouteDescriptor) -> Self {
        Self { route }
    }
}

/// Controller-level annotation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerAnnotation {
    options: Option<ControllerOptions>,
}

impl ControllerAnnotation {
    pub fn options(&self) -> Option<&ControllerOptions> {
        self.options.as_ref()
    }

    pub fn apply<C: ?Sized + 'static>(&self, store: &MetadataStore) -> Result<()> {
        self.apply_to(store, TargetId::of::<C>())
    }

    /// Record prefix and middlewares on `target`. Without options nothing is
    /// written.
    pub fn apply_to(&self, store: &MetadataStore, target: TargetId) -> Result<()> {
        let Some(options) = &self.options else {
            return Ok(());
        };
        store.define(target, None, metadata::PREFIX, options.prefix.clone())?;
        store.define(target, None, metadata::MIDDLEWARES, options.middlewares.clone())
    }
}

pub fn annotate_method(method: HttpMethod, path: Option<&str>) -> MethodAnnotation {
    MethodAnnotation {
        route: RouteDescriptor::new(method, path),
    }
}

pub fn for_get(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::Get, path)
}

pub fn for_post(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::Post, path)
}

pub fn for_put(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::Put, path)
}

pub fn for_patch(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::Patch, path)
}

pub fn for_delete(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::Delete, path)
}

pub fn for_all(path: Option<&str>) -> MethodAnnotation {
    annotate_method(HttpMethod::All, path)
}

pub fn annotate_controller(options: Option<ControllerOptions>) -> ControllerAnnotation {
    ControllerAnnotation { options }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReframeError;
    use crate::metadata::MetadataValue;

    struct UsersController;

    fn target() -> TargetId {
        TargetId::of::<UsersController>()
    }

    #[test]
    fn test_convenience_operations_record_their_tag() {
        let cases: [(fn(Option<&str>) -> MethodAnnotation, &str, HttpMethod); 6] = [
            (for_get, "get", HttpMethod::Get),
            (for_post, "post", HttpMethod::Post),
            (for_put, "put", HttpMethod::Put),
            (for_patch, "patch", HttpMethod::Patch),
            (for_delete, "delete", HttpMethod::Delete),
            (for_all, "all", HttpMethod::All),
        ];
        let store = MetadataStore::new();
        for (annotate, member, method) in cases {
            annotate(None).apply::<UsersController>(&store, member).unwrap();
            let stored = store.get(target(), Some(member), metadata::METHOD).unwrap();
            assert_eq!(stored.as_method(), Some(method));
            assert_eq!(method.as_str(), member);
        }
    }

    #[test]
    fn test_path_is_recorded_verbatim_or_defaulted() {
        let store = MetadataStore::new();
        for_get(Some("/users/:id"))
            .apply::<UsersController>(&store, "find")
            .unwrap();
        for_get(None).apply::<UsersController>(&store, "list").unwrap();
        for_get(Some("no-leading-slash"))
            .apply::<UsersController>(&store, "odd")
            .unwrap();

        let path = |member: &str| store.get(target(), Some(member), metadata::PATH).unwrap();
        assert_eq!(path("find").as_str(), Some("/users/:id"));
        assert_eq!(path("list").as_str(), Some("/"));
        assert_eq!(path("odd").as_str(), Some("no-leading-slash"));
    }

    #[test]
    fn test_convenience_matches_general_operation() {
        let store = MetadataStore::new();
        for_post(Some("/users"))
            .apply::<UsersController>(&store, "a")
            .unwrap();
        annotate_method(HttpMethod::Post, Some("/users"))
            .apply::<UsersController>(&store, "b")
            .unwrap();

        assert_eq!(for_post(Some("/users")), annotate_method(HttpMethod::Post, Some("/users")));
        for key in [metadata::PATH, metadata::METHOD] {
            assert_eq!(
                store.get(target(), Some("a"), key),
                store.get(target(), Some("b"), key)
            );
        }
        assert_eq!(store.keys(target(), Some("a")), store.keys(target(), Some("b")));
    }

    #[test]
    fn test_method_annotation_seals_member() {
        let store = MetadataStore::new();
        for_delete(Some("/:id"))
            .apply::<UsersController>(&store, "remove")
            .unwrap();
        assert!(store.is_sealed(target(), "remove"));
    }

    #[test]
    fn test_parse_validates_method() {
        let annotation = MethodAnnotation::parse("put", Some("/x")).unwrap();
        assert_eq!(annotation, for_put(Some("/x")));

        let err = MethodAnnotation::parse("options", None).unwrap_err();
        assert!(matches!(err, ReframeError::UnsupportedMethod { .. }));
    }

    #[test]
    fn test_controller_with_options() {
        let store = MetadataStore::new();
        annotate_controller(Some(ControllerOptions::new().prefix("/api").middleware("auth")))
            .apply::<UsersController>(&store)
            .unwrap();

        assert_eq!(
            store.get(target(), None, metadata::PREFIX).unwrap().as_str(),
            Some("/api")
        );
        assert_eq!(
            store.get(target(), None, metadata::MIDDLEWARES),
            Some(MetadataValue::List(vec!["auth".to_string()]))
        );
    }

    #[test]
    fn test_controller_without_options_writes_nothing() {
        let store = MetadataStore::new();
        annotate_controller(None)
            .apply::<UsersController>(&store)
            .unwrap();

        assert!(!store.has(target(), None, metadata::PREFIX));
        assert!(!store.has(target(), None, metadata::MIDDLEWARES));
        assert!(store.is_empty());
        assert!(ControllerDescriptor::read(&store, target()).is_none());
    }

    #[test]
    fn test_controller_with_empty_options_defines_null_keys() {
        let store = MetadataStore::new();
        annotate_controller(Some(ControllerOptions::new()))
            .apply::<UsersController>(&store)
            .unwrap();

        assert!(store.has(target(), None, metadata::PREFIX));
        assert!(store.get(target(), None, metadata::MIDDLEWARES).unwrap().is_null());
        assert_eq!(
            ControllerDescriptor::read(&store, target()),
            Some(ControllerDescriptor::default())
        );
    }

    #[test]
    fn test_method_annotation_leaves_controller_metadata_alone() {
        let store = MetadataStore::new();
        annotate_controller(Some(ControllerOptions::new().prefix("/api").middleware("auth")))
            .apply::<UsersController>(&store)
            .unwrap();
        let before = store.keys(target(), None);

        for_get(Some("/")).apply::<UsersController>(&store, "list").unwrap();

        assert_eq!(store.keys(target(), None), before);
        assert_eq!(
            ControllerDescriptor::read(&store, target()),
            Some(ControllerDescriptor {
                prefix: Some("/api".to_string()),
                middlewares: Some(vec!["auth".to_string()]),
            })
        );
    }
}
