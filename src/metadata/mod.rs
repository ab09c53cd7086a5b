//! Explicit metadata store.
//!
//! Annotations write `(key, value)` pairs scoped to a target type and an
//! optional member name. Class-scoped entries (no member) and member-scoped
//! entries live side by side and never touch each other.

mod store;
mod value;

pub use store::{MetadataStore, Scope, TargetId};
pub use value::MetadataValue;

/// Key under which a handler's path is stored.
pub const PATH: &str = "path";
/// Key under which a handler's HTTP method tag is stored.
pub const METHOD: &str = "method";
/// Key under which a controller's path prefix is stored.
pub const PREFIX: &str = "prefix";
/// Key under which a controller's middleware names are stored.
pub const MIDDLEWARES: &str = "middlewares";
