use crate::error::{ReframeError, Result};
use axum::http::Method;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};

/// HTTP method tag attached to a route handler.
///
/// The textual form is lowercase (`"get"`, `"post"`, ...), which is exactly
/// what gets stored under the `"method"` metadata key.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    AsRefStr,
    IntoStaticStr,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    /// Matches every HTTP method.
    All,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Parse a lowercase tag.
    ///
    /// # Errors
    /// Returns `UnsupportedMethod` for anything outside
    /// `get`, `post`, `put`, `patch`, `delete`, `all`. Matching is
    /// case-sensitive.
    pub fn from_tag(tag: &str) -> Result<Self> {
        tag.parse::<HttpMethod>()
            .map_err(|_: strum::ParseError| ReframeError::unsupported_method(tag))
    }

    /// The concrete HTTP verb, or `None` for [`HttpMethod::All`].
    pub fn to_http(&self) -> Option<Method> {
        match self {
            HttpMethod::Get => Some(Method::GET),
            HttpMethod::Post => Some(Method::POST),
            HttpMethod::Put => Some(Method::PUT),
            HttpMethod::Patch => Some(Method::PATCH),
            HttpMethod::Delete => Some(Method::DELETE),
            HttpMethod::All => None,
        }
    }

    pub fn matches(&self, method: &Method) -> bool {
        match self.to_http() {
            Some(own) => own == *method,
            None => true,
        }
    }
}
