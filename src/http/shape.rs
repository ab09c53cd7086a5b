use axum::{
    Json,
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Opaque validation hook handed to handlers. It is carried, never called.
pub type Validator = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// What a handler receives from the dispatching framework.
#[derive(Clone)]
pub struct RequestShape {
    pub body: Value,
    pub params: Value,
    pub headers: HeaderMap,
    pub url: Uri,
    pub query: Value,
    pub auth: Value,
    pub validate: Validator,
}

impl RequestShape {
    /// An empty request for `url` whose validator accepts everything.
    pub fn new(url: Uri) -> Self {
        Self {
            body: Value::Null,
            params: Value::Null,
            headers: HeaderMap::new(),
            url,
            query: Value::Null,
            auth: Value::Null,
            validate: Arc::new(|_: &Value| true),
        }
    }

    pub fn with_validator(mut self, validate: Validator) -> Self {
        self.validate = validate;
        self
    }
}

impl fmt::Debug for RequestShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestShape")
            .field("body", &self.body)
            .field("params", &self.params)
            .field("headers", &self.headers)
            .field("url", &self.url)
            .field("query", &self.query)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

/// What a handler writes its reply into.
///
/// `status` returns the response itself so calls chain:
/// `response.status(StatusCode::CREATED).json(body)`.
pub trait ResponseShape {
    fn json(&mut self, data: Map<String, Value>);

    fn status(&mut self, status: StatusCode) -> &mut Self;
}

/// A [`ResponseShape`] that records what the handler wrote.
#[derive(Debug, Clone)]
pub struct JsonResponse {
    status: StatusCode,
    body: Option<Map<String, Value>>,
}

impl JsonResponse {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            body: None,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> Option<&Map<String, Value>> {
        self.body.as_ref()
    }
}

impl Default for JsonResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseShape for JsonResponse {
    fn json(&mut self, data: Map<String, Value>) {
        self.body = Some(data);
    }

    fn status(&mut self, status: StatusCode) -> &mut Self {
        self.status = status;
        self
    }
}

impl IntoResponse for JsonResponse {
    fn into_response(self) -> Response {
        match self.body {
            Some(body) => (self.status, Json(Value::Object(body))).into_response(),
            None => self.status.into_response(),
        }
    }
}

/// The pair a handler operates on.
#[derive(Debug, Clone)]
pub struct HandlerShape<R: ResponseShape = JsonResponse> {
    pub request: RequestShape,
    pub response: R,
}

impl<R: ResponseShape> HandlerShape<R> {
    pub fn new(request: RequestShape, response: R) -> Self {
        Self { request, response }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_chains_into_json() {
        let mut response = JsonResponse::new();
        let mut body = Map::new();
        body.insert("id".to_string(), json!(7));
        response.status(StatusCode::CREATED).json(body);

        assert_eq!(response.status_code(), StatusCode::CREATED);
        assert_eq!(response.body().unwrap()["id"], json!(7));
        assert_eq!(response.into_response().status(), StatusCode::CREATED);
    }

    #[test]
    fn test_empty_response_keeps_status() {
        let mut response = JsonResponse::default();
        response.status(StatusCode::NO_CONTENT);
        assert!(response.body().is_none());
        assert_eq!(response.into_response().status(), StatusCode::NO_CONTENT);
    }

    #[test]
    fn test_validator_is_carried_untouched() {
        let request = RequestShape::new(Uri::from_static("/users?page=2"))
            .with_validator(Arc::new(|value: &Value| value.is_object()));
        let shape = HandlerShape::new(request, JsonResponse::new());

        assert_eq!(shape.request.url.query(), Some("page=2"));
        assert!((shape.request.validate)(&json!({})));
        assert!(!(shape.request.validate)(&json!([])));
        assert!(format!("{:?}", shape.request).contains("RequestShape"));
    }
}
