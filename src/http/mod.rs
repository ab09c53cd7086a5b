//! HTTP vocabulary shared by annotations and their readers.
//!
//! [`HttpMethod`] is the tag stored under the `"method"` key. The shape types
//! describe what an external dispatcher hands to a handler; nothing in this
//! crate constructs or dispatches them.

mod method;
mod shape;

pub use method::HttpMethod;
pub use shape::{HandlerShape, JsonResponse, RequestShape, ResponseShape, Validator};
