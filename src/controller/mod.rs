// Controller metadata is usually declared through macros:
// - #[controller(prefix = "...", middlewares = [...])] implements `Controller`
// - #[routes] on the impl block collects #[get], #[post], ... into `Routes`
//
// Both traits can also be implemented by hand for explicit registration.
use crate::annotate::{ControllerAnnotation, MethodAnnotation};

/// Class-level annotation of a controller type.
pub trait Controller: 'static {
    fn controller_annotation() -> ControllerAnnotation;
}

/// Handler annotations of a controller type, keyed by handler name.
pub trait Routes: 'static {
    fn route_annotations() -> Vec<(&'static str, MethodAnnotation)>;
}
