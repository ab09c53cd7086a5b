use reframe::prelude::*;

#[controller(prefix = "/products")]
pub struct ProductController;

#[routes]
impl ProductController {
    #[get("/all")]
    pub fn list(&self) {}

    #[route(method = "put", path = "/:id")]
    pub fn replace(&self) {}

    #[all("/legacy/*rest")]
    pub fn legacy(&self) {}
}
