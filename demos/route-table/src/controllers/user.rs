use reframe::prelude::*;

#[controller(prefix = "/users", middlewares = ["auth", "audit"])]
pub struct UserController;

#[routes]
impl UserController {
    #[get]
    pub fn list(&self) {}

    #[get("/:id")]
    pub fn get_one(&self) {}

    #[post]
    pub fn create(&self) {}

    #[patch("/:id")]
    pub fn update(&self) {}

    #[delete("/:id")]
    pub fn remove(&self) {}
}
