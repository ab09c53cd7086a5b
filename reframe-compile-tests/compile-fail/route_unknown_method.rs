use reframe::routes;

pub struct UserController;

#[routes]
impl UserController {
    #[route(method = "head")]
    pub fn head_handler(&self) {}
}

fn main() {}
