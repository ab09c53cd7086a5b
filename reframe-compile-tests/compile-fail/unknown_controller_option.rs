use reframe::controller;

#[controller(path = "/users")]
pub struct UserController;

fn main() {}
