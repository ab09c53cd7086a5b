mod product;
mod user;

pub use product::ProductController;
pub use user::UserController;
