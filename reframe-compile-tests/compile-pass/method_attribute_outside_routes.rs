use reframe::get;

pub struct StatusController;

impl StatusController {
    #[get("/status")]
    pub fn status(&self) -> u8 {
        1
    }
}

fn main() {
    assert_eq!(StatusController.status(), 1);
}
