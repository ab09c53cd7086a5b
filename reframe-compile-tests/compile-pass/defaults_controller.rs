use reframe::prelude::*;

#[controller(defaults)]
pub struct MetricsController;

#[routes]
impl MetricsController {
    #[get("/metrics")]
    pub fn scrape(&self) {}
}

fn main() {
    let registry = RouteRegistry::new();
    registry.register::<MetricsController>().unwrap();
    assert_eq!(registry.route_table()[0].path, "/metrics");
    MetricsController.scrape();
}
