use reframe::prelude::*;

mod controllers;

use controllers::{ProductController, UserController};

#[module(controllers = [UserController, ProductController])]
struct AppModule;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let registry = RouteRegistry::from_env()?;
    AppModule::register(&registry)?;

    // Handlers can also be registered without the macros.
    registry.register_route::<ProductController>(
        "export",
        RouteDescriptor::new(HttpMethod::Get, Some("/export.csv")),
    )?;

    let table = registry.route_table();
    tracing::info!(routes = table.len(), "Route table built");
    for route in &table {
        tracing::debug!(
            method = %route.method,
            path = %route.path,
            handler = %route.handler,
            "route"
        );
    }

    println!("{}", registry.route_table_json()?);
    Ok(())
}
