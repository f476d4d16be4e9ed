//! Example: Generating a diagram from a programmatically built model
//!
//! This example demonstrates how to build an architecture model through the
//! model API directly, without the interactive wizard, and project it at all
//! three detail levels.

use c4forge::{
    DiagramBuilder, DiagramScope,
    model::{ArchitectureModel, SystemKind},
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Building architecture model...\n");

    let mut model = ArchitectureModel::new();

    // Actors and systems
    let customer = model.add_person("Customer", "A shopper placing orders")?;
    let shop = model.add_system("Shop", "Online store", SystemKind::Internal)?;
    let payments = model.add_system("Payments", "Card processor", SystemKind::External)?;

    // Containers inside the shop
    let web_app = model.add_container(shop, "Web App", "Storefront UI", Some("React"))?;
    let api = model.add_container(shop, "API", "Order handling", Some("Axum"))?;
    model.add_container(shop, "Database", "Order storage", Some("PostgreSQL"))?;

    // Components inside the API container
    let orders = model.add_component(api, "Order Service", "Creates orders", None)?;
    model.add_component(api, "Catalog Service", "Lists products", None)?;

    // Relationships
    model.add_relationship(customer, web_app, "browses and buys")?;
    model.add_relationship(web_app, orders, "submits orders to")?;
    model.add_relationship(shop, payments, "charges cards via")?;

    println!("Model built:");
    println!("  Persons: {}", model.persons().len());
    println!("  Systems: {}", model.systems().len());
    println!("  Relationships: {}", model.relationships().len());
    println!();

    let builder = DiagramBuilder::default();

    let context = builder.render_mermaid(&model, &DiagramScope::Context)?;
    println!("--- Context diagram ---\n{context}");

    let container_scope = DiagramScope::Container {
        system: "Shop".to_string(),
    };
    let container = builder.render_mermaid(&model, &container_scope)?;
    println!("--- Container diagram ---\n{container}");

    let component_scope = DiagramScope::Component {
        system: "Shop".to_string(),
        container: "API".to_string(),
    };
    let component = builder.render_mermaid(&model, &component_scope)?;
    println!("--- Component diagram ---\n{component}");

    Ok(())
}
