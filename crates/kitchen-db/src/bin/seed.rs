//! # Seed Data Generator
//!
//! Populates the database with a small chicken restaurant for development.
//!
//! ## Usage
//! ```bash
//! # Seed the database named in kitchen.toml (or ./kitchen.db)
//! cargo run -p kitchen-db --bin seed
//!
//! # Specify database path
//! cargo run -p kitchen-db --bin seed -- --db ./data/kitchen.db
//!
//! # Use another config file and print the menus as JSON
//! cargo run -p kitchen-db --bin seed -- --config ./kitchen.toml --json
//! ```
//!
//! ## Generated Data
//! - Menu groups: singles, doubles, combos
//! - Products: one per chicken flavour
//! - Menus: one single per product, doubles and combos priced below
//!   the sum of their parts
//! - Tables: eight empty tables

use kitchen_core::catalog::{
    MenuCreate, MenuGroup, MenuGroupCreate, MenuLineItemRequest, Product, ProductCreate,
};
use kitchen_core::seating::TableCreate;
use kitchen_db::{Database, KitchenConfig};
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Chicken flavours and their price in won.
const PRODUCTS: &[(&str, i64)] = &[
    ("Fried Chicken", 16_000),
    ("Seasoned Chicken", 16_000),
    ("Half-and-Half Chicken", 16_000),
    ("Roast Chicken", 17_000),
    ("Soy Sauce Chicken", 17_000),
    ("Green Onion Chicken", 17_000),
];

/// Discount applied to multi-product menus.
const COMBO_DISCOUNT: i64 = 2_000;

const TABLE_COUNT: usize = 8;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut json = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--json" => json = true,
            "--help" | "-h" => {
                println!("Kitchen POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>        Database file path (overrides config)");
                println!("  -c, --config <PATH>    kitchen.toml location");
                println!("      --json             Print the seeded menus as JSON");
                println!("  -h, --help             Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let mut config = KitchenConfig::load(config_path)?;
    if let Some(path) = db_path {
        config.database.path = path;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!(path = ?config.database.path, "Seeding kitchen database");

    let db = Database::new(config.db_config()).await?;

    let existing = db.products().list().await?;
    if !existing.is_empty() {
        warn!(
            products = existing.len(),
            "Database already has products, skipping seed to avoid duplicates"
        );
        return Ok(());
    }

    let start = std::time::Instant::now();

    let singles = menu_group(&db, "Singles").await?;
    let doubles = menu_group(&db, "Doubles").await?;
    let combos = menu_group(&db, "Combos").await?;

    let mut products: Vec<Product> = Vec::with_capacity(PRODUCTS.len());
    for (name, price) in PRODUCTS {
        let product = db
            .products()
            .create(ProductCreate {
                name: Some(name.to_string()),
                price: Some(Decimal::from(*price)),
            })
            .await?;
        products.push(product);
    }

    for product in &products {
        let price = product.price().amount();

        db.menus()
            .create(MenuCreate {
                name: Some(product.name().to_string()),
                price: Some(price),
                menu_group_id: singles.id(),
                line_items: vec![line(product, 1)],
            })
            .await?;

        db.menus()
            .create(MenuCreate {
                name: Some(format!("Two {}", product.name())),
                price: Some(price * Decimal::from(2) - Decimal::from(COMBO_DISCOUNT)),
                menu_group_id: doubles.id(),
                line_items: vec![line(product, 2)],
            })
            .await?;
    }

    for pair in products.chunks(2) {
        if let [first, second] = pair {
            let total = first.price().amount() + second.price().amount();
            db.menus()
                .create(MenuCreate {
                    name: Some(format!("{} + {}", first.name(), second.name())),
                    price: Some(total - Decimal::from(COMBO_DISCOUNT)),
                    menu_group_id: combos.id(),
                    line_items: vec![line(first, 1), line(second, 1)],
                })
                .await?;
        }
    }

    for _ in 0..TABLE_COUNT {
        db.tables()
            .create(TableCreate {
                number_of_guests: 0,
                empty: true,
            })
            .await?;
    }

    let menus = db.menus().list().await?;
    info!(
        products = products.len(),
        menus = menus.len(),
        tables = TABLE_COUNT,
        elapsed = ?start.elapsed(),
        "Seed complete"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&menus)?);
    }

    db.close().await;
    Ok(())
}

async fn menu_group(db: &Database, name: &str) -> Result<MenuGroup, Box<dyn std::error::Error>> {
    Ok(db
        .menu_groups()
        .create(MenuGroupCreate {
            name: Some(name.to_string()),
        })
        .await?)
}

fn line(product: &Product, quantity: i64) -> MenuLineItemRequest {
    MenuLineItemRequest {
        product_id: product.id(),
        quantity,
    }
}
