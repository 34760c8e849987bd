//! # Seed Data Generator
//!
//! Populates the database with the canonical sample data set for local
//! development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p store-db --bin seed
//!
//! # Specify database path
//! cargo run -p store-db --bin seed -- --db ./data/cornerstore.db
//! ```
//!
//! ## Generated Data
//! - 2 cashiers (Jim Bob, Steve Texas)
//! - 3 categories (Dairy, Bread, Produce)
//! - 3 products, one per category
//! - 3 orders with one line each; one order marked paid on 2023-09-29

use std::env;

use chrono::{TimeZone, Utc};
use store_core::pricing::{LineDraft, OrderDraft};
use store_db::{Database, DbConfig};

/// (name, brand, price_cents, category name)
const PRODUCTS: &[(&str, &str, i64, &str)] = &[
    ("Sourdough Bread", "Wheaties", 399, "Bread"),
    ("Almond Milk", "Silk", 289, "Dairy"),
    ("Pork Tenderloin", "Butchers", 1249, "Produce"),
];

const CASHIERS: &[(&str, &str)] = &[("Jim", "Bob"), ("Steve", "Texas")];

const CATEGORIES: &[&str] = &["Dairy", "Bread", "Produce"];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./data/cornerstore.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CornerStore Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./data/cornerstore.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 CornerStore Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    if let Some(parent) = std::path::Path::new(&db_path).parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Check existing data
    let existing = db.cashiers().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} cashiers", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding...");

    let mut cashier_ids = Vec::new();
    for (first, last) in CASHIERS {
        let cashier = db.cashiers().insert(first, last).await?;
        cashier_ids.push(cashier.id);
    }
    println!("✓ {} cashiers", cashier_ids.len());

    let mut category_ids = Vec::new();
    for name in CATEGORIES {
        let category = db.categories().insert(name).await?;
        category_ids.push((*name, category.id));
    }
    println!("✓ {} categories", category_ids.len());

    let mut product_ids = Vec::new();
    for (name, brand, price_cents, category_name) in PRODUCTS {
        let category_id = category_ids
            .iter()
            .find(|(n, _)| n == category_name)
            .map(|(_, id)| *id)
            .expect("product references a seeded category");

        let product = db
            .products()
            .insert(name, brand, *price_cents, category_id)
            .await?;
        product_ids.push(product.id);
    }
    println!("✓ {} products", product_ids.len());

    // Three sample orders: two open, one settled.
    let orders = [
        // (cashier, product, quantity, paid)
        (cashier_ids[1], product_ids[2], 22, false),
        (cashier_ids[0], product_ids[1], 55, false),
        (cashier_ids[1], product_ids[0], 111, true),
    ];

    for (cashier_id, product_id, quantity, paid) in orders {
        let created = db
            .orders()
            .submit(&OrderDraft {
                cashier_id,
                items: vec![LineDraft {
                    product_id,
                    quantity,
                }],
            })
            .await?;

        if paid {
            let paid_at = Utc.with_ymd_and_hms(2023, 9, 29, 0, 0, 0).unwrap();
            sqlx::query("UPDATE orders SET paid_on_date = ?1 WHERE id = ?2")
                .bind(paid_at)
                .bind(created.order.id)
                .execute(db.pool())
                .await?;
        }

        println!(
            "✓ order #{} (cashier {}, total {})",
            created.order.id,
            cashier_id,
            created.total()
        );
    }

    println!();
    println!("Done.");
    Ok(())
}
