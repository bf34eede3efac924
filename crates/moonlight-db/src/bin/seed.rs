//! # Seed Data Generator
//!
//! Populates the database with demo data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p moonlight-db --bin seed
//!
//! # Specify database path
//! cargo run -p moonlight-db --bin seed -- --db ./data/moonlight.db
//! ```
//!
//! ## Generated Data
//! - The shop's categories (perfumes, body oils, candles, diffusers, gift sets)
//! - A catalogue of products per category with cost/selling prices and stock
//! - A handful of customers with credit limits

use chrono::Utc;
use std::env;
use uuid::Uuid;

use moonlight_core::{Category, Customer, Product};
use moonlight_db::{Database, DbConfig};

/// Category name, description, and products as (name, cost, price in naira).
const CATALOGUE: &[(&str, &str, &[(&str, i64, i64)])] = &[
    (
        "Perfumes",
        "Eau de parfum and eau de toilette",
        &[
            ("Midnight Rose Perfume 50ml", 5_000, 8_000),
            ("Midnight Rose Perfume 100ml", 8_500, 14_000),
            ("Amber Oud Perfume 50ml", 6_000, 10_500),
            ("Citrus Bloom Perfume 50ml", 4_200, 7_000),
            ("Velvet Musk Perfume 100ml", 9_000, 15_500),
            ("Ocean Drift Perfume 50ml", 4_800, 8_500),
        ],
    ),
    (
        "Body Oils",
        "Concentrated undiluted body oils",
        &[
            ("Amber Oud Body Oil 12ml", 1_800, 3_500),
            ("Vanilla Sands Body Oil 12ml", 1_500, 3_000),
            ("Jasmine Noir Body Oil 12ml", 1_700, 3_200),
            ("Sandalwood Body Oil 12ml", 2_000, 4_000),
        ],
    ),
    (
        "Scented Candles",
        "Hand-poured soy wax candles",
        &[
            ("Lavender Dusk Candle 200g", 2_500, 4_500),
            ("Cedar & Smoke Candle 200g", 2_800, 5_000),
            ("Citrus Grove Candle 200g", 2_400, 4_200),
        ],
    ),
    (
        "Diffusers",
        "Reed diffusers and refills",
        &[
            ("White Tea Reed Diffuser 100ml", 3_500, 6_500),
            ("Rose Garden Reed Diffuser 100ml", 3_800, 7_000),
            ("Diffuser Refill Oil 250ml", 2_200, 4_000),
        ],
    ),
    (
        "Gift Sets",
        "Boxed sets for gifting",
        &[
            ("Signature Trio Gift Set", 12_000, 22_000),
            ("His & Hers Gift Set", 15_000, 27_500),
        ],
    ),
];

/// Demo customers as (name, phone, email, credit limit in naira).
const CUSTOMERS: &[(&str, &str, Option<&str>, i64)] = &[
    ("Ada Obi", "+234 803 555 1234", Some("ada@example.com"), 50_000),
    ("Chinedu Eze", "+234 805 111 2233", None, 30_000),
    ("Funke Alabi", "+234 701 999 8877", Some("funke@example.com"), 0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./moonlight_dev.db");

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
                println!("Moonlight Retail Manager Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./moonlight_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Moonlight Retail Manager Seed Data Generator");
    println!("===============================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding catalogue...");

    let now = Utc::now();
    let mut product_count = 0usize;

    for (index, (category_name, description, products)) in CATALOGUE.iter().enumerate() {
        let category = Category {
            id: Uuid::new_v4().to_string(),
            name: category_name.to_string(),
            description: Some(description.to_string()),
            created_at: now,
        };
        db.categories().insert(&category).await?;

        for (offset, (name, cost_naira, price_naira)) in products.iter().enumerate() {
            // Deterministic pseudo-random stock from the position; a few
            // products land below the low-stock threshold on purpose.
            let quantity = ((index * 17 + offset * 7) % 60) as i64;

            let product = Product {
                id: Uuid::new_v4().to_string(),
                category_id: category.id.clone(),
                name: name.to_string(),
                description: None,
                cost_price_cents: cost_naira * 100,
                selling_price_cents: price_naira * 100,
                quantity,
                image_url: None,
                created_at: now,
                updated_at: now,
            };

            if let Err(e) = db.products().insert(&product).await {
                eprintln!("Failed to insert {}: {}", product.name, e);
                continue;
            }
            product_count += 1;
        }

        println!("  {} ({} products)", category_name, products.len());
    }

    println!();
    println!("Seeding customers...");
    for (name, phone, email, credit_naira) in CUSTOMERS {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(|e| e.to_string()),
            credit_limit_cents: credit_naira * 100,
            created_at: now,
        };
        db.customers().insert(&customer).await?;
        println!("  {}", name);
    }

    println!();
    println!(
        "✓ Seed complete: {} products, {} categories, {} customers",
        product_count,
        CATALOGUE.len(),
        CUSTOMERS.len()
    );

    Ok(())
}
