//! # Demo Catalog Generator
//!
//! Populates a database with a demo flower-shop catalog for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default dev database
//! cargo run -p lavka-db --bin seed
//!
//! # Specify database path
//! cargo run -p lavka-db --bin seed -- --db ./data/app.db
//! ```
//!
//! Opening the database already ensures the three default products; this
//! binary layers a richer catalog on top. Entries that already exist are
//! skipped, so the generator is safe to re-run.

use std::env;

use lavka_core::Money;
use lavka_db::{DbConfig, Database, DbError};

/// Demo catalog: `(name, price, stock, category)`.
const CATALOG: &[(&str, Money, i64, &str)] = &[
    ("роза красная", Money::from_cents(25_000), 50, "цветы"),
    ("тюльпан", Money::from_cents(9_000), 120, "цветы"),
    ("пион", Money::from_cents(32_000), 30, "цветы"),
    ("эвкалипт", Money::from_cents(18_000), 45, "цветы"),
    ("лента атласная", Money::from_cents(4_000), 80, "упаковка"),
    ("бумага крафт", Money::from_cents(6_000), 90, "упаковка"),
    ("коробка подарочная", Money::from_cents(22_000), 35, "упаковка"),
    ("открытка", Money::from_cents(7_000), 60, "аксессуар"),
    ("ваза стеклянная", Money::from_cents(45_000), 15, "аксессуар"),
    ("кашпо керамическое", Money::from_cents(38_000), 20, "аксессуар"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./lavka_dev.db");

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
                println!("Lavka Demo Catalog Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./lavka_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Lavka Demo Catalog Generator");
    println!("===============================");
    println!("Database: {}", db_path);
    println!();

    // Connect: migrations and default rows are ensured on open
    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied, defaults ensured");
    println!();
    println!("Adding demo catalog...");

    let mut added = 0;
    let mut skipped = 0;

    for (name, price, stock, category) in CATALOG {
        match db.products().insert(name, *price, *stock, category).await {
            Ok(_) => added += 1,
            Err(DbError::UniqueViolation { .. }) => skipped += 1,
            Err(e) => {
                eprintln!("Failed to insert {}: {}", name, e);
            }
        }
    }

    println!();
    println!("✓ Seed complete: {} added, {} already present", added, skipped);
    println!("  Total products: {}", db.products().count().await?);

    db.close().await;

    Ok(())
}
