//! # Backup CLI
//!
//! Exports the full database as a dated JSON document.
//!
//! ## Usage
//! ```bash
//! cargo run -p moonlight-app --bin backup -- --db ./moonlight_dev.db --out ./exports
//! ```

use std::env;

use tracing::Level;
use tracing_subscriber::EnvFilter;

use moonlight_app::{AppConfig, BackupService};
use moonlight_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // INFO by default, overridable with RUST_LOG.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::default().add_directive(Level::INFO.into())),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./moonlight_dev.db");
    let mut config = AppConfig::from_env();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    config.export_dir = args[i + 1].clone().into();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Moonlight Retail Manager Backup Export");
                println!();
                println!("Usage: backup [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./moonlight_dev.db)");
                println!("  -o, --out <DIR>    Export directory (default: ./exports)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let service = BackupService::new(db, &config);

    let (path, snapshot) = service.export().await?;

    println!("✓ Backup written to {}", path.display());
    println!(
        "  {} categories, {} products, {} customers, {} sales, {} sale items, {} payments",
        snapshot.data.categories.len(),
        snapshot.data.products.len(),
        snapshot.data.customers.len(),
        snapshot.data.sales.len(),
        snapshot.data.sale_items.len(),
        snapshot.data.payments.len()
    );

    Ok(())
}
