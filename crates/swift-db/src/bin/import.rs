//! # SWIFT Code Importer
//!
//! Loads a CSV export of SWIFT codes into a database file.
//!
//! ## Usage
//! ```bash
//! # Import ./data/swift_codes.csv into ./swift.db (defaults)
//! cargo run -p swift-db --bin import
//!
//! # Explicit paths
//! cargo run -p swift-db --bin import -- --csv ./export.csv --db ./data/swift.db
//! ```
//!
//! Rows already present are left untouched, so the importer can be re-run.

use std::env;
use std::path::Path;

use anyhow::{bail, Context};
use swift_db::{import_csv, Database, DbConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./swift.db");
    let mut csv_path = String::from("./data/swift_codes.csv");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--csv" | "-c" => {
                if i + 1 < args.len() {
                    csv_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("SWIFT Code Importer");
                println!();
                println!("Usage: import [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --csv <PATH>   CSV export to load (default: ./data/swift_codes.csv)");
                println!("  -d, --db <PATH>    Database file path (default: ./swift.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => bail!("unknown argument: {other} (try --help)"),
        }
        i += 1;
    }

    if !Path::new(&csv_path).is_file() {
        bail!("CSV file not found: {csv_path}");
    }

    println!("SWIFT Code Importer");
    println!("===================");
    println!("Database: {}", db_path);
    println!("Source:   {}", csv_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path))
        .await
        .with_context(|| format!("opening database {db_path}"))?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let before = db.bank_codes().count().await?;
    let start = std::time::Instant::now();

    let report = import_csv(&db, &csv_path)
        .await
        .with_context(|| format!("importing {csv_path}"))?;

    let elapsed = start.elapsed();
    let after = db.bank_codes().count().await?;

    println!();
    println!("✓ Imported in {:?}", elapsed);
    println!("  Rows read:      {}", report.read);
    println!("  Inserted:       {}", report.inserted);
    println!("  Skipped:        {}", report.skipped);
    println!("  Already stored: {}", report.duplicates);
    println!("  Table size:     {} → {}", before, after);

    db.close().await;
    Ok(())
}
