//! # Inframex Terminal
//!
//! Scripted walkthrough of one sale: search, scan, adjust, commit.
//!
//! ## Startup Sequence
//! ```text
//! 1. Initialize logging (tracing-subscriber, RUST_LOG overridable)
//! 2. Seed the in-memory catalog with the demo products
//! 3. Open a sale session and drive it like a frontend would
//! 4. Print the committed receipt as JSON
//! ```
//!
//! Run with `cargo run -p inframex-terminal`.

use std::error::Error;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use inframex_catalog::{seed, Catalog, MemoryCatalog};
use inframex_core::Money;
use inframex_engine::SaleSession;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let catalog = Arc::new(MemoryCatalog::with_products(seed::demo_products()));
    info!(products = catalog.count().await, "Catalog seeded");

    let session = SaleSession::new(catalog.clone());

    // Cashier searches for pipe and clicks the first hit twice
    let hits = catalog.search(Some("tubo"), None).await?;
    println!("Search 'tubo': {} hit(s)", hits.len());
    let tubo = hits.first().ok_or("demo catalog is missing the pipe")?;
    session.add_item(&tubo.id).await?;
    session.add_item(&tubo.id).await?;

    // A sack of cement arrives over the barcode scanner
    let scanned = session.add_by_barcode("7501234567891").await?;
    if scanned.is_none() {
        println!("Barcode not recognized");
    }

    // Customer wants three pipes after all
    session.set_quantity(&tubo.id, 3).await?;

    let view = session.cart();
    println!("\n--- Cart ---");
    for line in &view.lines {
        println!(
            "{:<28} x{:<3} {:>10} = {}",
            line.name,
            line.quantity,
            Money::from_cents(line.unit_price_cents).to_string(),
            Money::from_cents(line.line_total_cents)
        );
    }
    println!(
        "TOTAL: {} ({} units)\n",
        Money::from_cents(view.totals.total_cents),
        view.totals.total_quantity
    );

    let receipt = session.commit().await?;
    println!("--- Receipt {} ---", receipt.receipt_number);
    println!("{}", serde_json::to_string_pretty(&receipt)?);

    let low = catalog.low_stock().await;
    if !low.is_empty() {
        println!("\nLow stock after sale:");
        for product in low {
            println!("  {:<28} {} {}(s) left", product.name, product.stock, product.unit);
        }
    }

    Ok(())
}
