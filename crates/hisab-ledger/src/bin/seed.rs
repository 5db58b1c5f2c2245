//! # Seed Data Generator
//!
//! Fills one shop with a small demo ledger and prints its summary.
//!
//! ## Usage
//! ```bash
//! # Seed the configured tenant (or "demo-shop")
//! cargo run -p hisab-ledger --bin seed
//!
//! # Use a specific config file and tenant
//! cargo run -p hisab-ledger --bin seed -- --config ./hisab.toml --tenant shop-42
//!
//! # Seed a throwaway local store
//! HISAB_STORAGE=local HISAB_STORAGE_PATH=./demo cargo run -p hisab-ledger --bin seed
//! ```
//!
//! ## Generated Records
//! - Sales: grocery staples with buy and sell rates
//! - Udhar: a few customers owing for items
//! - Expenses: rent, electricity, wages for one month

use hisab_core::{CreditForm, ExpenseForm, SaleForm, TenantId};
use hisab_ledger::{init_tracing, Ledger, LedgerConfig};
use std::env;
use std::path::PathBuf;

/// Tenant used when neither `--tenant` nor the config names one.
const DEMO_TENANT: &str = "demo-shop";

/// (name, quantity, buy rate, sell rate)
const SALES: &[(&str, f64, f64, f64)] = &[
    ("Rice", 10.0, 5.0, 8.0),
    ("Basmati Rice 5kg", 4.0, 1450.0, 1600.0),
    ("Daal Chana 1kg", 12.0, 280.0, 320.0),
    ("Sugar 1kg", 20.0, 140.0, 155.0),
    ("Cooking Oil 1L", 6.0, 520.0, 560.0),
    ("Tea 250g", 8.0, 390.0, 430.0),
];

/// (person, item, amount)
const UDHAR: &[(&str, &str, f64)] = &[
    ("Ali", "Sugar bag", 200.0),
    ("Bilal", "Cooking oil", 560.0),
    ("Sana", "Tea and milk", 480.0),
];

/// (name, amount, date)
const EXPENSES: &[(&str, f64, &str)] = &[
    ("Rent", 1000.0, "2024-01-01"),
    ("Electricity", 350.0, "2024-01-10"),
    ("Helper wages", 600.0, "2024-01-31"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut tenant_arg: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--tenant" | "-t" => {
                if i + 1 < args.len() {
                    tenant_arg = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("HisabKitab Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --config <PATH>  Config file (default: <config dir>/hisab.toml)");
                println!("  -t, --tenant <ID>    Shop to seed (default: config or {})", DEMO_TENANT);
                println!("  -h, --help           Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let config = LedgerConfig::load(config_path)?;
    init_tracing(&config.logging.filter);

    let tenant = match tenant_arg {
        Some(raw) => TenantId::new(raw)?,
        None => config
            .tenant()
            .or_else(|_| TenantId::new(DEMO_TENANT))?,
    };

    println!("HisabKitab Seed Data Generator");
    println!("==============================");
    println!("Storage: {} at {}", config.storage.backend, config.storage_path()?.display());
    println!("Shop:    {}", tenant);
    println!();

    let ledger = Ledger::open(&config).await?;
    println!("✓ Ledger opened");

    let existing = ledger.sales().list(&tenant).await?.len();
    if existing > 0 {
        println!("⚠ Shop already has {} sales", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    let mut sales_added = 0;
    for (name, quantity, buy_rate, sell_rate) in SALES {
        match ledger
            .sales()
            .add(&tenant, &SaleForm::new(*name, *quantity, *buy_rate, *sell_rate))
            .await
        {
            Ok(_) => sales_added += 1,
            Err(e) => eprintln!("Failed to add sale {}: {}", name, e),
        }
    }

    let mut udhar_added = 0;
    for (person, item, amount) in UDHAR {
        match ledger
            .credits()
            .add(&tenant, &CreditForm::new(*person, *item, *amount))
            .await
        {
            Ok(_) => udhar_added += 1,
            Err(e) => eprintln!("Failed to add udhar for {}: {}", person, e),
        }
    }

    let mut expenses_added = 0;
    for (name, amount, date) in EXPENSES {
        match ledger
            .expenses()
            .add(&tenant, &ExpenseForm::new(*name, *amount, *date))
            .await
        {
            Ok(_) => expenses_added += 1,
            Err(e) => eprintln!("Failed to add expense {}: {}", name, e),
        }
    }

    println!(
        "✓ Added {}/{} sales, {}/{} udhar, {}/{} expenses",
        sales_added,
        SALES.len(),
        udhar_added,
        UDHAR.len(),
        expenses_added,
        EXPENSES.len()
    );

    let summary = ledger.reports().summarize(&tenant).await?;
    let totals = ledger.reports().sales_totals(&tenant).await?;

    println!();
    println!("Summary");
    println!("  Total sales:      {}", config.format_amount(summary.total_sales));
    println!("  Total udhar:      {}", config.format_amount(summary.total_udhar));
    println!("  Total expenses:   {}", config.format_amount(summary.total_expenses));
    println!("  Net profit:       {}", config.format_amount(summary.net_profit));
    println!();
    println!("Sales sheet");
    println!("  Investment:       {}", config.format_amount(totals.total_investment));
    println!("  Sell:             {}", config.format_amount(totals.total_sell));
    println!("  Profit:           {}", config.format_amount(totals.total_profit));

    println!();
    println!("✓ Seed complete!");

    Ok(())
}
