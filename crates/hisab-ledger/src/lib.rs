//! # hisab-ledger: Ledger & Report Services for HisabKitab
//!
//! The narrow interface the UI calls into: add/update/remove/list per record
//! kind, and the financial summary over all three.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HisabKitab Call Flow                             │
//! │                                                                         │
//! │  UI form ──► Ledger::sales().add(&tenant, &SaleForm)                   │
//! │                    │                                                    │
//! │  ┌─────────────────▼───────────────────────────────────────────────┐   │
//! │  │              ★ hisab-ledger (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌───────────────┐   │   │
//! │  │   │ LedgerService │   │ ReportService │   │ LedgerConfig  │   │   │
//! │  │   │ Sale/Credit/  │   │ summarize     │   │ toml + env    │   │   │
//! │  │   │ Expense       │   │ sales_totals  │   │ telemetry     │   │   │
//! │  │   └───────┬───────┘   └───────┬───────┘   └───────────────┘   │   │
//! │  └───────────┼───────────────────┼─────────────────────────────────┘   │
//! │              │                   │                                      │
//! │  hisab-core  ▼  validate/derive  ▼  FinancialSummary::from_records      │
//! │  hisab-db    ▼  RecordStore<R>  (LocalStore | SqlStore)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`ledger`] - `Ledger` facade and `Ledger::open`
//! - [`service`] - Per-kind CRUD with validation
//! - [`report`] - Financial summary and sales totals
//! - [`config`] - Configuration file and environment overrides
//! - [`telemetry`] - Tracing subscriber setup
//! - [`error`] - Ledger error type and UI error body
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hisab_ledger::{Ledger, LedgerConfig};
//! use hisab_core::SaleForm;
//!
//! let config = LedgerConfig::load(None)?;
//! let ledger = Ledger::open(&config).await?;
//! let tenant = config.tenant()?;
//!
//! ledger.sales().add(&tenant, &SaleForm::new("Rice", "10", "5", "8")).await?;
//! let summary = ledger.reports().summarize(&tenant).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod ledger;
pub mod report;
pub mod service;
pub mod telemetry;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{ConfigError, ConfigResult, LedgerConfig, StorageBackend};
pub use error::{ErrorBody, ErrorCode, LedgerError, LedgerResult};
pub use ledger::Ledger;
pub use report::ReportService;
pub use service::{CreditLedger, ExpenseLedger, LedgerService, SaleLedger};
pub use telemetry::init_tracing;
