//! # hisab-core: Pure Ledger Logic for HisabKitab
//!
//! Entity model for a small-shop ledger: sales, udhar (credit given to
//! customers) and expenses, plus the derived figures and report reductions.
//! Pure functions only.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HisabKitab Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    UI layer (external)                          │   │
//! │  │    Sell page ──► Udhar page ──► Expenses page ──► Dashboard    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ forms in, records/summary out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    hisab-ledger                                 │   │
//! │  │    LedgerService (add/update/remove/list), ReportService       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ hisab-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  record   │  │  summary  │  │   │
//! │  │   │  Records  │  │  Amount   │  │  Forms    │  │  Totals   │  │   │
//! │  │   │  Tenant   │  │           │  │derive_sale│  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO ASYNC • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    hisab-db (Record Store)                      │   │
//! │  │              Local key-value store, SQLite tables               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Records, tenant id, record kinds
//! - [`money`] - Finite monetary amount
//! - [`record`] - Forms, `derive_sale`, the `LedgerRecord` trait
//! - [`summary`] - Financial summary and sales totals
//! - [`validation`] - Raw field parsing
//! - [`error`] - Validation errors
//!
//! ## Example Usage
//!
//! ```rust
//! use hisab_core::{LedgerRecord, SaleForm, SaleRecord};
//!
//! let form = SaleForm::new("Rice", "10", "5", "8");
//! let sale = SaleRecord::from_form(String::new(), &form).unwrap();
//!
//! assert_eq!(sale.total_investment.value(), 50.0);
//! assert_eq!(sale.total_sell.value(), 80.0);
//! assert_eq!(sale.profit.value(), 30.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod record;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ValidationError, ValidationResult};
pub use money::Amount;
pub use record::{
    derive_sale, new_record_id, CreditForm, ExpenseForm, LedgerRecord, SaleFigures, SaleForm,
};
pub use summary::{FinancialSummary, SalesTotals};
pub use types::*;
pub use validation::RawField;
