//! # hisab-db: Record Store Layer for HisabKitab
//!
//! The persistence port the ledger is written against, plus its two
//! interchangeable adapters.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        HisabKitab Data Flow                             │
//! │                                                                         │
//! │  LedgerService::add(tenant, form)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     hisab-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │  RecordStore  │    │   Adapters    │    │   Database   │  │   │
//! │  │   │  (store/)     │    │               │    │  (pool.rs)   │  │   │
//! │  │   │               │◄───│ LocalStore    │    │ SqlitePool   │  │   │
//! │  │   │ list, insert  │    │ SqlStore  ◄───┼────│ migrations   │  │   │
//! │  │   │ update,delete │    │ RecordBackend │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  <data dir>/local/*.json            <data dir>/hisab.db                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `RecordStore` trait, `LocalStore`, `SqlStore`, `RecordBackend`
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Record store error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hisab_db::{Database, DbConfig, RecordStore};
//!
//! let db = Database::new(DbConfig::new("path/to/hisab.db")).await?;
//! let store = db.store();
//!
//! let stored = store.insert(&tenant, sale).await?;
//! let sales: Vec<SaleRecord> = store.list(&tenant).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use store::{LedgerStore, LocalStore, RecordBackend, RecordStore, SqlRow, SqlStore};
