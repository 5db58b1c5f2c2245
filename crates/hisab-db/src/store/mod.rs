//! # Record Store Port
//!
//! The one contract the ledger depends on, and its two adapters.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        RecordStore<R>                                   │
//! │        list / insert / update / delete, all scoped to a TenantId        │
//! │                                                                         │
//! │   ┌──────────────────────────────┐   ┌──────────────────────────────┐  │
//! │   │ LocalStore                   │   │ SqlStore                     │  │
//! │   │ key "{kind}-{tenant}"        │   │ table per kind               │  │
//! │   │ value: JSON array            │   │ WHERE owner_id = ?           │  │
//! │   │ insertion order              │   │ newest first                 │  │
//! │   └──────────────────────────────┘   └──────────────────────────────┘  │
//! │                 ▲                                  ▲                    │
//! │                 └──────────── RecordBackend ───────┘                    │
//! │                        (picked from config at runtime)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Contract
//! - Every operation filters by tenant; another tenant's records are never
//!   returned or touched.
//! - `update`/`delete` of an id the tenant does not own is `DbError::NotFound`.
//! - `insert` with an empty id assigns a UUID; a non-empty id is kept verbatim.
//! - Ids are unique per tenant and kind (`DbError::UniqueViolation`).

mod local;
mod sql;

pub use local::LocalStore;
pub use sql::{SqlRow, SqlStore};

use async_trait::async_trait;
use hisab_core::{CreditRecord, ExpenseRecord, LedgerRecord, SaleRecord, TenantId};

use crate::error::DbResult;

// =============================================================================
// RecordStore Trait
// =============================================================================

/// Tenant-scoped CRUD over one record kind.
#[async_trait]
pub trait RecordStore<R: LedgerRecord>: Send + Sync {
    /// All records of this kind for the tenant.
    async fn list(&self, tenant: &TenantId) -> DbResult<Vec<R>>;

    /// Stores a new record and returns it with its final id.
    async fn insert(&self, tenant: &TenantId, record: R) -> DbResult<R>;

    /// Replaces the record at `id` entirely. The stored id stays `id`.
    async fn update(&self, tenant: &TenantId, id: &str, record: R) -> DbResult<()>;

    /// Permanently removes the record at `id`.
    async fn delete(&self, tenant: &TenantId, id: &str) -> DbResult<()>;
}

/// A store that serves all three record kinds.
pub trait LedgerStore:
    RecordStore<SaleRecord> + RecordStore<CreditRecord> + RecordStore<ExpenseRecord>
{
}

impl<T> LedgerStore for T where
    T: RecordStore<SaleRecord> + RecordStore<CreditRecord> + RecordStore<ExpenseRecord>
{
}

// =============================================================================
// Runtime Backend Selection
// =============================================================================

/// Either backend, chosen at runtime.
#[derive(Debug, Clone)]
pub enum RecordBackend {
    Local(LocalStore),
    Sql(SqlStore),
}

impl From<LocalStore> for RecordBackend {
    fn from(store: LocalStore) -> Self {
        RecordBackend::Local(store)
    }
}

impl From<SqlStore> for RecordBackend {
    fn from(store: SqlStore) -> Self {
        RecordBackend::Sql(store)
    }
}

#[async_trait]
impl<R> RecordStore<R> for RecordBackend
where
    R: LedgerRecord + SqlRow,
{
    async fn list(&self, tenant: &TenantId) -> DbResult<Vec<R>> {
        match self {
            RecordBackend::Local(store) => RecordStore::<R>::list(store, tenant).await,
            RecordBackend::Sql(store) => RecordStore::<R>::list(store, tenant).await,
        }
    }

    async fn insert(&self, tenant: &TenantId, record: R) -> DbResult<R> {
        match self {
            RecordBackend::Local(store) => RecordStore::<R>::insert(store, tenant, record).await,
            RecordBackend::Sql(store) => RecordStore::<R>::insert(store, tenant, record).await,
        }
    }

    async fn update(&self, tenant: &TenantId, id: &str, record: R) -> DbResult<()> {
        match self {
            RecordBackend::Local(store) => RecordStore::<R>::update(store, tenant, id, record).await,
            RecordBackend::Sql(store) => RecordStore::<R>::update(store, tenant, id, record).await,
        }
    }

    async fn delete(&self, tenant: &TenantId, id: &str) -> DbResult<()> {
        match self {
            RecordBackend::Local(store) => RecordStore::<R>::delete(store, tenant, id).await,
            RecordBackend::Sql(store) => RecordStore::<R>::delete(store, tenant, id).await,
        }
    }
}
