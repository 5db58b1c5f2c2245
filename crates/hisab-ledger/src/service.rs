//! # Ledger Service
//!
//! Validate, derive, persist. One service per record kind, all generic over
//! the record store.
//!
//! ## Operation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  add(tenant, form)                                                      │
//! │     │                                                                   │
//! │     ├── R::from_form(form) ── Err ──► LedgerError::Validation (no write)│
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  store.insert(tenant, record) ── Err ──► NotFound / Store              │
//! │     │                                                                   │
//! │     ▼                                                                   │
//! │  stored record (with id)                                                │
//! │                                                                         │
//! │  update(tenant, id, form)  same validation, full replacement            │
//! │  remove(tenant, id)        NotFound if absent                           │
//! │  list(tenant)              straight from the store                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The service holds no state between calls. Failed writes are reported
//! once and never retried; callers re-fetch with `list` before retrying.

use hisab_core::{CreditRecord, ExpenseRecord, LedgerRecord, RecordKind, SaleRecord, TenantId};
use hisab_db::{DbError, RecordStore};
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, error, info};

use crate::error::{LedgerError, LedgerResult};

/// CRUD for one record kind over any [`RecordStore`].
pub struct LedgerService<R, S> {
    store: Arc<S>,
    _record: PhantomData<fn() -> R>,
}

/// Sales ledger.
pub type SaleLedger<S> = LedgerService<SaleRecord, S>;

/// Udhar ledger.
pub type CreditLedger<S> = LedgerService<CreditRecord, S>;

/// Expense ledger.
pub type ExpenseLedger<S> = LedgerService<ExpenseRecord, S>;

impl<R, S> Clone for LedgerService<R, S> {
    fn clone(&self) -> Self {
        LedgerService {
            store: Arc::clone(&self.store),
            _record: PhantomData,
        }
    }
}

impl<R, S> LedgerService<R, S>
where
    R: LedgerRecord,
    S: RecordStore<R>,
{
    pub fn new(store: Arc<S>) -> Self {
        LedgerService {
            store,
            _record: PhantomData,
        }
    }

    /// Validates `form` and stores a new record.
    ///
    /// ## Returns
    /// * `Ok(R)` - The stored record, derived fields and id filled in
    /// * `Err(Validation)` - A field is blank or not a finite number
    /// * `Err(Store)` - The store failed
    pub async fn add(&self, tenant: &TenantId, form: &R::Form) -> LedgerResult<R> {
        let record = self.validate(tenant, String::new(), form)?;

        let stored = self
            .store
            .insert(tenant, record)
            .await
            .map_err(|e| surface(e, tenant, R::KIND, "add"))?;

        info!(tenant = %tenant, kind = %R::KIND, id = %stored.id(), "Record added");
        Ok(stored)
    }

    /// Replaces every field of the record at `id`.
    ///
    /// ## Returns
    /// * `Ok(R)` - The record as now stored
    /// * `Err(NotFound)` - `id` does not exist for this tenant
    pub async fn update(&self, tenant: &TenantId, id: &str, form: &R::Form) -> LedgerResult<R> {
        let record = self.validate(tenant, id.to_string(), form)?;

        self.store
            .update(tenant, id, record.clone())
            .await
            .map_err(|e| surface(e, tenant, R::KIND, "update"))?;

        info!(tenant = %tenant, kind = %R::KIND, id = %id, "Record updated");
        Ok(record)
    }

    /// Permanently removes the record at `id`.
    pub async fn remove(&self, tenant: &TenantId, id: &str) -> LedgerResult<()> {
        self.store
            .delete(tenant, id)
            .await
            .map_err(|e| surface(e, tenant, R::KIND, "remove"))?;

        info!(tenant = %tenant, kind = %R::KIND, id = %id, "Record removed");
        Ok(())
    }

    /// All records of this kind for the tenant, in store order.
    pub async fn list(&self, tenant: &TenantId) -> LedgerResult<Vec<R>> {
        self.store
            .list(tenant)
            .await
            .map_err(|e| surface(e, tenant, R::KIND, "list"))
    }

    fn validate(&self, tenant: &TenantId, id: String, form: &R::Form) -> LedgerResult<R> {
        R::from_form(id, form).map_err(|e| {
            debug!(tenant = %tenant, kind = %R::KIND, field = e.field(), "Rejected form: {}", e);
            LedgerError::Validation(e)
        })
    }
}

/// Converts a store error, logging anything other than `NotFound`.
fn surface(
    err: DbError,
    tenant: &TenantId,
    kind: RecordKind,
    op: &'static str,
) -> LedgerError {
    if err.is_not_found() {
        debug!(tenant = %tenant, kind = %kind, op, "Record not found");
    } else {
        error!(tenant = %tenant, kind = %kind, op, error = %err, "Record store failed");
    }
    LedgerError::from(err)
}

// =============================================================================
// Unit Tests
// =============================================================================
