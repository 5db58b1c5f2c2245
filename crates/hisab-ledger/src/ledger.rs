//! # Ledger Facade
//!
//! One entry point per shop process: the three ledgers and the reports, all
//! sharing a single record store.
//!
//! ```text
//! LedgerConfig ──► Ledger::open ──► RecordBackend::{Local | Sql}
//!                                      │
//!              ┌───────────────┬───────┴───────┬───────────────┐
//!              ▼               ▼               ▼               ▼
//!           sales()        credits()       expenses()      reports()
//! ```

use hisab_db::{Database, DbConfig, DbError, LedgerStore, LocalStore, RecordBackend};
use std::sync::Arc;
use tracing::info;

use crate::config::{LedgerConfig, StorageBackend};
use crate::error::LedgerResult;
use crate::report::ReportService;
use crate::service::{CreditLedger, ExpenseLedger, LedgerService, SaleLedger};

/// All ledger operations over one store.
pub struct Ledger<S> {
    store: Arc<S>,
    sales: SaleLedger<S>,
    credits: CreditLedger<S>,
    expenses: ExpenseLedger<S>,
    reports: ReportService<S>,
}

impl<S> Clone for Ledger<S> {
    fn clone(&self) -> Self {
        Ledger {
            store: Arc::clone(&self.store),
            sales: self.sales.clone(),
            credits: self.credits.clone(),
            expenses: self.expenses.clone(),
            reports: self.reports.clone(),
        }
    }
}

impl<S: LedgerStore> Ledger<S> {
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Ledger {
            sales: LedgerService::new(Arc::clone(&store)),
            credits: LedgerService::new(Arc::clone(&store)),
            expenses: LedgerService::new(Arc::clone(&store)),
            reports: ReportService::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn sales(&self) -> &SaleLedger<S> {
        &self.sales
    }

    pub fn credits(&self) -> &CreditLedger<S> {
        &self.credits
    }

    pub fn expenses(&self) -> &ExpenseLedger<S> {
        &self.expenses
    }

    pub fn reports(&self) -> &ReportService<S> {
        &self.reports
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

impl Ledger<RecordBackend> {
    /// Opens the backend selected by `config`.
    ///
    /// ## Backends
    /// - `local`: JSON files under the storage directory
    /// - `sqlite`: database file, parent directory created, migrations run
    pub async fn open(config: &LedgerConfig) -> LedgerResult<Self> {
        let path = config.storage_path()?;

        let backend = match config.storage.backend {
            StorageBackend::Local => RecordBackend::from(LocalStore::open(&path).await?),
            StorageBackend::Sqlite => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .map_err(DbError::from)?;
                }
                let db = Database::new(DbConfig::new(&path)).await?;
                RecordBackend::from(db.store())
            }
        };

        info!(
            backend = %config.storage.backend,
            path = %path.display(),
            "Ledger opened"
        );
        Ok(Ledger::new(backend))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use hisab_core::{CreditForm, ExpenseForm, SaleForm, TenantId};

    #[tokio::test]
    async fn test_facade_shares_one_store() {
        let ledger = Ledger::new(LocalStore::in_memory());
        let tenant = TenantId::new("shop1").unwrap();

        ledger
            .sales()
            .add(&tenant, &SaleForm::new("Rice", 10, 5, 8))
            .await
            .unwrap();
        ledger
            .credits()
            .add(&tenant, &CreditForm::new("Ali", "Sugar bag", 200))
            .await
            .unwrap();
        ledger
            .expenses()
            .add(&tenant, &ExpenseForm::new("Rent", 1000, "2024-01-01"))
            .await
            .unwrap();

        let summary = ledger.clone().reports().summarize(&tenant).await.unwrap();
        assert_eq!(summary.total_sales.value(), 80.0);
        assert_eq!(summary.total_udhar.value(), 200.0);
        assert_eq!(summary.total_expenses.value(), 1000.0);
        assert_eq!(summary.net_profit.value(), -920.0);
    }

    #[tokio::test]
    async fn test_open_local_backend() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LedgerConfig::default();
        config.storage.backend = StorageBackend::Local;
        config.storage.path = Some(dir.path().join("data"));

        let ledger = Ledger::open(&config).await.unwrap();
        assert!(matches!(ledger.store(), RecordBackend::Local(_)));
        assert!(dir.path().join("data").is_dir());
    }

    #[tokio::test]
    async fn test_open_sqlite_creates_parent_dir() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = LedgerConfig::default();
        config.storage.path = Some(dir.path().join("nested").join("hisab.db"));

        let ledger = Ledger::open(&config).await.unwrap();
        assert!(matches!(ledger.store(), RecordBackend::Sql(_)));
        assert!(dir.path().join("nested").join("hisab.db").exists());
    }
}
