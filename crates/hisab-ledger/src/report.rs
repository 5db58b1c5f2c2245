//! # Report Aggregator
//!
//! Pulls the latest state from the three ledgers and reduces it to a
//! [`FinancialSummary`]. Read-only; safe to call repeatedly and concurrently.
//!
//! ```text
//!   sales.list ──┐
//!  credits.list ─┼── try_join! ──► FinancialSummary::from_records
//! expenses.list ─┘      │
//!                       ├── any Err ──► whole report fails (no partial sums)
//!                       └── total overflows ──► LedgerError::Validation
//! ```

use hisab_core::{FinancialSummary, SalesTotals, TenantId};
use hisab_db::LedgerStore;
use std::sync::Arc;
use tracing::debug;

use crate::error::LedgerResult;
use crate::service::{CreditLedger, ExpenseLedger, LedgerService, SaleLedger};

/// Report queries over all three ledgers of a store.
pub struct ReportService<S> {
    sales: SaleLedger<S>,
    credits: CreditLedger<S>,
    expenses: ExpenseLedger<S>,
}

impl<S> Clone for ReportService<S> {
    fn clone(&self) -> Self {
        ReportService {
            sales: self.sales.clone(),
            credits: self.credits.clone(),
            expenses: self.expenses.clone(),
        }
    }
}

impl<S: LedgerStore> ReportService<S> {
    pub fn new(store: Arc<S>) -> Self {
        ReportService {
            sales: LedgerService::new(Arc::clone(&store)),
            credits: LedgerService::new(Arc::clone(&store)),
            expenses: LedgerService::new(store),
        }
    }

    /// Totals for the dashboard.
    ///
    /// Empty collections sum to zero. Udhar is reported but not subtracted
    /// from `net_profit`.
    pub async fn summarize(&self, tenant: &TenantId) -> LedgerResult<FinancialSummary> {
        let (sales, credits, expenses) = tokio::try_join!(
            self.sales.list(tenant),
            self.credits.list(tenant),
            self.expenses.list(tenant),
        )?;

        let summary = FinancialSummary::from_records(&sales, &credits, &expenses)?;

        debug!(
            tenant = %tenant,
            sales = sales.len(),
            credits = credits.len(),
            expenses = expenses.len(),
            net_profit = summary.net_profit.value(),
            "Summary computed"
        );
        Ok(summary)
    }

    /// Footer totals of the sales sheet.
    pub async fn sales_totals(&self, tenant: &TenantId) -> LedgerResult<SalesTotals> {
        let sales = self.sales.list(tenant).await?;
        Ok(SalesTotals::from_sales(&sales)?)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
