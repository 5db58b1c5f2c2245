//! # Report Reductions
//!
//! Pure folds from record collections to report figures. Order-independent
//! and defined as zero for empty input. A total that leaves the finite range
//! is a `NotFinite` error naming the total, never an infinite figure.
//!
//! ```text
//! totalSales    = Σ sale.totalSell
//! totalUdhar    = Σ credit.amount
//! totalExpenses = Σ expense.amount
//! netProfit     = totalSales − totalExpenses     (udhar is NOT realized cash)
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Amount;
use crate::types::{CreditRecord, ExpenseRecord, SaleRecord};

// =============================================================================
// Financial Summary
// =============================================================================

/// Dashboard summary for one tenant. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub total_sales: Amount,
    pub total_udhar: Amount,
    pub total_expenses: Amount,
    pub net_profit: Amount,
}

impl FinancialSummary {
    /// Reduces the three collections.
    ///
    /// ## Example
    /// ```rust
    /// use hisab_core::summary::FinancialSummary;
    ///
    /// let summary = FinancialSummary::from_records(&[], &[], &[]).unwrap();
    /// assert_eq!(summary, FinancialSummary::default());
    /// ```
    pub fn from_records(
        sales: &[SaleRecord],
        credits: &[CreditRecord],
        expenses: &[ExpenseRecord],
    ) -> ValidationResult<Self> {
        let total_sales = total("totalSales", sales.iter().map(|s| s.total_sell))?;
        let total_udhar = total("totalUdhar", credits.iter().map(|c| c.amount))?;
        let total_expenses = total("totalExpenses", expenses.iter().map(|e| e.amount))?;
        let net_profit = total_sales
            .checked_sub(total_expenses)
            .ok_or_else(|| ValidationError::not_finite("netProfit"))?;

        Ok(FinancialSummary {
            total_sales,
            total_udhar,
            total_expenses,
            net_profit,
        })
    }
}

// =============================================================================
// Sales Totals
// =============================================================================

/// Footer totals of the sales sheet.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SalesTotals {
    pub total_investment: Amount,
    pub total_sell: Amount,
    pub total_profit: Amount,
}

impl SalesTotals {
    pub fn from_sales(sales: &[SaleRecord]) -> ValidationResult<Self> {
        Ok(SalesTotals {
            total_investment: total(
                "totalInvestment",
                sales.iter().map(|s| s.total_investment),
            )?,
            total_sell: total("totalSell", sales.iter().map(|s| s.total_sell))?,
            total_profit: total("totalProfit", sales.iter().map(|s| s.profit))?,
        })
    }
}

fn total(field: &str, amounts: impl Iterator<Item = Amount>) -> ValidationResult<Amount> {
    Amount::checked_sum(amounts).ok_or_else(|| ValidationError::not_finite(field))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{CreditForm, ExpenseForm, LedgerRecord, SaleForm};

    fn amt(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    fn sale(name: &str, q: i32, buy: i32, sell: i32) -> SaleRecord {
        SaleRecord::from_form(name.to_string(), &SaleForm::new(name, q, buy, sell)).unwrap()
    }

    #[test]
    fn test_summary_scenario() {
        let sales = vec![sale("Rice", 10, 5, 8)];
        let credits = vec![CreditRecord::from_form(
            "c1".into(),
            &CreditForm::new("Ali", "Sugar bag", 200),
        )
        .unwrap()];
        let expenses = vec![ExpenseRecord::from_form(
            "e1".into(),
            &ExpenseForm::new("Rent", 1000, "2024-01-01"),
        )
        .unwrap()];

        let summary = FinancialSummary::from_records(&sales, &credits, &expenses).unwrap();

        assert_eq!(summary.total_sales, amt(80.0));
        assert_eq!(summary.total_udhar, amt(200.0));
        assert_eq!(summary.total_expenses, amt(1000.0));
        assert_eq!(summary.net_profit, amt(-920.0));
    }

    #[test]
    fn test_summary_is_order_independent() {
        let a = sale("A", 1, 1, 3);
        let b = sale("B", 2, 2, 5);

        let forward = FinancialSummary::from_records(&[a.clone(), b.clone()], &[], &[]).unwrap();
        let backward = FinancialSummary::from_records(&[b, a], &[], &[]).unwrap();
        assert_eq!(forward, backward);
        assert_eq!(forward.net_profit, amt(13.0));
    }

    #[test]
    fn test_sales_totals() {
        let totals =
            SalesTotals::from_sales(&[sale("Rice", 10, 5, 8), sale("Tea", 2, 3, 2)]).unwrap();
        assert_eq!(totals.total_investment, amt(56.0));
        assert_eq!(totals.total_sell, amt(84.0));
        assert_eq!(totals.total_profit, amt(28.0));

        assert_eq!(SalesTotals::from_sales(&[]).unwrap(), SalesTotals::default());
    }

    #[test]
    fn test_overflowing_totals_are_rejected() {
        let big = SaleRecord::from_form("b".into(), &SaleForm::new("Big", 1, 0, 1e308)).unwrap();
        let sales = vec![big.clone(), big];

        assert_eq!(
            FinancialSummary::from_records(&sales, &[], &[]),
            Err(ValidationError::not_finite("totalSales"))
        );
        assert_eq!(
            SalesTotals::from_sales(&sales),
            Err(ValidationError::not_finite("totalSell"))
        );
    }

    #[test]
    fn test_net_profit_overflow_is_rejected() {
        let big = SaleRecord::from_form("b".into(), &SaleForm::new("Big", 1, 0, 1e308)).unwrap();
        let refund = ExpenseRecord::from_form(
            "e".into(),
            &ExpenseForm::new("Refund", -1e308, "2024-01-01"),
        )
        .unwrap();

        assert_eq!(
            FinancialSummary::from_records(&[big], &[], &[refund]),
            Err(ValidationError::not_finite("netProfit"))
        );
    }

    #[test]
    fn test_summary_json_round_trip() {
        let summary =
            FinancialSummary::from_records(&[sale("Rice", 10, 5, 8)], &[], &[]).unwrap();
        let json = serde_json::to_string(&summary).unwrap();
        let back: FinancialSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }

    #[test]
    fn test_summary_json_keys() {
        let json = serde_json::to_value(FinancialSummary::default()).unwrap();
        assert!(json.get("totalUdhar").is_some());
        assert!(json.get("netProfit").is_some());
    }
}
