//! # Domain Types
//!
//! Core domain types used throughout HisabKitab.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleRecord    │   │  CreditRecord   │   │  ExpenseRecord  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  person         │   │  name           │       │
//! │  │  quantity       │   │  item           │   │  amount         │       │
//! │  │  buyRate        │   │  amount         │   │  date           │       │
//! │  │  sellRate       │   └─────────────────┘   └─────────────────┘       │
//! │  │  totalInvestment│  ◄── derived                                      │
//! │  │  totalSell      │  ◄── derived                                      │
//! │  │  profit         │  ◄── derived                                      │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │    TenantId     │   │   RecordKind    │                             │
//! │  │  shop / user id │   │  Sale           │                             │
//! │  └─────────────────┘   │  Credit (udhar) │                             │
//! │                        │  Expense        │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Persisted Shape
//! Records serialize with camelCase keys, identical for every backend:
//! ```text
//! Sale:    { id, name, quantity, buyRate, sellRate, totalInvestment, totalSell, profit }
//! Credit:  { id, person, item, amount }
//! Expense: { id, name, amount, date }   // date: "YYYY-MM-DD"
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Amount;

// =============================================================================
// Tenant
// =============================================================================

/// Identifier of the shop (or authenticated user) that owns a set of records.
///
/// Every store and service call takes one explicitly; there is no ambient
/// "current shop".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct TenantId(String);

impl TenantId {
    /// Creates a tenant id.
    ///
    /// ## Rules
    /// - Trimmed, must not be empty
    /// - No control characters
    ///
    /// ## Example
    /// ```rust
    /// use hisab_core::types::TenantId;
    ///
    /// assert_eq!(TenantId::new(" shop-1 ").unwrap().as_str(), "shop-1");
    /// assert!(TenantId::new("").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> ValidationResult<Self> {
        let id = id.as_ref().trim();

        if id.is_empty() {
            return Err(ValidationError::required("tenantId"));
        }

        if id.chars().any(char::is_control) {
            return Err(ValidationError::InvalidFormat {
                field: "tenantId".to_string(),
                reason: "must not contain control characters".to_string(),
            });
        }

        Ok(TenantId(id.to_string()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Record Kind
// =============================================================================

/// The three independent collections each tenant owns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Stock bought and sold.
    Sale,
    /// Udhar: credit given to a customer.
    Credit,
    /// Operating expense (rent, electricity, ...).
    Expense,
}

impl RecordKind {
    pub const ALL: [RecordKind; 3] = [RecordKind::Sale, RecordKind::Credit, RecordKind::Expense];

    /// Key prefix for device-local storage: `"{local_key}-{tenantId}"`.
    pub const fn local_key(&self) -> &'static str {
        match self {
            RecordKind::Sale => "products",
            RecordKind::Credit => "credits",
            RecordKind::Expense => "expenses",
        }
    }

    /// Relational table name.
    pub const fn table(&self) -> &'static str {
        match self {
            RecordKind::Sale => "sales",
            RecordKind::Credit => "udhars",
            RecordKind::Expense => "expenses",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RecordKind::Sale => "sale",
            RecordKind::Credit => "credit",
            RecordKind::Expense => "expense",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A line of stock sold.
///
/// ## Invariants
/// - `quantity >= 0`
/// - `total_investment = quantity × buy_rate`
/// - `total_sell = quantity × sell_rate`
/// - `profit = total_sell − total_investment`
///
/// The derived fields are only ever produced by [`crate::record::derive_sale`];
/// callers never supply them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub buy_rate: Amount,
    pub sell_rate: Amount,
    pub total_investment: Amount,
    pub total_sell: Amount,
    pub profit: Amount,
}

// =============================================================================
// Credit Record
// =============================================================================

/// Udhar: credit extended to a customer.
///
/// Informational only; it is summed in reports but never counted as profit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CreditRecord {
    pub id: String,
    pub person: String,
    pub item: String,
    pub amount: Amount,
}

// =============================================================================
// Expense Record
// =============================================================================

/// An operating expense on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    pub id: String,
    pub name: String,
    pub amount: Amount,
    /// Calendar date, serialized as "YYYY-MM-DD"
    #[ts(as = "String")]
    pub date: NaiveDate,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tenant_id_validation() {
        assert_eq!(TenantId::new("user-42").unwrap().to_string(), "user-42");
        assert_eq!(
            TenantId::new("   "),
            Err(ValidationError::required("tenantId"))
        );
        assert!(matches!(
            TenantId::new("shop\n1"),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_record_kind_names() {
        assert_eq!(RecordKind::Sale.local_key(), "products");
        assert_eq!(RecordKind::Credit.table(), "udhars");
        assert_eq!(RecordKind::Expense.table(), "expenses");
        assert_eq!(RecordKind::Credit.to_string(), "credit");
    }

    #[test]
    fn test_expense_json_shape() {
        let expense = ExpenseRecord {
            id: "e1".to_string(),
            name: "Rent".to_string(),
            amount: Amount::new(1000.0).unwrap(),
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        };

        let json = serde_json::to_value(&expense).unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["amount"], 1000.0);
    }

    #[test]
    fn test_sale_json_uses_camel_case() {
        let json = r#"{"id":"s1","name":"Rice","quantity":10,"buyRate":5,"sellRate":8,
            "totalInvestment":50,"totalSell":80,"profit":30}"#;
        let sale: SaleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(sale.buy_rate.value(), 5.0);
        assert_eq!(sale.total_sell.value(), 80.0);
    }
}
