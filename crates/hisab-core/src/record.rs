//! # Ledger Records
//!
//! Forms, the sale derivation, and the [`LedgerRecord`] trait that lets one
//! generic service and one generic store handle every record kind.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       From Form to Record                               │
//! │                                                                         │
//! │  SaleForm { name, quantity, buyRate, sellRate }     (raw form values)  │
//! │        │                                                                │
//! │        ▼  validation::parse_* (first bad field wins)                    │
//! │  name: String, quantity: f64, buy_rate: Amount, sell_rate: Amount      │
//! │        │                                                                │
//! │        ▼  derive_sale()                                                 │
//! │  SaleFigures { total_investment, total_sell, profit }                  │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  SaleRecord (complete, every field replaced on update)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Derived figures are computed here and nowhere else, so a call site can
//! never forget to recompute them.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Amount;
use crate::types::{CreditRecord, ExpenseRecord, RecordKind, SaleRecord};
use crate::validation::{
    parse_amount, parse_date, parse_quantity, parse_text, validate_quantity, RawField,
};

/// Generates a fresh record id (UUID v4).
pub fn new_record_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Sale Derivation
// =============================================================================

/// Figures computed from a sale's inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SaleFigures {
    pub total_investment: Amount,
    pub total_sell: Amount,
    pub profit: Amount,
}

/// Computes the derived fields of a sale.
///
/// ## Rules
/// - `quantity` must be finite and not negative
/// - Rates are already finite (`Amount` guarantees it)
/// - Any product or difference that overflows is rejected
///
/// ## Example
/// ```rust
/// use hisab_core::money::Amount;
/// use hisab_core::record::derive_sale;
///
/// let figures = derive_sale(
///     10.0,
///     Amount::new(5.0).unwrap(),
///     Amount::new(8.0).unwrap(),
/// ).unwrap();
///
/// assert_eq!(figures.total_investment.value(), 50.0);
/// assert_eq!(figures.total_sell.value(), 80.0);
/// assert_eq!(figures.profit.value(), 30.0);
/// ```
pub fn derive_sale(
    quantity: f64,
    buy_rate: Amount,
    sell_rate: Amount,
) -> ValidationResult<SaleFigures> {
    validate_quantity("quantity", quantity)?;

    let total_investment = buy_rate
        .checked_mul(quantity)
        .ok_or_else(|| ValidationError::not_finite("totalInvestment"))?;
    let total_sell = sell_rate
        .checked_mul(quantity)
        .ok_or_else(|| ValidationError::not_finite("totalSell"))?;
    let profit = total_sell
        .checked_sub(total_investment)
        .ok_or_else(|| ValidationError::not_finite("profit"))?;

    Ok(SaleFigures {
        total_investment,
        total_sell,
        profit,
    })
}

// =============================================================================
// Forms
// =============================================================================
// Missing fields deserialize as blank text and fail as `Required`.

/// Raw input for a sale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct SaleForm {
    pub name: RawField,
    pub quantity: RawField,
    pub buy_rate: RawField,
    pub sell_rate: RawField,
}

impl SaleForm {
    pub fn new(
        name: impl Into<RawField>,
        quantity: impl Into<RawField>,
        buy_rate: impl Into<RawField>,
        sell_rate: impl Into<RawField>,
    ) -> Self {
        SaleForm {
            name: name.into(),
            quantity: quantity.into(),
            buy_rate: buy_rate.into(),
            sell_rate: sell_rate.into(),
        }
    }
}

/// Raw input for an udhar entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CreditForm {
    pub person: RawField,
    pub item: RawField,
    pub amount: RawField,
}

impl CreditForm {
    pub fn new(
        person: impl Into<RawField>,
        item: impl Into<RawField>,
        amount: impl Into<RawField>,
    ) -> Self {
        CreditForm {
            person: person.into(),
            item: item.into(),
            amount: amount.into(),
        }
    }
}

/// Raw input for an expense.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct ExpenseForm {
    pub name: RawField,
    pub amount: RawField,
    pub date: RawField,
}

impl ExpenseForm {
    pub fn new(
        name: impl Into<RawField>,
        amount: impl Into<RawField>,
        date: impl Into<RawField>,
    ) -> Self {
        ExpenseForm {
            name: name.into(),
            amount: amount.into(),
            date: date.into(),
        }
    }
}

// =============================================================================
// LedgerRecord Trait
// =============================================================================

/// A record kind that can be validated from a form and persisted.
///
/// Implemented by [`SaleRecord`], [`CreditRecord`] and [`ExpenseRecord`].
pub trait LedgerRecord:
    Clone + Debug + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// Raw input the record is built from.
    type Form: Debug + Send + Sync + 'static;

    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Returns the same record carrying a different id.
    fn with_id(self, id: String) -> Self;

    /// Validates the form and builds a complete record.
    ///
    /// An empty `id` is allowed; stores that own id generation fill it in.
    fn from_form(id: String, form: &Self::Form) -> ValidationResult<Self>;
}

impl LedgerRecord for SaleRecord {
    type Form = SaleForm;

    const KIND: RecordKind = RecordKind::Sale;

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(self, id: String) -> Self {
        SaleRecord { id, ..self }
    }

    fn from_form(id: String, form: &SaleForm) -> ValidationResult<Self> {
        let name = parse_text("name", &form.name)?;
        let quantity = parse_quantity("quantity", &form.quantity)?;
        let buy_rate = parse_amount("buyRate", &form.buy_rate)?;
        let sell_rate = parse_amount("sellRate", &form.sell_rate)?;

        let figures = derive_sale(quantity, buy_rate, sell_rate)?;

        Ok(SaleRecord {
            id,
            name,
            quantity,
            buy_rate,
            sell_rate,
            total_investment: figures.total_investment,
            total_sell: figures.total_sell,
            profit: figures.profit,
        })
    }
}

impl LedgerRecord for CreditRecord {
    type Form = CreditForm;

    const KIND: RecordKind = RecordKind::Credit;

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(self, id: String) -> Self {
        CreditRecord { id, ..self }
    }

    fn from_form(id: String, form: &CreditForm) -> ValidationResult<Self> {
        Ok(CreditRecord {
            id,
            person: parse_text("person", &form.person)?,
            item: parse_text("item", &form.item)?,
            amount: parse_amount("amount", &form.amount)?,
        })
    }
}

impl LedgerRecord for ExpenseRecord {
    type Form = ExpenseForm;

    const KIND: RecordKind = RecordKind::Expense;

    fn id(&self) -> &str {
        &self.id
    }

    fn with_id(self, id: String) -> Self {
        ExpenseRecord { id, ..self }
    }

    fn from_form(id: String, form: &ExpenseForm) -> ValidationResult<Self> {
        Ok(ExpenseRecord {
            id,
            name: parse_text("name", &form.name)?,
            amount: parse_amount("amount", &form.amount)?,
            date: parse_date("date", &form.date)?,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn amt(v: f64) -> Amount {
        Amount::new(v).unwrap()
    }

    #[test]
    fn test_derive_sale_identities() {
        let cases = [
            (10.0, 5.0, 8.0),
            (0.0, 5.0, 8.0),
            (3.0, 0.0, 8.0),
            (3.0, 4.0, 0.0),
            (2.5, 12.4, 9.9),
        ];

        for (q, b, s) in cases {
            let f = derive_sale(q, amt(b), amt(s)).unwrap();
            assert_eq!(f.total_investment.value(), q * b);
            assert_eq!(f.total_sell.value(), q * s);
            assert_eq!(f.profit.value(), q * s - q * b);
        }
    }

    #[test]
    fn test_derive_sale_rejects_bad_quantity() {
        assert!(matches!(
            derive_sale(-1.0, amt(5.0), amt(8.0)),
            Err(ValidationError::Negative { .. })
        ));
        assert_eq!(
            derive_sale(f64::NAN, amt(5.0), amt(8.0)),
            Err(ValidationError::not_finite("quantity"))
        );
    }

    #[test]
    fn test_derive_sale_rejects_overflow() {
        assert_eq!(
            derive_sale(1e300, amt(1e300), amt(1.0)),
            Err(ValidationError::not_finite("totalInvestment"))
        );
        assert_eq!(
            derive_sale(1.0, amt(-f64::MAX), amt(f64::MAX)),
            Err(ValidationError::not_finite("profit"))
        );
    }

    #[test]
    fn test_sale_from_form() {
        let form = SaleForm::new("Rice", "10", 5, "8");
        let sale = SaleRecord::from_form("s1".to_string(), &form).unwrap();

        assert_eq!(sale.name, "Rice");
        assert_eq!(sale.quantity, 10.0);
        assert_eq!(sale.total_investment, amt(50.0));
        assert_eq!(sale.total_sell, amt(80.0));
        assert_eq!(sale.profit, amt(30.0));
    }

    #[test]
    fn test_sale_form_names_first_bad_field() {
        let form = SaleForm::new("Rice", "abc", "x", "8");
        let err = SaleRecord::from_form(String::new(), &form).unwrap_err();
        assert_eq!(err.field(), "quantity");

        let form = SaleForm::new("Rice", "1", "5", "");
        let err = SaleRecord::from_form(String::new(), &form).unwrap_err();
        assert_eq!(err, ValidationError::required("sellRate"));
    }

    #[test]
    fn test_credit_and_expense_from_form() {
        let credit =
            CreditRecord::from_form("c1".into(), &CreditForm::new(" Ali ", "Sugar bag", 200))
                .unwrap();
        assert_eq!(credit.person, "Ali");
        assert_eq!(credit.amount, amt(200.0));

        let expense =
            ExpenseRecord::from_form("e1".into(), &ExpenseForm::new("Rent", "1000", "2024-01-01"))
                .unwrap();
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        let err = ExpenseRecord::from_form("e2".into(), &ExpenseForm::new("Rent", "1000", ""))
            .unwrap_err();
        assert_eq!(err.field(), "date");
    }

    #[test]
    fn test_form_missing_fields_are_required() {
        let form: CreditForm = serde_json::from_str(r#"{"person":"Ali","amount":"5"}"#).unwrap();
        let err = CreditRecord::from_form(String::new(), &form).unwrap_err();
        assert_eq!(err, ValidationError::required("item"));
    }

    #[test]
    fn test_with_id_keeps_fields() {
        let sale = SaleRecord::from_form(String::new(), &SaleForm::new("Tea", 2, 3, 4)).unwrap();
        let sale = sale.with_id("abc".to_string());
        assert_eq!(sale.id(), "abc");
        assert_eq!(sale.total_sell, amt(8.0));
    }

    #[test]
    fn test_new_record_id_is_unique() {
        assert_ne!(new_record_id(), new_record_id());
    }
}
