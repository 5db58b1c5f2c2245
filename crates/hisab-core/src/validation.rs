//! # Validation Module
//!
//! Turns raw form values into typed, checked values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form controls                                       │
//! │  └── Sends whatever the user typed: "10", " 7.5 ", "abc", 12           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── RawField ──► parse_text   (trimmed, non-empty)                    │
//! │  ├── RawField ──► parse_number (full parse, finite)                    │
//! │  └── RawField ──► parse_date   (real YYYY-MM-DD calendar date)         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Record store                                                 │
//! │  └── UNIQUE(owner, id), owner filter on every statement               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use hisab_core::validation::{parse_number, RawField};
//!
//! let qty = parse_number("quantity", &RawField::from(" 10 ")).unwrap();
//! assert_eq!(qty, 10.0);
//!
//! let err = parse_number("quantity", &RawField::from("abc")).unwrap_err();
//! assert_eq!(err.field(), "quantity");
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{ValidationError, ValidationResult};
use crate::money::Amount;

/// ISO calendar date format used for expense dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Raw Field
// =============================================================================

/// One value as it arrives from a form control.
///
/// Number inputs may send JSON numbers or the text the user typed; both are
/// accepted and validated the same way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(untagged)]
#[ts(export)]
pub enum RawField {
    Number(f64),
    Text(String),
}

impl Default for RawField {
    fn default() -> Self {
        RawField::Text(String::new())
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

impl From<String> for RawField {
    fn from(value: String) -> Self {
        RawField::Text(value)
    }
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<i32> for RawField {
    fn from(value: i32) -> Self {
        RawField::Number(f64::from(value))
    }
}

// =============================================================================
// Field Parsers
// =============================================================================

/// Parses a required text field.
///
/// ## Rules
/// - Surrounding whitespace is trimmed
/// - Must not be empty after trimming
/// - A number is accepted and rendered as text (a name like `7`)
pub fn parse_text(field: &str, raw: &RawField) -> ValidationResult<String> {
    let text = match raw {
        RawField::Text(s) => s.trim().to_string(),
        RawField::Number(n) if n.is_finite() => n.to_string(),
        RawField::Number(_) => return Err(ValidationError::not_finite(field)),
    };

    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    Ok(text)
}

/// Parses a required numeric field.
///
/// ## Rules
/// - Text is trimmed and must parse completely (`"10abc"` is rejected)
/// - Blank text is `Required`
/// - NaN and infinities are `NotFinite`, whether typed or sent as numbers
///
/// ## Example
/// ```rust
/// use hisab_core::validation::{parse_number, RawField};
/// use hisab_core::error::ValidationError;
///
/// assert_eq!(parse_number("amount", &RawField::from(200)).unwrap(), 200.0);
/// assert!(matches!(
///     parse_number("amount", &RawField::from("inf")),
///     Err(ValidationError::NotFinite { .. })
/// ));
/// ```
pub fn parse_number(field: &str, raw: &RawField) -> ValidationResult<f64> {
    let value = match raw {
        RawField::Number(n) => *n,
        RawField::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Err(ValidationError::required(field));
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| ValidationError::NotANumber {
                    field: field.to_string(),
                    value: trimmed.to_string(),
                })?
        }
    };

    if !value.is_finite() {
        return Err(ValidationError::not_finite(field));
    }

    Ok(value)
}

/// Parses a required monetary field.
pub fn parse_amount(field: &str, raw: &RawField) -> ValidationResult<Amount> {
    let value = parse_number(field, raw)?;
    Amount::new(value).ok_or_else(|| ValidationError::not_finite(field))
}

/// Parses a quantity: a finite number that is not negative.
pub fn parse_quantity(field: &str, raw: &RawField) -> ValidationResult<f64> {
    let value = parse_number(field, raw)?;
    validate_quantity(field, value)?;
    Ok(value)
}

/// Checks a quantity that is already numeric.
pub fn validate_quantity(field: &str, quantity: f64) -> ValidationResult<()> {
    if !quantity.is_finite() {
        return Err(ValidationError::not_finite(field));
    }
    if quantity < 0.0 {
        return Err(ValidationError::Negative {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Parses a required, zero-padded `YYYY-MM-DD` date.
///
/// ## Example
/// ```rust
/// use hisab_core::validation::{parse_date, RawField};
///
/// assert!(parse_date("date", &RawField::from("2024-01-01")).is_ok());
/// assert!(parse_date("date", &RawField::from("2024-02-30")).is_err());
/// ```
pub fn parse_date(field: &str, raw: &RawField) -> ValidationResult<NaiveDate> {
    let text = match raw {
        RawField::Text(s) => s.trim(),
        RawField::Number(n) => {
            return Err(ValidationError::InvalidDate {
                field: field.to_string(),
                value: n.to_string(),
            })
        }
    };

    if text.is_empty() {
        return Err(ValidationError::required(field));
    }

    // chrono accepts unpadded fields ("2024-1-1"); only the canonical form is a date here.
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .ok()
        .filter(|date| date.format(DATE_FORMAT).to_string() == text)
        .ok_or_else(|| ValidationError::InvalidDate {
            field: field.to_string(),
            value: text.to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text() {
        assert_eq!(parse_text("name", &" Rice ".into()).unwrap(), "Rice");
        assert_eq!(
            parse_text("name", &"   ".into()),
            Err(ValidationError::required("name"))
        );
        assert_eq!(parse_text("item", &RawField::from(7)).unwrap(), "7");
    }

    #[test]
    fn test_parse_number_accepts_text_and_numbers() {
        assert_eq!(parse_number("quantity", &"10".into()).unwrap(), 10.0);
        assert_eq!(parse_number("buyRate", &" 7.5 ".into()).unwrap(), 7.5);
        assert_eq!(parse_number("sellRate", &RawField::from(8.25)).unwrap(), 8.25);
        assert_eq!(parse_number("amount", &"-15".into()).unwrap(), -15.0);
    }

    #[test]
    fn test_parse_number_rejects_garbage() {
        assert!(matches!(
            parse_number("quantity", &"abc".into()),
            Err(ValidationError::NotANumber { ref field, .. }) if field == "quantity"
        ));
        assert!(matches!(
            parse_number("quantity", &"10abc".into()),
            Err(ValidationError::NotANumber { .. })
        ));
        assert_eq!(
            parse_number("quantity", &"".into()),
            Err(ValidationError::required("quantity"))
        );
        assert_eq!(
            parse_number("amount", &"NaN".into()),
            Err(ValidationError::not_finite("amount"))
        );
        assert_eq!(
            parse_number("amount", &RawField::Number(f64::INFINITY)),
            Err(ValidationError::not_finite("amount"))
        );
    }

    #[test]
    fn test_parse_quantity_rejects_negative() {
        assert_eq!(parse_quantity("quantity", &"0".into()).unwrap(), 0.0);
        assert_eq!(
            parse_quantity("quantity", &"-1".into()),
            Err(ValidationError::Negative {
                field: "quantity".to_string()
            })
        );
    }

    #[test]
    fn test_parse_date() {
        let date = parse_date("date", &"2024-01-01".into()).unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());

        assert!(matches!(
            parse_date("date", &"2024-02-30".into()),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_date("date", &"01/01/2024".into()),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_date("date", &"2024-1-1".into()),
            Err(ValidationError::InvalidDate { .. })
        ));
        assert!(matches!(
            parse_date("date", &"2024-01-1".into()),
            Err(ValidationError::InvalidDate { .. })
        ));
        let padded = parse_date("date", &" 2024-12-31 ".into()).unwrap();
        assert_eq!(padded, NaiveDate::from_ymd_opt(2024, 12, 31).unwrap());
        assert_eq!(
            parse_date("date", &"".into()),
            Err(ValidationError::required("date"))
        );
    }

    #[test]
    fn test_raw_field_deserializes_untagged() {
        let n: RawField = serde_json::from_str("12").unwrap();
        assert_eq!(n, RawField::Number(12.0));

        let s: RawField = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(s, RawField::Text("12".to_string()));
    }
}
