//! # Money Module
//!
//! Provides the `Amount` type for monetary values in ledger records.
//!
//! ## Why a Float Newtype?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  WHAT A SHOPKEEPER TYPES                                                │
//! │                                                                         │
//! │  Rates come straight from form controls: "5", "7.5", "120.25"          │
//! │  Records are persisted as plain JSON numbers:                           │
//! │    { "buyRate": 7.5, "totalInvestment": 75 }                            │
//! │                                                                         │
//! │  OUR SOLUTION: Amount(f64) with one rule                                │
//! │    The wrapped value is ALWAYS finite. NaN and ±∞ cannot be built.     │
//! │    Arithmetic that could overflow is checked and returns Option.      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rounding happens only for display (`{:.2}`), never in stored values.
//!
//! ## Usage
//! ```rust
//! use hisab_core::money::Amount;
//!
//! let rate = Amount::new(8.0).unwrap();
//! let total = rate.checked_mul(10.0).unwrap();
//! assert_eq!(total.value(), 80.0);
//! assert_eq!(total.to_string(), "80.00");
//!
//! assert!(Amount::new(f64::NAN).is_none());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use ts_rs::TS;

// =============================================================================
// Amount Type
// =============================================================================

/// A finite monetary value in the shop's currency.
///
/// ## Design Decisions
/// - **Transparent serde**: persisted as a bare JSON number
/// - **Signed**: refunds and corrections may be negative
/// - **Finite invariant**: checked on construction and on deserialization
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct Amount(f64);

impl Amount {
    /// Wraps a value, returning `None` if it is NaN or infinite.
    #[inline]
    pub fn new(value: f64) -> Option<Self> {
        value.is_finite().then_some(Amount(value))
    }

    /// Zero amount.
    #[inline]
    pub const fn zero() -> Self {
        Amount(0.0)
    }

    /// Returns the raw value.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Returns true if this amount is exactly zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Multiplies by a quantity.
    ///
    /// Returns `None` when the product leaves the finite range, e.g.
    /// `1e200 * 1e200`.
    ///
    /// ## Example
    /// ```rust
    /// use hisab_core::money::Amount;
    ///
    /// let rate = Amount::new(5.0).unwrap();
    /// assert_eq!(rate.checked_mul(10.0), Amount::new(50.0));
    /// assert_eq!(Amount::new(1e200).unwrap().checked_mul(1e200), None);
    /// ```
    #[inline]
    pub fn checked_mul(self, quantity: f64) -> Option<Self> {
        Amount::new(self.0 * quantity)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = f64::deserialize(deserializer)?;
        Amount::new(value).ok_or_else(|| serde::de::Error::custom("amount must be finite"))
    }
}

// =============================================================================
// Arithmetic Operations
// =============================================================================
// No `Add`/`Sub`/`Sum` impls: every operation that can leave the finite range
// returns `Option`.

impl Amount {
    /// Adds two amounts, `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Amount) -> Option<Self> {
        Amount::new(self.0 + other.0)
    }

    /// Subtracts `other`, `None` on overflow.
    #[inline]
    pub fn checked_sub(self, other: Amount) -> Option<Self> {
        Amount::new(self.0 - other.0)
    }

    /// Sums amounts, `None` as soon as a partial sum overflows.
    ///
    /// ## Example
    /// ```rust
    /// use hisab_core::money::Amount;
    ///
    /// let values = [Amount::new(1.5).unwrap(), Amount::new(2.5).unwrap()];
    /// assert_eq!(Amount::checked_sum(values), Amount::new(4.0));
    /// assert_eq!(Amount::checked_sum([]), Some(Amount::zero()));
    ///
    /// let huge = Amount::new(f64::MAX).unwrap();
    /// assert_eq!(Amount::checked_sum([huge, huge]), None);
    /// ```
    pub fn checked_sum<I>(amounts: I) -> Option<Self>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::zero(), |acc, x| acc.checked_add(x))
    }
}

// =============================================================================
// Display Implementation
// =============================================================================

impl fmt::Display for Amount {
    /// Formats with two decimals: 80 → "80.00", -920 → "-920.00".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
