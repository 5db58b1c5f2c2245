//! # Error Types
//!
//! Domain-specific error types for hisab-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  hisab-core errors (this file)                                         │
//! │  └── ValidationError  - Form input failures (names the bad field)      │
//! │                                                                         │
//! │  hisab-db errors (separate crate)                                      │
//! │  └── DbError          - Record store failures                          │
//! │                                                                         │
//! │  hisab-ledger errors                                                   │
//! │  └── LedgerError      - What the caller sees                           │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        DbError ─────────┴──► LedgerError ──► ErrorBody ──► Frontend    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant carries the offending field name using the same camelCase
//! spelling as the persisted JSON, so the UI can highlight the right input.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any record store call. A form that fails validation never
/// causes a write.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Text that should hold a number could not be parsed.
    #[error("{field} is not a number: '{value}'")]
    NotANumber { field: String, value: String },

    /// The number is NaN or infinite (including overflow of a derived value).
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Value is not a valid `YYYY-MM-DD` calendar date.
    #[error("{field} is not a valid date: '{value}'")]
    InvalidDate { field: String, value: String },

    /// Invalid format (e.g., tenant id containing control characters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates a Required error for the given field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }

    /// Creates a NotFinite error for the given field.
    pub fn not_finite(field: impl Into<String>) -> Self {
        ValidationError::NotFinite {
            field: field.into(),
        }
    }

    /// Name of the field that failed validation.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotANumber { field, .. }
            | ValidationError::NotFinite { field }
            | ValidationError::Negative { field }
            | ValidationError::InvalidDate { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
