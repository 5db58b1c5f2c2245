//! # Ledger Error Type
//!
//! What callers of the ledger see, and the serializable body handed to the UI.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in HisabKitab                             │
//! │                                                                         │
//! │  UI                          Ledger                                     │
//! │  ──                          ──────                                     │
//! │                                                                         │
//! │  sales.add(tenant, form)                                               │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Bad field?   ─── ValidationError ──► LedgerError::Validation    │  │
//! │  │       (no store call made)                                       │  │
//! │  │                                                                  │  │
//! │  │  Missing id?  ─── DbError::NotFound ─► LedgerError::NotFound     │  │
//! │  │                                                                  │  │
//! │  │  Disk / DB?   ─── DbError::* ────────► LedgerError::Store        │  │
//! │  │       (logged, reported once, never retried)                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄──── ErrorBody { code: "VALIDATION_ERROR", field: "quantity", .. }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use hisab_core::ValidationError;
use hisab_db::DbError;
use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;

// =============================================================================
// Ledger Error
// =============================================================================

/// Errors returned by ledger and report operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// A form field failed validation. Nothing was written.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// `update`/`remove` targeted an id the tenant does not own.
    #[error("{kind} not found: {id}")]
    NotFound { kind: String, id: String },

    /// The record store failed. Prior state is unchanged.
    #[error("Store operation failed: {0}")]
    Store(DbError),

    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl LedgerError {
    /// Field named by a validation failure, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            LedgerError::Validation(e) => Some(e.field()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::NotFound { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, LedgerError::Validation(_))
    }

    pub fn is_store(&self) -> bool {
        matches!(self, LedgerError::Store(_))
    }
}

/// Keeps `NotFound` apart; everything else the store reports is `Store`.
impl From<DbError> for LedgerError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => LedgerError::NotFound { kind: entity, id },
            other => LedgerError::Store(other),
        }
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Error Body (for the UI)
// =============================================================================

/// Serializable error returned to the UI layer.
///
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "quantity is not a number: 'abc'",
///   "field": "quantity"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,

    /// Offending form field, for validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// Error codes for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Record not found for this shop
    NotFound,

    /// Storage failed; re-fetch before retrying
    StoreError,

    /// Bad configuration
    ConfigError,
}

impl ErrorBody {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ErrorBody {
            code,
            message: message.into(),
            field: None,
        }
    }
}

impl From<&LedgerError> for ErrorBody {
    fn from(err: &LedgerError) -> Self {
        match err {
            LedgerError::Validation(e) => ErrorBody {
                code: ErrorCode::ValidationError,
                message: e.to_string(),
                field: Some(e.field().to_string()),
            },
            LedgerError::NotFound { kind, id } => {
                ErrorBody::new(ErrorCode::NotFound, format!("{} not found: {}", kind, id))
            }
            LedgerError::Store(DbError::UniqueViolation { field, value }) => ErrorBody {
                code: ErrorCode::ValidationError,
                message: format!("{} '{}' already exists", field, value),
                field: Some(field.clone()),
            },
            LedgerError::Store(e) => {
                // Log the actual error but return a generic message
                tracing::error!(error = %e, "Store operation failed");
                ErrorBody::new(ErrorCode::StoreError, "Storage operation failed")
            }
            LedgerError::Config(e) => ErrorBody::new(ErrorCode::ConfigError, e.to_string()),
        }
    }
}

impl From<LedgerError> for ErrorBody {
    fn from(err: LedgerError) -> Self {
        ErrorBody::from(&err)
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ErrorBody {}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_not_found_stays_not_found() {
        let err = LedgerError::from(DbError::not_found("sale", "s1"));
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "sale not found: s1");
    }

    #[test]
    fn test_other_db_errors_are_store_errors() {
        let err = LedgerError::from(DbError::Io("disk full".to_string()));
        assert!(err.is_store());

        let body = ErrorBody::from(&err);
        assert_eq!(body.code, ErrorCode::StoreError);
        assert_eq!(body.message, "Storage operation failed");
    }

    #[test]
    fn test_validation_body_names_field() {
        let err = LedgerError::from(ValidationError::NotANumber {
            field: "quantity".to_string(),
            value: "abc".to_string(),
        });
        assert_eq!(err.field(), Some("quantity"));

        let json = serde_json::to_value(ErrorBody::from(err)).unwrap();
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert_eq!(json["field"], "quantity");
    }

    #[test]
    fn test_not_found_body_has_no_field() {
        let body = ErrorBody::from(LedgerError::from(DbError::not_found("credit", "c9")));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert!(json.get("field").is_none());
    }
}
