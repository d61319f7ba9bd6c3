//! Ledger key and record field validation.
//!
//! # Responsibility
//! - Enforce the ledger key grammar shared by every record kind.
//! - Provide the validation error type surfaced by model constructors and
//!   deserialization.
//!
//! # Invariants
//! - Keys are 1..=128 characters, alphanumeric plus `. _ @ -`, starting
//!   alphanumeric.
//! - Validation never touches the store.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static LEDGER_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._@-]{0,127}$").expect("valid key regex"));

/// Validation failure for record fields and ledger keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Field value does not satisfy the ledger key grammar.
    InvalidKey {
        field: &'static str,
        value: String,
    },
    /// Required text field is empty or whitespace-only.
    EmptyField { field: &'static str },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidKey { field, value } => {
                write!(f, "{field} `{value}` is not a valid ledger key")
            }
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
        }
    }
}

impl Error for RecordValidationError {}

/// Validates one ledger key field.
pub fn validate_key(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if LEDGER_KEY_RE.is_match(value) {
        Ok(())
    } else {
        Err(RecordValidationError::InvalidKey {
            field,
            value: value.to_string(),
        })
    }
}

/// Validates one required free-text field.
pub fn validate_text(field: &'static str, value: &str) -> Result<(), RecordValidationError> {
    if value.trim().is_empty() {
        Err(RecordValidationError::EmptyField { field })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{validate_key, validate_text, RecordValidationError};

    #[test]
    fn accepts_typical_keys() {
        for key in ["owner1", "asset1", "a", "user@example.com", "A-1_b.2"] {
            assert!(validate_key("id", key).is_ok(), "rejected `{key}`");
        }
    }

    #[test]
    fn rejects_malformed_keys() {
        for key in ["", " ", "-leading-dash", "has space", "tab\tkey"] {
            assert!(
                matches!(
                    validate_key("id", key),
                    Err(RecordValidationError::InvalidKey { field: "id", .. })
                ),
                "accepted `{key}`"
            );
        }
    }

    #[test]
    fn rejects_overlong_keys() {
        let key = "k".repeat(129);
        assert!(validate_key("id", &key).is_err());
        let key = "k".repeat(128);
        assert!(validate_key("id", &key).is_ok());
    }

    #[test]
    fn rejects_blank_text() {
        assert!(matches!(
            validate_text("firstName", "   "),
            Err(RecordValidationError::EmptyField { field: "firstName" })
        ));
        assert!(validate_text("firstName", "Amy").is_ok());
    }
}
