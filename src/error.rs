// ⚠️ Error Types - failures the expense core can report
//
// Not-found is NOT an error here: lookups return Option, deletes return bool.
// Only the API layer turns absence into a 404.

use serde::Serialize;
use thiserror::Error;

/// A single rejected field on an incoming expense body
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        FieldError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the expense service
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("validation failed: {}", join_fields(.0))]
    Validation(Vec<FieldError>),

    #[error("invalid year/month combination: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("total for {year}-{month} exceeds the representable decimal range")]
    TotalOverflow { year: i32, month: u32 },
}

impl ExpenseError {
    /// Field-level messages, empty for non-validation errors
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            ExpenseError::Validation(fields) => fields,
            ExpenseError::InvalidMonth { .. } | ExpenseError::TotalOverflow { .. } => &[],
        }
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, ExpenseError>;
