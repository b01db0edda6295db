// 🧾 Expense Model - the single record the tracker stores
//
// Three shapes of the same data:
// - ExpenseRequest: raw JSON body, every field optional
// - ExpenseInput:   validated input (description, positive amount, date present)
// - Expense:        stored record with its identifier and a resolved category

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ExpenseError, FieldError, Result};

/// Category given to expenses submitted without one
pub const DEFAULT_CATEGORY: &str = "Other";

// ============================================================================
// STORED RECORD
// ============================================================================

/// Expense record as held by the store and returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    /// Assigned by the store, never reused
    pub id: u64,

    pub description: String,

    /// Exact decimal, always > 0
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,

    /// Calendar date, ISO `YYYY-MM-DD` on the wire
    pub date: NaiveDate,

    /// Never empty once stored
    pub category: String,
}

impl Expense {
    pub fn from_details(id: u64, details: ExpenseDetails) -> Self {
        Expense {
            id,
            description: details.description,
            amount: details.amount,
            date: details.date,
            category: details.category,
        }
    }

    /// Replace every field except the identifier
    pub fn apply(&mut self, details: ExpenseDetails) {
        self.description = details.description;
        self.amount = details.amount;
        self.date = details.date;
        self.category = details.category;
    }

    /// Check whether the expense falls inside [start, end] (inclusive)
    pub fn is_between(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }

    /// Case-insensitive category comparison
    pub fn has_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }
}

/// Normalized field values ready for storage (category already resolved)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseDetails {
    pub description: String,
    pub amount: Decimal,
    pub date: NaiveDate,
    pub category: String,
}

impl From<ExpenseInput> for ExpenseDetails {
    fn from(input: ExpenseInput) -> Self {
        ExpenseDetails {
            category: normalize_category(input.category.as_deref()),
            description: input.description,
            amount: input.amount,
            date: input.date,
        }
    }
}

/// Resolve the category to store: absent, empty or blank becomes "Other"
///
/// Shared by the create and update paths so both default the same way.
pub fn normalize_category(category: Option<&str>) -> String {
    match category {
        Some(c) if !c.trim().is_empty() => c.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

// ============================================================================
// VALIDATED INPUT
// ============================================================================

/// Create/update input that already passed validation
///
/// Fields are private so an `ExpenseInput` can only exist through [`ExpenseInput::new`]
/// or [`ExpenseRequest::validate`], which both enforce the same rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseInput {
    description: String,
    amount: Decimal,
    date: NaiveDate,
    category: Option<String>,
}

impl ExpenseInput {
    pub fn new(
        description: impl Into<String>,
        amount: Decimal,
        date: NaiveDate,
        category: Option<String>,
    ) -> Result<Self> {
        ExpenseRequest {
            description: Some(description.into()),
            amount: Some(amount),
            date: Some(date),
            category,
        }
        .validate()
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }
}

// ============================================================================
// RAW REQUEST BODY
// ============================================================================

/// JSON body accepted by POST and PUT
///
/// Everything is optional here so a missing field turns into a field-level
/// message instead of a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExpenseRequest {
    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, with = "rust_decimal::serde::arbitrary_precision_option")]
    pub amount: Option<Decimal>,

    #[serde(default)]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub category: Option<String>,
}

impl ExpenseRequest {
    /// Check required fields, collecting every failure
    pub fn validate(self) -> Result<ExpenseInput> {
        let mut errors = Vec::new();

        let description = match self.description {
            Some(d) if !d.trim().is_empty() => Some(d),
            _ => {
                errors.push(FieldError::new("description", "description is required"));
                None
            }
        };

        let amount = match self.amount {
            Some(a) if a > Decimal::ZERO => Some(a),
            Some(_) => {
                errors.push(FieldError::new("amount", "amount must be positive"));
                None
            }
            None => {
                errors.push(FieldError::new("amount", "amount is required"));
                None
            }
        };

        if self.date.is_none() {
            errors.push(FieldError::new("date", "date is required"));
        }

        match (description, amount, self.date) {
            (Some(description), Some(amount), Some(date)) => Ok(ExpenseInput {
                description,
                amount,
                date,
                category: self.category,
            }),
            _ => Err(ExpenseError::Validation(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_normalize_category_defaults() {
        assert_eq!(normalize_category(None), "Other");
        assert_eq!(normalize_category(Some("")), "Other");
        assert_eq!(normalize_category(Some("   ")), "Other");
        assert_eq!(normalize_category(Some("Food")), "Food");
    }

    #[test]
    fn test_validate_accepts_complete_request() {
        let request = ExpenseRequest {
            description: Some("Coffee".to_string()),
            amount: Some(dec("5.50")),
            date: Some(date(2024, 3, 15)),
            category: None,
        };

        let input = request.validate().unwrap();
        assert_eq!(input.description(), "Coffee");
        assert_eq!(input.amount(), dec("5.50"));
        assert_eq!(input.date(), date(2024, 3, 15));
        assert_eq!(input.category(), None);
    }

    #[test]
    fn test_validate_collects_all_missing_fields() {
        let err = ExpenseRequest::default().validate().unwrap_err();

        let fields: Vec<&str> = err.field_errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["description", "amount", "date"]);
    }

    #[test]
    fn test_validate_rejects_non_positive_amount() {
        for amount in ["0", "-3.20"] {
            let err = ExpenseInput::new("Bus", dec(amount), date(2024, 1, 2), None).unwrap_err();
            assert_eq!(
                err.field_errors(),
                &[FieldError::new("amount", "amount must be positive")]
            );
        }
    }

    #[test]
    fn test_validate_rejects_blank_description() {
        let err = ExpenseInput::new("  ", dec("1"), date(2024, 1, 2), None).unwrap_err();
        assert_eq!(err.field_errors()[0].field, "description");
    }

    #[test]
    fn test_details_from_input_applies_default_category() {
        let input = ExpenseInput::new("Coffee", dec("5.50"), date(2024, 3, 15), None).unwrap();
        let details = ExpenseDetails::from(input);
        assert_eq!(details.category, "Other");
    }

    #[test]
    fn test_has_category_ignores_case() {
        let expense = Expense {
            id: 1,
            description: "Lunch".to_string(),
            amount: dec("12"),
            date: date(2024, 5, 1),
            category: "Food".to_string(),
        };

        assert!(expense.has_category("food"));
        assert!(expense.has_category("FOOD"));
        assert!(!expense.has_category("Transport"));
    }

    #[test]
    fn test_expense_json_shape() {
        let expense = Expense {
            id: 7,
            description: "Coffee".to_string(),
            amount: dec("5.50"),
            date: date(2024, 3, 15),
            category: "Other".to_string(),
        };

        let json = serde_json::to_string(&expense).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"description":"Coffee","amount":5.50,"date":"2024-03-15","category":"Other"}"#
        );
    }

    #[test]
    fn test_request_parses_number_and_string_amounts() {
        let from_number: ExpenseRequest =
            serde_json::from_str(r#"{"description":"Taxi","amount":15.25,"date":"2024-02-29"}"#)
                .unwrap();
        let from_string: ExpenseRequest =
            serde_json::from_str(r#"{"description":"Taxi","amount":"15.25","date":"2024-02-29"}"#)
                .unwrap();

        assert_eq!(from_number.amount, Some(dec("15.25")));
        assert_eq!(from_string.amount, Some(dec("15.25")));
        assert_eq!(from_number.category, None);
    }
}
