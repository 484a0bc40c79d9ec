//! Order input validation and budget coercion.
//!
//! Clients send `estimated_budget` either as a JSON number or as a numeric
//! string (form fields arrive as text), so it is accepted as a raw
//! [`serde_json::Value`] and coerced here.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::{CoreError, FieldError};

/// Minimum length (in characters, after trimming) of an order description.
pub const MIN_DESCRIPTION_LENGTH: usize = 10;

/// Decimal places kept for monetary amounts. Matches `NUMERIC(12, 2)`.
pub const BUDGET_SCALE: u32 = 2;

/// Largest budget that fits in `NUMERIC(12, 2)`: 9 999 999 999.99.
pub fn max_budget() -> Decimal {
    Decimal::new(999_999_999_999, BUDGET_SCALE)
}

/// Order fields after validation, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedOrder {
    pub description: String,
    pub category: String,
    pub estimated_budget: Decimal,
}

/// Validate the user-supplied fields of a new order.
///
/// Every problem is collected so the client sees all of them in a single
/// response rather than fixing one field per round trip.
pub fn validate_new_order(
    description: &str,
    category: &str,
    estimated_budget: &Value,
) -> Result<ValidatedOrder, CoreError> {
    let mut errors = Vec::new();

    let description = description.trim();
    if description.chars().count() < MIN_DESCRIPTION_LENGTH {
        errors.push(FieldError::new(
            "description",
            format!("Description must be at least {MIN_DESCRIPTION_LENGTH} characters long"),
        ));
    }

    let category = category.trim();
    if category.is_empty() {
        errors.push(FieldError::new("category", "Category is required"));
    }

    let budget = match parse_budget(estimated_budget) {
        Ok(b) => Some(b),
        Err(msg) => {
            errors.push(FieldError::new("estimated_budget", msg));
            None
        }
    };

    match budget {
        Some(estimated_budget) if errors.is_empty() => Ok(ValidatedOrder {
            description: description.to_string(),
            category: category.to_string(),
            estimated_budget,
        }),
        _ => Err(CoreError::InvalidInput(errors)),
    }
}

/// Coerce a JSON value into a non-negative budget rounded to cents.
pub fn parse_budget(value: &Value) -> Result<Decimal, String> {
    let raw = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Null => return Err("Estimated budget is required".to_string()),
        _ => return Err(NOT_A_NUMBER.to_string()),
    };

    let amount = match Decimal::from_str(&raw).or_else(|_| Decimal::from_scientific(&raw)) {
        Ok(amount) => amount.round_dp(BUDGET_SCALE),
        Err(_) => beyond_decimal_range(&raw)?,
    };

    if amount < Decimal::ZERO {
        return Err(NEGATIVE.to_string());
    }
    if amount > max_budget() {
        return Err(too_large());
    }
    Ok(amount)
}

const NOT_A_NUMBER: &str = "Estimated budget must be a number";
const NEGATIVE: &str = "Estimated budget must not be negative";

fn too_large() -> String {
    format!("Estimated budget must not exceed {}", max_budget())
}

/// Classify a numeral `Decimal` cannot hold by its sign and magnitude.
///
/// Below one in magnitude it rounds to zero cents; anything bigger is out of
/// range on one side or the other.
fn beyond_decimal_range(raw: &str) -> Result<Decimal, String> {
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v.abs() < 1.0 => Ok(Decimal::ZERO),
        Ok(v) if v.is_finite() && v < 0.0 => Err(NEGATIVE.to_string()),
        Ok(v) if v.is_finite() => Err(too_large()),
        _ => Err(NOT_A_NUMBER.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_valid_order_is_trimmed() {
        let order = validate_new_order("  fix my roof please ", " repair ", &json!(500)).unwrap();
        assert_eq!(order.description, "fix my roof please");
        assert_eq!(order.category, "repair");
        assert_eq!(order.estimated_budget, dec("500"));
    }

    #[test]
    fn test_short_description_rejected() {
        let result = validate_new_order("too short", "repair", &json!(10));
        assert_matches!(result, Err(CoreError::InvalidInput(errors)) => {
            assert_eq!(errors.len(), 1);
            assert_eq!(errors[0].field, "description");
        });
    }

    #[test]
    fn test_description_length_counts_characters() {
        // Ten characters, twelve bytes.
        assert!(validate_new_order("manutenção", "casa", &json!(1)).is_ok());
    }

    #[test]
    fn test_all_field_errors_reported_together() {
        let result = validate_new_order("", "   ", &json!("lots"));
        assert_matches!(result, Err(CoreError::InvalidInput(errors)) => {
            let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
            assert_eq!(fields, vec!["description", "category", "estimated_budget"]);
        });
    }

    #[test]
    fn test_budget_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_budget(&json!(0)).unwrap(), Decimal::ZERO);
        assert_eq!(parse_budget(&json!(1250.5)).unwrap(), dec("1250.5"));
        assert_eq!(parse_budget(&json!("300")).unwrap(), dec("300"));
        assert_eq!(parse_budget(&json!(" 42.10 ")).unwrap(), dec("42.10"));
    }

    #[test]
    fn test_budget_rounded_to_cents() {
        assert_eq!(parse_budget(&json!("10.005")).unwrap(), dec("10.00"));
        assert_eq!(parse_budget(&json!(19.999)).unwrap(), dec("20.00"));
    }

    #[test]
    fn test_non_numeric_budget_rejected() {
        assert!(parse_budget(&json!("abc")).is_err());
        assert!(parse_budget(&json!("")).is_err());
        assert!(parse_budget(&json!(true)).is_err());
        assert!(parse_budget(&json!([1])).is_err());
        assert!(parse_budget(&Value::Null).is_err());
    }

    #[test]
    fn test_negative_budget_rejected() {
        let err = parse_budget(&json!(-1)).unwrap_err();
        assert!(err.contains("negative"));
    }

    #[test]
    fn test_budget_upper_bound() {
        assert_eq!(parse_budget(&json!("9999999999.99")).unwrap(), max_budget());
        assert!(parse_budget(&json!("10000000000")).is_err());
    }

    #[test]
    fn test_budget_beyond_decimal_range() {
        assert!(parse_budget(&json!(1e300)).unwrap_err().contains("must not exceed"));
        assert!(parse_budget(&json!("1e29")).unwrap_err().contains("must not exceed"));
        assert!(parse_budget(&json!("-1e29")).unwrap_err().contains("negative"));
        assert_eq!(parse_budget(&json!("5e-29")).unwrap(), Decimal::ZERO);
        assert_eq!(parse_budget(&json!("NaN")).unwrap_err(), NOT_A_NUMBER);
        assert_eq!(parse_budget(&json!("inf")).unwrap_err(), NOT_A_NUMBER);
    }
}
