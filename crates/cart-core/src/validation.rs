//! # Validation Module
//!
//! Boundary parsing and validation for cart input.
//!
//! ## Validation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      ProductInput → Product                             │
//! │                                                                         │
//! │  1. id        non-empty                    → Required                  │
//! │  2. name      non-empty                    → Required                  │
//! │  3. price     parses as finite number      → NotANumber                │
//! │               strictly positive            → MustBePositive            │
//! │  4. quantity  parses as finite number      → NotANumber                │
//! │               strictly positive            → MustBePositive            │
//! │                                                                         │
//! │  The FIRST failure is returned. Price is always checked before         │
//! │  quantity.                                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use cart_core::types::NumericInput;
//! use cart_core::validation::{parse_price, validate_product_id};
//!
//! assert!(validate_product_id("sku-1").is_ok());
//! assert_eq!(parse_price(&NumericInput::from("1.99")).unwrap(), 1.99);
//! assert!(parse_price(&NumericInput::from(-1.0)).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::NumericInput;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product identifier. Must not be empty.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    require_non_empty("id", id)
}

/// Validates a product display name. Must not be empty.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    require_non_empty("name", name)
}

fn require_non_empty(field: &str, value: &str) -> ValidationResult<()> {
    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Parsers
// =============================================================================

/// Parses and validates a unit price.
///
/// ## Example
/// ```rust
/// use cart_core::types::NumericInput;
/// use cart_core::validation::parse_price;
///
/// assert_eq!(parse_price(&NumericInput::from(10.0)).unwrap(), 10.0);
/// assert!(parse_price(&NumericInput::from(0.0)).is_err());
/// assert!(parse_price(&NumericInput::from("ten")).is_err());
/// ```
pub fn parse_price(input: &NumericInput) -> ValidationResult<f64> {
    parse_positive("price", input)
}

/// Parses and validates a line item quantity.
pub fn parse_quantity(input: &NumericInput) -> ValidationResult<f64> {
    parse_positive("quantity", input)
}

/// Reads `input` as a finite number, then requires it to be > 0.
///
/// The number check runs first so that garbage such as `"abc"` or `NaN`
/// reports `NotANumber` rather than `MustBePositive`.
fn parse_positive(field: &str, input: &NumericInput) -> ValidationResult<f64> {
    let value = parse_number(field, input)?;

    if value <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(value)
}

fn parse_number(field: &str, input: &NumericInput) -> ValidationResult<f64> {
    let not_a_number = || ValidationError::NotANumber {
        field: field.to_string(),
        value: input.to_string(),
    };

    let value = match input {
        NumericInput::Number(n) => *n,
        NumericInput::Text(s) => s.trim().parse::<f64>().map_err(|_| not_a_number())?,
    };

    if !value.is_finite() {
        return Err(not_a_number());
    }

    Ok(value)
}

// =============================================================================
// Unit Tests
// =============================================================================
