//! # Domain Types
//!
//! Line item types used by the cart.
//!
//! ## Input vs. Validated
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌──────────────────────┐   TryFrom    ┌──────────────────────┐        │
//! │  │    ProductInput      │ ───────────► │      Product         │        │
//! │  │  ──────────────────  │  validation  │  ──────────────────  │        │
//! │  │  id: String          │              │  id: String          │        │
//! │  │  name: String        │              │  name: String        │        │
//! │  │  price: NumericInput │              │  price: f64 (> 0)    │        │
//! │  │  quantity: NumericIn │              │  quantity: f64 (> 0) │        │
//! │  └──────────────────────┘              └──────────────────────┘        │
//! │                                                                         │
//! │  Callers (checkout form, HTTP handler) may send "1.99" or 1.99.        │
//! │  Only a Product ever reaches the cart.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::validation::{
    parse_price, parse_quantity, validate_product_id, validate_product_name,
};

// =============================================================================
// Numeric Input
// =============================================================================

/// A loosely-typed number as it arrives from a caller.
///
/// Deserializes from either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(untagged)]
pub enum NumericInput {
    Number(f64),
    Text(String),
}

impl fmt::Display for NumericInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericInput::Number(n) => write!(f, "{}", n),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for NumericInput {
    fn from(n: f64) -> Self {
        NumericInput::Number(n)
    }
}

impl From<i64> for NumericInput {
    fn from(n: i64) -> Self {
        NumericInput::Number(n as f64)
    }
}

impl From<&str> for NumericInput {
    fn from(s: &str) -> Self {
        NumericInput::Text(s.to_string())
    }
}

impl From<String> for NumericInput {
    fn from(s: String) -> Self {
        NumericInput::Text(s)
    }
}

// =============================================================================
// Product Input
// =============================================================================

/// An unvalidated product as handed to `add_product`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductInput {
    pub id: String,
    pub name: String,
    pub price: NumericInput,
    pub quantity: NumericInput,
}

impl ProductInput {
    /// Builds an input from anything convertible to the loose numeric form.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<NumericInput>,
        quantity: impl Into<NumericInput>,
    ) -> Self {
        ProductInput {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            quantity: quantity.into(),
        }
    }
}

impl From<Product> for ProductInput {
    fn from(product: Product) -> Self {
        ProductInput::new(product.id, product.name, product.price, product.quantity)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A validated line item in the cart.
///
/// ## Invariants
/// - `id` and `name` are non-empty
/// - `price` is finite and > 0
/// - `quantity` is finite and > 0 while the item is in a cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Identifier, unique within a cart.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Unit price.
    pub price: f64,

    /// Number of units.
    pub quantity: f64,
}

impl Product {
    /// Line total (unit price × quantity).
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.price
    }
}

impl TryFrom<ProductInput> for Product {
    type Error = ValidationError;

    fn try_from(input: ProductInput) -> Result<Self, Self::Error> {
        validate_product_id(&input.id)?;
        validate_product_name(&input.name)?;
        let price = parse_price(&input.price)?;
        let quantity = parse_quantity(&input.quantity)?;

        Ok(Product {
            id: input.id,
            name: input.name,
            price,
            quantity,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
