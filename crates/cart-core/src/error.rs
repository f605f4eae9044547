//! # Error Types
//!
//! Domain-specific error types for cart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CartError         - Cart operation failures (what callers see)        │
//! │  ├── Validation       ← ValidationError (add_product)                  │
//! │  ├── ProductNotInCart   (remove_product)                               │
//! │  ├── DiscountNotFound   (apply_discount)                               │
//! │  └── DiscountExpired    (apply_discount)                               │
//! │                                                                         │
//! │  ValidationError   - Input validation failures                         │
//! │  CatalogError      - Discount catalog document failures                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ID, discount code)
//! 3. Errors are enum variants, never String
//! 4. Every error leaves the cart exactly as it was

use chrono::{DateTime, Utc};
use thiserror::Error;

// =============================================================================
// Cart Error
// =============================================================================

/// Errors returned by [`CartService`](crate::cart::CartService) operations.
///
/// Each variant maps to a message that can be shown to the shopper as-is.
#[derive(Debug, Error)]
pub enum CartError {
    /// The product passed to `add_product` failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// `remove_product` was called with an ID that is not in the cart.
    #[error("You cannot remove an item that is not in the cart: {0}")]
    ProductNotInCart(String),

    /// No discount with this code exists in the catalog.
    #[error("This discount code doesn't exist: {0}")]
    DiscountNotFound(String),

    /// The discount exists but its expiration date has passed.
    ///
    /// ## User Workflow
    /// ```text
    /// Shopper types "BAD50"
    ///      │
    ///      ▼
    /// Catalog lookup: found, expires 2020-12-25
    ///      │
    ///      ▼
    /// clock.now() = 2025-05-10 > expiration
    ///      │
    ///      ▼
    /// DiscountExpired { code: "BAD50", .. }
    /// ```
    #[error("This discount code is expired: {code} (expired {expired_at})")]
    DiscountExpired {
        code: String,
        expired_at: DateTime<Utc>,
    },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised while parsing a product.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A numeric field could not be read as a finite number.
    #[error("{field} must be a number, got {value:?}")]
    NotANumber { field: String, value: String },

    /// Value must be strictly greater than zero.
    #[error("You cannot add a product with a non-positive {field}")]
    MustBePositive { field: String },

    /// Value overflowed to infinity (e.g. merging two huge quantities).
    #[error("{field} is too large")]
    TooLarge { field: String },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Errors raised while loading or validating a discount catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Failed to read the catalog file.
    #[error("Failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    /// TOML document could not be parsed.
    #[error("Invalid TOML catalog: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON document could not be parsed.
    #[error("Invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),

    /// A discount entry carries an impossible value.
    #[error("Invalid discount {code}: {reason}")]
    InvalidDiscount { code: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

/// Convenience type alias for Results with CatalogError.
pub type CatalogResult<T> = Result<T, CatalogError>;

// =============================================================================
// Unit Tests
// =============================================================================
