//! # cart-core: In-Memory Shopping Cart
//!
//! This crate tracks cart line items, validates input, computes totals, and
//! applies a single discount code from a read-only catalog. It has no
//! database, no network, and no shared state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            Caller (checkout flow, HTTP handler, ...)            │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ ProductInput / code strings            │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ cart-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   cart    │  │ discount  │  │validation │  │   clock   │  │   │
//! │  │   │CartService│─►│ Catalog   │  │  parsers  │  │  Clock    │  │   │
//! │  │   │CartSummary│  │ DiscountCd│  │  checks   │  │FixedClock │  │   │
//! │  │   └───────────┘  └─────▲─────┘  └───────────┘  └───────────┘  │   │
//! │  │                        │                                        │   │
//! │  │                  ┌─────┴─────┐                                  │   │
//! │  │                  │  config   │  TOML / JSON catalog documents   │   │
//! │  │                  └───────────┘                                  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`cart`] - The cart service and its totals
//! - [`discount`] - Discount codes and the catalog trait
//! - [`config`] - Catalog documents (TOML/JSON)
//! - [`types`] - Line item types
//! - [`validation`] - Boundary parsing and validation
//! - [`clock`] - Injectable time source
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cart_core::{CartService, DiscountCode, FixedClock, InMemoryCatalog, ProductInput};
//!
//! let catalog = InMemoryCatalog::new(vec![DiscountCode::percentage(
//!     "SAMUEL10",
//!     Utc.with_ymd_and_hms(2025, 12, 25, 0, 0, 0).unwrap(),
//!     10.0,
//! )]);
//! let clock = FixedClock::at(Utc.with_ymd_and_hms(2025, 5, 10, 0, 0, 0).unwrap());
//! let mut cart = CartService::with_clock(catalog, clock);
//!
//! cart.add_product(ProductInput::new("1", "Baguette", 10.0, 1.0)).unwrap();
//! cart.apply_discount("SAMUEL10").unwrap();
//!
//! assert_eq!(cart.total(), 9.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod clock;
pub mod config;
pub mod discount;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartService, CartSummary};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CatalogConfig;
pub use discount::{DiscountCatalog, DiscountCode, DiscountKind, InMemoryCatalog};
pub use error::{CartError, CartResult, CatalogError, CatalogResult, ValidationError};
pub use types::{NumericInput, Product, ProductInput};
