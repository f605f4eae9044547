//! # Discount Catalog
//!
//! Discount codes and the read-only catalog the cart looks them up in.
//!
//! ## Discount Kinds
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         DiscountCode                                    │
//! │                                                                         │
//! │  code: "SAMUEL10"                                                      │
//! │  expiration_date: 2025-12-25T00:00:00Z                                 │
//! │  kind ─┬─► Percentage { percentage: 10 }   base - base × 10 / 100      │
//! │        │                                                                │
//! │        └─► Amount { amount: 5 }            base - 5                    │
//! │                                                                         │
//! │  Serialized with an explicit tag, never by probing fields:             │
//! │    { "code": "...", "type": "percentage", "percentage": 10, ... }      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::config::CatalogConfig;

// =============================================================================
// Discount Kind
// =============================================================================

/// How a discount reduces the cart total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage off the whole cart, meant to lie in 0–100.
    Percentage { percentage: f64 },
    /// Flat currency deduction from the whole cart.
    Amount { amount: f64 },
}

impl DiscountKind {
    /// Applies this discount to `base`.
    ///
    /// The result is not clamped: an amount larger than `base` gives a
    /// negative total.
    ///
    /// ## Example
    /// ```rust
    /// use cart_core::discount::DiscountKind;
    ///
    /// assert_eq!(DiscountKind::Percentage { percentage: 10.0 }.apply(10.0), 9.0);
    /// assert_eq!(DiscountKind::Amount { amount: 5.0 }.apply(10.0), 5.0);
    /// assert_eq!(DiscountKind::Amount { amount: 15.0 }.apply(10.0), -5.0);
    /// ```
    pub fn apply(&self, base: f64) -> f64 {
        match *self {
            DiscountKind::Percentage { percentage } => base - (base * percentage) / 100.0,
            DiscountKind::Amount { amount } => base - amount,
        }
    }
}

// =============================================================================
// Discount Code
// =============================================================================

/// A named, time-limited reduction of the cart total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountCode {
    /// Code the shopper types, matched case-sensitively.
    pub code: String,

    /// Instant after which the code can no longer be applied.
    #[ts(as = "String")]
    pub expiration_date: DateTime<Utc>,

    #[serde(flatten)]
    pub kind: DiscountKind,
}

impl DiscountCode {
    /// Creates a percentage discount.
    pub fn percentage(
        code: impl Into<String>,
        expiration_date: DateTime<Utc>,
        percentage: f64,
    ) -> Self {
        DiscountCode {
            code: code.into(),
            expiration_date,
            kind: DiscountKind::Percentage { percentage },
        }
    }

    /// Creates a flat amount discount.
    pub fn amount(code: impl Into<String>, expiration_date: DateTime<Utc>, amount: f64) -> Self {
        DiscountCode {
            code: code.into(),
            expiration_date,
            kind: DiscountKind::Amount { amount },
        }
    }

    /// True when the expiration date is strictly before `now`.
    #[inline]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiration_date < now
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Read-only lookup surface over a set of discount codes.
///
/// Populating the catalog is the caller's concern; the cart only reads.
pub trait DiscountCatalog {
    /// Returns every configured code, or `None` when nothing is configured.
    fn list_all(&self) -> Option<&[DiscountCode]>;

    /// Returns the first code equal to `code` (exact, case-sensitive).
    fn find_by_code(&self, code: &str) -> Option<&DiscountCode> {
        self.list_all()?.iter().find(|discount| discount.code == code)
    }
}

impl<T: DiscountCatalog + ?Sized> DiscountCatalog for &T {
    fn list_all(&self) -> Option<&[DiscountCode]> {
        (**self).list_all()
    }

    fn find_by_code(&self, code: &str) -> Option<&DiscountCode> {
        (**self).find_by_code(code)
    }
}

/// A catalog held entirely in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InMemoryCatalog {
    discounts: Option<Vec<DiscountCode>>,
}

impl InMemoryCatalog {
    /// Creates a catalog with no codes configured.
    pub fn empty() -> Self {
        InMemoryCatalog::default()
    }

    /// Creates a catalog over `discounts`, preserving their order.
    pub fn new(discounts: Vec<DiscountCode>) -> Self {
        InMemoryCatalog {
            discounts: Some(discounts),
        }
    }

    /// Creates a catalog from a parsed configuration document.
    pub fn from_config(config: CatalogConfig) -> Self {
        InMemoryCatalog {
            discounts: config.discounts,
        }
    }
}

impl DiscountCatalog for InMemoryCatalog {
    fn list_all(&self) -> Option<&[DiscountCode]> {
        self.discounts.as_deref()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn test_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            DiscountCode::percentage("SAMUEL10", date(2025, 12, 25), 10.0),
            DiscountCode::amount("REMI5", date(2026, 12, 25), 5.0),
            DiscountCode::percentage("REMI5", date(2030, 1, 1), 90.0),
        ])
    }

    #[test]
    fn test_find_by_code() {
        let catalog = test_catalog();

        let found = catalog.find_by_code("SAMUEL10").unwrap();
        assert_eq!(found.kind, DiscountKind::Percentage { percentage: 10.0 });

        assert!(catalog.find_by_code("samuel10").is_none());
        assert!(catalog.find_by_code("BONJOUR").is_none());
    }

    #[test]
    fn test_find_by_code_first_match_wins() {
        let catalog = test_catalog();
        let found = catalog.find_by_code("REMI5").unwrap();
        assert_eq!(found.kind, DiscountKind::Amount { amount: 5.0 });
    }

    #[test]
    fn test_empty_catalog() {
        let catalog = InMemoryCatalog::empty();
        assert!(catalog.list_all().is_none());
        assert!(catalog.find_by_code("SAMUEL10").is_none());
    }

    #[test]
    fn test_list_all_preserves_order() {
        let catalog = test_catalog();
        let codes: Vec<&str> = catalog
            .list_all()
            .unwrap()
            .iter()
            .map(|d| d.code.as_str())
            .collect();
        assert_eq!(codes, vec!["SAMUEL10", "REMI5", "REMI5"]);
    }

    #[test]
    fn test_is_expired_at() {
        let discount = DiscountCode::amount("REMI5", date(2026, 12, 25), 5.0);

        assert!(!discount.is_expired_at(date(2025, 5, 10)));
        assert!(!discount.is_expired_at(date(2026, 12, 25)));
        assert!(discount.is_expired_at(date(2026, 12, 26)));
    }

    #[test]
    fn test_discount_serializes_with_tag() {
        let discount = DiscountCode::percentage("SAMUEL10", date(2025, 12, 25), 10.0);
        let json = serde_json::to_value(&discount).unwrap();

        assert_eq!(json["type"], "percentage");
        assert_eq!(json["percentage"], 10.0);
        assert_eq!(json["code"], "SAMUEL10");
    }
}
