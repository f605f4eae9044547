//! # Cart Service
//!
//! The shopping cart: line items, totals, and at most one discount.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Caller Action            Method                  Cart State Change     │
//! │  ─────────────            ──────                  ─────────────────     │
//! │                                                                         │
//! │  Add to cart ────────────► add_product() ───────► items.push(item)     │
//! │                                                   or items[i].qty += n │
//! │                                                                         │
//! │  Remove one ─────────────► remove_product() ────► items[i].qty -= 1    │
//! │                                                   or items.remove(i)   │
//! │                                                                         │
//! │  Enter code ─────────────► apply_discount() ────► discount = Some(..)  │
//! │                                                                         │
//! │  View totals ────────────► total() / summary() ─► (read only)          │
//! │                                                                         │
//! │  NOTE: Every failing call leaves the cart exactly as it was.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::clock::{Clock, SystemClock};
use crate::discount::{DiscountCatalog, DiscountCode};
use crate::error::{CartError, CartResult, ValidationError};
use crate::types::{Product, ProductInput};

/// The shopping cart.
///
/// ## Invariants
/// - Items are unique by `id` (adding the same product increases quantity)
/// - Every item has quantity > 0 (removing the last unit removes the item)
/// - At most one discount is applied at a time
#[derive(Debug)]
pub struct CartService<C, K = SystemClock> {
    items: Vec<Product>,
    applied_discount: Option<DiscountCode>,
    catalog: C,
    clock: K,
}

impl<C: DiscountCatalog> CartService<C, SystemClock> {
    /// Creates an empty cart reading time from the system clock.
    pub fn new(catalog: C) -> Self {
        CartService::with_clock(catalog, SystemClock)
    }
}

impl<C: DiscountCatalog, K: Clock> CartService<C, K> {
    /// Creates an empty cart with an explicit time source.
    pub fn with_clock(catalog: C, clock: K) -> Self {
        CartService {
            items: Vec::new(),
            applied_discount: None,
            catalog,
            clock,
        }
    }

    /// Creates a cart pre-filled with `items`.
    ///
    /// Each item goes through [`add_product`](Self::add_product), so
    /// duplicates merge and invalid entries are rejected.
    pub fn with_items<I>(catalog: C, clock: K, items: I) -> CartResult<Self>
    where
        I: IntoIterator<Item = ProductInput>,
    {
        let mut cart = CartService::with_clock(catalog, clock);
        for item in items {
            cart.add_product(item)?;
        }
        Ok(cart)
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Input is validated first: id, name, price, then quantity
    /// - If the id is already in the cart: quantity increases, the incoming
    ///   name and price are discarded
    /// - Otherwise the product is appended
    pub fn add_product(&mut self, input: ProductInput) -> CartResult<()> {
        let product = Product::try_from(input)?;

        if let Some(item) = self.items.iter_mut().find(|i| i.id == product.id) {
            let merged = item.quantity + product.quantity;
            if !merged.is_finite() {
                return Err(ValidationError::TooLarge {
                    field: "quantity".to_string(),
                }
                .into());
            }
            item.quantity = merged;
            debug!(product_id = %item.id, quantity = item.quantity, "Merged product into cart");
            return Ok(());
        }

        debug!(product_id = %product.id, quantity = product.quantity, "Adding product to cart");
        self.items.push(product);
        Ok(())
    }

    /// Removes one unit of a product.
    ///
    /// ## Behavior
    /// - Quantity of 1 (or less, for fractional quantities): item is removed
    /// - Otherwise quantity decreases by exactly 1, position is kept
    pub fn remove_product(&mut self, product_id: &str) -> CartResult<()> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == product_id)
            .ok_or_else(|| CartError::ProductNotInCart(product_id.to_string()))?;

        let item = &mut self.items[index];
        if item.quantity <= 1.0 {
            debug!(product_id, "Removing product from cart");
            self.items.remove(index);
        } else {
            item.quantity -= 1.0;
            debug!(product_id, quantity = item.quantity, "Decremented product quantity");
        }

        Ok(())
    }

    /// Applies a discount code from the catalog.
    ///
    /// ## Behavior
    /// - Unknown code: [`CartError::DiscountNotFound`]
    /// - Expiration strictly before now: [`CartError::DiscountExpired`]
    /// - Otherwise replaces any previously applied discount
    pub fn apply_discount(&mut self, code: &str) -> CartResult<()> {
        let discount = self
            .catalog
            .find_by_code(code)
            .ok_or_else(|| CartError::DiscountNotFound(code.to_string()))?;

        let now = self.clock.now();
        if discount.is_expired_at(now) {
            debug!(code, expired_at = %discount.expiration_date, %now, "Rejected expired discount");
            return Err(CartError::DiscountExpired {
                code: code.to_string(),
                expired_at: discount.expiration_date,
            });
        }

        debug!(code, "Applied discount");
        self.applied_discount = Some(discount.clone());
        Ok(())
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Returns the total quantity of all items.
    pub fn product_count(&self) -> f64 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Sum of `quantity × price` before any discount.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(Product::line_total).sum()
    }

    /// Calculates the total after the applied discount, if any.
    ///
    /// Not clamped at zero: a flat discount larger than the subtotal yields
    /// a negative total.
    pub fn total(&self) -> f64 {
        let subtotal = self.subtotal();
        match &self.applied_discount {
            Some(discount) => discount.kind.apply(subtotal),
            None => subtotal,
        }
    }

    /// Line items in insertion order.
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    /// The discount currently applied, if any.
    pub fn applied_discount(&self) -> Option<&DiscountCode> {
        self.applied_discount.as_ref()
    }

    /// Returns the number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals snapshot for display.
    pub fn summary(&self) -> CartSummary {
        let subtotal = self.subtotal();
        let total = self.total();
        CartSummary {
            item_count: self.len(),
            product_count: self.product_count(),
            subtotal,
            discount: subtotal - total,
            total,
            discount_code: self.applied_discount.as_ref().map(|d| d.code.clone()),
        }
    }
}

/// Cart totals summary for API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub item_count: usize,
    pub product_count: f64,
    pub subtotal: f64,
    pub discount: f64,
    pub total: f64,
    pub discount_code: Option<String>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::discount::InMemoryCatalog;
    use chrono::{DateTime, TimeZone, Utc};

    fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn test_catalog() -> InMemoryCatalog {
        InMemoryCatalog::new(vec![
            DiscountCode::percentage("SAMUEL10", date(2025, 12, 25), 10.0),
            DiscountCode::amount("REMI5", date(2026, 12, 25), 5.0),
            DiscountCode::percentage("BAD50", date(2020, 12, 25), 50.0),
        ])
    }

    fn test_cart() -> CartService<InMemoryCatalog, FixedClock> {
        CartService::with_clock(test_catalog(), FixedClock::at(date(2025, 5, 10)))
    }

    fn test_product(id: &str, price: f64, quantity: f64) -> ProductInput {
        ProductInput::new(id, format!("Product {}", id), price, quantity)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_add_product() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 1.0, 1.0)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(
            cart.items()[0],
            Product {
                id: "1".to_string(),
                name: "Product 1".to_string(),
                price: 1.0,
                quantity: 1.0,
            }
        );
        assert_eq!(cart.product_count(), 1.0);
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 3.0, 2.0)).unwrap();
        cart.add_product(ProductInput::new("1", "Renamed", 99.0, 4.0))
            .unwrap();

        assert_eq!(cart.len(), 1);
        let item = &cart.items()[0];
        assert_eq!(item.quantity, 6.0);
        assert_eq!(item.name, "Product 1");
        assert_eq!(item.price, 3.0);
    }

    #[test]
    fn test_merge_overflow_rejected() {
        let mut cart = test_cart();
        cart.add_product(test_product("2", 1.0, 1e308)).unwrap();

        let err = cart.add_product(test_product("2", 1.0, 1e308)).unwrap_err();

        assert!(matches!(
            err,
            CartError::Validation(ValidationError::TooLarge { ref field }) if field == "quantity"
        ));
        assert_eq!(cart.items()[0].quantity, 1e308);
        assert!(cart.remove_product("2").is_ok());
    }

    #[test]
    fn test_add_whitespace_name_accepted() {
        let mut cart = test_cart();
        cart.add_product(ProductInput::new("1", " ", 1.0, 1.0)).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, " ");
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut cart = test_cart();
        cart.add_product(test_product("b", 1.0, 1.0)).unwrap();
        cart.add_product(test_product("a", 1.0, 1.0)).unwrap();
        cart.add_product(test_product("b", 1.0, 1.0)).unwrap();

        let ids: Vec<&str> = cart.items().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a"]);
    }

    #[test]
    fn test_add_negative_price_rejected() {
        let mut cart = test_cart();
        let err = cart.add_product(test_product("1", -1.0, 1.0)).unwrap_err();

        assert!(matches!(
            err,
            CartError::Validation(ValidationError::MustBePositive { ref field }) if field == "price"
        ));
        assert!(cart.is_empty());
        assert_eq!(cart.total(), 0.0);
    }

    #[test]
    fn test_add_negative_quantity_rejected() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 2.0, 1.0)).unwrap();

        let err = cart.add_product(test_product("2", 1.0, -1.0)).unwrap_err();
        assert!(matches!(
            err,
            CartError::Validation(ValidationError::MustBePositive { ref field }) if field == "quantity"
        ));

        let err = cart.add_product(test_product("1", 2.0, 0.0)).unwrap_err();
        assert!(matches!(err, CartError::Validation(_)));

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.product_count(), 1.0);
        assert_eq!(cart.total(), 2.0);
    }

    #[test]
    fn test_add_non_numeric_rejected() {
        let mut cart = test_cart();
        let err = cart
            .add_product(ProductInput::new("1", "Tea", "free", 1.0))
            .unwrap_err();

        assert!(matches!(
            err,
            CartError::Validation(ValidationError::NotANumber { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_empty_id_rejected() {
        let mut cart = test_cart();
        let err = cart.add_product(test_product("", 1.0, 1.0)).unwrap_err();

        assert!(matches!(
            err,
            CartError::Validation(ValidationError::Required { .. })
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_last_unit_deletes_item() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 5.0, 1.0)).unwrap();
        cart.add_product(test_product("2", 5.0, 3.0)).unwrap();

        cart.remove_product("1").unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.product_count(), 3.0);
        assert_eq!(cart.items()[0].id, "2");
    }

    #[test]
    fn test_remove_decrements_quantity() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 5.0, 10.0)).unwrap();
        cart.add_product(test_product("2", 5.0, 1.0)).unwrap();

        cart.remove_product("1").unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.items()[0].id, "1");
        assert_eq!(cart.items()[0].quantity, 9.0);
    }

    #[test]
    fn test_remove_fractional_quantity_never_goes_non_positive() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 5.0, 1.5)).unwrap();

        cart.remove_product("1").unwrap();
        assert_eq!(cart.items()[0].quantity, 0.5);

        cart.remove_product("1").unwrap();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_missing_product() {
        let mut cart = test_cart();
        let err = cart.remove_product("nope").unwrap_err();
        assert!(matches!(err, CartError::ProductNotInCart(ref id) if id == "nope"));
        assert!(cart.is_empty());

        cart.add_product(test_product("1", 5.0, 2.0)).unwrap();
        assert!(cart.remove_product("2").is_err());
        assert_eq!(cart.product_count(), 2.0);
    }

    #[test]
    fn test_product_count() {
        let mut cart = test_cart();
        assert_eq!(cart.product_count(), 0.0);

        cart.add_product(test_product("1", 5.0, 10.0)).unwrap();
        cart.add_product(test_product("2", 10.0, 15.0)).unwrap();
        cart.add_product(test_product("3", 1.99, 5.0)).unwrap();
        cart.add_product(test_product("4", 0.99, 1.0)).unwrap();

        assert_eq!(cart.len(), 4);
        assert_eq!(cart.product_count(), 31.0);
    }

    #[test]
    fn test_total() {
        let mut cart = test_cart();
        assert_eq!(cart.total(), 0.0);

        cart.add_product(test_product("1", 5.0, 10.0)).unwrap();
        cart.add_product(test_product("2", 10.0, 15.0)).unwrap();
        cart.add_product(test_product("3", 1.99, 5.0)).unwrap();
        cart.add_product(test_product("4", 0.99, 1.0)).unwrap();

        assert_close(cart.total(), 210.94);
    }

    #[test]
    fn test_apply_percentage_discount() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        cart.apply_discount("SAMUEL10").unwrap();

        assert_eq!(cart.total(), 9.0);
        assert_eq!(cart.applied_discount().unwrap().code, "SAMUEL10");
    }

    #[test]
    fn test_apply_amount_discount() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        cart.apply_discount("REMI5").unwrap();

        assert_eq!(cart.total(), 5.0);
    }

    #[test]
    fn test_apply_discount_replaces_previous() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        cart.apply_discount("SAMUEL10").unwrap();
        cart.apply_discount("REMI5").unwrap();

        assert_eq!(cart.total(), 5.0);
        assert_eq!(cart.applied_discount().unwrap().code, "REMI5");
    }

    #[test]
    fn test_apply_unknown_discount() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        let err = cart.apply_discount("BONJOUR").unwrap_err();

        assert!(matches!(err, CartError::DiscountNotFound(ref code) if code == "BONJOUR"));
        assert_eq!(cart.total(), 10.0);
        assert!(cart.applied_discount().is_none());
    }

    #[test]
    fn test_apply_expired_discount() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        let err = cart.apply_discount("BAD50").unwrap_err();

        assert!(matches!(err, CartError::DiscountExpired { ref code, .. } if code == "BAD50"));
        assert_eq!(cart.total(), 10.0);
    }

    #[test]
    fn test_expired_discount_keeps_previous_one() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 1.0)).unwrap();

        cart.apply_discount("REMI5").unwrap();
        assert!(cart.apply_discount("BAD50").is_err());

        assert_eq!(cart.total(), 5.0);
    }

    #[test]
    fn test_discount_valid_until_expiration_instant() {
        let clock = FixedClock::at(date(2025, 12, 25));
        let mut cart = CartService::with_clock(test_catalog(), clock);

        assert!(cart.apply_discount("SAMUEL10").is_ok());
    }

    #[test]
    fn test_discount_expires_with_clock() {
        let clock = FixedClock::at(date(2026, 1, 1));
        let mut cart = CartService::with_clock(test_catalog(), clock);

        assert!(matches!(
            cart.apply_discount("SAMUEL10"),
            Err(CartError::DiscountExpired { .. })
        ));
        assert!(cart.apply_discount("REMI5").is_ok());
    }

    #[test]
    fn test_amount_discount_not_clamped() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 2.0, 1.0)).unwrap();

        cart.apply_discount("REMI5").unwrap();

        assert_eq!(cart.total(), -3.0);
    }

    #[test]
    fn test_discount_on_empty_catalog() {
        let mut cart = CartService::new(InMemoryCatalog::empty());
        assert!(matches!(
            cart.apply_discount("SAMUEL10"),
            Err(CartError::DiscountNotFound(_))
        ));
    }

    #[test]
    fn test_borrowed_catalog() {
        let catalog = test_catalog();
        let mut first = CartService::with_clock(&catalog, FixedClock::at(date(2025, 5, 10)));
        let mut second = CartService::with_clock(&catalog, FixedClock::at(date(2025, 5, 10)));

        assert!(first.apply_discount("SAMUEL10").is_ok());
        assert!(second.apply_discount("REMI5").is_ok());
    }

    #[test]
    fn test_with_items_merges_duplicates() {
        let items = vec![
            test_product("1", 2.0, 1.0),
            test_product("2", 3.0, 2.0),
            test_product("1", 2.0, 4.0),
        ];
        let cart =
            CartService::with_items(test_catalog(), FixedClock::at(date(2025, 5, 10)), items)
                .unwrap();

        assert_eq!(cart.len(), 2);
        assert_eq!(cart.product_count(), 7.0);
        assert_eq!(cart.total(), 16.0);
    }

    #[test]
    fn test_with_items_rejects_invalid() {
        let items = vec![test_product("1", 2.0, 1.0), test_product("2", 0.0, 1.0)];
        let result =
            CartService::with_items(test_catalog(), FixedClock::at(date(2025, 5, 10)), items);

        assert!(matches!(result, Err(CartError::Validation(_))));
    }

    #[test]
    fn test_summary() {
        let mut cart = test_cart();
        cart.add_product(test_product("1", 10.0, 2.0)).unwrap();
        cart.add_product(test_product("2", 5.0, 1.0)).unwrap();
        cart.apply_discount("SAMUEL10").unwrap();

        let summary = cart.summary();
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.product_count, 3.0);
        assert_eq!(summary.subtotal, 25.0);
        assert_close(summary.total, 22.5);
        assert_close(summary.discount, 2.5);
        assert_eq!(summary.discount_code.as_deref(), Some("SAMUEL10"));
    }
}
