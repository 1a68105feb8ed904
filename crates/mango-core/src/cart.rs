//! # Cart Ledger
//!
//! The shopping cart for the current session.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Ledger Operations                               │
//! │                                                                         │
//! │  UI Action                Ledger Call              State Change         │
//! │  ─────────                ───────────              ────────────         │
//! │                                                                         │
//! │  "Add to Cart" ──────────► add_to_cart() ───────► qty += 1 or push     │
//! │                                                                         │
//! │  [-] / [+] ──────────────► update_quantity() ───► qty = n (n<=0: drop)  │
//! │                                                                         │
//! │  Trash icon ─────────────► remove_from_cart() ──► lines.retain(..)     │
//! │                                                                         │
//! │  "Clear Cart" ───────────► clear_cart() ────────► lines.clear()        │
//! │                                                                         │
//! │  Header badge / footer ──► cart_items_count()                          │
//! │                            cart_total()          (read only)            │
//! │                                                                         │
//! │  NOTE: every operation is total. Unknown ids are silently ignored.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

/// A product in the cart together with its quantity.
///
/// ## Design Notes
/// The product is a snapshot taken when it was first added, so the line
/// keeps rendering the same name and price for the whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,

    /// Always >= 1 while the line exists.
    pub quantity: i64,

    /// When this product first entered the cart.
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn new(product: &Product) -> Self {
        CartLine {
            product: product.clone(),
            quantity: 1,
            added_at: Utc::now(),
        }
    }

    /// Product id of this line.
    pub fn id(&self) -> &str {
        &self.product.id
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.product.price.multiply_quantity(self.quantity)
    }
}

/// The cart ledger.
///
/// ## Invariants
/// - At most one line per product id (adding the same product bumps quantity)
/// - Every line has quantity > 0 (setting 0 or less removes the line)
/// - Lines keep the order in which products were first added
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,

    /// When the cart was created or last cleared.
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            lines: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Adds one unit of `product`.
    ///
    /// Returns the line's new quantity.
    pub fn add_to_cart(&mut self, product: &Product) -> i64 {
        if let Some(line) = self.line_mut(&product.id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(product_id = %product.id, quantity = line.quantity, "Cart quantity increased");
            return line.quantity;
        }

        self.lines.push(CartLine::new(product));
        debug!(product_id = %product.id, "Cart line added");
        1
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: removes the line
    /// - product not in cart: no-op
    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove_from_cart(product_id);
            return;
        }

        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity;
            debug!(product_id = %product_id, quantity, "Cart quantity updated");
        }
    }

    /// Removes a line. No-op when absent.
    pub fn remove_from_cart(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);

        if self.lines.len() != before {
            debug!(product_id = %product_id, "Cart line removed");
        }
    }

    /// Removes every line.
    pub fn clear_cart(&mut self) {
        self.lines.clear();
        self.created_at = Utc::now();
        debug!("Cart cleared");
    }

    /// Sum of line totals; zero for an empty cart.
    pub fn cart_total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Sum of quantities; zero for an empty cart. Saturates at `i64::MAX`.
    pub fn cart_items_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |count, l| count.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Current quantity of a product, 0 when absent.
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Whether the order total reaches the free shipping threshold.
    pub fn qualifies_for_free_shipping(&self, threshold: Money) -> bool {
        !self.is_empty() && self.cart_total() >= threshold
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product.id == product_id)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

/// Cart snapshot for UI bindings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub item_count: i64,
    pub total: Money,
    pub free_shipping: bool,
}

impl CartSummary {
    pub fn new(cart: &Cart, free_shipping_threshold: Money) -> Self {
        CartSummary {
            lines: cart.lines.clone(),
            item_count: cart.cart_items_count(),
            total: cart.cart_total(),
            free_shipping: cart.qualifies_for_free_shipping(free_shipping_threshold),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn test_product(id: &str, price_cents: i64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            variety: "Kesar".to_string(),
            price: Money::from_cents(price_cents),
            original_price: None,
            rating: 4.0,
            review_count: 3,
            image: String::new(),
            description: String::new(),
            category: Category::Fresh,
            in_stock: true,
            origin: String::new(),
            weight: String::new(),
            features: Vec::new(),
        }
    }

    #[test]
    fn test_add_same_product_twice_keeps_one_line() {
        let mut cart = Cart::new();
        let product = test_product("1", 999);

        assert_eq!(cart.add_to_cart(&product), 1);
        assert_eq!(cart.add_to_cart(&product), 2);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.cart_items_count(), 2);
        assert_eq!(cart.cart_total().cents(), 1998);
    }

    #[test]
    fn test_scenario_add_add_update() {
        let mut cart = Cart::new();
        let a = test_product("A", 1000);

        cart.add_to_cart(&a);
        cart.add_to_cart(&a);
        cart.update_quantity("A", 3);

        assert_eq!(cart.cart_total(), Money::from_dollars(30));
        assert_eq!(cart.cart_items_count(), 3);

        cart.clear_cart();
        assert_eq!(cart.cart_total(), Money::zero());
        assert_eq!(cart.cart_items_count(), 0);
    }

    #[test]
    fn test_update_to_zero_or_below_removes_line() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 500));
        cart.add_to_cart(&test_product("2", 700));

        cart.update_quantity("1", 0);
        assert!(cart.line("1").is_none());
        assert_eq!(cart.line_count(), 1);

        cart.update_quantity("2", -4);
        assert!(cart.is_empty());
        assert_eq!(cart.cart_items_count(), 0);
        assert!(cart.cart_total().is_zero());
    }

    #[test]
    fn test_unknown_ids_are_no_ops() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 500));

        cart.update_quantity("missing", 5);
        cart.remove_from_cart("missing");

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.quantity_of("1"), 1);
        assert_eq!(cart.quantity_of("missing"), 0);
    }

    #[test]
    fn test_lines_keep_insertion_order() {
        let mut cart = Cart::new();
        for id in ["3", "1", "2"] {
            cart.add_to_cart(&test_product(id, 100));
        }
        cart.add_to_cart(&test_product("1", 100));

        let ids: Vec<&str> = cart.lines().iter().map(CartLine::id).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_total_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 1250));
        cart.add_to_cart(&test_product("2", 399));
        cart.update_quantity("2", 4);

        let expected: Money = cart.lines().iter().map(|l| l.line_total()).sum();
        assert_eq!(cart.cart_total(), expected);
        assert_eq!(cart.cart_total().cents(), 1250 + 399 * 4);
    }

    #[test]
    fn test_huge_quantities_saturate_instead_of_overflowing() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 2499));
        cart.add_to_cart(&test_product("2", 1999));
        cart.update_quantity("1", i64::MAX);
        cart.update_quantity("2", i64::MAX);

        assert_eq!(cart.cart_total(), Money::from_cents(i64::MAX));
        assert_eq!(cart.cart_items_count(), i64::MAX);
        assert_eq!(cart.add_to_cart(&test_product("1", 2499)), i64::MAX);
        assert!(cart.qualifies_for_free_shipping(Money::from_dollars(75)));
    }

    #[test]
    fn test_free_shipping_threshold() {
        let threshold = Money::from_dollars(75);
        let mut cart = Cart::new();
        assert!(!cart.qualifies_for_free_shipping(threshold));

        cart.add_to_cart(&test_product("1", 2500));
        cart.update_quantity("1", 2);
        assert!(!cart.qualifies_for_free_shipping(threshold));

        cart.update_quantity("1", 3);
        assert!(cart.qualifies_for_free_shipping(threshold));
    }

    #[test]
    fn test_summary() {
        let mut cart = Cart::new();
        cart.add_to_cart(&test_product("1", 4000));
        cart.add_to_cart(&test_product("1", 4000));

        let summary = CartSummary::new(&cart, Money::from_dollars(75));
        assert_eq!(summary.item_count, 2);
        assert_eq!(summary.total.cents(), 8000);
        assert!(summary.free_shipping);
        assert_eq!(summary.lines.len(), 1);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["itemCount"], 2);
        assert_eq!(json["lines"][0]["quantity"], 2);
    }
}
