//! # Storefront Store
//!
//! One explicit object holding everything a storefront session mutates.
//! UI layers own a `Storefront` and call its methods; nothing is global.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Storefront<N>                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────┐  ┌────────────┐  │
//! │  │   Catalog    │  │ query +      │  │    Cart      │  │ Notifier N │  │
//! │  │ (read-only)  │  │ FilterCriteria│ │  (ledger)    │  │ (toasts)   │  │
//! │  └──────┬───────┘  └──────┬───────┘  └──────────────┘  └────────────┘  │
//! │         │                 │                                             │
//! │         └────────┬────────┘                                             │
//! │                  ▼                                                      │
//! │        visible_products()   recomputed on every call, never cached      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Created empty at startup, mutated through `&mut self` in response to
//! user actions, dropped when the session ends. Nothing is persisted.

use std::collections::BTreeMap;

use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::{Cart, CartSummary};
use crate::catalog::Catalog;
use crate::filter::{filter_products, FilterCriteria};
use crate::money::Money;
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::types::{Category, Product};
use crate::FREE_SHIPPING_THRESHOLD;

/// Session store binding catalog, filters, cart and notifications.
#[derive(Debug)]
pub struct Storefront<N = TracingNotifier> {
    session_id: Uuid,
    catalog: Catalog,
    query: String,
    criteria: FilterCriteria,
    cart: Cart,
    notifier: N,
    free_shipping_threshold: Money,
}

impl Storefront<TracingNotifier> {
    /// Store over `catalog` that logs its notifications.
    pub fn new(catalog: Catalog) -> Self {
        Storefront::with_notifier(catalog, TracingNotifier)
    }
}

impl<N: Notifier> Storefront<N> {
    /// Store over `catalog` delivering notifications to `notifier`.
    pub fn with_notifier(catalog: Catalog, notifier: N) -> Self {
        let session_id = Uuid::new_v4();
        info!(%session_id, products = catalog.len(), "Storefront session started");

        Storefront {
            session_id,
            catalog,
            query: String::new(),
            criteria: FilterCriteria::default(),
            cart: Cart::new(),
            notifier,
            free_shipping_threshold: FREE_SHIPPING_THRESHOLD,
        }
    }

    /// Overrides the free shipping threshold.
    pub fn with_free_shipping_threshold(mut self, threshold: Money) -> Self {
        self.free_shipping_threshold = threshold;
        self
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    pub fn free_shipping_threshold(&self) -> Money {
        self.free_shipping_threshold
    }

    // -------------------------------------------------------------------------
    // Search & Filters
    // -------------------------------------------------------------------------

    pub fn search_query(&self) -> &str {
        &self.query
    }

    /// Replaces the search text. Surrounding whitespace is dropped.
    pub fn set_search_query(&mut self, query: &str) {
        self.query = query.trim().to_string();
        debug!(query = %self.query, "Search query set");
    }

    pub fn clear_search(&mut self) {
        self.query.clear();
        debug!("Search query cleared");
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Mutable access for filter-panel edits.
    pub fn criteria_mut(&mut self) -> &mut FilterCriteria {
        &mut self.criteria
    }

    /// Clears both the search text and the filter criteria.
    pub fn reset_filters(&mut self) {
        self.query.clear();
        self.criteria.reset();
        debug!("Search and filters reset");
    }

    /// Runs the filter engine over the current inputs.
    pub fn visible_products(&self) -> Vec<&Product> {
        filter_products(self.catalog.products(), &self.query, &self.criteria)
    }

    /// Products per category in the whole catalog.
    pub fn category_counts(&self) -> BTreeMap<Category, usize> {
        self.catalog.category_counts()
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Adds one unit of a catalog product and notifies the user.
    ///
    /// Returns the new quantity, or `None` if the id is not in the catalog.
    pub fn add_to_cart(&mut self, product_id: &str) -> Option<i64> {
        let Some(product) = self.catalog.get(product_id) else {
            debug!(product_id = %product_id, "add_to_cart ignored: unknown product");
            return None;
        };

        let quantity = self.cart.add_to_cart(product);
        self.notifier.notify(&Notification::added_to_cart(product));
        Some(quantity)
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i64) {
        self.cart.update_quantity(product_id, quantity);
    }

    pub fn remove_from_cart(&mut self, product_id: &str) {
        self.cart.remove_from_cart(product_id);
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear_cart();
    }

    pub fn cart_total(&self) -> Money {
        self.cart.cart_total()
    }

    pub fn cart_items_count(&self) -> i64 {
        self.cart.cart_items_count()
    }

    pub fn cart_summary(&self) -> CartSummary {
        CartSummary::new(&self.cart, self.free_shipping_threshold)
    }

    /// Placeholder checkout: notifies the user and leaves the cart as is.
    pub fn checkout(&mut self) -> Notification {
        info!(
            items = self.cart.cart_items_count(),
            total = %self.cart.cart_total(),
            "Checkout requested"
        );
        let notification = Notification::checkout_unavailable();
        self.notifier.notify(&notification);
        notification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::SortBy;
    use crate::notify::NotificationQueue;

    fn store() -> Storefront<NotificationQueue> {
        Storefront::with_notifier(Catalog::builtin(), NotificationQueue::new())
    }

    #[test]
    fn test_add_to_cart_notifies() {
        let mut store = store();

        assert_eq!(store.add_to_cart("1"), Some(1));
        assert_eq!(store.add_to_cart("1"), Some(2));

        let sent = store.notifier_mut().drain();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].title, "Added to Cart");
        assert_eq!(
            sent[0].description,
            "Premium Alphonso Mangoes has been added to your cart."
        );
        assert_eq!(store.cart().line_count(), 1);
    }

    #[test]
    fn test_add_unknown_product_is_ignored() {
        let mut store = store();
        assert_eq!(store.add_to_cart("404"), None);
        assert!(store.cart().is_empty());
        assert!(store.notifier().is_empty());
    }

    #[test]
    fn test_checkout_leaves_cart_untouched() {
        let mut store = store();
        store.add_to_cart("2");
        store.notifier_mut().drain();

        let n = store.checkout();
        assert_eq!(n.title, "Checkout");
        assert_eq!(store.notifier_mut().drain(), vec![n]);
        assert_eq!(store.cart_items_count(), 1);
    }

    #[test]
    fn test_visible_products_follow_query_and_criteria() {
        let mut store = store();
        let all = store.visible_products().len();
        assert_eq!(all, store.catalog().len());

        store.set_search_query("  pulp ");
        assert_eq!(store.search_query(), "pulp");
        let pulp_hits = store.visible_products();
        assert!(!pulp_hits.is_empty());
        assert!(pulp_hits.len() < all);

        store.criteria_mut().set_in_stock_only(true);
        assert!(store.visible_products().iter().all(|p| p.in_stock));

        store.reset_filters();
        assert_eq!(store.search_query(), "");
        assert_eq!(store.visible_products().len(), all);
    }

    #[test]
    fn test_newest_sort_on_builtin_catalog() {
        let mut store = store();
        store.criteria_mut().set_sort(SortBy::Newest);
        let first = store.visible_products()[0].id.clone();
        assert_eq!(first, "14");
    }

    #[test]
    fn test_cart_summary_uses_threshold() {
        let mut store = store().with_free_shipping_threshold(Money::from_dollars(20));
        store.add_to_cart("1");
        assert!(store.cart_summary().free_shipping);

        store.update_quantity("1", 0);
        assert!(!store.cart_summary().free_shipping);
        assert_eq!(store.cart_total(), Money::zero());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut store = store();
        store.add_to_cart("1");
        store.add_to_cart("7");
        store.remove_from_cart("1");
        assert_eq!(store.cart_items_count(), 1);

        store.clear_cart();
        assert_eq!(store.cart_items_count(), 0);
    }
}
