//! # Catalog Filter/Sort Engine
//!
//! Maps (catalog, search text, criteria) to the ordered list of products a
//! UI should display.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    filter_products()                                    │
//! │                                                                         │
//! │  catalog ──► query ──► category ──► variety ──► stock ──► price ──┐    │
//! │              (all predicates ANDed, catalog order kept)           │    │
//! │                                                                   ▼    │
//! │                                                  stable sort by sort_by │
//! │                                                                   │    │
//! │                                                                   ▼    │
//! │                                                     Vec<&Product>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The engine is a pure function. Callers recompute it whenever the query
//! or the criteria change; there is no cached state to invalidate.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Product};
use crate::DEFAULT_MAX_PRICE;

// =============================================================================
// Sort Order
// =============================================================================

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortBy {
    /// Catalog order, untouched.
    #[default]
    Popularity,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Highest rated first.
    Rating,
    /// Highest numeric id first; non-numeric ids last.
    Newest,
}

impl SortBy {
    pub const ALL: [SortBy; 5] = [
        SortBy::Popularity,
        SortBy::PriceLow,
        SortBy::PriceHigh,
        SortBy::Rating,
        SortBy::Newest,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            SortBy::Popularity => "popularity",
            SortBy::PriceLow => "price-low",
            SortBy::PriceHigh => "price-high",
            SortBy::Rating => "rating",
            SortBy::Newest => "newest",
        }
    }

    /// Label shown in the sort selector.
    pub const fn label(&self) -> &'static str {
        match self {
            SortBy::Popularity => "Most Popular",
            SortBy::PriceLow => "Price: Low to High",
            SortBy::PriceHigh => "Price: High to Low",
            SortBy::Rating => "Highest Rated",
            SortBy::Newest => "Newest First",
        }
    }

    /// Parses a wire name, falling back to [`SortBy::Popularity`] for
    /// anything unrecognised.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::filter::SortBy;
    ///
    /// assert_eq!(SortBy::parse_lenient("price-high"), SortBy::PriceHigh);
    /// assert_eq!(SortBy::parse_lenient("bestsellers"), SortBy::Popularity);
    /// ```
    pub fn parse_lenient(s: &str) -> SortBy {
        s.parse().unwrap_or_default()
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortBy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SortBy::ALL
            .into_iter()
            .find(|sort| sort.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "sort".to_string(),
                allowed: SortBy::ALL.iter().map(|s| s.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Price Range
// =============================================================================

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

impl PriceRange {
    pub const fn new(min: Money, max: Money) -> Self {
        PriceRange { min, max }
    }

    /// `min <= price <= max`. An inverted range contains nothing.
    #[inline]
    pub fn contains(&self, price: Money) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    /// `$0.00` to `$100.00`, the slider's initial position.
    fn default() -> Self {
        PriceRange::new(Money::zero(), DEFAULT_MAX_PRICE)
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// Active filter and sort parameters. Transient UI state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Empty means "all categories".
    pub categories: BTreeSet<Category>,

    /// Variety tokens; a product matches if its variety contains any of
    /// them, ignoring case. Empty means "all varieties".
    pub varieties: BTreeSet<String>,

    pub price_range: PriceRange,

    pub sort_by: SortBy,

    pub in_stock_only: bool,
}

impl FilterCriteria {
    /// Checks or unchecks a category box.
    pub fn toggle_category(&mut self, category: Category, checked: bool) {
        if checked {
            self.categories.insert(category);
        } else {
            self.categories.remove(&category);
        }
    }

    /// Checks or unchecks a variety box.
    pub fn toggle_variety(&mut self, variety: &str, checked: bool) {
        let variety = variety.trim();
        if variety.is_empty() {
            return;
        }
        if checked {
            self.varieties.insert(variety.to_string());
        } else {
            self.varieties.remove(variety);
        }
    }

    pub fn set_sort(&mut self, sort_by: SortBy) {
        self.sort_by = sort_by;
    }

    pub fn set_price_range(&mut self, min: Money, max: Money) {
        self.price_range = PriceRange::new(min, max);
    }

    pub fn set_in_stock_only(&mut self, in_stock_only: bool) {
        self.in_stock_only = in_stock_only;
    }

    /// Number shown on the "Filters" badge. Price range and sort order do
    /// not count.
    pub fn active_filter_count(&self) -> usize {
        self.categories.len() + self.varieties.len() + usize::from(self.in_stock_only)
    }

    /// Restores the default criteria.
    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Whether `product` passes every non-text predicate.
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }

        if !self.varieties.is_empty() {
            let variety = product.variety.to_lowercase();
            if !self
                .varieties
                .iter()
                .any(|token| variety.contains(&token.to_lowercase()))
            {
                return false;
            }
        }

        if self.in_stock_only && !product.in_stock {
            return false;
        }

        self.price_range.contains(product.price)
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Case-insensitive substring match on name, variety or description.
/// A blank query matches everything.
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.trim();
    if query.is_empty() {
        return true;
    }

    let needle = query.to_lowercase();
    product.name.to_lowercase().contains(&needle)
        || product.variety.to_lowercase().contains(&needle)
        || product.description.to_lowercase().contains(&needle)
}

/// Filters and orders products.
///
/// Accepts anything that yields product references, so the output of one
/// call can be fed straight back into another.
///
/// ## Example
/// ```rust
/// use mango_core::catalog::Catalog;
/// use mango_core::filter::{filter_products, FilterCriteria, SortBy};
/// use mango_core::types::Category;
///
/// let catalog = Catalog::builtin();
/// let mut criteria = FilterCriteria::default();
/// criteria.toggle_category(Category::Pulp, true);
/// criteria.set_sort(SortBy::PriceLow);
///
/// let pulp = filter_products(catalog.products(), "", &criteria);
/// assert!(pulp.iter().all(|p| p.category == Category::Pulp));
/// assert!(pulp.windows(2).all(|w| w[0].price <= w[1].price));
/// ```
pub fn filter_products<'a, I>(products: I, query: &str, criteria: &FilterCriteria) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let mut filtered: Vec<&Product> = products
        .into_iter()
        .filter(|p| matches_query(p, query) && criteria.matches(p))
        .collect();

    sort_products(&mut filtered, criteria.sort_by);
    filtered
}

/// Stable in-place sort.
pub fn sort_products(products: &mut [&Product], sort_by: SortBy) {
    match sort_by {
        SortBy::Popularity => {}
        SortBy::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
        SortBy::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
        SortBy::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        SortBy::Newest => products.sort_by(|a, b| newest_first(a, b)),
    }
}

/// Descending numeric id; ids that are not unsigned integers rank oldest
/// and keep their relative order.
fn newest_first(a: &Product, b: &Product) -> Ordering {
    match (a.numeric_id(), b.numeric_id()) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price_cents: i64, category: Category, in_stock: bool) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            variety: "Alphonso".to_string(),
            price: Money::from_cents(price_cents),
            original_price: None,
            rating: 4.0,
            review_count: 0,
            image: String::new(),
            description: String::new(),
            category,
            in_stock,
            origin: String::new(),
            weight: String::new(),
            features: Vec::new(),
        }
    }

    fn ids(products: &[&Product]) -> Vec<String> {
        products.iter().map(|p| p.id.clone()).collect()
    }

    /// A(price 10, fresh, in stock), B(price 20, pulp, out of stock).
    fn scenario_catalog() -> Vec<Product> {
        vec![
            product("A", 1000, Category::Fresh, true),
            product("B", 2000, Category::Pulp, false),
        ]
    }

    #[test]
    fn test_category_filter() {
        let catalog = scenario_catalog();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category(Category::Fresh, true);

        let result = filter_products(&catalog, "", &criteria);
        assert_eq!(ids(&result), vec!["A"]);
    }

    #[test]
    fn test_in_stock_filter() {
        let catalog = scenario_catalog();
        let mut criteria = FilterCriteria::default();
        criteria.set_in_stock_only(true);

        let result = filter_products(&catalog, "", &criteria);
        assert_eq!(ids(&result), vec!["A"]);
    }

    #[test]
    fn test_default_criteria_keep_catalog_order() {
        let catalog = scenario_catalog();
        let result = filter_products(&catalog, "", &FilterCriteria::default());
        assert_eq!(ids(&result), vec!["A", "B"]);
    }

    #[test]
    fn test_query_matches_name_variety_description() {
        let mut catalog = scenario_catalog();
        catalog[0].name = "Royal Alphonso Box".to_string();
        catalog[1].variety = "Kesar".to_string();
        catalog[1].description = "Thick PULP for lassi".to_string();

        let criteria = FilterCriteria::default();
        assert_eq!(ids(&filter_products(&catalog, "royal", &criteria)), vec!["A"]);
        assert_eq!(ids(&filter_products(&catalog, "KESAR", &criteria)), vec!["B"]);
        assert_eq!(ids(&filter_products(&catalog, "lassi", &criteria)), vec!["B"]);
        assert!(filter_products(&catalog, "durian", &criteria).is_empty());
        assert_eq!(filter_products(&catalog, "   ", &criteria).len(), 2);
    }

    #[test]
    fn test_variety_filter_matches_tokens_case_insensitively() {
        let mut catalog = scenario_catalog();
        catalog[0].variety = "Tommy Atkins".to_string();
        catalog[1].variety = "Alphonso (Hapus)".to_string();

        let mut criteria = FilterCriteria::default();
        criteria.toggle_variety("alphonso", true);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["B"]);

        criteria.toggle_variety("Tommy", true);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["A", "B"]);
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let catalog = scenario_catalog();
        let mut criteria = FilterCriteria::default();

        criteria.set_price_range(Money::from_cents(1000), Money::from_cents(2000));
        assert_eq!(filter_products(&catalog, "", &criteria).len(), 2);

        criteria.set_price_range(Money::from_cents(1001), Money::from_cents(2000));
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["B"]);

        criteria.set_price_range(Money::from_cents(2000), Money::from_cents(1000));
        assert!(filter_products(&catalog, "", &criteria).is_empty());
    }

    #[test]
    fn test_default_price_range_excludes_expensive_products() {
        let catalog = vec![product("1", 10_001, Category::Processed, true)];
        assert!(filter_products(&catalog, "", &FilterCriteria::default()).is_empty());
    }

    #[test]
    fn test_sort_by_price_and_rating() {
        let mut catalog = vec![
            product("1", 1500, Category::Fresh, true),
            product("2", 500, Category::Fresh, true),
            product("3", 2500, Category::Fresh, true),
        ];
        catalog[0].rating = 4.9;
        catalog[1].rating = 3.2;
        catalog[2].rating = 4.1;

        let mut criteria = FilterCriteria::default();
        criteria.set_sort(SortBy::PriceLow);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["2", "1", "3"]);

        criteria.set_sort(SortBy::PriceHigh);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["3", "1", "2"]);

        criteria.set_sort(SortBy::Rating);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["1", "3", "2"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_prices() {
        let catalog = vec![
            product("x", 900, Category::Fresh, true),
            product("y", 900, Category::Fresh, true),
            product("z", 100, Category::Fresh, true),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set_sort(SortBy::PriceHigh);
        assert_eq!(ids(&filter_products(&catalog, "", &criteria)), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_newest_puts_non_numeric_ids_last() {
        let catalog = vec![
            product("legacy-b", 100, Category::Fresh, true),
            product("2", 100, Category::Fresh, true),
            product("legacy-a", 100, Category::Fresh, true),
            product("10", 100, Category::Fresh, true),
            product("9", 100, Category::Fresh, true),
        ];
        let mut criteria = FilterCriteria::default();
        criteria.set_sort(SortBy::Newest);

        assert_eq!(
            ids(&filter_products(&catalog, "", &criteria)),
            vec!["10", "9", "2", "legacy-b", "legacy-a"]
        );
    }

    #[test]
    fn test_active_filter_count_and_reset() {
        let mut criteria = FilterCriteria::default();
        assert_eq!(criteria.active_filter_count(), 0);

        criteria.toggle_category(Category::Fresh, true);
        criteria.toggle_category(Category::Fresh, true);
        criteria.toggle_variety("Kesar", true);
        criteria.set_in_stock_only(true);
        criteria.set_sort(SortBy::Rating);
        assert_eq!(criteria.active_filter_count(), 3);

        criteria.toggle_category(Category::Fresh, false);
        assert_eq!(criteria.active_filter_count(), 2);

        criteria.reset();
        assert_eq!(criteria, FilterCriteria::default());
        assert_eq!(criteria.sort_by, SortBy::Popularity);
    }

    #[test]
    fn test_sort_by_parsing() {
        assert_eq!("price-low".parse::<SortBy>().unwrap(), SortBy::PriceLow);
        assert_eq!("NEWEST".parse::<SortBy>().unwrap(), SortBy::Newest);
        assert!("cheapest".parse::<SortBy>().is_err());
        assert_eq!(SortBy::parse_lenient("cheapest"), SortBy::Popularity);
        assert_eq!(SortBy::Rating.label(), "Highest Rated");
    }

    #[test]
    fn test_criteria_json_shape() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_category(Category::Pulp, true);
        criteria.set_sort(SortBy::PriceHigh);

        let json = serde_json::to_value(&criteria).unwrap();
        assert_eq!(json["sortBy"], "price-high");
        assert_eq!(json["categories"][0], "pulp");
        assert_eq!(json["inStockOnly"], false);
        assert_eq!(json["priceRange"]["max"], 10_000);
    }
}
