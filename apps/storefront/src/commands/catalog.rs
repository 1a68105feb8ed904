//! # Catalog Commands
//!
//! Search bar, filter panel and product grid.
//!
//! ## Filter Panel Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  search ─────► set_search_query ──┐                                     │
//! │  category ───► toggle_category ───┤                                     │
//! │  variety ────► toggle_variety ────┼──► visible_products() ──► list      │
//! │  price ──────► set_price_range ───┤     (recomputed each call)          │
//! │  sort ───────► set_sort ──────────┤                                     │
//! │  in-stock ───► set_in_stock_only ─┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every edit answers with a one-line filter status; `list` prints the grid.

use mango_core::validation::{validate_price_range, validate_search_query};
use mango_core::{Category, Money, SortBy, ValidationError};
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::render;
use crate::state::Session;

/// Replaces the search text. Inner spacing is kept as typed.
pub fn search(session: &mut Session, text: &str) -> AppResult<String> {
    let query = validate_search_query(text)?;
    session.store.set_search_query(&query);
    Ok(render::filter_status(&session.store))
}

pub fn clear_search(session: &mut Session) -> AppResult<String> {
    session.store.clear_search();
    Ok(render::filter_status(&session.store))
}

/// Checks or unchecks a category box.
pub fn toggle_category(session: &mut Session, category: Category, checked: bool) -> AppResult<String> {
    session.store.criteria_mut().toggle_category(category, checked);
    Ok(render::filter_status(&session.store))
}

/// Checks or unchecks a variety box.
///
/// Any variety name is accepted, so a catalog file may carry varieties the
/// built-in list does not know.
pub fn toggle_variety(session: &mut Session, variety: &str, checked: bool) -> AppResult<String> {
    let variety = variety.trim();
    if variety.is_empty() {
        return Err(ValidationError::Required {
            field: "variety".to_string(),
        }
        .into());
    }

    session.store.criteria_mut().toggle_variety(variety, checked);
    Ok(render::filter_status(&session.store))
}

/// Sets the price slider from dollar amounts.
pub fn set_price_range(session: &mut Session, min: f64, max: f64) -> AppResult<String> {
    let min = to_money("min price", min)?;
    let max = to_money("max price", max)?;
    validate_price_range(min, max)?;

    session.store.criteria_mut().set_price_range(min, max);
    Ok(render::filter_status(&session.store))
}

/// Sets the sort order. Unknown names fall back to popularity.
pub fn set_sort(session: &mut Session, name: &str) -> AppResult<String> {
    let sort_by = parse_sort(name);
    session.store.criteria_mut().set_sort(sort_by);
    Ok(render::filter_status(&session.store))
}

pub fn set_in_stock_only(session: &mut Session, in_stock_only: bool) -> AppResult<String> {
    session.store.criteria_mut().set_in_stock_only(in_stock_only);
    Ok(render::filter_status(&session.store))
}

/// Clears search text and every filter.
pub fn reset(session: &mut Session) -> AppResult<String> {
    session.store.reset_filters();
    Ok(render::filter_status(&session.store))
}

/// The product grid for the current search and filters.
pub fn list(session: &Session) -> AppResult<String> {
    let products = session.store.visible_products();
    debug!(shown = products.len(), "Listing products");
    Ok(render::product_list(&products, &session.config))
}

/// One product in full.
pub fn show(session: &Session, product_id: &str) -> AppResult<String> {
    let product = session
        .store
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::UnknownProduct(product_id.to_string()))?;

    let in_cart = session.store.cart().quantity_of(product_id);
    Ok(render::product_detail(product, in_cart, &session.config))
}

/// Categories with their product counts, as shown beside the checkboxes.
pub fn categories(session: &Session) -> AppResult<String> {
    let counts = session.store.category_counts();
    let checked = &session.store.criteria().categories;

    let lines: Vec<String> = Category::ALL
        .iter()
        .map(|category| {
            let mark = if checked.contains(category) { "x" } else { " " };
            let count = counts.get(category).copied().unwrap_or(0);
            format!("[{}] {:<8} {} ({})", mark, category.as_str(), category.label(), count)
        })
        .collect();

    Ok(lines.join("\n"))
}

/// Parses a sort name, logging and falling back to popularity when unknown.
pub fn parse_sort(name: &str) -> SortBy {
    match name.parse::<SortBy>() {
        Ok(sort_by) => sort_by,
        Err(_) => {
            warn!(sort = %name, "Unknown sort option, using popularity");
            SortBy::parse_lenient(name)
        }
    }
}

fn to_money(field: &str, amount: f64) -> AppResult<Money> {
    Money::from_decimal(amount).ok_or_else(|| {
        AppError::Validation(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number in range".to_string(),
        })
    })
}
