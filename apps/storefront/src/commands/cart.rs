//! # Cart Commands
//!
//! Shell commands for the cart drawer.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │  (notification only)    │
//! │  │  Cart    │     │          │     │          │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │                        │                                                │
//! │                   add / inc / dec                                       │
//! │                   qty / remove                                          │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear-cart ───────────────────►  (back to empty)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The core ledger accepts any catalog product. Out-of-stock products are
//! refused here, the way a storefront greys out their "Add to Cart" button.

use mango_core::validation::validate_quantity;
use mango_core::Product;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};
use crate::render;
use crate::state::Session;

/// Adds one unit of a product.
pub fn add(session: &mut Session, product_id: &str) -> AppResult<String> {
    let product = catalog_product(session, product_id)?;
    if !product.in_stock {
        warn!(product_id = %product_id, "Refusing to add out-of-stock product");
        return Err(AppError::OutOfStock {
            name: product.name.clone(),
        });
    }

    validate_quantity(session.store.cart().quantity_of(product_id).saturating_add(1))?;

    let quantity = session
        .store
        .add_to_cart(product_id)
        .ok_or_else(|| AppError::UnknownProduct(product_id.to_string()))?;

    debug!(product_id = %product_id, quantity, "add command");
    Ok(cart_footer(session))
}

/// Sets a line's quantity. Zero or less removes it; more than
/// `MAX_ITEM_QUANTITY` is refused and leaves the line alone.
pub fn set_quantity(session: &mut Session, product_id: &str, quantity: i64) -> AppResult<String> {
    catalog_product(session, product_id)?;
    validate_quantity(quantity)?;
    session.store.update_quantity(product_id, quantity);
    Ok(show_cart(session))
}

/// The "+" button on a cart line.
pub fn increment(session: &mut Session, product_id: &str) -> AppResult<String> {
    let next = line_quantity(session, product_id)?.saturating_add(1);
    validate_quantity(next)?;
    session.store.update_quantity(product_id, next);
    Ok(show_cart(session))
}

/// The "-" button on a cart line. Going below one removes the line.
pub fn decrement(session: &mut Session, product_id: &str) -> AppResult<String> {
    let current = line_quantity(session, product_id)?;
    session.store.update_quantity(product_id, current - 1);
    Ok(show_cart(session))
}

pub fn remove(session: &mut Session, product_id: &str) -> AppResult<String> {
    line_quantity(session, product_id)?;
    session.store.remove_from_cart(product_id);
    Ok(show_cart(session))
}

pub fn clear(session: &mut Session) -> AppResult<String> {
    session.store.clear_cart();
    Ok(show_cart(session))
}

/// The cart drawer.
pub fn show_cart(session: &Session) -> String {
    render::cart_view(&session.store.cart_summary(), &session.config)
}

/// Checkout stub. The notification carries the message; the cart stays.
pub fn checkout(session: &mut Session) -> AppResult<String> {
    if session.store.cart().is_empty() {
        return Err(AppError::usage("Your cart is empty."));
    }

    session.store.checkout();
    Ok(format!(
        "Order total: {}",
        session.config.format_currency(session.store.cart_total())
    ))
}

fn catalog_product<'a>(session: &'a Session, product_id: &str) -> AppResult<&'a Product> {
    session
        .store
        .catalog()
        .get(product_id)
        .ok_or_else(|| AppError::UnknownProduct(product_id.to_string()))
}

fn line_quantity(session: &Session, product_id: &str) -> AppResult<i64> {
    session
        .store
        .cart()
        .line(product_id)
        .map(|line| line.quantity)
        .ok_or_else(|| AppError::usage(format!("Product {} is not in your cart", product_id)))
}

fn cart_footer(session: &Session) -> String {
    let summary = session.store.cart_summary();
    format!(
        "Cart: {} item(s), {}",
        summary.item_count,
        session.config.format_currency(summary.total)
    )
}
