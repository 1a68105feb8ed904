//! # Rendering
//!
//! Plain-text views of products, the cart and notifications.
//!
//! ## Product Row
//! ```text
//! [1] Premium Alphonso Mangoes  (Fresh Mango)  ★★★★½ 4.8 (156)  $24.99  was $29.99, save $5.00
//! [4] Haden Mangoes  (Fresh Mango)  ★★★★½ 4.4 (41)  $14.99  was $16.99, save $2.00  [Out of Stock]
//! ```

use std::fmt::Write as _;

use mango_core::{CartSummary, Notification, Notifier, Product, Star, Storefront};

use crate::state::StoreConfig;

/// Five stars as text.
pub fn stars(product: &Product) -> String {
    product
        .stars()
        .iter()
        .map(|star| match star {
            Star::Full => '★',
            Star::Half => '½',
            Star::Empty => '☆',
        })
        .collect()
}

/// One-line summary of a product.
pub fn product_row(product: &Product, config: &StoreConfig) -> String {
    let mut row = format!(
        "[{}] {}  ({})  {} {:.1} ({})  {}",
        product.id,
        product.name,
        product.category.badge(),
        stars(product),
        product.rating,
        product.review_count,
        config.format_currency(product.price),
    );

    if let (Some(original), Some(saving)) = (product.original_price, product.savings()) {
        let _ = write!(
            row,
            "  was {}, save {}",
            config.format_currency(original),
            config.format_currency(saving)
        );
    }

    if !product.in_stock {
        row.push_str("  [Out of Stock]");
    }

    row
}

/// The product grid, one row per product.
pub fn product_list(products: &[&Product], config: &StoreConfig) -> String {
    if products.is_empty() {
        return "No products match your filters.".to_string();
    }

    let mut out = format!("Showing {} product(s)\n", products.len());
    for product in products {
        out.push_str(&product_row(product, config));
        out.push('\n');
    }
    out
}

/// Full product view, including how many are already in the cart.
pub fn product_detail(product: &Product, in_cart: i64, config: &StoreConfig) -> String {
    let mut out = product_row(product, config);
    out.push('\n');

    let _ = writeln!(out, "  Variety:  {}", product.variety);
    let _ = writeln!(out, "  Category: {}", product.category.label());
    if !product.origin.is_empty() {
        let _ = writeln!(out, "  Origin:   {}", product.origin);
    }
    if !product.weight.is_empty() {
        let _ = writeln!(out, "  Weight:   {}", product.weight);
    }
    if !product.description.is_empty() {
        let _ = writeln!(out, "  {}", product.description);
    }
    for feature in &product.features {
        let _ = writeln!(out, "  • {}", feature);
    }
    if in_cart > 0 {
        let _ = writeln!(out, "  In cart:  {}", in_cart);
    }
    out
}

/// The cart drawer.
pub fn cart_view(summary: &CartSummary, config: &StoreConfig) -> String {
    if summary.lines.is_empty() {
        return "Your cart is empty.".to_string();
    }

    let mut out = String::new();
    for line in &summary.lines {
        let _ = writeln!(
            out,
            "{:>3} × {} [{}]  {} each  {}",
            line.quantity,
            line.product.name,
            line.id(),
            config.format_currency(line.product.price),
            config.format_currency(line.line_total()),
        );
    }

    let _ = writeln!(out, "Items: {}", summary.item_count);
    let _ = writeln!(out, "Total: {}", config.format_currency(summary.total));

    let threshold = config.free_shipping_threshold();
    if summary.free_shipping {
        out.push_str("Free shipping applied!\n");
    } else {
        let _ = writeln!(
            out,
            "Add {} more for free shipping (orders over {}).",
            config.format_currency(threshold - summary.total),
            config.format_currency(threshold)
        );
    }
    out
}

/// Where the filter panel stands.
pub fn filter_status<N: Notifier>(store: &Storefront<N>) -> String {
    let criteria = store.criteria();
    let mut status = format!(
        "{} of {} products shown | sort: {}",
        store.visible_products().len(),
        store.catalog().len(),
        criteria.sort_by.label(),
    );

    let active = criteria.active_filter_count();
    if active > 0 {
        let _ = write!(status, " | {} filter(s) active", active);
    }
    if !store.search_query().is_empty() {
        let _ = write!(status, " | search: \"{}\"", store.search_query());
    }
    status
}

/// A toast.
pub fn notification(notification: &Notification) -> String {
    format!("» {}: {}", notification.title, notification.description)
}
