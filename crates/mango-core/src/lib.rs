//! # mango-core: Pure Storefront Logic
//!
//! Everything a mango storefront needs apart from drawing pixels: the
//! catalog, the filter/sort engine, the cart ledger and the session store
//! that ties them together.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Mango Storefront Architecture                      │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │          UI layer (terminal shell, desktop, web)                │   │
//! │  │    Search bar ──► Filter panel ──► Product grid ──► Cart drawer │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ method calls on Storefront             │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ mango-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │  filter   │  │   cart    │  │   store   │  │   │
//! │  │   │  Product  │  │ Criteria  │  │  CartLine │  │ Storefront│  │   │
//! │  │   │  Category │  │  SortBy   │  │  totals   │  │  Notifier │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO FILE I/O • NO NETWORK • NO GLOBAL STATE                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, Category, star ratings
//! - [`money`] - Integer-cent Money type
//! - [`catalog`] - Built-in catalog and JSON catalog loading
//! - [`filter`] - FilterCriteria, SortBy and the filter/sort engine
//! - [`cart`] - The cart ledger
//! - [`notify`] - Toast notifications and the Notifier trait
//! - [`store`] - The `Storefront` session store
//! - [`error`] / [`validation`] - Typed errors and catalog rules
//!
//! ## Example Usage
//!
//! ```rust
//! use mango_core::{Catalog, Category, Money, SortBy, Storefront};
//!
//! let mut store = Storefront::new(Catalog::builtin());
//!
//! store.criteria_mut().toggle_category(Category::Fresh, true);
//! store.criteria_mut().set_sort(SortBy::PriceLow);
//! let cheapest = store.visible_products()[0].id.clone();
//!
//! store.add_to_cart(&cheapest);
//! store.add_to_cart(&cheapest);
//! assert_eq!(store.cart_items_count(), 2);
//!
//! store.update_quantity(&cheapest, 0);
//! assert_eq!(store.cart_total(), Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod filter;
pub mod money;
pub mod notify;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartLine, CartSummary};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use filter::{filter_products, FilterCriteria, PriceRange, SortBy};
pub use money::Money;
pub use notify::{Notification, NotificationQueue, Notifier, TracingNotifier};
pub use store::Storefront;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Orders at or above this total ship free.
pub const FREE_SHIPPING_THRESHOLD: Money = Money::from_dollars(75);

/// Upper bound of the default price filter.
pub const DEFAULT_MAX_PRICE: Money = Money::from_dollars(100);

/// Longest search query accepted from a UI, in characters.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;

/// Highest quantity a UI may set on one cart line.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Highest price a catalog record may carry.
pub const MAX_PRICE: Money = Money::from_dollars(1_000_000);
