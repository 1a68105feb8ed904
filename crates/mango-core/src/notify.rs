//! # Notifications
//!
//! Toast-style messages the store emits on add-to-cart and checkout.
//!
//! The core only builds the text. Rendering belongs to whichever UI binds
//! a [`Notifier`]:
//!
//! ```text
//! Storefront::add_to_cart("1")
//!      │
//!      ▼
//! Notification { title: "Added to Cart", description: "... has been added ..." }
//!      │
//!      ▼
//! notifier.notify(&n) ──► TracingNotifier   (log line)
//!                     └─► NotificationQueue (UI drains and shows toasts)
//! ```

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::info;
use ts_rs::TS;

use crate::types::Product;

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Notification {
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Notification {
            title: title.into(),
            description: description.into(),
        }
    }

    /// Confirmation shown after a product lands in the cart.
    ///
    /// ## Example
    /// ```rust
    /// # use mango_core::catalog::Catalog;
    /// use mango_core::notify::Notification;
    ///
    /// let catalog = Catalog::builtin();
    /// let n = Notification::added_to_cart(catalog.get("2").unwrap());
    /// assert_eq!(n.title, "Added to Cart");
    /// assert_eq!(n.description, "Kesar Mangoes has been added to your cart.");
    /// ```
    pub fn added_to_cart(product: &Product) -> Self {
        Notification::new(
            "Added to Cart",
            format!("{} has been added to your cart.", product.name),
        )
    }

    /// Checkout is not wired to any payment backend.
    pub fn checkout_unavailable() -> Self {
        Notification::new(
            "Checkout",
            "To complete your purchase, please connect a backend for secure payment processing.",
        )
    }
}

/// Receives notifications from the store.
pub trait Notifier {
    fn notify(&mut self, notification: &Notification);
}

/// Writes notifications to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&mut self, notification: &Notification) {
        info!(title = %notification.title, "{}", notification.description);
    }
}

/// Buffers notifications until the UI drains them.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: VecDeque<Notification>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every pending notification, oldest first.
    pub fn drain(&mut self) -> Vec<Notification> {
        self.pending.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for NotificationQueue {
    fn notify(&mut self, notification: &Notification) {
        self.pending.push_back(notification.clone());
    }
}
