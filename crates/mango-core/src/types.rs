//! # Domain Types
//!
//! Catalog types shared by the filter engine, the cart ledger and every UI
//! binding.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │      Star       │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id ("12")      │   │  Fresh          │   │  Full           │       │
//! │  │  name, variety  │   │  Pulp           │   │  Half           │       │
//! │  │  price (Money)  │   │  Processed      │   │  Empty          │       │
//! │  │  rating 0-5     │   └─────────────────┘   └─────────────────┘       │
//! │  │  in_stock       │                                                   │
//! │  └─────────────────┘                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are created once at catalog load and never mutated afterwards.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Category
// =============================================================================

/// Product category. The set is fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Whole fresh mangoes.
    Fresh,
    /// Canned or frozen mango pulp.
    Pulp,
    /// Dried slices, jams, juices and the like.
    Processed,
}

impl Category {
    /// Every category, in filter-panel order.
    pub const ALL: [Category; 3] = [Category::Fresh, Category::Pulp, Category::Processed];

    /// Wire name, as used in catalog files and on the command line.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Fresh => "fresh",
            Category::Pulp => "pulp",
            Category::Processed => "processed",
        }
    }

    /// Label shown next to the filter checkbox.
    pub const fn label(&self) -> &'static str {
        match self {
            Category::Fresh => "Fresh Mangoes",
            Category::Pulp => "Mango Pulp",
            Category::Processed => "Processed Products",
        }
    }

    /// Short badge shown on a product card.
    pub const fn badge(&self) -> &'static str {
        match self {
            Category::Fresh => "Fresh Mango",
            Category::Pulp => "Mango Pulp",
            Category::Processed => "Processed",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses a wire name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::NotAllowed {
                field: "category".to_string(),
                allowed: Category::ALL.iter().map(|c| c.as_str().to_string()).collect(),
            })
    }
}

// =============================================================================
// Product
// =============================================================================

/// A purchasable catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier. Numeric strings double as a recency rank.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Mango variety, e.g. "Alphonso".
    pub variety: String,

    /// Current selling price.
    pub price: Money,

    /// Price before discount, when the product is on sale.
    pub original_price: Option<Money>,

    /// Average review score, 0 to 5.
    pub rating: f32,

    /// Number of reviews behind `rating`.
    pub review_count: u32,

    /// Image reference (URL or asset path).
    pub image: String,

    pub description: String,

    pub category: Category,

    pub in_stock: bool,

    /// Growing region, e.g. "Ratnagiri, India".
    pub origin: String,

    /// Display string such as "1 kg (4-5 pieces)".
    pub weight: String,

    /// Selling points listed on the product page.
    pub features: Vec<String>,
}

impl Product {
    /// Parses the id as an unsigned integer.
    ///
    /// Higher ids were added to the catalog later. Non-numeric ids yield
    /// `None` and are ranked oldest by the "newest" sort.
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    /// Amount saved against the original price, if the product is on sale.
    ///
    /// ## Example
    /// ```rust
    /// # use mango_core::catalog::Catalog;
    /// let catalog = Catalog::builtin();
    /// for product in catalog.products() {
    ///     if let Some(saving) = product.savings() {
    ///         assert!(saving.is_positive());
    ///     }
    /// }
    /// ```
    pub fn savings(&self) -> Option<Money> {
        self.original_price
            .filter(|original| *original > self.price)
            .map(|original| original - self.price)
    }

    /// Five-star rendering of the rating.
    pub fn stars(&self) -> [Star; 5] {
        stars_for(self.rating)
    }
}

// =============================================================================
// Star Rating
// =============================================================================

/// One position of a five-star rating display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Star {
    Full,
    Half,
    Empty,
}

/// Maps a rating to five stars: position `i` is full below `floor(rating)`,
/// half below `rating`, empty otherwise.
pub fn stars_for(rating: f32) -> [Star; 5] {
    let whole = rating.floor();
    std::array::from_fn(|i| {
        let i = i as f32;
        if i < whole {
            Star::Full
        } else if i < rating {
            Star::Half
        } else {
            Star::Empty
        }
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
