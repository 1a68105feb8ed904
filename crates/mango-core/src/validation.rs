//! # Validation Module
//!
//! Rules applied to catalog records and free-form user input before they
//! reach the filter engine or the cart ledger.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Catalog load                                                 │
//! │  ├── validate_product (every record, once)                             │
//! │  └── duplicate id check (catalog.rs)                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: UI input                                                     │
//! │  ├── validate_search_query                                             │
//! │  ├── validate_price_range                                              │
//! │  └── validate_quantity                                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Core operations are total (no validation needed)             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mango_core::validation::validate_search_query;
//!
//! assert_eq!(validate_search_query("  kesar ").unwrap(), "kesar");
//! assert!(validate_search_query(&"a".repeat(200)).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::Product;
use crate::{MAX_ITEM_QUANTITY, MAX_PRICE, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Highest rating a product may carry.
pub const MAX_RATING: f32 = 5.0;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product id: must not be blank, at most 64 characters.
pub fn validate_product_id(id: &str) -> ValidationResult<()> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: 64,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Example
/// ```rust
/// use mango_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Alphonso Mangoes").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
///
/// An empty query is valid and matches every product.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a selling price: strictly positive, at most [`MAX_PRICE`].
pub fn validate_price(price: Money) -> ValidationResult<()> {
    validate_catalog_price("price", price)
}

fn validate_catalog_price(field: &str, price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    if price > MAX_PRICE {
        return Err(ValidationError::TooLarge {
            field: field.to_string(),
            max: MAX_PRICE.to_string(),
        });
    }

    Ok(())
}

/// Validates a quantity typed by the user for one cart line.
///
/// Zero or less is accepted (the ledger treats it as removal); anything
/// above [`MAX_ITEM_QUANTITY`] is refused.
///
/// ## Example
/// ```rust
/// use mango_core::validation::validate_quantity;
///
/// assert!(validate_quantity(0).is_ok());
/// assert!(validate_quantity(999).is_ok());
/// assert!(validate_quantity(1000).is_err());
/// ```
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_ITEM_QUANTITY.to_string(),
        });
    }

    Ok(())
}

/// Validates a rating: finite and within 0 to 5.
pub fn validate_rating(rating: f32) -> ValidationResult<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: MAX_RATING as i64,
        });
    }

    Ok(())
}

/// Validates a price range typed by the user: non-negative bounds with
/// `min <= max`.
///
/// ## Example
/// ```rust
/// use mango_core::money::Money;
/// use mango_core::validation::validate_price_range;
///
/// assert!(validate_price_range(Money::zero(), Money::from_dollars(100)).is_ok());
/// assert!(validate_price_range(Money::from_dollars(50), Money::from_dollars(10)).is_err());
/// ```
pub fn validate_price_range(min: Money, max: Money) -> ValidationResult<()> {
    if min.is_negative() {
        return Err(ValidationError::Negative {
            field: "min price".to_string(),
        });
    }

    if min > max {
        return Err(ValidationError::InvertedRange {
            min_field: "min price".to_string(),
            max_field: "max price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates one catalog record.
///
/// ## Rules
/// - id and name must not be blank
/// - price must be positive and at most [`MAX_PRICE`]
/// - original price, when present, follows the same rule
/// - rating within 0 to 5
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_product_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_price(product.price)?;

    if let Some(original) = product.original_price {
        validate_catalog_price("originalPrice", original)?;
    }

    validate_rating(product.rating)?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    fn valid_product() -> Product {
        Product {
            id: "1".to_string(),
            name: "Kesar Mangoes".to_string(),
            variety: "Kesar".to_string(),
            price: Money::from_cents(1999),
            original_price: Some(Money::from_cents(2499)),
            rating: 4.7,
            review_count: 88,
            image: "kesar.jpg".to_string(),
            description: "Saffron mango from Gujarat".to_string(),
            category: Category::Fresh,
            in_stock: true,
            origin: "Gujarat, India".to_string(),
            weight: "1 kg".to_string(),
            features: vec!["Hand-picked".to_string()],
        }
    }

    #[test]
    fn test_validate_product_id() {
        assert!(validate_product_id("12").is_ok());
        assert!(validate_product_id("alphonso-premium").is_ok());
        assert!(validate_product_id("").is_err());
        assert!(validate_product_id("  ").is_err());
        assert!(validate_product_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("").unwrap(), "");
        assert_eq!(validate_search_query(" Pulp ").unwrap(), "Pulp");
        assert!(validate_search_query(&"m".repeat(MAX_SEARCH_QUERY_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_rating() {
        assert!(validate_rating(0.0).is_ok());
        assert!(validate_rating(5.0).is_ok());
        assert!(validate_rating(5.1).is_err());
        assert!(validate_rating(-0.5).is_err());
        assert!(validate_rating(f32::NAN).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        assert!(validate_price_range(Money::zero(), Money::zero()).is_ok());

        let err = validate_price_range(Money::from_cents(-1), Money::zero()).unwrap_err();
        assert_eq!(err.to_string(), "min price must not be negative");

        let err = validate_price_range(Money::from_dollars(20), Money::from_dollars(10)).unwrap_err();
        assert_eq!(err.to_string(), "min price must not exceed max price");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(-3).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        let err = validate_quantity(i64::MAX).unwrap_err();
        assert_eq!(err.to_string(), "quantity must be at most 999");
    }

    #[test]
    fn test_validate_product() {
        assert!(validate_product(&valid_product()).is_ok());

        let mut free = valid_product();
        free.price = Money::zero();
        assert_eq!(
            validate_product(&free),
            Err(ValidationError::MustBePositive {
                field: "price".to_string()
            })
        );

        let mut unnamed = valid_product();
        unnamed.name = String::new();
        assert!(validate_product(&unnamed).is_err());

        let mut bad_original = valid_product();
        bad_original.original_price = Some(Money::from_cents(-100));
        assert!(validate_product(&bad_original).is_err());

        let mut gold_plated = valid_product();
        gold_plated.price = MAX_PRICE + Money::from_cents(1);
        assert_eq!(
            validate_product(&gold_plated),
            Err(ValidationError::TooLarge {
                field: "price".to_string(),
                max: "$1000000.00".to_string()
            })
        );
        gold_plated.price = MAX_PRICE;
        assert!(validate_product(&gold_plated).is_ok());
    }
}
