//! # Error Types
//!
//! Domain-specific error types for mango-core.
//!
//! ## Where Errors Can Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  mango-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog loading failures                       │
//! │  └── ValidationError  - A single field failed a rule                   │
//! │                                                                         │
//! │  storefront errors (app crate)                                         │
//! │  └── AppError         - What the terminal prints                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → "[CODE] message"       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Filtering and cart operations are total and never produce these errors.
//! Only loading or validating catalog data can fail.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and lookup errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with this id exists in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// The catalog file is not valid JSON or has the wrong shape.
    #[error("Catalog could not be parsed: {0}")]
    CatalogParse(#[from] serde_json::Error),

    /// A catalog record failed validation.
    ///
    /// ## Example
    /// ```text
    /// Catalog file contains { "id": "4", "price": -2.0, ... }
    ///      │
    ///      ▼
    /// InvalidProduct { id: "4", source: MustBePositive { field: "price" } }
    ///      │
    ///      ▼
    /// Terminal shows: "Product 4 is invalid: price must be positive"
    /// ```
    #[error("Product {id} is invalid: {source}")]
    InvalidProduct {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value exceeds an upper limit (`max` is already formatted).
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be zero or more.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Lower bound of a range is above its upper bound.
    #[error("{min_field} must not exceed {max_field}")]
    InvertedRange { min_field: String, max_field: String },

    /// Invalid format (e.g., a price that is not a finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g., duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
