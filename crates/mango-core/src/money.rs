//! # Money Module
//!
//! Provides the `Money` type for handling prices safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  A cart holding 3 × $0.10 samplers:                                     │
//! │    0.1 + 0.1 + 0.1 = 0.30000000000000004  ❌                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    10 + 10 + 10 = 30 cents                 ✅                           │
//! │                                                                         │
//! │  Catalog files carry decimal prices; they are converted to cents       │
//! │  exactly once, at load time.                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use mango_core::money::Money;
//!
//! let price = Money::from_cents(2499); // $24.99
//! let line_total = price * 3;          // $74.97
//! assert_eq!(line_total.to_string(), "$74.97");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences (savings) can be computed without casts
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Ord**: Lets the filter engine sort and range-check prices directly
///
/// ## Where Money is Used
/// ```text
/// Product.price ──┬──► price range predicate ──► price-low / price-high sort
///                 │
///                 └──► CartLine.line_total ──► Cart.total ──► free shipping
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole dollars.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// assert_eq!(Money::from_dollars(75).cents(), 7500);
    /// ```
    #[inline]
    pub const fn from_dollars(dollars: i64) -> Self {
        Money(dollars * 100)
    }

    /// Converts a decimal amount (as found in catalog files) to cents,
    /// rounding to the nearest cent.
    ///
    /// Non-finite input, and amounts outside the `i64` cent range, yield
    /// `None`.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// assert_eq!(Money::from_decimal(24.99).unwrap().cents(), 2499);
    /// assert_eq!(Money::from_decimal(8.5).unwrap().cents(), 850);
    /// assert!(Money::from_decimal(f64::NAN).is_none());
    /// assert!(Money::from_decimal(1e17).is_none());
    /// ```
    pub fn from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Money(cents as i64))
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1099).dollars(), 10);
    /// assert_eq!(Money::from_cents(-550).dollars(), -5);
    /// ```
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the value as a decimal, for display only.
    #[inline]
    pub fn as_decimal(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(1250); // Kesar box $12.50
    /// assert_eq!(unit_price.multiply_quantity(3).cents(), 3750);
    /// assert_eq!(unit_price.multiply_quantity(i64::MAX).cents(), i64::MAX);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Formats the amount with a custom currency symbol.
    ///
    /// ## Example
    /// ```rust
    /// use mango_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1234).format_with("€"), "€12.34");
    /// assert_eq!(Money::from_cents(-5).format_with("$"), "-$0.05");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let sign = if self.0 < 0 { "-" } else { "" };
        format!(
            "{}{}{}.{:02}",
            sign,
            symbol,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates instead of wrapping: a runaway cart total pins at
// the i64 bound rather than turning negative.

/// Display uses the dollar sign; front ends with another currency call
/// [`Money::format_with`].
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_with("$"))
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Summing line totals.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
