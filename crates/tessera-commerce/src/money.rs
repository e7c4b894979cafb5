//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. The catalog feed
//! encodes prices as decimal strings, so a fallible `parse` is provided
//! alongside the usual constructors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use thiserror::Error;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    GBP,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "GBP").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::GBP => "GBP",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "£").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::GBP => "\u{00a3}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_uppercase().as_str() {
            "GBP" => Some(Currency::GBP),
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Error parsing a string-encoded decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid money amount: {0:?}")]
pub struct MoneyParseError(pub String);

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., pence
/// for GBP). This avoids floating-point precision issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., pence).
    pub amount_cents: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from cents.
    pub fn new(amount_cents: i64, currency: Currency) -> Self {
        Self {
            amount_cents,
            currency,
        }
    }

    /// Create a Money value from a decimal amount.
    ///
    /// ```
    /// use tessera_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(45.0, Currency::GBP);
    /// assert_eq!(price.amount_cents, 4500);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let multiplier = 10_i64.pow(currency.decimal_places());
        let amount_cents = (amount * multiplier as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse a string-encoded decimal amount (e.g., "45.00").
    pub fn parse(raw: &str, currency: Currency) -> Result<Self, MoneyParseError> {
        let trimmed = raw.trim();
        let amount: f64 = trimmed
            .parse()
            .map_err(|_| MoneyParseError(raw.to_string()))?;
        if !amount.is_finite() {
            return Err(MoneyParseError(raw.to_string()));
        }
        Ok(Self::from_decimal(amount, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Check if this is positive.
    pub fn is_positive(&self) -> bool {
        self.amount_cents > 0
    }

    /// Convert to a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let divisor = 10_i64.pow(self.currency.decimal_places());
        self.amount_cents as f64 / divisor as f64
    }

    /// Format as a display string (e.g., "£45.00").
    pub fn display(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{}{:.places$}", self.currency.symbol(), decimal)
    }

    /// Format as a display string without symbol (e.g., "45.00").
    pub fn display_amount(&self) -> String {
        let decimal = self.to_decimal();
        let places = self.currency.decimal_places() as usize;
        format!("{:.places$}", decimal)
    }

    /// Try to add another Money value, returning None if currencies don't match
    /// or the addition overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let sum = self.amount_cents.checked_add(other.amount_cents)?;
        Some(Money::new(sum, self.currency))
    }

    /// Try to subtract another Money value.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        let diff = self.amount_cents.checked_sub(other.amount_cents)?;
        Some(Money::new(diff, self.currency))
    }

    /// Multiply by an integer factor, returning None on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        let product = self.amount_cents.checked_mul(factor)?;
        Some(Money::new(product, self.currency))
    }

    /// Multiply by a decimal factor, rounding half-up at the cent.
    pub fn multiply_decimal(&self, factor: f64) -> Money {
        let new_amount = (self.amount_cents as f64 * factor).round() as i64;
        Money::new(new_amount, self.currency)
    }

    /// Strip a flat VAT rate from the amount (e.g., 0.20 for 20%).
    ///
    /// Applied to per-unit figures before any quantity multiplication so
    /// the removal does not accumulate rounding drift across large
    /// quantities.
    pub fn excluding_vat(&self, rate: f64) -> Money {
        self.multiply_decimal(1.0 / (1.0 + rate))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        self.try_add(&other).expect("Currency mismatch in addition")
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        self.try_subtract(&other)
            .expect("Currency mismatch in subtraction")
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
