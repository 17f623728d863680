//! Money type for representing monetary values.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Decimal strings are
//! produced with integer arithmetic so JSON payloads carry exact amounts.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::error::CommerceError;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
    CHF,
    PLN,
}

impl Currency {
    /// Get the currency code (e.g., "USD").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::USD => "USD",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::CAD => "CAD",
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::PLN => "PLN",
        }
    }

    /// Get the currency symbol (e.g., "$").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
            Currency::GBP => "\u{00a3}",
            Currency::JPY => "\u{00a5}",
            Currency::CAD => "CA$",
            Currency::AUD => "A$",
            Currency::CHF => "CHF ",
            Currency::PLN => "z\u{0142} ",
        }
    }

    /// Number of minor-unit digits (2 for cents, 0 for yen).
    pub fn decimal_places(&self) -> u32 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    fn minor_units(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "USD" => Some(Currency::USD),
            "EUR" => Some(Currency::EUR),
            "GBP" => Some(Currency::GBP),
            "JPY" => Some(Currency::JPY),
            "CAD" => Some(Currency::CAD),
            "AUD" => Some(Currency::AUD),
            "CHF" => Some(Currency::CHF),
            "PLN" => Some(Currency::PLN),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency (e.g., cents for USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit (e.g., cents).
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

    /// Create a Money value from a floating point amount, rounding to the
    /// nearest minor unit.
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_cents = (amount * currency.minor_units() as f64).round() as i64;
        Self::new(amount_cents, currency)
    }

    /// Parse a decimal string such as `"49.99"` or `"10"`.
    ///
    /// More fractional digits than the currency supports are rejected.
    pub fn from_decimal_str(input: &str, currency: Currency) -> Result<Self, CommerceError> {
        let invalid = || CommerceError::SerializationError(format!("invalid amount: {input}"));
        let trimmed = input.trim();
        let (negative, digits) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed),
        };
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits, ""));
        let places = currency.decimal_places() as usize;

        if whole.is_empty() && fraction.is_empty() {
            return Err(invalid());
        }
        if !whole.chars().all(|c| c.is_ascii_digit())
            || !fraction.chars().all(|c| c.is_ascii_digit())
            || fraction.len() > places
        {
            return Err(invalid());
        }

        let whole: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| invalid())?
        };
        let fraction: i64 = if fraction.is_empty() {
            0
        } else {
            let padded = format!("{fraction:0<places$}");
            padded.parse().map_err(|_| invalid())?
        };

        let cents = whole
            .checked_mul(currency.minor_units())
            .and_then(|c| c.checked_add(fraction))
            .ok_or(CommerceError::Overflow)?;
        Ok(Self::new(if negative { -cents } else { cents }, currency))
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Convert to a floating point value. Only for display and rate math.
    pub fn to_decimal(&self) -> f64 {
        self.amount_cents as f64 / self.currency.minor_units() as f64
    }

    /// Exact decimal representation (e.g., "49.99", "-0.50", "100").
    pub fn to_decimal_string(&self) -> String {
        let places = self.currency.decimal_places() as usize;
        let sign = if self.amount_cents < 0 { "-" } else { "" };
        let abs = self.amount_cents.unsigned_abs();
        if places == 0 {
            return format!("{sign}{abs}");
        }
        let units = self.currency.minor_units() as u64;
        format!("{sign}{}.{:0places$}", abs / units, abs % units)
    }

    /// Format as a display string (e.g., "$49.99").
    pub fn display(&self) -> String {
        if self.amount_cents < 0 {
            format!("-{}{}", self.currency.symbol(), self.abs().to_decimal_string())
        } else {
            format!("{}{}", self.currency.symbol(), self.to_decimal_string())
        }
    }

    fn abs(&self) -> Self {
        Self::new(self.amount_cents.abs(), self.currency)
    }

    /// Subtract another Money value, returning None if currencies don't match
    /// or the result overflows.
    pub fn try_subtract(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_cents
            .checked_sub(other.amount_cents)
            .map(|cents| Money::new(cents, self.currency))
    }

    /// Subtract, clamping at zero. Mismatched currencies leave the amount
    /// unchanged.
    pub fn saturating_sub_to_zero(&self, other: &Money) -> Money {
        match self.try_subtract(other) {
            Some(result) if result.amount_cents < 0 => Money::zero(self.currency),
            Some(result) => result,
            None => *self,
        }
    }

    /// Calculate a percentage of this amount.
    pub fn percentage(&self, percent: f64) -> Money {
        let cents = (self.amount_cents as f64 * percent / 100.0).round() as i64;
        Money::new(cents, self.currency)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Lowest and highest price of a product across its variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min_price: Money,
    pub max_price: Money,
}

impl PriceRange {
    pub fn new(min_price: Money, max_price: Money) -> Self {
        Self {
            min_price,
            max_price,
        }
    }

    /// Build a range covering all given prices. Returns None for no prices.
    pub fn from_prices(prices: impl IntoIterator<Item = Money>) -> Option<Self> {
        let mut iter = prices.into_iter();
        let first = iter.next()?;
        Some(iter.fold(Self::new(first, first), |range, price| Self {
            min_price: if price.amount_cents < range.min_price.amount_cents {
                price
            } else {
                range.min_price
            },
            max_price: if price.amount_cents > range.max_price.amount_cents {
                price
            } else {
                range.max_price
            },
        }))
    }

    /// Whether min and max are equal.
    pub fn is_single_price(&self) -> bool {
        self.min_price == self.max_price
    }
}

/// Exchange rates from the shop's base currency to local currencies.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExchangeRates {
    base: Currency,
    rates: HashMap<Currency, f64>,
}

impl ExchangeRates {
    pub fn new(base: Currency) -> Self {
        Self {
            base,
            rates: HashMap::new(),
        }
    }

    /// Register the rate of one base unit in `currency`.
    pub fn with_rate(mut self, currency: Currency, rate: f64) -> Self {
        self.rates.insert(currency, rate);
        self
    }

    pub fn base(&self) -> Currency {
        self.base
    }

    /// Convert a base-currency amount into `to`.
    ///
    /// Returns None when `to` is the base currency, the amount is not in the
    /// base currency, or no rate is known.
    pub fn convert(&self, money: &Money, to: Currency) -> Option<Money> {
        if to == self.base || money.currency != self.base {
            return None;
        }
        let rate = self.rates.get(&to)?;
        Some(Money::from_decimal(money.to_decimal() * rate, to))
    }

    /// Convert both ends of a price range.
    pub fn convert_range(&self, range: &PriceRange, to: Currency) -> Option<PriceRange> {
        Some(PriceRange::new(
            self.convert(&range.min_price, to)?,
            self.convert(&range.max_price, to)?,
        ))
    }
}
