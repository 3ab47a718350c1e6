//! Money type for representing monetary values.
//!
//! Uses integer minor units (kopecks, cents) to avoid floating-point
//! precision issues in totals. Prices enter and leave the system as decimal
//! numbers only at the edges: page attributes and the persisted cart.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Currency {
    #[default]
    RUB,
    USD,
    EUR,
}

impl Currency {
    /// Get the currency code (e.g., "RUB").
    pub fn code(&self) -> &'static str {
        match self {
            Currency::RUB => "RUB",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Get the currency symbol (e.g., "₽").
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::RUB => "\u{20bd}",
            Currency::USD => "$",
            Currency::EUR => "\u{20ac}",
        }
    }

    /// Get the number of decimal places for this currency.
    pub fn decimal_places(&self) -> u32 {
        2
    }

    /// Number of minor units in one major unit.
    pub fn minor_per_major(&self) -> i64 {
        10_i64.pow(self.decimal_places())
    }

    /// Parse a currency code string.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_uppercase().as_str() {
            "RUB" => Some(Currency::RUB),
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

/// A monetary value with currency.
///
/// Amounts are stored in the smallest unit of the currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct Money {
    /// Amount in smallest currency unit.
    pub amount_minor: i64,
    /// The currency.
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units.
    pub fn new(amount_minor: i64, currency: Currency) -> Self {
        Self {
            amount_minor,
            currency,
        }
    }

    /// Create a Money value from a decimal amount in major units.
    ///
    /// ```
    /// use airtech_commerce::money::{Money, Currency};
    /// let price = Money::from_decimal(1999.99, Currency::RUB);
    /// assert_eq!(price.amount_minor, 199999);
    /// ```
    pub fn from_decimal(amount: f64, currency: Currency) -> Self {
        let amount_minor = (amount * currency.minor_per_major() as f64).round() as i64;
        Self::new(amount_minor, currency)
    }

    /// Create a Money value from whole major units.
    pub fn from_major(amount: i64, currency: Currency) -> Self {
        Self::new(amount.saturating_mul(currency.minor_per_major()), currency)
    }

    /// Create a zero amount in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self::new(0, currency)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_minor == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.amount_minor < 0
    }

    /// Convert to a decimal value in major units.
    pub fn to_decimal(&self) -> f64 {
        self.amount_minor as f64 / self.currency.minor_per_major() as f64
    }

    /// Whole major units if the amount has no fractional part.
    pub fn whole_major(&self) -> Option<i64> {
        let unit = self.currency.minor_per_major();
        (self.amount_minor % unit == 0).then_some(self.amount_minor / unit)
    }

    /// Amount rounded to whole major units, half away from zero.
    pub fn rounded_major(&self) -> i64 {
        let unit = self.currency.minor_per_major();
        let whole = (self.amount_minor.unsigned_abs() + (unit as u64) / 2) / unit as u64;
        let whole = whole as i64;
        if self.amount_minor < 0 {
            -whole
        } else {
            whole
        }
    }

    /// Format the amount in whole units with space-grouped thousands
    /// (e.g., "45 990").
    pub fn display_amount(&self) -> String {
        let rounded = self.rounded_major();
        let grouped = group_thousands(rounded.unsigned_abs());
        if rounded < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    }

    /// Format as a display string (e.g., "45 990 ₽").
    pub fn display(&self) -> String {
        format!("{} {}", self.display_amount(), self.currency.symbol())
    }

    /// Try to add another Money value.
    ///
    /// Returns `None` if currencies differ or the sum overflows.
    pub fn try_add(&self, other: &Money) -> Option<Money> {
        if self.currency != other.currency {
            return None;
        }
        self.amount_minor
            .checked_add(other.amount_minor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Try to multiply by a scalar, returning `None` on overflow.
    pub fn try_multiply(&self, factor: i64) -> Option<Money> {
        self.amount_minor
            .checked_mul(factor)
            .map(|amount| Money::new(amount, self.currency))
    }

    /// Multiply by a scalar, clamping at the numeric bounds.
    pub fn saturating_multiply(&self, factor: i64) -> Money {
        Money::new(self.amount_minor.saturating_mul(factor), self.currency)
    }

    /// Add amounts of the same currency, clamping at the numeric bounds.
    ///
    /// Amounts in a different currency are ignored.
    pub fn saturating_add(&self, other: &Money) -> Money {
        if self.currency != other.currency {
            return *self;
        }
        Money::new(
            self.amount_minor.saturating_add(other.amount_minor),
            self.currency,
        )
    }

    /// Sum an iterator of Money values.
    ///
    /// Returns `None` on currency mismatch or overflow.
    pub fn try_sum<'a>(iter: impl Iterator<Item = &'a Money>, currency: Currency) -> Option<Money> {
        iter.fold(Some(Money::zero(currency)), |acc, m| acc?.try_add(m))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_from_decimal() {
        let m = Money::from_decimal(49.99, Currency::RUB);
        assert_eq!(m.amount_minor, 4999);

        let m = Money::from_decimal(100.0, Currency::USD);
        assert_eq!(m.amount_minor, 10000);
    }

    #[test]
    fn test_money_to_decimal() {
        let m = Money::new(4999, Currency::RUB);
        assert!((m.to_decimal() - 49.99).abs() < 0.001);
    }

    #[test]
    fn test_whole_major() {
        assert_eq!(Money::new(250000, Currency::RUB).whole_major(), Some(2500));
        assert_eq!(Money::new(250050, Currency::RUB).whole_major(), None);
    }

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Money::from_major(0, Currency::RUB).display(), "0 \u{20bd}");
        assert_eq!(Money::from_major(999, Currency::RUB).display(), "999 \u{20bd}");
        assert_eq!(Money::from_major(1000, Currency::RUB).display(), "1 000 \u{20bd}");
        assert_eq!(
            Money::from_major(1234567, Currency::RUB).display(),
            "1 234 567 \u{20bd}"
        );
    }

    #[test]
    fn test_display_rounds_to_whole_units() {
        assert_eq!(Money::new(99950, Currency::RUB).display_amount(), "1 000");
        assert_eq!(Money::new(99949, Currency::RUB).display_amount(), "999");
        assert_eq!(Money::new(-150, Currency::RUB).display_amount(), "-2");
    }

    #[test]
    fn test_try_add_currency_mismatch() {
        let rub = Money::new(1000, Currency::RUB);
        let usd = Money::new(1000, Currency::USD);
        assert!(rub.try_add(&usd).is_none());
        assert_eq!(rub.try_add(&rub).map(|m| m.amount_minor), Some(2000));
    }

    #[test]
    fn test_try_multiply_overflow() {
        let m = Money::new(i64::MAX / 2 + 1, Currency::RUB);
        assert!(m.try_multiply(2).is_none());
        assert_eq!(m.saturating_multiply(2).amount_minor, i64::MAX);
    }

    #[test]
    fn test_try_sum() {
        let amounts = [Money::new(100, Currency::RUB), Money::new(250, Currency::RUB)];
        let total = Money::try_sum(amounts.iter(), Currency::RUB).unwrap();
        assert_eq!(total.amount_minor, 350);

        let mixed = [Money::new(100, Currency::RUB), Money::new(250, Currency::EUR)];
        assert!(Money::try_sum(mixed.iter(), Currency::RUB).is_none());
    }

    #[test]
    fn test_currency_from_code() {
        assert_eq!(Currency::from_code("RUB"), Some(Currency::RUB));
        assert_eq!(Currency::from_code("eur"), Some(Currency::EUR));
        assert_eq!(Currency::from_code("JPY"), None);
    }
}
