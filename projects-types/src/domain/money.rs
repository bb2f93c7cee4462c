//! Type-safe monetary value with embedded currency.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use utoipa::ToSchema;

use super::currency::Currency;
use crate::error::DomainError;

/// Type-safe money representation with embedded currency.
///
/// Amount is stored in the smallest unit of the currency (cents, paise, etc.)
/// to avoid floating-point precision issues. Values are immutable: every
/// operation returns a new `Money`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct Money {
    /// Amount in minor units
    #[schema(example = 5000)]
    amount: i64,
    /// ISO 4217 currency code
    #[schema(value_type = String, example = "USD")]
    currency: Currency,
}

fn clamp(value: i128) -> i64 {
    value.clamp(i64::MIN as i128, i64::MAX as i128) as i64
}

impl Money {
    /// Creates a new Money value.
    pub fn new(amount: i64, currency: impl Into<Currency>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }

    /// Creates a zero-value Money for the given currency.
    pub fn zero(currency: impl Into<Currency>) -> Self {
        Self::new(0, currency)
    }

    /// Returns the amount in smallest currency unit.
    pub fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    fn ensure_same_currency(&self, other: &Money) -> Result<(), DomainError> {
        if !self.same_currency(other) {
            return Err(DomainError::CurrencyMismatch {
                expected: self.currency.clone(),
                got: other.currency.clone(),
            });
        }
        Ok(())
    }

    fn with_amount(&self, amount: i64) -> Money {
        Money {
            amount,
            currency: self.currency.clone(),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Comparison
    // ─────────────────────────────────────────────────────────────────────────────

    /// Orders two amounts of the same currency.
    pub fn compare(&self, other: &Money) -> Result<Ordering, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.amount.cmp(&other.amount))
    }

    pub fn equals(&self, other: &Money) -> Result<bool, DomainError> {
        Ok(self.compare(other)?.is_eq())
    }

    pub fn greater_than(&self, other: &Money) -> Result<bool, DomainError> {
        Ok(self.compare(other)?.is_gt())
    }

    pub fn greater_than_or_equal(&self, other: &Money) -> Result<bool, DomainError> {
        Ok(self.compare(other)?.is_ge())
    }

    pub fn less_than(&self, other: &Money) -> Result<bool, DomainError> {
        Ok(self.compare(other)?.is_lt())
    }

    pub fn less_than_or_equal(&self, other: &Money) -> Result<bool, DomainError> {
        Ok(self.compare(other)?.is_le())
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    pub fn is_positive(&self) -> bool {
        self.amount > 0
    }

    pub fn is_negative(&self) -> bool {
        self.amount < 0
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Arithmetic
    // ─────────────────────────────────────────────────────────────────────────────

    /// Checked addition - returns error if currencies don't match.
    pub fn checked_add(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.with_amount(self.amount.saturating_add(other.amount)))
    }

    /// Checked subtraction - returns error if currencies don't match.
    /// The result may be negative.
    pub fn checked_sub(&self, other: &Money) -> Result<Money, DomainError> {
        self.ensure_same_currency(other)?;
        Ok(self.with_amount(self.amount.saturating_sub(other.amount)))
    }

    pub fn multiply(&self, factor: i64) -> Money {
        self.with_amount(self.amount.saturating_mul(factor))
    }

    /// Rounds to a whole major unit. Exact halves round toward zero.
    pub fn round(&self) -> Money {
        let unit = 10_i128.pow(self.currency.fraction_digits());
        let abs = (self.amount as i128).abs();
        let remainder = abs % unit;
        let mut rounded = abs - remainder;
        if remainder > unit / 2 {
            rounded += unit;
        }
        let signed = if self.amount < 0 { -rounded } else { rounded };
        self.with_amount(clamp(signed))
    }

    pub fn absolute(&self) -> Money {
        self.with_amount(self.amount.saturating_abs())
    }

    /// Returns `-|amount|`.
    pub fn negative(&self) -> Money {
        self.with_amount(clamp(-(self.amount as i128).abs()))
    }

    /// Splits into `n` parts that differ by at most one minor unit.
    ///
    /// Leftover units go round-robin to the first parts, so earlier parts
    /// may receive one unit more than later ones.
    pub fn split(&self, n: usize) -> Result<Vec<Money>, DomainError> {
        if n == 0 {
            return Err(DomainError::InvalidRatio(
                "split must be higher than zero".into(),
            ));
        }
        let parts = i64::try_from(n)
            .map_err(|_| DomainError::InvalidRatio(format!("split count {} is too large", n)))?;

        let base = self.amount / parts;
        let leftover = (self.amount % parts).unsigned_abs();
        let unit = self.amount.signum();

        Ok((0..n)
            .map(|i| {
                let extra = if (i as u64) < leftover { unit } else { 0 };
                self.with_amount(base + extra)
            })
            .collect())
    }

    /// Splits proportionally to `ratios` without losing minor units.
    ///
    /// Leftover units go round-robin to the parts with a non-zero ratio,
    /// in order.
    pub fn allocate(&self, ratios: &[i64]) -> Result<Vec<Money>, DomainError> {
        if ratios.is_empty() {
            return Err(DomainError::InvalidRatio("no ratios specified".into()));
        }
        if ratios.iter().any(|&r| r < 0) {
            return Err(DomainError::InvalidRatio(
                "negative ratios not allowed".into(),
            ));
        }
        let sum: i128 = ratios.iter().map(|&r| r as i128).sum();
        if sum == 0 {
            return Err(DomainError::InvalidRatio(
                "sum of given ratios should be greater than zero".into(),
            ));
        }

        let total = self.amount as i128;
        let mut parts: Vec<i128> = ratios.iter().map(|&r| total * r as i128 / sum).collect();

        let mut leftover = total - parts.iter().sum::<i128>();
        let unit = leftover.signum();
        for (part, &ratio) in parts.iter_mut().zip(ratios) {
            if leftover == 0 {
                break;
            }
            if ratio == 0 {
                continue;
            }
            *part += unit;
            leftover -= unit;
        }

        Ok(parts
            .into_iter()
            .map(|part| self.with_amount(part as i64))
            .collect())
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Presentation
    // ─────────────────────────────────────────────────────────────────────────────

    /// Formats the amount with the currency's symbol and separators.
    pub fn display(&self) -> String {
        self.to_string()
    }

    /// Amount in major units. For display only, never for computation.
    pub fn as_major_units(&self) -> f64 {
        self.amount as f64 / 10_f64.powi(self.currency.fraction_digits() as i32)
    }
}

fn group_thousands(digits: &str, separator: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 * separator.len());
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push_str(separator);
        }
        grouped.push(ch);
    }
    grouped
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.currency.info();
        let fraction = info.fraction as usize;

        let mut digits = self.amount.unsigned_abs().to_string();
        if digits.len() <= fraction {
            digits = "0".repeat(fraction - digits.len() + 1) + &digits;
        }
        let (major, minor) = digits.split_at(digits.len() - fraction);

        let mut number = group_thousands(major, info.thousand);
        if fraction > 0 {
            number.push_str(info.decimal);
            number.push_str(minor);
        }

        let rendered = info
            .template
            .replacen('1', &number, 1)
            .replacen('$', self.currency.symbol(), 1);

        if self.amount < 0 {
            write!(f, "-{}", rendered)
        } else {
            f.write_str(&rendered)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usd(amount: i64) -> Money {
        Money::new(amount, "USD")
    }

    fn sum(parts: &[Money]) -> i64 {
        parts.iter().map(Money::amount).sum()
    }

    #[test]
    fn test_money_creation() {
        let money = usd(1000);
        assert_eq!(money.amount(), 1000);
        assert_eq!(money.currency(), &Currency::new("USD"));
    }

    #[test]
    fn test_money_addition() {
        let sum = usd(100).checked_add(&usd(50)).unwrap();
        assert_eq!(sum.amount(), 150);
    }

    #[test]
    fn test_subtraction_can_go_negative() {
        let diff = usd(50).checked_sub(&usd(100)).unwrap();
        assert_eq!(diff.amount(), -50);
        assert!(diff.is_negative());
    }

    #[test]
    fn test_add_then_subtract_is_identity() {
        for (a, b) in [(0, 0), (1, 99), (-500, 250), (123_456, -7), (i64::MAX / 2, 17)] {
            let a = usd(a);
            let b = usd(b);
            let back = a.checked_add(&b).unwrap().checked_sub(&b).unwrap();
            assert!(back.equals(&a).unwrap());
        }
    }

    #[test]
    fn test_currency_mismatch() {
        let usd = usd(100);
        let eur = Money::new(50, "EUR");

        assert!(matches!(
            usd.checked_add(&eur),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            usd.checked_sub(&eur),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            usd.equals(&eur),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            usd.greater_than(&eur),
            Err(DomainError::CurrencyMismatch { .. })
        ));
        assert!(matches!(
            usd.less_than_or_equal(&eur),
            Err(DomainError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_comparisons() {
        let small = usd(100);
        let big = usd(200);
        assert!(big.greater_than(&small).unwrap());
        assert!(big.greater_than_or_equal(&big).unwrap());
        assert!(small.less_than(&big).unwrap());
        assert!(small.less_than_or_equal(&small).unwrap());
        assert!(!small.equals(&big).unwrap());
    }

    #[test]
    fn test_operations_do_not_mutate() {
        let original = usd(-250);
        let _ = original.multiply(3);
        let _ = original.absolute();
        let _ = original.round();
        let _ = original.checked_add(&usd(1)).unwrap();
        assert_eq!(original.amount(), -250);
    }

    #[test]
    fn test_multiply() {
        assert_eq!(usd(250).multiply(3).amount(), 750);
        assert_eq!(usd(250).multiply(-2).amount(), -500);
        assert_eq!(usd(i64::MAX).multiply(2).amount(), i64::MAX);
    }

    #[test]
    fn test_absolute_and_negative() {
        assert_eq!(usd(-300).absolute().amount(), 300);
        assert_eq!(usd(300).negative().amount(), -300);
        assert_eq!(usd(-300).negative().amount(), -300);
        assert_eq!(usd(0).negative().amount(), 0);
    }

    #[test]
    fn test_round() {
        assert_eq!(usd(12345).round().amount(), 12300);
        assert_eq!(usd(12350).round().amount(), 12300);
        assert_eq!(usd(12351).round().amount(), 12400);
        assert_eq!(usd(-12351).round().amount(), -12400);
        assert_eq!(usd(0).round().amount(), 0);
        assert_eq!(Money::new(12345, "JPY").round().amount(), 12345);
        assert_eq!(Money::new(1501, "BHD").round().amount(), 2000);
    }

    #[test]
    fn test_split_distributes_leftover_to_first_parts() {
        let parts = usd(100).split(3).unwrap();
        let amounts: Vec<i64> = parts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![34, 33, 33]);

        let parts = usd(-101).split(3).unwrap();
        let amounts: Vec<i64> = parts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![-34, -34, -33]);
    }

    #[test]
    fn test_split_sums_to_original() {
        for amount in [0, 1, 7, 99, 100, 1001, -1, -999, 123_456_789] {
            for n in 1..=12 {
                let parts = usd(amount).split(n).unwrap();
                assert_eq!(parts.len(), n);
                assert_eq!(sum(&parts), amount, "amount {} split {}", amount, n);

                let max = parts.iter().map(Money::amount).max().unwrap();
                let min = parts.iter().map(Money::amount).min().unwrap();
                assert!(max - min <= 1);
            }
        }
    }

    #[test]
    fn test_split_zero_fails() {
        assert!(matches!(usd(100).split(0), Err(DomainError::InvalidRatio(_))));
    }

    #[test]
    fn test_allocate() {
        let parts = usd(100).allocate(&[1, 1, 1]).unwrap();
        let amounts: Vec<i64> = parts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![34, 33, 33]);

        let parts = usd(5).allocate(&[50, 50]).unwrap();
        let amounts: Vec<i64> = parts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![3, 2]);

        let parts = usd(100).allocate(&[0, 1, 2]).unwrap();
        let amounts: Vec<i64> = parts.iter().map(Money::amount).collect();
        assert_eq!(amounts, vec![0, 34, 66]);
    }

    #[test]
    fn test_allocate_sums_to_original() {
        let ratio_sets: [&[i64]; 5] = [&[1], &[1, 2, 3], &[33, 33, 33], &[7, 0, 13], &[i64::MAX, 1]];
        for amount in [0, 1, 10, 999, -1000, 1_000_001, i64::MAX] {
            for ratios in ratio_sets {
                let parts = usd(amount).allocate(ratios).unwrap();
                assert_eq!(parts.len(), ratios.len());
                assert_eq!(
                    parts.iter().map(|p| p.amount() as i128).sum::<i128>(),
                    amount as i128
                );
            }
        }
    }

    #[test]
    fn test_allocate_invalid_ratios() {
        assert!(matches!(usd(100).allocate(&[]), Err(DomainError::InvalidRatio(_))));
        assert!(matches!(
            usd(100).allocate(&[0, 0]),
            Err(DomainError::InvalidRatio(_))
        ));
        assert!(matches!(
            usd(100).allocate(&[2, -1]),
            Err(DomainError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_sign_predicates() {
        assert!(usd(0).is_zero());
        assert!(usd(1).is_positive());
        assert!(usd(-1).is_negative());
        assert!(!usd(0).is_positive());
    }

    #[test]
    fn test_money_display() {
        assert_eq!(usd(5000).display(), "$50.00");
        assert_eq!(usd(1050).to_string(), "$10.50");
        assert_eq!(usd(5).to_string(), "$0.05");
        assert_eq!(usd(-123456).to_string(), "-$1,234.56");
        assert_eq!(usd(123456789).to_string(), "$1,234,567.89");
        assert_eq!(Money::new(1000, "JPY").to_string(), "\u{a5}1,000");
        assert_eq!(Money::new(123456, "BRL").to_string(), "R$1.234,56");
        assert_eq!(Money::new(123456, "SEK").to_string(), "1 234,56 kr");
        assert_eq!(Money::new(1500, "XYZ").to_string(), "15.00 XYZ");
    }

    #[test]
    fn test_as_major_units() {
        assert_eq!(usd(5000).as_major_units(), 50.0);
        assert_eq!(Money::new(1000, "JPY").as_major_units(), 1000.0);
        assert_eq!(Money::new(1500, "BHD").as_major_units(), 1.5);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(usd(5000)).unwrap();
        assert_eq!(json, serde_json::json!({"amount": 5000, "currency": "USD"}));

        let parsed: Money = serde_json::from_str(r#"{"amount": 10, "currency": "eur"}"#).unwrap();
        assert_eq!(parsed, Money::new(10, "EUR"));
    }
}
