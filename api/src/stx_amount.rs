//! Provides a safe, self-contained type for representing STX amounts.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;
use std::ops::AddAssign;

use num_traits::CheckedAdd;
use num_traits::CheckedSub;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Number of micro-units in one STX.
pub const MICRO_PER_STX: u128 = 1_000_000;

/// Number of decimal places of the micro-unit denomination.
pub const STX_DECIMALS: usize = 6;

/// An error that can occur when parsing user input into a `MicroStx`.
///
/// The display strings are the ones shown inline under form fields.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AmountError {
    /// The input is empty or whitespace.
    #[error("Amount is required")]
    Required,
    /// The string is not in a valid numeric format (e.g., "abc", "1.2.3").
    #[error("Amount must be a number")]
    NotANumber,
    /// The value is zero or negative.
    #[error("Amount must be greater than 0")]
    NotPositive,
    /// More fraction digits than the micro-unit denomination supports.
    #[error("Amount supports at most 6 decimal places")]
    TooManyDecimals,
    /// The value does not fit in the micro-unit representation.
    #[error("Amount is too large")]
    TooLarge,
    /// A token amount has a fraction part.
    #[error("Token amounts must be whole numbers")]
    NotWholeTokens,
}

/// An STX amount.
///
/// Internally the amount is stored as an unsigned 128-bit count of micro-units
/// (1 STX = 1,000,000 micro-units) so that display and arithmetic never go
/// through floating point, no matter how large the balance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MicroStx(u128);

impl MicroStx {
    pub const ZERO: MicroStx = MicroStx(0);

    // --- Constructors ---

    /// Creates an amount directly from micro-units.
    pub const fn from_micro(micro: u128) -> Self {
        Self(micro)
    }

    /// Creates an amount from whole STX.
    pub const fn from_stx(stx: u64) -> Self {
        Self(stx as u128 * MICRO_PER_STX)
    }

    /// Parses a micro-unit string as returned by wallet providers and explorer
    /// APIs (e.g. `"1234567"`).
    pub fn from_micro_str(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Required);
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AmountError::NotANumber);
        }
        s.parse::<u128>()
            .map(Self)
            .map_err(|_| AmountError::TooLarge)
    }

    /// Parses and validates an amount typed by the user, in STX.
    ///
    /// Accepts plain decimal notation (`"12.5"`, `".5"`, `"5."`). The value must
    /// be strictly positive and have at most six fraction digits.
    ///
    /// # Examples
    /// ```
    /// use api::stx_amount::{AmountError, MicroStx};
    ///
    /// assert_eq!(MicroStx::from_str_input("12.5"), Ok(MicroStx::from_micro(12_500_000)));
    /// assert_eq!(MicroStx::from_str_input("-5"), Err(AmountError::NotPositive));
    /// ```
    pub fn from_str_input(s: &str) -> Result<Self, AmountError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Required);
        }

        let (is_negative, unsigned) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s.strip_prefix('+').unwrap_or(s)),
        };

        let micro = Self::parse_unsigned(unsigned)?;
        if is_negative || micro == 0 {
            return Err(AmountError::NotPositive);
        }
        Ok(Self(micro))
    }

    /// Parses a token amount typed by the user. Tokens are indivisible, so
    /// on top of [`Self::from_str_input`] the value must be whole and fit in
    /// a `u64` balance.
    pub fn from_token_input(s: &str) -> Result<Self, AmountError> {
        let amount = Self::from_str_input(s)?;
        if amount.fraction_micro() != 0 {
            return Err(AmountError::NotWholeTokens);
        }
        if amount.whole_tokens().is_none() {
            return Err(AmountError::TooLarge);
        }
        Ok(amount)
    }

    fn parse_unsigned(s: &str) -> Result<u128, AmountError> {
        let mut parts = s.split('.');
        let major_str = parts.next().unwrap_or("");
        let minor_str = parts.next().unwrap_or("");

        if parts.next().is_some() || (major_str.is_empty() && minor_str.is_empty()) {
            return Err(AmountError::NotANumber);
        }
        let is_digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
        if !is_digits(major_str) || !is_digits(minor_str) {
            return Err(AmountError::NotANumber);
        }
        if minor_str.len() > STX_DECIMALS {
            return Err(AmountError::TooManyDecimals);
        }

        let major_units = if major_str.is_empty() {
            0
        } else {
            major_str
                .parse::<u128>()
                .map_err(|_| AmountError::TooLarge)?
        };
        let minor_units = if minor_str.is_empty() {
            0
        } else {
            // at most six digits, cannot overflow
            minor_str
                .parse::<u128>()
                .map_err(|_| AmountError::NotANumber)?
        };

        let scaling_factor = 10_u128.pow((STX_DECIMALS - minor_str.len()) as u32);
        major_units
            .checked_mul(MICRO_PER_STX)
            .and_then(|m| m.checked_add(minor_units * scaling_factor))
            .ok_or(AmountError::TooLarge)
    }

    // --- Getters ---

    /// Returns the raw amount in micro-units.
    pub fn as_micro(&self) -> u128 {
        self.0
    }

    /// Returns the whole-STX part of the amount.
    pub fn whole_stx(&self) -> u128 {
        self.0 / MICRO_PER_STX
    }

    /// Returns the fractional part of the amount in micro-units.
    pub fn fraction_micro(&self) -> u128 {
        self.0 % MICRO_PER_STX
    }

    /// The amount as a whole token count, or `None` when it has a fraction
    /// part or exceeds `u64`.
    pub fn whole_tokens(&self) -> Option<u64> {
        if self.fraction_micro() != 0 {
            return None;
        }
        u64::try_from(self.whole_stx()).ok()
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    // --- Display Methods ---

    /// Formats the amount with at most `max_decimals` fraction digits.
    ///
    /// Extra digits are truncated rather than rounded so that a displayed
    /// balance never exceeds the real one. Trailing zeros are trimmed.
    pub fn to_string_truncated(&self, max_decimals: usize) -> String {
        let max_decimals = max_decimals.min(STX_DECIMALS);
        let fraction = format!("{:0width$}", self.fraction_micro(), width = STX_DECIMALS);
        let fraction = fraction[..max_decimals].trim_end_matches('0');

        if fraction.is_empty() {
            self.whole_stx().to_string()
        } else {
            format!("{}.{}", self.whole_stx(), fraction)
        }
    }

    /// Formats the amount with exactly `decimals` fraction digits (truncating).
    pub fn to_string_fixed(&self, decimals: usize) -> String {
        let decimals = decimals.min(STX_DECIMALS);
        if decimals == 0 {
            return self.whole_stx().to_string();
        }
        let fraction = format!("{:0width$}", self.fraction_micro(), width = STX_DECIMALS);
        format!("{}.{}", self.whole_stx(), &fraction[..decimals])
    }

    /// Formats the amount with its ticker (e.g., "1.5 STX").
    pub fn to_string_with_code(&self) -> String {
        format!("{} STX", self)
    }
}

/// Formats the amount as an exact decimal string with trailing zeros trimmed
/// (e.g., `1234567` micro-units display as `"1.234567"`, `5000000` as `"5"`).
impl fmt::Display for MicroStx {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_truncated(STX_DECIMALS))
    }
}

/// Implements the addition operator. Panics on overflow, like integer addition.
impl Add for MicroStx {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for MicroStx {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl CheckedAdd for MicroStx {
    fn checked_add(&self, v: &Self) -> Option<Self> {
        self.0.checked_add(v.0).map(Self)
    }
}

impl CheckedSub for MicroStx {
    fn checked_sub(&self, v: &Self) -> Option<Self> {
        self.0.checked_sub(v.0).map(Self)
    }
}

impl std::ops::Sub for MicroStx {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl Sum for MicroStx {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, |acc, x| acc + x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn micro_display_is_exact() {
        assert_eq!(MicroStx::from_micro(1_234_567).to_string(), "1.234567");
        assert_eq!(MicroStx::from_micro(5_000_000).to_string(), "5");
        assert_eq!(MicroStx::from_micro(3_500_000).to_string(), "3.5");
        assert_eq!(MicroStx::from_micro(1).to_string(), "0.000001");
        assert_eq!(MicroStx::ZERO.to_string(), "0");
    }

    #[test]
    fn display_above_f64_precision() {
        // 2^53 + 1 micro-units cannot be represented exactly as an f64.
        let micro = (1u128 << 53) + 1;
        let amount = MicroStx::from_micro(micro);
        assert_eq!(amount.to_string(), "9007199254.740993");

        let huge = MicroStx::from_micro_str("123456789012345678901234567").unwrap();
        assert_eq!(huge.to_string(), "123456789012345678901.234567");
    }

    #[test]
    fn parses_micro_strings() {
        assert_eq!(MicroStx::from_micro_str("1234567"), Ok(MicroStx::from_micro(1_234_567)));
        assert_eq!(MicroStx::from_micro_str(" 0 "), Ok(MicroStx::ZERO));
        assert_eq!(MicroStx::from_micro_str(""), Err(AmountError::Required));
        assert_eq!(MicroStx::from_micro_str("12.5"), Err(AmountError::NotANumber));
        assert_eq!(MicroStx::from_micro_str("-1"), Err(AmountError::NotANumber));
    }

    #[test]
    fn input_validation() {
        assert_eq!(MicroStx::from_str_input("12.5"), Ok(MicroStx::from_micro(12_500_000)));
        assert_eq!(MicroStx::from_str_input(".5"), Ok(MicroStx::from_micro(500_000)));
        assert_eq!(MicroStx::from_str_input("5."), Ok(MicroStx::from_stx(5)));
        assert_eq!(MicroStx::from_str_input(" 7 "), Ok(MicroStx::from_stx(7)));

        assert_eq!(MicroStx::from_str_input("-5"), Err(AmountError::NotPositive));
        assert_eq!(MicroStx::from_str_input("0"), Err(AmountError::NotPositive));
        assert_eq!(MicroStx::from_str_input("0.000"), Err(AmountError::NotPositive));
        assert_eq!(MicroStx::from_str_input(""), Err(AmountError::Required));
        assert_eq!(MicroStx::from_str_input("   "), Err(AmountError::Required));
        assert_eq!(MicroStx::from_str_input("abc"), Err(AmountError::NotANumber));
        assert_eq!(MicroStx::from_str_input("1.2.3"), Err(AmountError::NotANumber));
        assert_eq!(MicroStx::from_str_input("."), Err(AmountError::NotANumber));
        assert_eq!(MicroStx::from_str_input("-abc"), Err(AmountError::NotANumber));
        assert_eq!(MicroStx::from_str_input("1.1234567"), Err(AmountError::TooManyDecimals));
    }

    #[test]
    fn token_input_must_be_whole() {
        assert_eq!(MicroStx::from_token_input("12"), Ok(MicroStx::from_stx(12)));
        assert_eq!(MicroStx::from_token_input("12.000"), Ok(MicroStx::from_stx(12)));
        assert_eq!(MicroStx::from_token_input("12.5"), Err(AmountError::NotWholeTokens));
        assert_eq!(MicroStx::from_token_input("0.5"), Err(AmountError::NotWholeTokens));
        assert_eq!(MicroStx::from_token_input("0"), Err(AmountError::NotPositive));
        assert_eq!(
            MicroStx::from_token_input("18446744073709551615"),
            Ok(MicroStx::from_stx(u64::MAX))
        );
        assert_eq!(
            MicroStx::from_token_input("18446744073709551616"),
            Err(AmountError::TooLarge)
        );
        assert_eq!(MicroStx::from_micro(1_500_000).whole_tokens(), None);
        assert_eq!(MicroStx::from_stx(7).whole_tokens(), Some(7));
    }

    #[test]
    fn truncated_display_never_rounds_up() {
        let amount = MicroStx::from_micro(45_832_999);
        assert_eq!(amount.to_string_truncated(4), "45.8329");
        assert_eq!(amount.to_string_truncated(0), "45");
        assert_eq!(MicroStx::from_micro(1_000_050).to_string_truncated(4), "1");
        assert_eq!(MicroStx::from_micro(45_832_000).to_string_fixed(6), "45.832000");
        assert_eq!(MicroStx::from_micro(45_832_000).to_string_fixed(2), "45.83");
    }

    #[test]
    fn arithmetic() {
        let a = MicroStx::from_micro(45_832_000);
        let b = MicroStx::from_micro(234_560_000);
        assert_eq!((a + b).to_string(), "280.392");
        assert_eq!(b.checked_sub(&a), Some(MicroStx::from_micro(188_728_000)));
        assert_eq!(a.checked_sub(&b), None);
        let total: MicroStx = [a, b, MicroStx::from_stx(1)].into_iter().sum();
        assert_eq!(total.to_string_with_code(), "281.392 STX");
    }
}
