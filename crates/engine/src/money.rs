use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ValidationError;

/// Largest magnitude (in tenths) accepted from user input.
const MAX_TENTHS: i64 = 1_000_000_000_000_000;

/// Signed money amount represented as **integer tenths** of a currency unit.
///
/// Every monetary value in the ledger (balances, split shares, totals) is an
/// `Amount`, so sums never drift and are always at tenths precision.
///
/// Conversion from floating point input goes through [`Amount::round_f64`],
/// which rounds half away from zero and rejects non-finite values.
///
/// # Examples
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!(Amount::round_f64(42.53).unwrap(), Amount::from_tenths(425));
/// assert_eq!(Amount::round_f64(-15.47).unwrap().to_string(), "-15.5");
/// assert!(Amount::round_f64(f64::NAN).is_err());
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator):
///
/// ```rust
/// use engine::Amount;
///
/// assert_eq!("10".parse::<Amount>().unwrap().tenths(), 100);
/// assert_eq!("10,25".parse::<Amount>().unwrap().tenths(), 103);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Amount = Amount(0);

    /// Accepted rounding noise when comparing sums entered at tenths precision.
    pub const TOLERANCE: Amount = Amount(1);

    /// Largest magnitude a stored amount or balance may reach.
    pub const MAX: Amount = Amount(MAX_TENTHS);

    #[must_use]
    pub const fn from_tenths(tenths: i64) -> Self {
        Self(tenths)
    }

    #[must_use]
    pub const fn tenths(self) -> i64 {
        self.0
    }

    /// Rounds a floating point value to the nearest tenth (ties away from zero).
    pub fn round_f64(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::InvalidAmount(format!(
                "{value} is not a finite number"
            )));
        }
        let scaled = (value * 10.0).round();
        if scaled.abs() > MAX_TENTHS as f64 {
            return Err(ValidationError::InvalidAmount(format!(
                "{value} is too large"
            )));
        }
        Ok(Self(scaled as i64))
    }

    #[must_use]
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / 10.0
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    #[must_use]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    #[must_use]
    pub const fn in_range(self) -> bool {
        self.0 >= -MAX_TENTHS && self.0 <= MAX_TENTHS
    }

    /// `self + rhs`, or `None` when the result leaves `[-MAX, MAX]`.
    #[must_use]
    pub fn checked_add(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_add(rhs.0).map(Amount).filter(|a| a.in_range())
    }

    /// `self - rhs`, or `None` when the result leaves `[-MAX, MAX]`.
    #[must_use]
    pub fn checked_sub(self, rhs: Amount) -> Option<Amount> {
        self.0.checked_sub(rhs.0).map(Amount).filter(|a| a.in_range())
    }

    /// Sum of `amounts`, or `None` as soon as a partial sum leaves `[-MAX, MAX]`.
    pub fn checked_sum<I: IntoIterator<Item = Amount>>(amounts: I) -> Option<Amount> {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Returns `true` when `self` and `other` differ by at most [`Amount::TOLERANCE`].
    #[must_use]
    pub fn within_tolerance(self, other: Amount) -> bool {
        self.0.abs_diff(other.0) <= Self::TOLERANCE.0.unsigned_abs()
    }

    /// Divides into `parts` shares, rounding each share to the nearest tenth
    /// (ties away from zero). Returns `None` when `parts` is 0.
    #[must_use]
    pub fn share(self, parts: u32) -> Option<Amount> {
        if parts == 0 {
            return None;
        }
        let divisor = i64::from(parts);
        let quotient = self.0 / divisor;
        let remainder = self.0 % divisor;
        if remainder.abs() * 2 >= divisor {
            Some(Amount(quotient + self.0.signum()))
        } else {
            Some(Amount(quotient))
        }
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{}", abs / 10, abs % 10)
    }
}

// Operators saturate at the `i64` bounds. Ledger mutations go through the
// checked variants so stored balances stay exact.
impl Add for Amount {
    type Output = Amount;

    fn add(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Amount {
    fn add_assign(&mut self, rhs: Amount) {
        *self = *self + rhs;
    }
}

impl Sub for Amount {
    type Output = Amount;

    fn sub(self, rhs: Amount) -> Self::Output {
        Amount(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Amount {
    fn sub_assign(&mut self, rhs: Amount) {
        *self = *self - rhs;
    }
}

impl Neg for Amount {
    type Output = Amount;

    fn neg(self) -> Self::Output {
        Amount(self.0.saturating_neg())
    }
}

impl Sum for Amount {
    fn sum<I: Iterator<Item = Amount>>(iter: I) -> Self {
        iter.fold(Amount::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Amount {
    type Err = ValidationError;

    /// Parses a decimal string and rounds it to tenths.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidAmount(format!("\"{s}\" is not a number"));

        let trimmed = s.trim();
        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.replace(',', ".");
        let (units_str, frac_str) = match rest.split_once('.') {
            Some((units, frac)) => (units, frac),
            None => (rest.as_str(), ""),
        };

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }
        if !frac_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| invalid())?;
        let mut digits = frac_str.bytes().map(|b| i64::from(b - b'0'));
        let tenth = digits.next().unwrap_or(0);
        let round_up = digits.next().is_some_and(|hundredth| hundredth >= 5);

        let magnitude = units
            .checked_mul(10)
            .and_then(|v| v.checked_add(tenth + i64::from(round_up)))
            .filter(|v| *v <= MAX_TENTHS)
            .ok_or_else(|| ValidationError::InvalidAmount(format!("\"{s}\" is too large")))?;

        Ok(Amount(if negative { -magnitude } else { magnitude }))
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_f64())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Amount::round_f64(value).map_err(serde::de::Error::custom)
    }
}
