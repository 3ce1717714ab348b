use crate::error::{MeasureError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};
use std::str::FromStr;

/// Rational position or duration, measured in bars
///
/// As a duration a `Measure` is a fraction of one bar; as a position it is the
/// offset from the start of the bar. Values are always kept in lowest terms
/// with a positive denominator, so the derived equality and hash agree with
/// numeric equality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Measure {
    pub numerator: i64,
    pub denominator: i64,
}

impl Measure {
    /// The start of a bar / an empty duration
    pub const ZERO: Measure = Measure {
        numerator: 0,
        denominator: 1,
    };

    /// One full bar
    pub const BAR: Measure = Measure {
        numerator: 1,
        denominator: 1,
    };

    /// Create a new measure and simplify it
    ///
    /// # Panics
    ///
    /// Panics if `denominator` is zero or the reduced value does not fit in
    /// `i64`. Use [`Measure::try_new`] for input that has not been validated.
    pub fn new(numerator: i64, denominator: i64) -> Self {
        match Self::try_new(numerator, denominator) {
            Some(m) => m,
            None => panic!("Invalid measure {}/{}", numerator, denominator),
        }
    }

    /// Create a new measure, returning `None` for a zero denominator
    pub fn try_new(numerator: i64, denominator: i64) -> Option<Self> {
        Self::reduce(numerator as i128, denominator as i128)
    }

    /// Bring a wide fraction to lowest terms, if it fits back into `i64`
    fn reduce(numerator: i128, denominator: i128) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let gcd = gcd(numerator.unsigned_abs(), denominator.unsigned_abs()).max(1) as i128;
        let sign = if denominator < 0 { -1 } else { 1 };
        Some(Measure {
            numerator: i64::try_from(sign * numerator / gcd).ok()?,
            denominator: i64::try_from(sign * denominator / gcd).ok()?,
        })
    }

    /// Create a measure spanning a whole number of bars
    pub fn from_int(n: i64) -> Self {
        Measure {
            numerator: n,
            denominator: 1,
        }
    }

    /// Create a measure from a float, to a millionth of a bar
    ///
    /// Returns `None` for NaN, infinities and values too large to represent.
    pub fn from_f64(f: f64) -> Option<Self> {
        let scaled = (f * 1_000_000.0).round();
        if !scaled.is_finite() || scaled.abs() >= i64::MAX as f64 {
            return None;
        }
        Self::try_new(scaled as i64, 1_000_000)
    }

    /// Convert to float
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// Parse a measure literal such as `"3/4"` or `"1/2 + 1/16"`
    pub fn parse(text: &str) -> Result<Self> {
        crate::parser::parse(text)
    }

    /// Get the reciprocal
    pub fn reciprocal(self) -> Self {
        Measure::new(self.denominator, self.numerator)
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    pub fn is_negative(&self) -> bool {
        self.numerator < 0
    }

    /// `self + other`, or `None` if the result does not fit
    pub fn checked_add(self, other: Measure) -> Option<Measure> {
        let (a, b) = (self.wide(), other.wide());
        Self::reduce(a.0 * b.1 + b.0 * a.1, a.1 * b.1)
    }

    pub fn checked_sub(self, other: Measure) -> Option<Measure> {
        self.checked_add(other.checked_neg()?)
    }

    pub fn checked_neg(self) -> Option<Measure> {
        Some(Measure {
            numerator: self.numerator.checked_neg()?,
            denominator: self.denominator,
        })
    }

    pub fn checked_mul(self, other: Measure) -> Option<Measure> {
        let (a, b) = (self.wide(), other.wide());
        Self::reduce(a.0 * b.0, a.1 * b.1)
    }

    /// `self / other`, or `None` on division by zero or overflow
    pub fn checked_div(self, other: Measure) -> Option<Measure> {
        let (a, b) = (self.wide(), other.wide());
        Self::reduce(a.0 * b.1, a.1 * b.0)
    }

    fn wide(self) -> (i128, i128) {
        (self.numerator as i128, self.denominator as i128)
    }

    /// Split this measure into one sub-measure per relation
    ///
    /// Each result is `self * r / sum(relations)`, so the parts add up to
    /// `self`. With a base of one bar, `scale(&[2.0, 1.0, 1.0])` yields
    /// `1/2, 1/4, 1/4`.
    pub fn scale(&self, relations: &[f64]) -> Result<Vec<Measure>> {
        if relations.is_empty() {
            return Err(MeasureError::invalid_relations("no relations given"));
        }
        if let Some(bad) = relations.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(MeasureError::invalid_relations(format!(
                "relation {} is not a non-negative number",
                bad
            )));
        }

        let too_large = || MeasureError::invalid_relations("relations too large");
        let parts = relations
            .iter()
            .map(|r| Measure::from_f64(*r).ok_or_else(too_large))
            .collect::<Result<Vec<_>>>()?;
        let sum = parts
            .iter()
            .try_fold(Measure::ZERO, |acc, p| acc.checked_add(*p))
            .ok_or_else(too_large)?;
        if sum.is_zero() {
            return Err(MeasureError::invalid_relations("relations sum to zero"));
        }

        parts
            .into_iter()
            .map(|p| {
                self.checked_mul(p)
                    .and_then(|m| m.checked_div(sum))
                    .ok_or_else(too_large)
            })
            .collect()
    }
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let temp = b;
        b = a % b;
        a = temp;
    }
    a
}

fn overflow(op: &str) -> ! {
    panic!("Measure overflow in {}", op)
}

impl Default for Measure {
    fn default() -> Self {
        Measure::ZERO
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.denominator == 1 {
            write!(f, "{}", self.numerator)
        } else {
            write!(f, "{}/{}", self.numerator, self.denominator)
        }
    }
}

impl FromStr for Measure {
    type Err = MeasureError;

    fn from_str(s: &str) -> Result<Self> {
        Measure::parse(s)
    }
}

impl From<i64> for Measure {
    fn from(n: i64) -> Self {
        Measure::from_int(n)
    }
}

impl From<(i64, i64)> for Measure {
    fn from((num, den): (i64, i64)) -> Self {
        Measure::new(num, den)
    }
}

impl Add for Measure {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.checked_add(other).unwrap_or_else(|| overflow("addition"))
    }
}

impl AddAssign for Measure {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for Measure {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        self.checked_sub(other).unwrap_or_else(|| overflow("subtraction"))
    }
}

impl Neg for Measure {
    type Output = Self;

    fn neg(self) -> Self {
        self.checked_neg().unwrap_or_else(|| overflow("negation"))
    }
}

impl Mul for Measure {
    type Output = Self;

    fn mul(self, other: Self) -> Self {
        self.checked_mul(other).unwrap_or_else(|| overflow("multiplication"))
    }
}

impl Mul<i64> for Measure {
    type Output = Self;

    fn mul(self, n: i64) -> Self {
        self * Measure::from_int(n)
    }
}

impl Div for Measure {
    type Output = Self;

    fn div(self, other: Self) -> Self {
        if other.is_zero() {
            panic!("Measure division by zero");
        }
        self.checked_div(other).unwrap_or_else(|| overflow("division"))
    }
}

impl Div<i64> for Measure {
    type Output = Self;

    fn div(self, n: i64) -> Self {
        self / Measure::from_int(n)
    }
}

impl PartialOrd for Measure {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Measure {
    fn cmp(&self, other: &Self) -> Ordering {
        let (a, b) = (self.wide(), other.wide());
        (a.0 * b.1).cmp(&(b.0 * a.1))
    }
}
