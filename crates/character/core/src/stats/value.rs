//! Exact stat values.
//!
//! Percent multipliers produce fractions. Values stay exact rationals through
//! the whole resolution and are rounded once, at export.

use core::cmp::Ordering;
use core::fmt;
use core::ops::Add;

/// An exact rational stat value, always stored in lowest terms with a
/// positive denominator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct StatValue {
    numer: i128,
    denom: i128,
}

impl StatValue {
    pub const ZERO: Self = Self { numer: 0, denom: 1 };

    pub const fn from_int(value: i64) -> Self {
        Self {
            numer: value as i128,
            denom: 1,
        }
    }

    /// `numer / denom`, or `None` when `denom` is zero.
    pub fn ratio(numer: i64, denom: i64) -> Option<Self> {
        (denom != 0).then(|| Self::normalized(i128::from(numer), i128::from(denom)))
    }

    fn normalized(numer: i128, denom: i128) -> Self {
        let sign = if denom < 0 { -1 } else { 1 };
        let divisor = gcd(numer, denom).max(1);
        Self {
            numer: sign * numer / divisor,
            denom: sign * denom / divisor,
        }
    }

    pub const fn numer(&self) -> i128 {
        self.numer
    }

    pub const fn denom(&self) -> i128 {
        self.denom
    }

    pub const fn is_integer(&self) -> bool {
        self.denom == 1
    }

    /// `self + amount`
    pub fn plus(self, amount: i64) -> Self {
        Self::normalized(self.numer + i128::from(amount) * self.denom, self.denom)
    }

    /// `self × (100 + percent) / 100`
    pub fn scale_percent(self, percent: i64) -> Self {
        Self::normalized(self.numer * (100 + i128::from(percent)), self.denom * 100)
    }

    /// `self × numer / denom`; `denom` must be non-zero.
    pub fn scale(self, numer: i64, denom: i64) -> Option<Self> {
        (denom != 0).then(|| {
            Self::normalized(self.numer * i128::from(numer), self.denom * i128::from(denom))
        })
    }

    /// `self / rhs`, or `None` when `rhs` is zero.
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        (rhs.numer != 0).then(|| Self::normalized(self.numer * rhs.denom, self.denom * rhs.numer))
    }

    pub fn abs(self) -> Self {
        Self {
            numer: self.numer.abs(),
            denom: self.denom,
        }
    }

    /// Rounds half-up to the nearest integer: `floor(x + 1/2)`.
    ///
    /// `2.5 → 3`, `-2.5 → -2`. Saturates at the `i64` bounds.
    pub fn round_half_up(&self) -> i64 {
        let rounded = (2 * self.numer + self.denom).div_euclid(2 * self.denom);
        i64::try_from(rounded).unwrap_or(if rounded < 0 { i64::MIN } else { i64::MAX })
    }

    /// Lossy conversion for display.
    pub fn to_f64(&self) -> f64 {
        self.numer as f64 / self.denom as f64
    }
}

impl Default for StatValue {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for StatValue {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl From<i32> for StatValue {
    fn from(value: i32) -> Self {
        Self::from_int(i64::from(value))
    }
}

impl Add for StatValue {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::normalized(
            self.numer * rhs.denom + rhs.numer * self.denom,
            self.denom * rhs.denom,
        )
    }
}

impl core::ops::Sub for StatValue {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::normalized(
            self.numer * rhs.denom - rhs.numer * self.denom,
            self.denom * rhs.denom,
        )
    }
}

impl core::iter::Sum for StatValue {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl Ord for StatValue {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.numer * other.denom).cmp(&(other.numer * self.denom))
    }
}

impl PartialOrd for StatValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer)
        } else {
            write!(f, "{}/{}", self.numer, self.denom)
        }
    }
}

fn gcd(a: i128, b: i128) -> i128 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
