//! Arbitrary-precision amounts of gold and experience.
//!
//! Costs and rewards in this game grow by whole powers of ten per level, so
//! balances quickly leave the range of any fixed-width integer. `Amount` wraps
//! an unsigned big integer and only offers checked subtraction, which makes a
//! negative balance unrepresentable.

use std::fmt;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, Mul, MulAssign};

use num_bigint::BigUint;
use num_traits::{CheckedSub, One, Zero};
use serde::{Deserialize, Serialize};

/// Amounts with more digits than this are displayed in scientific notation.
const PLAIN_DIGITS: usize = 15;

/// Digits kept after the decimal point in scientific notation.
const MANTISSA_DIGITS: usize = 5;

/// A non-negative amount of gold, experience, or a multiplier.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(BigUint);

impl Amount {
    /// The amount zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigUint::zero())
    }

    /// The amount one.
    #[must_use]
    pub fn one() -> Self {
        Self(BigUint::one())
    }

    /// `10^exp`.
    #[must_use]
    pub fn pow10(exp: u32) -> Self {
        Self(BigUint::from(10u32).pow(exp))
    }

    /// Whether this amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Subtract `other`, or return `None` if the result would be negative.
    #[must_use]
    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(&other.0).map(Self)
    }
}

/// The `n`th triangular number offset by one: `n * (n - 1) / 2`.
///
/// This is the exponent growth used for leveling: level 2 scales by `10^1`,
/// level 3 by `10^3`, level 4 by `10^6`, and so on.
#[must_use]
pub const fn triangular(n: u32) -> u32 {
    if n == 0 {
        return 0;
    }
    n * (n - 1) / 2
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(BigUint::from(value))
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(BigUint::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = self.0.to_str_radix(10);
        if digits.len() <= PLAIN_DIGITS {
            return f.write_str(&digits);
        }

        let (lead, rest) = digits.split_at(1);
        let mantissa = rest[..MANTISSA_DIGITS].trim_end_matches('0');
        let mantissa = if mantissa.is_empty() { "0" } else { mantissa };
        write!(f, "{lead}.{mantissa}e+{}", digits.len() - 1)
    }
}

impl AddAssign<&Amount> for Amount {
    fn add_assign(&mut self, rhs: &Amount) {
        self.0 += &rhs.0;
    }
}

impl MulAssign<&Amount> for Amount {
    fn mul_assign(&mut self, rhs: &Amount) {
        self.0 *= &rhs.0;
    }
}

impl Add<&Amount> for &Amount {
    type Output = Amount;

    fn add(self, rhs: &Amount) -> Amount {
        Amount(&self.0 + &rhs.0)
    }
}

impl Mul<&Amount> for &Amount {
    type Output = Amount;

    fn mul(self, rhs: &Amount) -> Amount {
        Amount(&self.0 * &rhs.0)
    }
}

/// Integer division, truncating toward zero.
///
/// # Panics
///
/// Panics if `rhs` is zero.
impl Div<&Amount> for &Amount {
    type Output = Amount;

    fn div(self, rhs: &Amount) -> Amount {
        Amount(&self.0 / &rhs.0)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |mut acc, x| {
            acc += x;
            acc
        })
    }
}

impl<'a> Product<&'a Amount> for Amount {
    fn product<I: Iterator<Item = &'a Amount>>(iter: I) -> Self {
        iter.fold(Amount::one(), |mut acc, x| {
            acc *= x;
            acc
        })
    }
}
