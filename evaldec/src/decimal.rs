// Copyright Materialize, Inc. All rights reserved.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository, or online at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

use num_bigint::{BigInt, Sign};
use num_traits::Signed;
use static_assertions::assert_impl_all;

use crate::constants;

/// An exact, arbitrary-precision fixed-point decimal number.
///
/// A `Decimal` is a signed [`BigInt`] significand paired with a 32-bit
/// exponent; the number it represents is `significand * 10^exponent`. The
/// arithmetic, rounding and formatting rules follow MySQL's `DECIMAL` type,
/// so the results of operations on this type can be sent to MySQL clients
/// unchanged.
///
/// Values are immutable: every method that takes `&self` returns a new
/// decimal. Methods that reuse the receiver's storage take `&mut self` or
/// `self` and say so in their names.
///
/// Operations whose result would need an exponent outside the range of an
/// `i32`, division by zero, and digit budgets beyond
/// [`MAX_CLAMP_DIGITS`](crate::MAX_CLAMP_DIGITS) panic.
///
/// # Examples
///
/// ```
/// use evaldec::Decimal;
///
/// let price: Decimal = "19.99".parse()?;
/// let qty = Decimal::from(3);
/// assert_eq!((&price * &qty).to_string(), "59.97");
/// # Ok::<_, Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct Decimal {
    pub(crate) value: BigInt,
    pub(crate) exp: i32,
}

assert_impl_all!(Decimal: Send, Sync, Clone);

impl Decimal {
    /// The canonical zero: a zero significand at exponent zero.
    pub const ZERO: Decimal = Decimal {
        value: BigInt::ZERO,
        exp: 0,
    };

    /// Constructs the decimal `value * 10^exponent`.
    pub fn new(value: i64, exponent: i32) -> Decimal {
        Decimal {
            value: BigInt::from(value),
            exp: exponent,
        }
    }

    /// Constructs the decimal `significand * 10^exponent`.
    pub fn from_parts(significand: BigInt, exponent: i32) -> Decimal {
        Decimal {
            value: significand,
            exp: exponent,
        }
    }

    /// Consumes the decimal, returning its significand and exponent.
    pub fn into_parts(self) -> (BigInt, i32) {
        (self.value, self.exp)
    }

    /// Returns the significand of the number.
    pub fn significand(&self) -> &BigInt {
        &self.value
    }

    /// Returns the exponent of the number.
    ///
    /// A negative exponent is the number of digits after the decimal point.
    pub fn exponent(&self) -> i32 {
        self.exp
    }

    /// Returns the sign of the number.
    pub fn sign(&self) -> Sign {
        self.value.sign()
    }

    /// Reports whether the number is zero, at any exponent.
    pub fn is_zero(&self) -> bool {
        self.value.sign() == Sign::NoSign
    }

    /// Reports whether the number is strictly less than zero.
    pub fn is_negative(&self) -> bool {
        self.value.sign() == Sign::Minus
    }

    /// Reports whether the number is strictly greater than zero.
    pub fn is_positive(&self) -> bool {
        self.value.sign() == Sign::Plus
    }

    /// Computes the absolute value of the number.
    pub fn abs(&self) -> Decimal {
        Decimal {
            value: self.value.abs(),
            exp: self.exp,
        }
    }

    /// Negates the number, reusing its storage.
    ///
    /// This is the in-place counterpart of the `-` operator.
    pub fn negate_in_place(&mut self) {
        let value = std::mem::take(&mut self.value);
        self.value = -value;
    }

    /// Returns a copy of the number with its exponent changed to `exponent`.
    ///
    /// Raising the exponent drops digits by truncating towards zero, it never
    /// rounds. Lowering it pads the significand with zeros.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let d = Decimal::new(12345, -4);
    /// assert_eq!(d.rescale(-1).to_string(), "1.2");
    /// assert_eq!(d.rescale(-1).rescale(-4).to_string(), "1.2000");
    /// ```
    pub fn rescale(&self, exponent: i32) -> Decimal {
        let value = if exponent > self.exp {
            &self.value / constants::pow10(exponent.abs_diff(self.exp))
        } else if exponent < self.exp {
            &self.value * constants::pow10(self.exp.abs_diff(exponent))
        } else {
            self.value.clone()
        };
        Decimal {
            value,
            exp: exponent,
        }
    }

    /// Rescales whichever of `self` and `other` has the larger exponent so
    /// that both share the smaller exponent.
    ///
    /// The returned values borrow where no rescaling was needed.
    pub(crate) fn align<'a>(
        &'a self,
        other: &'a Decimal,
    ) -> (std::borrow::Cow<'a, Decimal>, std::borrow::Cow<'a, Decimal>) {
        use std::borrow::Cow;
        use std::cmp::Ordering;

        match self.exp.cmp(&other.exp) {
            Ordering::Equal => (Cow::Borrowed(self), Cow::Borrowed(other)),
            Ordering::Less => (Cow::Borrowed(self), Cow::Owned(other.rescale(self.exp))),
            Ordering::Greater => (Cow::Owned(self.rescale(other.exp)), Cow::Borrowed(other)),
        }
    }
}

impl Default for Decimal {
    fn default() -> Decimal {
        Decimal::ZERO
    }
}

impl fmt::Debug for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl From<BigInt> for Decimal {
    fn from(value: BigInt) -> Decimal {
        Decimal { value, exp: 0 }
    }
}

macro_rules! decimal_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Decimal {
                fn from(n: $t) -> Decimal {
                    Decimal {
                        value: BigInt::from(n),
                        exp: 0,
                    }
                }
            }
        )*
    };
}

decimal_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rescale_truncates() {
        let d = Decimal::new(-12345, -4);
        assert_eq!(d.rescale(-1).into_parts(), (BigInt::from(-12), -1));
        assert_eq!(d.rescale(2).into_parts(), (BigInt::from(0), 2));
        assert_eq!(d.rescale(-6).into_parts(), (BigInt::from(-1234500), -6));
    }

    #[test]
    fn test_rescale_wide_gap() {
        let d = Decimal::new(1, i32::MAX);
        let r = d.rescale(i32::MAX - 30);
        assert_eq!(r.exponent(), i32::MAX - 30);
        assert_eq!(r.significand().to_string(), format!("1{}", "0".repeat(30)));
    }

    #[test]
    fn test_negate_in_place() {
        let mut d = Decimal::new(42, -1);
        d.negate_in_place();
        assert_eq!(d.into_parts(), (BigInt::from(-42), -1));
    }

    #[test]
    fn test_align() {
        let a = Decimal::new(15, -1);
        let b = Decimal::new(3, 1);
        let (ra, rb) = a.align(&b);
        assert_eq!(ra.exp, -1);
        assert_eq!(rb.exp, -1);
        assert_eq!(rb.value, BigInt::from(300));
    }
}
