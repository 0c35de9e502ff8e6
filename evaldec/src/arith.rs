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

//! Arithmetic on decimals.
//!
//! Binary operations align both operands to the smaller of their two
//! exponents first, which turns addition and subtraction into exact integer
//! operations on the significands.

use std::iter::{Product, Sum};
use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};
use paste::paste;

use crate::constants::{self, DIVISION_PRECISION};
use crate::decimal::Decimal;

/// Rounds a digit count up to the next multiple of nine, the number of
/// decimal digits MySQL packs into one storage word.
fn round_up_9(digits: i64) -> i64 {
    (digits + 8) / 9 * 9
}

fn checked_exponent(exp: i64, what: &str) -> i32 {
    match i32::try_from(exp) {
        Ok(exp) => exp,
        Err(_) => panic!("{}", what),
    }
}

impl Decimal {
    fn add_exact(&self, rhs: &Decimal) -> Decimal {
        let (a, b) = self.align(rhs);
        Decimal {
            value: &a.value + &b.value,
            exp: a.exp,
        }
    }

    /// Subtracts without normalizing a zero result.
    fn sub_exact(&self, rhs: &Decimal) -> Decimal {
        let (a, b) = self.align(rhs);
        Decimal {
            value: &a.value - &b.value,
            exp: a.exp,
        }
    }

    fn sub_canonical(&self, rhs: &Decimal) -> Decimal {
        let mut d = self.sub_exact(rhs);
        if d.value.is_zero() {
            d.exp = 0;
        }
        d
    }

    fn mul_exact(&self, rhs: &Decimal) -> Decimal {
        if self.is_zero() || rhs.is_zero() {
            return Decimal::ZERO;
        }
        let exp = i64::from(self.exp) + i64::from(rhs.exp);
        let exp = match i32::try_from(exp) {
            Ok(exp) => exp,
            Err(_) => panic!("exponent {} overflows an i32", exp),
        };
        Decimal {
            value: &self.value * &rhs.value,
            exp,
        }
    }

    /// Divides `self` by `divisor`, producing an integer quotient at the
    /// scale `precision` and the exact remainder.
    ///
    /// The results satisfy `self = divisor * q + r`, where `q` is an integer
    /// multiple of `10^-precision` and `|r| < |divisor| * 10^-precision`.
    /// A nonzero remainder has the sign of `self`. `precision` may be
    /// negative.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let (q, r) = Decimal::from(-10).quo_rem(&Decimal::from(3), 1);
    /// assert_eq!(q.to_string(), "-3.3");
    /// assert_eq!(r.to_string(), "-0.1");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero, or if the scales involved cannot be
    /// represented as 32-bit exponents.
    pub fn quo_rem(&self, divisor: &Decimal, precision: i32) -> (Decimal, Decimal) {
        if divisor.is_zero() {
            panic!("decimal division by 0");
        }
        let scale = -i64::from(precision);
        let e = i64::from(self.exp) - i64::from(divisor.exp) - scale;
        let q_exp = checked_exponent(scale, "overflow in decimal quo_rem");
        let e = checked_exponent(e, "overflow in decimal quo_rem");

        // self = a * 10^ea, divisor = b * 10^eb. Bring the ratio to the
        // target scale by widening whichever side is short.
        let (q, r, r_exp) = if e < 0 {
            let b = &divisor.value * constants::pow10(e.unsigned_abs());
            let (q, r) = self.value.div_rem(&b);
            (q, r, self.exp)
        } else {
            let a = &self.value * constants::pow10(e.unsigned_abs());
            let (q, r) = a.div_rem(&divisor.value);
            let r_exp = checked_exponent(
                scale + i64::from(divisor.exp),
                "overflow in decimal quo_rem",
            );
            (q, r, r_exp)
        };
        (
            Decimal { value: q, exp: q_exp },
            Decimal { value: r, exp: r_exp },
        )
    }

    /// Divides `self` by `divisor`, rounding the quotient to an integer
    /// multiple of `10^-precision`.
    ///
    /// Halfway cases round away from zero, for both positive and negative
    /// quotients.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let two = Decimal::from(2);
    /// let three = Decimal::from(3);
    /// assert_eq!(two.div_round(&three, 3).to_string(), "0.667");
    /// assert_eq!((-&two).div_round(&three, 3).to_string(), "-0.667");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics under the same conditions as [`Decimal::quo_rem`].
    pub fn div_round(&self, divisor: &Decimal, precision: i32) -> Decimal {
        let (q, r) = self.quo_rem(divisor, precision);

        // Rather than comparing r * 10^precision against divisor / 2, compare
        // 2 * |r| * 10^precision against |divisor|.
        let r2 = Decimal {
            value: r.value.abs() << 1usize,
            exp: checked_exponent(
                i64::from(r.exp) + i64::from(precision),
                "overflow in decimal div_round",
            ),
        };
        if r2.cmp_abs(divisor).is_lt() {
            return q;
        }

        let unit = Decimal::new(1, q.exp);
        if self.sign() != divisor.sign() {
            q.sub_exact(&unit)
        } else {
            q.add_exact(&unit)
        }
    }

    /// Divides `self` by `divisor` using MySQL's rule for the scale of a
    /// division result.
    ///
    /// Each operand's scale is rounded up to a whole number of nine-digit
    /// words; `scale_incr` (MySQL's `div_precision_increment`) is reduced by
    /// the padding this introduced, and the quotient is rounded to the sum,
    /// itself rounded up to a multiple of nine digits.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let q = Decimal::from(1).div_scaled(&Decimal::from(3), 4);
    /// assert_eq!(q.to_string(), "0.333333333");
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    pub fn div_scaled(&self, divisor: &Decimal, scale_incr: i32) -> Decimal {
        if divisor.is_zero() {
            panic!("decimal division by 0");
        }
        if self.is_zero() {
            return Decimal::ZERO;
        }

        let s1 = (-i64::from(self.exp)).max(0);
        let s2 = (-i64::from(divisor.exp)).max(0);
        let frac1 = round_up_9(s1);
        let frac2 = round_up_9(s2);
        let incr = (i64::from(scale_incr) - (frac1 - s1 + frac2 - s2)).max(0);
        let scale = round_up_9(frac1 + frac2 + incr);
        self.div_round(
            divisor,
            checked_exponent(scale, "overflow in decimal division scale"),
        )
    }

    fn div_default(&self, divisor: &Decimal) -> Decimal {
        self.div_round(divisor, DIVISION_PRECISION)
    }

    /// Computes the remainder of `self / divisor` after truncating the
    /// quotient to an integer. The sign of the result follows `self`, and its
    /// scale is the larger of the operands' scales.
    fn rem_impl(&self, divisor: &Decimal) -> Decimal {
        let (_, r) = self.quo_rem(divisor, 0);
        r
    }

    /// Drops the digits beyond `precision` places after the decimal point,
    /// without rounding.
    ///
    /// Negative precisions are ignored, as are numbers that already have
    /// `precision` or fewer fractional digits.
    pub fn truncate(&self, precision: i32) -> Decimal {
        if precision >= 0 && i64::from(self.exp) < -i64::from(precision) {
            self.rescale(-precision)
        } else {
            self.clone()
        }
    }

    /// Reports whether the number has no nonzero fractional digits.
    pub fn is_integer(&self) -> bool {
        if self.exp >= 0 {
            return true;
        }
        let ten = BigInt::from(10u8);
        let mut q = self.value.clone();
        for _ in 0..self.exp.unsigned_abs() {
            if q.is_zero() {
                break;
            }
            let (next, r) = q.div_rem(&ten);
            if !r.is_zero() {
                return false;
            }
            q = next;
        }
        true
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident, $imp:ident) => {
        paste! {
            impl $trait<Decimal> for Decimal {
                type Output = Decimal;

                fn $method(self, rhs: Decimal) -> Decimal {
                    self.$imp(&rhs)
                }
            }

            impl<'a> $trait<&'a Decimal> for Decimal {
                type Output = Decimal;

                fn $method(self, rhs: &'a Decimal) -> Decimal {
                    self.$imp(rhs)
                }
            }

            impl<'a> $trait<Decimal> for &'a Decimal {
                type Output = Decimal;

                fn $method(self, rhs: Decimal) -> Decimal {
                    self.$imp(&rhs)
                }
            }

            impl<'a, 'b> $trait<&'b Decimal> for &'a Decimal {
                type Output = Decimal;

                fn $method(self, rhs: &'b Decimal) -> Decimal {
                    self.$imp(rhs)
                }
            }

            impl [<$trait Assign>]<Decimal> for Decimal {
                fn [<$method _assign>](&mut self, rhs: Decimal) {
                    *self = self.$imp(&rhs);
                }
            }

            impl<'a> [<$trait Assign>]<&'a Decimal> for Decimal {
                fn [<$method _assign>](&mut self, rhs: &'a Decimal) {
                    *self = self.$imp(rhs);
                }
            }
        }
    };
}

forward_binop!(Add, add, add_exact);
forward_binop!(Sub, sub, sub_canonical);
forward_binop!(Mul, mul, mul_exact);
forward_binop!(Div, div, div_default);
forward_binop!(Rem, rem, rem_impl);

impl Neg for Decimal {
    type Output = Decimal;

    fn neg(mut self) -> Decimal {
        self.negate_in_place();
        self
    }
}

impl<'a> Neg for &'a Decimal {
    type Output = Decimal;

    fn neg(self) -> Decimal {
        Decimal {
            value: -&self.value,
            exp: self.exp,
        }
    }
}

impl Sum for Decimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::ZERO, |sum, d| sum.add_exact(&d))
    }
}

impl<'a> Sum<&'a Decimal> for Decimal {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::ZERO, |sum, d| sum.add_exact(d))
    }
}

impl Product for Decimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = Decimal>,
    {
        iter.fold(Decimal::from(1), |product, d| product.mul_exact(&d))
    }
}

impl<'a> Product<&'a Decimal> for Decimal {
    fn product<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Decimal>,
    {
        iter.fold(Decimal::from(1), |product, d| product.mul_exact(d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_up_9() {
        assert_eq!(round_up_9(0), 0);
        assert_eq!(round_up_9(1), 9);
        assert_eq!(round_up_9(9), 9);
        assert_eq!(round_up_9(10), 18);
    }

    #[test]
    fn test_sub_exact_keeps_exponent() {
        let a = Decimal::new(150, -2);
        let b = Decimal::new(15, -1);
        assert_eq!(a.sub_exact(&b).exp, -2);
        assert_eq!(a.sub_canonical(&b).exp, 0);
    }

    #[test]
    fn test_quo_rem_negative_precision() {
        let (q, r) = Decimal::from(1234).quo_rem(&Decimal::from(1), -2);
        assert_eq!(q.into_parts(), (BigInt::from(12), 2));
        assert_eq!(r.into_parts(), (BigInt::from(34), 0));
    }
}
