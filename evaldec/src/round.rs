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

use num_bigint::Sign;
use tracing::trace;

use crate::constants;
use crate::decimal::Decimal;

impl Decimal {
    /// Rounds the number to `places` digits after the decimal point.
    ///
    /// A negative `places` rounds the integral part to the nearest multiple
    /// of `10^-places`. Halfway cases round away from zero.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// assert_eq!(Decimal::new(545, -2).round(1).to_string(), "5.5");
    /// assert_eq!(Decimal::new(-545, -2).round(1).to_string(), "-5.5");
    /// assert_eq!(Decimal::from(545).round(-1).to_string(), "550");
    /// ```
    pub fn round(&self, places: i32) -> Decimal {
        self.clone().into_rounded(places)
    }

    /// Like [`Decimal::round`], but consumes `self` and reuses its storage.
    pub fn into_rounded(mut self, places: i32) -> Decimal {
        let target = -i64::from(places);
        if i64::from(self.exp) == target {
            return self;
        }
        let extra = match i32::try_from(target - 1) {
            Ok(extra) => extra,
            Err(_) => panic!("overflow in decimal round"),
        };

        // Keep one digit past the rounding position, push it over the
        // boundary by five units, then drop it.
        if extra > self.exp {
            self.value /= constants::pow10(extra.abs_diff(self.exp));
        } else {
            self.value *= constants::pow10(self.exp.abs_diff(extra));
        }
        if self.value.sign() == Sign::Minus {
            self.value -= 5u32;
        } else {
            self.value += 5u32;
        }
        self.value /= 10u32;
        self.exp = extra + 1;
        self
    }

    /// Saturates the number to the largest magnitude that fits in
    /// `integral` digits before the decimal point and `fractional` digits
    /// after it, keeping its sign. Numbers within that budget are returned
    /// unchanged.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let d: Decimal = "-12345.678".parse()?;
    /// assert_eq!(d.clamp_digits(3, 2).to_string(), "-999.99");
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `integral + fractional` exceeds
    /// [`MAX_CLAMP_DIGITS`](crate::MAX_CLAMP_DIGITS).
    pub fn clamp_digits(&self, integral: u32, fractional: u32) -> Decimal {
        let limit = Decimal::largest_form(integral, fractional);
        if self.cmp_abs(&limit).is_le() {
            return self.clone();
        }
        trace!(integral, fractional, "clamping decimal to its digit budget");
        if self.is_negative() {
            -limit
        } else {
            limit
        }
    }

    /// Returns the largest positive number with `integral` digits before the
    /// decimal point and `fractional` digits after it, e.g. `999.99` for
    /// `(3, 2)`.
    ///
    /// # Panics
    ///
    /// Panics if `integral + fractional` exceeds
    /// [`MAX_CLAMP_DIGITS`](crate::MAX_CLAMP_DIGITS).
    pub fn largest_form(integral: u32, fractional: u32) -> Decimal {
        let digits = integral.saturating_add(fractional);
        let value = constants::limit(digits);
        // limit() has already rejected fractional > MAX_CLAMP_DIGITS.
        let exp = -(fractional as i32);
        Decimal { value, exp }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigInt;

    use super::*;

    #[test]
    fn test_into_rounded_pads() {
        let d = Decimal::from(5).into_rounded(2);
        assert_eq!(d.into_parts(), (BigInt::from(500), -2));
    }

    #[test]
    fn test_round_same_exponent_is_identity() {
        let d = Decimal::new(12345, -2);
        assert_eq!(d.round(2).into_parts(), (BigInt::from(12345), -2));
    }

    #[test]
    fn test_largest_form() {
        assert_eq!(
            Decimal::largest_form(3, 2).into_parts(),
            (BigInt::from(99999), -2)
        );
        assert_eq!(Decimal::largest_form(0, 0).into_parts(), (BigInt::from(0), 0));
        let wide = Decimal::largest_form(30, 5);
        assert_eq!(wide.exponent(), -5);
        assert_eq!(wide.significand().to_string(), "9".repeat(35));
    }

    #[test]
    #[should_panic(expected = "largest_form: too large")]
    fn test_largest_form_ceiling() {
        Decimal::largest_form(300, 50);
    }

    #[test]
    #[should_panic(expected = "largest_form: too large")]
    fn test_largest_form_saturates() {
        Decimal::largest_form(u32::MAX, 1);
    }
}
