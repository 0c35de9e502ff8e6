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

//! Conversions between decimals and Rust primitive types.

use std::convert::TryFrom;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, ToPrimitive, Zero};

use crate::decimal::Decimal;
use crate::error::{TryFromDecimalError, TryIntoDecimalError};

/// Converts a finite float into a decimal with the fewest digits that
/// round-trip back to the same float.
macro_rules! decimal_try_from_float {
    ($t:ty) => {
        impl TryFrom<$t> for Decimal {
            type Error = TryIntoDecimalError;

            fn try_from(n: $t) -> Result<Decimal, TryIntoDecimalError> {
                if !n.is_finite() {
                    return Err(TryIntoDecimalError);
                }
                if n == 0.0 {
                    return Ok(Decimal::ZERO);
                }
                // `Display` for floats never uses exponential notation.
                Decimal::from_mysql(n.to_string().as_bytes()).map_err(|_| TryIntoDecimalError)
            }
        }
    };
}

decimal_try_from_float!(f32);
decimal_try_from_float!(f64);

/// Extracts the integral part of a decimal, discarding any fractional digits.
macro_rules! int_try_from_decimal {
    ($t:ty, $to:ident) => {
        impl TryFrom<&Decimal> for $t {
            type Error = TryFromDecimalError;

            fn try_from(d: &Decimal) -> Result<$t, TryFromDecimalError> {
                d.integral_part().$to().ok_or(TryFromDecimalError)
            }
        }

        impl TryFrom<Decimal> for $t {
            type Error = TryFromDecimalError;

            fn try_from(d: Decimal) -> Result<$t, TryFromDecimalError> {
                <$t>::try_from(&d)
            }
        }
    };
}

int_try_from_decimal!(i64, to_i64);
int_try_from_decimal!(u64, to_u64);
int_try_from_decimal!(i128, to_i128);
int_try_from_decimal!(u128, to_u128);

impl Decimal {
    fn integral_part(&self) -> BigInt {
        if self.exp == 0 {
            self.value.clone()
        } else {
            self.rescale(0).value
        }
    }
}

impl Zero for Decimal {
    fn zero() -> Decimal {
        Decimal::ZERO
    }

    fn is_zero(&self) -> bool {
        Decimal::is_zero(self)
    }
}

impl One for Decimal {
    fn one() -> Decimal {
        Decimal::from(1)
    }
}

impl ToPrimitive for Decimal {
    fn to_i64(&self) -> Option<i64> {
        i64::try_from(self).ok()
    }

    fn to_u64(&self) -> Option<u64> {
        u64::try_from(self).ok()
    }

    fn to_i128(&self) -> Option<i128> {
        i128::try_from(self).ok()
    }

    fn to_u128(&self) -> Option<u128> {
        u128::try_from(self).ok()
    }

    /// Returns the float nearest to the decimal, or `None` if the decimal
    /// lies beyond the range of `f64`.
    fn to_f64(&self) -> Option<f64> {
        self.to_string()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
    }
}

impl FromPrimitive for Decimal {
    fn from_i64(n: i64) -> Option<Decimal> {
        Some(Decimal::from(n))
    }

    fn from_u64(n: u64) -> Option<Decimal> {
        Some(Decimal::from(n))
    }

    fn from_i128(n: i128) -> Option<Decimal> {
        Some(Decimal::from(n))
    }

    fn from_u128(n: u128) -> Option<Decimal> {
        Some(Decimal::from(n))
    }

    fn from_f32(n: f32) -> Option<Decimal> {
        Decimal::try_from(n).ok()
    }

    fn from_f64(n: f64) -> Option<Decimal> {
        Decimal::try_from(n).ok()
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use std::fmt;
    use std::str::FromStr;

    use serde::de::{self, Unexpected, Visitor};
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use crate::decimal::Decimal;

    /// Decimals serialize as their canonical string, which preserves the
    /// exponent exactly.
    impl Serialize for Decimal {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for Decimal {
        fn deserialize<D>(deserializer: D) -> Result<Decimal, D::Error>
        where
            D: Deserializer<'de>,
        {
            deserializer.deserialize_any(DecimalVisitor)
        }
    }

    /// Accepts strings in the general decimal grammar, and integers. Floats
    /// are refused: they have usually lost precision already.
    struct DecimalVisitor;

    impl<'de> Visitor<'de> for DecimalVisitor {
        type Value = Decimal;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a decimal string or an integer")
        }

        fn visit_str<E>(self, s: &str) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Decimal::from_str(s).map_err(|_| E::invalid_value(Unexpected::Str(s), &self))
        }

        fn visit_i64<E>(self, n: i64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(n))
        }

        fn visit_u64<E>(self, n: u64) -> Result<Decimal, E>
        where
            E: de::Error,
        {
            Ok(Decimal::from(n))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integral_part_truncates() {
        assert_eq!(Decimal::new(-199, -2).integral_part(), BigInt::from(-1));
        assert_eq!(Decimal::new(3, 2).integral_part(), BigInt::from(300));
    }

    #[test]
    fn test_float_specials() {
        assert_eq!(Decimal::try_from(f64::NAN), Err(TryIntoDecimalError));
        assert_eq!(Decimal::try_from(f32::INFINITY), Err(TryIntoDecimalError));
        assert_eq!(Decimal::try_from(-0.0f64).map(|d| d.exponent()), Ok(0));
    }
}
