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

//! Process-wide tables of powers of ten and digit-budget maxima.
//!
//! The tables are built once, on first use, and never mutated afterwards.

use num_bigint::BigInt;
use num_traits::{One, Pow};
use once_cell::sync::Lazy;

/// The number of entries in each precomputed table.
pub(crate) const TABLE_LEN: usize = 20;

/// The largest total digit count accepted by [`largest_form`].
///
/// [`largest_form`]: crate::Decimal::largest_form
pub const MAX_CLAMP_DIGITS: u32 = 349;

/// The number of fractional digits produced by `/` when the quotient does not
/// divide exactly.
pub const DIVISION_PRECISION: i32 = 16;

/// `10^n` for `n` in `0..TABLE_LEN`.
static POW10: Lazy<[BigInt; TABLE_LEN]> = Lazy::new(|| {
    let mut n = 1u64;
    std::array::from_fn(|i| {
        if i > 0 {
            n *= 10;
        }
        BigInt::from(n)
    })
});

/// `10^n - 1` for `n` in `0..TABLE_LEN`, i.e. the largest magnitude that fits
/// in `n` digits.
static LIMITS: Lazy<[BigInt; TABLE_LEN]> =
    Lazy::new(|| std::array::from_fn(|i| &POW10[i] - BigInt::one()));

/// Returns `10^n`.
///
/// Small powers come straight from the table. Larger powers start from the
/// largest tabulated power rather than from scratch.
pub(crate) fn pow10(n: u32) -> BigInt {
    match POW10.get(n as usize) {
        Some(p) => p.clone(),
        None => {
            let rest = n - (TABLE_LEN as u32 - 1);
            &POW10[TABLE_LEN - 1] * Pow::pow(BigInt::from(10u8), rest)
        }
    }
}

/// Returns `10^digits - 1`, or panics if `digits` exceeds
/// [`MAX_CLAMP_DIGITS`].
pub(crate) fn limit(digits: u32) -> BigInt {
    if let Some(l) = LIMITS.get(digits as usize) {
        return l.clone();
    }
    if digits > MAX_CLAMP_DIGITS {
        panic!("largest_form: too large");
    }
    pow10(digits) - BigInt::one()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_pow10() {
        assert_eq!(pow10(0), BigInt::from(1));
        assert_eq!(pow10(19), BigInt::from(10_000_000_000_000_000_000u64));
        assert_eq!(
            pow10(25),
            BigInt::from_str("10000000000000000000000000").unwrap()
        );
    }

    #[test]
    fn test_limit() {
        assert_eq!(limit(0), BigInt::from(0));
        assert_eq!(limit(3), BigInt::from(999));
        assert_eq!(limit(19), BigInt::from(9_999_999_999_999_999_999u64));
        assert_eq!(limit(22), BigInt::from_str("9999999999999999999999").unwrap());
        assert_eq!(limit(MAX_CLAMP_DIGITS).to_string().len(), 349);
    }

    #[test]
    #[should_panic(expected = "largest_form: too large")]
    fn test_limit_ceiling() {
        limit(MAX_CLAMP_DIGITS + 1);
    }
}
