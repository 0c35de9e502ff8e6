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

//! Conversions from text.
//!
//! Two grammars are accepted. [`Decimal::from_mysql`] reads the plain
//! `[+|-]digits[.digits]` form that MySQL sends for `DECIMAL` columns and is
//! tuned for short inputs. The [`FromStr`] implementation additionally
//! accepts a scientific-notation suffix.

use std::num::IntErrorKind;
use std::str::FromStr;

use num_bigint::BigInt;
use tracing::trace;

use crate::decimal::Decimal;
use crate::error::{ParseDecimalError, ParseErrorKind};

/// Digit runs up to this length always fit in a `u64`.
const FAST_PATH_DIGITS: usize = 18;

/// The shape of a validated digit run.
struct Scan {
    /// The index of the decimal point, if any.
    dot: Option<usize>,
    /// The number of digits, excluding the decimal point.
    digits: usize,
}

fn strip_sign(s: &[u8]) -> (bool, &[u8]) {
    match s.first() {
        Some(b'+') => (false, &s[1..]),
        Some(b'-') => (true, &s[1..]),
        _ => (false, s),
    }
}

fn scan(s: &[u8]) -> Result<Scan, ParseErrorKind> {
    let mut dot = None;
    for (i, &c) in s.iter().enumerate() {
        match c {
            b'0'..=b'9' => (),
            b'.' if dot.is_some() => return Err(ParseErrorKind::TooManyDots),
            b'.' => dot = Some(i),
            _ => {
                let ch = String::from_utf8_lossy(&s[i..])
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseErrorKind::UnexpectedCharacter(ch));
            }
        }
    }
    let digits = s.len() - usize::from(dot.is_some());
    if digits == 0 {
        return Err(ParseErrorKind::NoDigits);
    }
    Ok(Scan { dot, digits })
}

/// Accumulates the digits of `s` into a `u64`, skipping the decimal point.
///
/// Returns `None` if the value overflows.
fn parse_u64(s: &[u8]) -> Option<u64> {
    let mut n: u64 = 0;
    for &c in s {
        if c == b'.' {
            continue;
        }
        n = n.checked_mul(10)?.checked_add(u64::from(c - b'0'))?;
    }
    Some(n)
}

/// Builds a decimal from a sign and a digit run that [`scan`] has accepted.
fn parse_digits(neg: bool, s: &[u8], scan: &Scan) -> Result<Decimal, ParseErrorKind> {
    let exp = match scan.dot {
        None => 0,
        Some(dot) => {
            let frac = i32::try_from(s.len() - dot - 1)
                .map_err(|_| ParseErrorKind::ExponentOutOfRange)?;
            -frac
        }
    };

    let fast = if scan.digits <= FAST_PATH_DIGITS {
        parse_u64(s).map(BigInt::from)
    } else {
        None
    };
    let mut value = match fast {
        Some(value) => value,
        None => {
            trace!(digits = scan.digits, "decimal exceeds 64-bit fast path");
            let mut buf = Vec::with_capacity(scan.digits);
            buf.extend(s.iter().copied().filter(|&c| c != b'.'));
            BigInt::parse_bytes(&buf, 10).ok_or(ParseErrorKind::NoDigits)?
        }
    };
    if neg {
        value = -value;
    }
    Ok(Decimal::from_parts(value, exp))
}

fn parse_exponent(s: &str) -> Result<i32, ParseErrorKind> {
    s.parse::<i32>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            ParseErrorKind::ExponentOutOfRange
        }
        _ => ParseErrorKind::InvalidExponent,
    })
}

impl Decimal {
    /// Parses a decimal from the textual form MySQL uses on the wire.
    ///
    /// The accepted grammar is `[+|-]digits[.digits]`, where either side of
    /// the decimal point may be empty but not both. Trailing zeros are kept:
    /// `"1.50"` has an exponent of `-2`.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// let d = Decimal::from_mysql(b"-123.450")?;
    /// assert_eq!(d.exponent(), -3);
    /// assert_eq!(d.to_string(), "-123.450");
    /// assert!(Decimal::from_mysql(b"1e5").is_err());
    /// # Ok::<_, evaldec::ParseDecimalError>(())
    /// ```
    pub fn from_mysql(s: &[u8]) -> Result<Decimal, ParseDecimalError> {
        let original = s;
        let (neg, s) = strip_sign(s);
        if s.is_empty() {
            return Err(ParseDecimalError::new(original, ParseErrorKind::Empty));
        }
        scan(s)
            .and_then(|scan| parse_digits(neg, s, &scan))
            .map_err(|kind| ParseDecimalError::new(original, kind))
    }

    /// Parses a decimal that is known to be valid, such as a literal compiled
    /// into the program.
    ///
    /// # Panics
    ///
    /// Panics if `s` is not valid according to the [`FromStr`] grammar. Never
    /// use this on user input.
    pub fn require_from_str(s: &str) -> Decimal {
        match s.parse() {
            Ok(d) => d,
            Err(e) => panic!("{}", e),
        }
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    /// Parses `[+|-]digits[.digits][(e|E)[+|-]digits]`.
    ///
    /// The exponent suffix is added to the exponent implied by the decimal
    /// point, so `"1.5e3"` has significand `15` and exponent `2`.
    fn from_str(s: &str) -> Result<Decimal, ParseDecimalError> {
        let original = s.as_bytes();
        let err = |kind| ParseDecimalError::new(original, kind);

        let (mantissa, exp) = match s.find(|c| c == 'e' || c == 'E') {
            Some(i) => (&s[..i], parse_exponent(&s[i + 1..]).map_err(err)?),
            None => (s, 0),
        };

        let (neg, m) = strip_sign(mantissa.as_bytes());
        if m.is_empty() {
            return Err(err(ParseErrorKind::Empty));
        }
        let d = scan(m)
            .and_then(|scan| parse_digits(neg, m, &scan))
            .map_err(err)?;

        let exp = i32::try_from(i64::from(d.exp) + i64::from(exp))
            .map_err(|_| err(ParseErrorKind::ExponentOutOfRange))?;
        Ok(Decimal::from_parts(d.value, exp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_u64() {
        assert_eq!(parse_u64(b"123.45"), Some(12345));
        assert_eq!(parse_u64(b"18446744073709551615"), Some(u64::MAX));
        assert_eq!(parse_u64(b"18446744073709551616"), None);
        assert_eq!(parse_u64(b"99999999999999999999"), None);
    }

    #[test]
    fn test_scan() {
        assert!(matches!(scan(b"1.5"), Ok(Scan { dot: Some(1), digits: 2 })));
        assert!(matches!(scan(b"15"), Ok(Scan { dot: None, digits: 2 })));
        assert_eq!(scan(b"1.2.3").err(), Some(ParseErrorKind::TooManyDots));
        assert_eq!(scan(b".").err(), Some(ParseErrorKind::NoDigits));
        assert_eq!(
            scan(b"1x").err(),
            Some(ParseErrorKind::UnexpectedCharacter('x'))
        );
        assert_eq!(
            scan("1€".as_bytes()).err(),
            Some(ParseErrorKind::UnexpectedCharacter('€'))
        );
    }

    #[test]
    fn test_fast_and_slow_paths_agree() {
        let short = Decimal::from_mysql(b"123456789012345678").unwrap();
        let long = Decimal::from_mysql(b"1234567890123456789").unwrap();
        assert_eq!(short.value, BigInt::from(123456789012345678u64));
        assert_eq!(long.value, BigInt::from(1234567890123456789u64));
        assert_eq!(long.exp, 0);

        let frac = Decimal::from_mysql(b"-0.0000000000000000000001").unwrap();
        assert_eq!(frac.value, BigInt::from(-1));
        assert_eq!(frac.exp, -22);
    }

    #[test]
    fn test_parse_exponent() {
        assert_eq!(parse_exponent("+12"), Ok(12));
        assert_eq!(parse_exponent("-3"), Ok(-3));
        assert_eq!(parse_exponent(""), Err(ParseErrorKind::InvalidExponent));
        assert_eq!(parse_exponent("1.5"), Err(ParseErrorKind::InvalidExponent));
        assert_eq!(
            parse_exponent("99999999999"),
            Err(ParseErrorKind::ExponentOutOfRange)
        );
    }
}
