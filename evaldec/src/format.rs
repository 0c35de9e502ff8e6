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

//! Rendering decimals as text.
//!
//! There are three renderings. The canonical form, produced by `Display`,
//! shows every stored digit. The fixed form rounds to a requested number of
//! places first. The MySQL form drops trailing fractional zeros. None of
//! them ever uses exponential notation.

use std::fmt;

use crate::decimal::Decimal;

impl Decimal {
    /// Appends the positional rendering of the number to `buf`, optionally
    /// dropping trailing zeros after the decimal point.
    fn write_to(&self, buf: &mut Vec<u8>, trim_trailing_zeros: bool) {
        if self.exp >= 0 {
            let integral = self.rescale(0).value.to_str_radix(10);
            buf.extend_from_slice(integral.as_bytes());
            return;
        }

        let raw = self.value.magnitude().to_str_radix(10);
        let raw = raw.as_bytes();
        if self.is_negative() {
            buf.push(b'-');
        }

        let scale = self.exp.unsigned_abs() as usize;
        let mut fractional = Vec::with_capacity(scale);
        if raw.len() > scale {
            let point = raw.len() - scale;
            buf.extend_from_slice(&raw[..point]);
            fractional.extend_from_slice(&raw[point..]);
        } else {
            buf.push(b'0');
            fractional.resize(scale - raw.len(), b'0');
            fractional.extend_from_slice(raw);
        }

        if trim_trailing_zeros {
            let keep = fractional
                .iter()
                .rposition(|&c| c != b'0')
                .map_or(0, |i| i + 1);
            fractional.truncate(keep);
        }

        if !fractional.is_empty() {
            buf.push(b'.');
            buf.extend_from_slice(&fractional);
        }
    }

    fn render(&self, trim_trailing_zeros: bool) -> String {
        let mut buf = Vec::with_capacity(10);
        self.write_to(&mut buf, trim_trailing_zeros);
        // Only ASCII digits, '-' and '.' are ever written.
        String::from_utf8(buf).unwrap_or_else(|e| unreachable!("{}", e))
    }

    /// Rounds the number to `places` digits after the decimal point, then
    /// renders it with exactly that many fractional digits.
    ///
    /// A `places` of zero or less renders no decimal point.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// assert_eq!(Decimal::ZERO.to_string_fixed(2), "0.00");
    /// assert_eq!(Decimal::new(545, -2).to_string_fixed(0), "5");
    /// assert_eq!(Decimal::new(545, -2).to_string_fixed(3), "5.450");
    /// assert_eq!(Decimal::from(545).to_string_fixed(-1), "550");
    /// ```
    pub fn to_string_fixed(&self, places: i32) -> String {
        self.round(places).render(false)
    }

    /// Like [`Decimal::to_string_fixed`], but returns the raw bytes.
    pub fn to_fixed_bytes(&self, places: i32) -> Vec<u8> {
        let mut buf = Vec::with_capacity(10);
        self.round(places).write_to(&mut buf, false);
        buf
    }

    /// Renders the number the way a MySQL client expects to read it: every
    /// integral digit, and the fractional digits up to the last nonzero one.
    ///
    /// ```
    /// use evaldec::Decimal;
    ///
    /// assert_eq!(Decimal::new(12500, -4).to_mysql_string(), "1.25");
    /// assert_eq!(Decimal::new(-1000, -3).to_mysql_string(), "-1");
    /// assert_eq!(Decimal::new(5, 2).to_mysql_string(), "500");
    /// ```
    pub fn to_mysql_string(&self) -> String {
        self.render(true)
    }
}

/// Formats the number in its canonical form.
///
/// The alternate flag (`{:#}`) selects the MySQL form of
/// [`Decimal::to_mysql_string`]; a precision (`{:.2}`) selects the fixed form
/// of [`Decimal::to_string_fixed`]. Width, fill and alignment are honored.
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match f.precision() {
            Some(places) => {
                let places = i32::try_from(places).map_err(|_| fmt::Error)?;
                self.to_string_fixed(places)
            }
            None => self.render(f.alternate()),
        };
        let (non_negative, digits) = match s.strip_prefix('-') {
            Some(digits) => (false, digits),
            None => (true, s.as_str()),
        };
        f.pad_integral(non_negative, "", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_to_leading_zeros() {
        let mut buf = Vec::new();
        Decimal::new(-5, -4).write_to(&mut buf, false);
        assert_eq!(buf, b"-0.0005");
    }

    #[test]
    fn test_write_to_trims_all_fractional_zeros() {
        let mut buf = Vec::new();
        Decimal::new(0, -3).write_to(&mut buf, true);
        assert_eq!(buf, b"0");
    }

    #[test]
    fn test_display_flags() {
        let d = Decimal::new(-12500, -4);
        assert_eq!(format!("{}", d), "-1.2500");
        assert_eq!(format!("{:#}", d), "-1.25");
        assert_eq!(format!("{:.1}", d), "-1.3");
        assert_eq!(format!("{:>8}", d), " -1.2500");
        assert_eq!(format!("{:08.2}", d), "-0001.25");
    }

    #[test]
    fn test_fixed_rounds_to_zero_without_sign() {
        assert_eq!(Decimal::new(-1, -3).to_string_fixed(2), "0.00");
    }
}
