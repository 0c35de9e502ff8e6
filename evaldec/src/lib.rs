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

//! evaldec is an exact fixed-point decimal library that reproduces the
//! arithmetic of MySQL's `DECIMAL` type.
//!
//! # Introduction
//!
//! A SQL engine that evaluates expressions on behalf of MySQL clients has to
//! produce byte-for-byte the answers MySQL itself would produce. Binary
//! floating point cannot do that: `0.1 + 0.2` is not `0.3`. evaldec stores
//! every number as an arbitrary-precision integer significand and a
//! power-of-ten exponent, so addition, subtraction and multiplication are
//! always exact, and division rounds to a precision chosen by the caller
//! using the same rules as MySQL.
//!
//! # Details
//!
//! The main type exposed by this library is [`Decimal`]. It supports:
//!
//!  * Parsing from the plain text MySQL sends on the wire
//!    ([`Decimal::from_mysql`]) and from a general grammar with optional
//!    scientific notation ([`FromStr`](std::str::FromStr)).
//!
//!  * Exact `+`, `-` and `*`, and three flavors of division: `/` rounds to
//!    [`DIVISION_PRECISION`] fractional digits, [`Decimal::div_round`]
//!    rounds to any precision, and [`Decimal::div_scaled`] follows MySQL's
//!    rule for the scale of a division result.
//!
//!  * Half-away-from-zero [rounding](Decimal::round), truncation, and
//!    [clamping](Decimal::clamp_digits) to a `DECIMAL(M, D)` digit budget.
//!
//!  * Three textual renderings: the canonical form produced by `Display`,
//!    the fixed form of [`Decimal::to_string_fixed`], and the trimmed form of
//!    [`Decimal::to_mysql_string`].
//!
//! Decimals are totally ordered by value, and hash consistently with that
//! order: `1.2` and `1.20` are equal and hash identically.
//!
//! Invalid text is reported through [`ParseDecimalError`]. Conditions that
//! indicate a bug in the caller rather than bad input, such as division by
//! zero or an exponent that overflows 32 bits, panic.
//!
//! # Examples
//!
//! ```
//! # use std::error::Error;
//! use evaldec::Decimal;
//!
//! let x: Decimal = ".1".parse()?;
//! let y: Decimal = ".2".parse()?;
//! let z: Decimal = ".3".parse()?;
//!
//! assert_eq!(&x + &y, z);
//! assert_eq!((x + y + z).to_string(), "0.6");
//!
//! let third = Decimal::from(1) / Decimal::from(3);
//! assert_eq!(third.to_string(), "0.3333333333333333");
//!
//! # Ok::<_, Box<dyn Error>>(())
//! ```

#![deny(missing_debug_implementations, missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod arith;
mod constants;
mod conv;
mod decimal;
mod error;
mod format;
#[macro_use]
mod macros;
mod ordered;
mod parse;
mod round;

pub use constants::{DIVISION_PRECISION, MAX_CLAMP_DIGITS};
pub use decimal::Decimal;
pub use error::{ParseDecimalError, ParseErrorKind, TryFromDecimalError, TryIntoDecimalError};
pub use num_bigint::{BigInt, Sign};
