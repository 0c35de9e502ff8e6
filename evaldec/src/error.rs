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

use thiserror::Error;

/// An error indicating that a string is not a valid decimal number.
///
/// The error retains the complete original input so that callers rejecting a
/// row or statement can report exactly what was received.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("can't convert {input:?} to decimal: {kind}")]
pub struct ParseDecimalError {
    input: String,
    kind: ParseErrorKind,
}

impl ParseDecimalError {
    pub(crate) fn new(input: &[u8], kind: ParseErrorKind) -> ParseDecimalError {
        ParseDecimalError {
            input: String::from_utf8_lossy(input).into_owned(),
            kind,
        }
    }

    /// Returns the input that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns the reason the input was rejected.
    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }
}

/// The reason a string could not be parsed as a decimal.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum ParseErrorKind {
    /// The input was empty, or consisted only of a sign.
    #[error("too short")]
    Empty,
    /// The input contained a dot but no digits.
    #[error("no digits")]
    NoDigits,
    /// The input contained a character outside the decimal grammar.
    #[error("unexpected character {0:?}")]
    UnexpectedCharacter(char),
    /// The input contained more than one decimal point.
    #[error("too many .s")]
    TooManyDots,
    /// The scientific-notation exponent was not a signed integer.
    #[error("exponent is not numeric")]
    InvalidExponent,
    /// The resulting exponent does not fit in 32 bits.
    #[error("exponent out of range")]
    ExponentOutOfRange,
}

/// An error indicating that a value cannot be cast to a primitive type.
///
/// Any fractional digits are discarded before the cast, so this error only
/// occurs when the integral part does not fit into the target.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("decimal cannot be expressed in target primitive type")]
pub struct TryFromDecimalError;

/// An error indicating a value cannot be cast to a decimal, e.g. because it is
/// an infinite or NaN float.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("value cannot be precisely expressed as decimal")]
pub struct TryIntoDecimalError;
