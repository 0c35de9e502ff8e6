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
use std::path::PathBuf;

#[derive(Debug)]
pub struct File {
    pub path: PathBuf,
    pub lines: Vec<Line>,
}

#[derive(Debug)]
pub enum Line {
    Directive(Directive),
    Test(Test),
}

#[derive(Debug)]
pub enum Directive {
    DecTest(File),
    DivisionPrecision(i32),
    ScaleIncrement(i32),
    Version(String),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Directive::DecTest(file) => write!(f, "dectest: {}", file.path.display()),
            Directive::DivisionPrecision(p) => write!(f, "divisionPrecision: {}", p),
            Directive::ScaleIncrement(s) => write!(f, "scaleIncrement: {}", s),
            Directive::Version(v) => write!(f, "version: {}", v),
        }
    }
}

#[derive(Debug)]
pub struct Test {
    pub id: String,
    pub operation: Operation,
    pub result: String,
    pub conditions: Vec<Condition>,
}

/// An operation under test.
///
/// Decimal operands are kept as written in the file, since parsing them is
/// part of what is being tested. Integer arguments, such as a precision, are
/// likewise parsed when the test runs.
#[derive(Debug)]
pub enum Operation {
    Abs(String),
    Add(String, String),
    Clamp(String, String, String),
    Compare(String, String),
    CompareAbs(String, String),
    Div(String, String),
    DivRound(String, String, String),
    Divide(String, String),
    IsInteger(String),
    Mod(String, String),
    Mul(String, String),
    Neg(String),
    Parse(String),
    QuoRem(String, String, String),
    Rescale(String, String),
    Round(String, String),
    Sub(String, String),
    ToFixed(String, String),
    ToMySql(String),
    ToString(String),
    Truncate(String, String),
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Operation::Abs(op) => write!(f, "abs {}", op),
            Operation::Add(op1, op2) => write!(f, "add {} {}", op1, op2),
            Operation::Clamp(op, i, fr) => write!(f, "clamp {} {} {}", op, i, fr),
            Operation::Compare(op1, op2) => write!(f, "compare {} {}", op1, op2),
            Operation::CompareAbs(op1, op2) => write!(f, "compareabs {} {}", op1, op2),
            Operation::Div(op1, op2) => write!(f, "div {} {}", op1, op2),
            Operation::DivRound(op1, op2, p) => write!(f, "divround {} {} {}", op1, op2, p),
            Operation::Divide(op1, op2) => write!(f, "divide {} {}", op1, op2),
            Operation::IsInteger(op) => write!(f, "isinteger {}", op),
            Operation::Mod(op1, op2) => write!(f, "mod {} {}", op1, op2),
            Operation::Mul(op1, op2) => write!(f, "mul {} {}", op1, op2),
            Operation::Neg(op) => write!(f, "neg {}", op),
            Operation::Parse(op) => write!(f, "parse {}", op),
            Operation::QuoRem(op1, op2, p) => write!(f, "quorem {} {} {}", op1, op2, p),
            Operation::Rescale(op, e) => write!(f, "rescale {} {}", op, e),
            Operation::Round(op, p) => write!(f, "round {} {}", op, p),
            Operation::Sub(op1, op2) => write!(f, "sub {} {}", op1, op2),
            Operation::ToFixed(op, p) => write!(f, "tofixed {} {}", op, p),
            Operation::ToMySql(op) => write!(f, "tomysql {}", op),
            Operation::ToString(op) => write!(f, "tostring {}", op),
            Operation::Truncate(op, p) => write!(f, "truncate {} {}", op, p),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    /// Parsing an operand fails. The result names the reason.
    ConversionSyntax,
    /// The operation panics. The result is a fragment of the panic message.
    Panic,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Condition::ConversionSyntax => f.write_str("ConversionSyntax"),
            Condition::Panic => f.write_str("Panic"),
        }
    }
}
