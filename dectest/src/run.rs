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

use std::any::Any;
use std::cmp::Ordering;
use std::error::Error;
use std::panic::{self, AssertUnwindSafe};

use evaldec::{Decimal, ParseDecimalError, DIVISION_PRECISION};
use tracing::debug;

use crate::ast;

/// The `scale_incr` used by `div` until a `scaleIncrement` directive says
/// otherwise. This is MySQL's default `div_precision_increment`.
pub const DEFAULT_SCALE_INCREMENT: i32 = 4;

pub enum Outcome {
    Passed,
    Failed { cause: Box<dyn Error> },
    Skipped,
}

pub trait Report {
    fn start_file(&mut self, file: &ast::File);
    fn finish_file(&mut self);
    fn start_test(&mut self, test: &ast::Test);
    fn finish_test(&mut self, outcome: Outcome);
}

enum TestError {
    /// The test cannot be evaluated, e.g. because an operand is `#`.
    Unsupported,
    /// A decimal operand failed to parse.
    Conversion(ParseDecimalError),
    Failure { cause: Box<dyn Error> },
}

impl TestError {
    fn failure<S>(message: S) -> TestError
    where
        S: Into<String>,
    {
        let message = message.into();
        TestError::Failure {
            cause: message.into(),
        }
    }
}

impl<E> From<E> for TestError
where
    E: Error + 'static,
{
    fn from(cause: E) -> TestError {
        TestError::Failure {
            cause: cause.into(),
        }
    }
}

type TestResult<T> = Result<T, TestError>;

/// Settings established by directives, scoped to one file.
struct Session {
    scale_incr: i32,
}

impl Default for Session {
    fn default() -> Session {
        Session {
            scale_incr: DEFAULT_SCALE_INCREMENT,
        }
    }
}

pub fn run_file<R>(reporter: &mut R, file: &ast::File) -> Result<(), Box<dyn Error>>
where
    R: Report,
{
    reporter.start_file(file);
    let mut session = Session::default();
    for line in &file.lines {
        match line {
            ast::Line::Directive(directive) => run_directive(&mut session, reporter, directive)?,
            ast::Line::Test(test) => run_test(&session, reporter, test),
        }
    }
    reporter.finish_file();
    Ok(())
}

fn run_directive<R>(
    session: &mut Session,
    reporter: &mut R,
    directive: &ast::Directive,
) -> Result<(), Box<dyn Error>>
where
    R: Report,
{
    debug!(%directive, "applying directive");
    match directive {
        ast::Directive::DecTest(file) => run_file(reporter, file),
        ast::Directive::DivisionPrecision(p) if *p == DIVISION_PRECISION => Ok(()),
        ast::Directive::DivisionPrecision(p) => Err(format!(
            "unsupported division precision {}, only {} is available",
            p, DIVISION_PRECISION
        )
        .into()),
        ast::Directive::ScaleIncrement(s) => {
            session.scale_incr = *s;
            Ok(())
        }
        ast::Directive::Version(_) => Ok(()),
    }
}

fn run_test<R>(session: &Session, reporter: &mut R, test: &ast::Test)
where
    R: Report,
{
    reporter.start_test(test);
    let outcome = match run_test_inner(session, test) {
        Ok(()) => Outcome::Passed,
        Err(TestError::Failure { cause }) => Outcome::Failed { cause },
        Err(TestError::Conversion(e)) => Outcome::Failed { cause: e.into() },
        Err(TestError::Unsupported) => Outcome::Skipped,
    };
    reporter.finish_test(outcome);
}

fn run_test_inner(session: &Session, test: &ast::Test) -> TestResult<()> {
    if test.result == "#" {
        return Err(TestError::Unsupported);
    }
    let expects_panic = test.conditions.contains(&ast::Condition::Panic);
    let expects_conversion_error = test.conditions.contains(&ast::Condition::ConversionSyntax);

    let res = panic::catch_unwind(AssertUnwindSafe(|| evaluate(session, &test.operation)));
    match res {
        Err(payload) => {
            let message = panic_message(&*payload);
            if !expects_panic {
                return Err(TestError::failure(format!("unexpected panic: {}", message)));
            }
            if !message.contains(test.result.as_str()) {
                return Err(TestError::failure(format!(
                    "panicked with {:?} but expected {:?}",
                    message, test.result
                )));
            }
            Ok(())
        }
        Ok(Err(TestError::Conversion(e))) if expects_conversion_error => {
            check_result_str(&test.result, &e.kind().to_string())
        }
        Ok(Err(e)) => Err(e),
        Ok(Ok(actual)) if expects_panic => Err(TestError::failure(format!(
            "got {} but expected a panic",
            actual
        ))),
        Ok(Ok(actual)) if expects_conversion_error => Err(TestError::failure(format!(
            "got {} but expected a conversion error",
            actual
        ))),
        Ok(Ok(actual)) => check_result_str(&test.result, &actual),
    }
}

fn evaluate(session: &Session, operation: &ast::Operation) -> TestResult<String> {
    let result = match operation {
        ast::Operation::Abs(n) => parse_operand(n)?.abs().to_string(),
        ast::Operation::Add(lhs, rhs) => (parse_operand(lhs)? + parse_operand(rhs)?).to_string(),
        ast::Operation::Clamp(n, integral, fractional) => parse_operand(n)?
            .clamp_digits(integral.parse()?, fractional.parse()?)
            .to_string(),
        ast::Operation::Compare(lhs, rhs) => {
            ordering_str(parse_operand(lhs)?.cmp(&parse_operand(rhs)?))
        }
        ast::Operation::CompareAbs(lhs, rhs) => {
            ordering_str(parse_operand(lhs)?.cmp_abs(&parse_operand(rhs)?))
        }
        ast::Operation::Div(lhs, rhs) => parse_operand(lhs)?
            .div_scaled(&parse_operand(rhs)?, session.scale_incr)
            .to_string(),
        ast::Operation::DivRound(lhs, rhs, precision) => parse_operand(lhs)?
            .div_round(&parse_operand(rhs)?, precision.parse()?)
            .to_string(),
        ast::Operation::Divide(lhs, rhs) => (parse_operand(lhs)? / parse_operand(rhs)?).to_string(),
        ast::Operation::IsInteger(n) => bool_str(parse_operand(n)?.is_integer()),
        ast::Operation::Mod(lhs, rhs) => (parse_operand(lhs)? % parse_operand(rhs)?).to_string(),
        ast::Operation::Mul(lhs, rhs) => (parse_operand(lhs)? * parse_operand(rhs)?).to_string(),
        ast::Operation::Neg(n) => (-parse_operand(n)?).to_string(),
        ast::Operation::Parse(n) => {
            if n == "#" {
                return Err(TestError::Unsupported);
            }
            Decimal::from_mysql(n.as_bytes())
                .map_err(TestError::Conversion)?
                .to_string()
        }
        ast::Operation::QuoRem(lhs, rhs, precision) => {
            let (q, r) = parse_operand(lhs)?.quo_rem(&parse_operand(rhs)?, precision.parse()?);
            format!("{},{}", q, r)
        }
        ast::Operation::Rescale(n, exponent) => {
            parse_operand(n)?.rescale(exponent.parse()?).to_string()
        }
        ast::Operation::Round(n, places) => parse_operand(n)?.round(places.parse()?).to_string(),
        ast::Operation::Sub(lhs, rhs) => (parse_operand(lhs)? - parse_operand(rhs)?).to_string(),
        ast::Operation::ToFixed(n, places) => parse_operand(n)?.to_string_fixed(places.parse()?),
        ast::Operation::ToMySql(n) => parse_operand(n)?.to_mysql_string(),
        ast::Operation::ToString(n) => parse_operand(n)?.to_string(),
        ast::Operation::Truncate(n, precision) => {
            parse_operand(n)?.truncate(precision.parse()?).to_string()
        }
    };
    Ok(result)
}

fn parse_operand(operand: &str) -> TestResult<Decimal> {
    if operand == "#" {
        return Err(TestError::Unsupported);
    }
    operand.parse().map_err(TestError::Conversion)
}

fn ordering_str(ordering: Ordering) -> String {
    let s = match ordering {
        Ordering::Less => "-1",
        Ordering::Equal => "0",
        Ordering::Greater => "1",
    };
    s.into()
}

fn bool_str(b: bool) -> String {
    let s = if b { "1" } else { "0" };
    s.into()
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "<non-string panic payload>".into()
    }
}

fn check_result_str(expected: &str, actual: &str) -> TestResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(TestError::failure(format!(
            "got {} but expected {}",
            actual, expected
        )))
    }
}
