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

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::debug;

use crate::ast;
use crate::lex::LexBuf;

struct Context<'a> {
    path: &'a Path,
}

pub fn parse_file(path: &Path) -> Result<ast::File, Box<dyn Error>> {
    debug!(path = %path.display(), "parsing test-case file");
    let cx = &Context { path };
    let f = BufReader::new(File::open(path)?);
    let mut lines = vec![];
    for (i, line) in f.lines().enumerate() {
        let line = line?;
        let mut buf = LexBuf::new(&line);
        match parse_line(cx, &mut buf) {
            Ok(None) => (),
            Ok(Some(line)) => lines.push(line),
            Err(e) => return Err(format!("parsing line {}: {}", i + 1, e).into()),
        }
    }
    Ok(ast::File {
        path: path.to_path_buf(),
        lines,
    })
}

fn parse_line(cx: &Context, buf: &mut LexBuf) -> Result<Option<ast::Line>, Box<dyn Error>> {
    let token = match parse_token(buf) {
        None => return Ok(None),
        Some(token) => token,
    };
    if let Some(keyword) = token.strip_suffix(':') {
        let value = require_token(buf, "value")?;
        Ok(Some(ast::Line::Directive(parse_directive(
            cx, keyword, value,
        )?)))
    } else {
        let id = token;
        let operation = parse_operation(buf)?;
        if require_token(buf, "->")? != "->" {
            return Err("missing \"->\" token".into());
        }
        let result = require_token(buf, "result")?;
        let mut conditions = vec![];
        while let Some(condition) = parse_token(buf) {
            conditions.push(condition.parse()?);
        }
        Ok(Some(ast::Line::Test(ast::Test {
            id,
            operation,
            result,
            conditions,
        })))
    }
}

fn require_token(buf: &mut LexBuf, name: &str) -> Result<String, Box<dyn Error>> {
    parse_token(buf).ok_or_else(|| format!("missing \"{}\" token", name).into())
}

fn parse_token(buf: &mut LexBuf) -> Option<String> {
    buf.skip_blanks();

    if buf.consume("--") {
        while buf.next().is_some() {}
        return None;
    }

    match buf.peek() {
        Some(quote @ '\'') | Some(quote @ '"') => {
            buf.next();
            parse_quoted_token(buf, quote)
        }
        _ => parse_unquoted_token(buf),
    }
}

fn parse_unquoted_token(buf: &mut LexBuf) -> Option<String> {
    let mut token = String::new();
    while let Some(ch) = buf.peek() {
        match ch {
            ' ' | '\t' => break,
            ch => {
                token.push(ch);
                buf.next();
            }
        }
    }
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Reads a token up to the closing `quote`. A doubled quote stands for a
/// literal quote character.
fn parse_quoted_token(buf: &mut LexBuf, quote: char) -> Option<String> {
    let mut token = String::new();
    while let Some(ch) = buf.next() {
        if ch == quote {
            if buf.peek() == Some(quote) {
                token.push(quote);
                buf.next();
            } else {
                break;
            }
        } else {
            token.push(ch);
        }
    }
    Some(token)
}

fn parse_directive(
    cx: &Context,
    keyword: &str,
    value: String,
) -> Result<ast::Directive, Box<dyn Error>> {
    match keyword.to_lowercase().as_str() {
        "dectest" => {
            let path = cx.path.with_file_name(value).with_extension("dectest");
            let file =
                parse_file(&path).map_err(|e| format!("opening {}: {}", path.display(), e))?;
            Ok(ast::Directive::DecTest(file))
        }
        "divisionprecision" => Ok(ast::Directive::DivisionPrecision(value.parse()?)),
        "scaleincrement" => Ok(ast::Directive::ScaleIncrement(value.parse()?)),
        "version" => Ok(ast::Directive::Version(value)),
        _ => Err(format!("unknown directive \"{}\"", keyword).into()),
    }
}

fn parse_operation(buf: &mut LexBuf) -> Result<ast::Operation, Box<dyn Error>> {
    let operation = require_token(buf, "operation")?;
    let mut op = || require_token(buf, "operand");
    match operation.to_lowercase().as_str() {
        "abs" => Ok(ast::Operation::Abs(op()?)),
        "add" => Ok(ast::Operation::Add(op()?, op()?)),
        "clamp" => Ok(ast::Operation::Clamp(op()?, op()?, op()?)),
        "compare" => Ok(ast::Operation::Compare(op()?, op()?)),
        "compareabs" => Ok(ast::Operation::CompareAbs(op()?, op()?)),
        "div" => Ok(ast::Operation::Div(op()?, op()?)),
        "divide" => Ok(ast::Operation::Divide(op()?, op()?)),
        "divround" => Ok(ast::Operation::DivRound(op()?, op()?, op()?)),
        "isinteger" => Ok(ast::Operation::IsInteger(op()?)),
        "mod" => Ok(ast::Operation::Mod(op()?, op()?)),
        "mul" => Ok(ast::Operation::Mul(op()?, op()?)),
        "neg" => Ok(ast::Operation::Neg(op()?)),
        "parse" => Ok(ast::Operation::Parse(op()?)),
        "quorem" => Ok(ast::Operation::QuoRem(op()?, op()?, op()?)),
        "rescale" => Ok(ast::Operation::Rescale(op()?, op()?)),
        "round" => Ok(ast::Operation::Round(op()?, op()?)),
        "sub" => Ok(ast::Operation::Sub(op()?, op()?)),
        "tofixed" => Ok(ast::Operation::ToFixed(op()?, op()?)),
        "tomysql" => Ok(ast::Operation::ToMySql(op()?)),
        "tostring" => Ok(ast::Operation::ToString(op()?)),
        "truncate" => Ok(ast::Operation::Truncate(op()?, op()?)),
        _ => Err(format!("unknown operation \"{}\"", operation).into()),
    }
}

impl FromStr for ast::Condition {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<ast::Condition, Box<dyn Error>> {
        match s.to_lowercase().as_str() {
            "conversion_syntax" => Ok(ast::Condition::ConversionSyntax),
            "panic" => Ok(ast::Condition::Panic),
            _ => Err(format!("unknown condition \"{}\"", s).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Option<ast::Line>, Box<dyn Error>> {
        let cx = &Context {
            path: Path::new("inline.dectest"),
        };
        parse_line(cx, &mut LexBuf::new(line))
    }

    #[test]
    fn test_parse_test_line() {
        let line = parse("dvr001 divround 1 '-8' 2 -> -0.13 -- rounds away from zero").unwrap();
        match line {
            Some(ast::Line::Test(test)) => {
                assert_eq!(test.id, "dvr001");
                assert_eq!(test.operation.to_string(), "divround 1 -8 2");
                assert_eq!(test.result, "-0.13");
                assert!(test.conditions.is_empty());
            }
            other => panic!("unexpected line: {:?}", other),
        }
    }

    #[test]
    fn test_parse_conditions_and_quotes() {
        let line = parse("pe001 parse \"1.2.3\" -> 'too many .s' Conversion_Syntax").unwrap();
        match line {
            Some(ast::Line::Test(test)) => {
                assert_eq!(test.result, "too many .s");
                assert_eq!(test.conditions, vec![ast::Condition::ConversionSyntax]);
            }
            other => panic!("unexpected line: {:?}", other),
        }

        match parse("q001 tostring 'it''s' -> x").unwrap() {
            Some(ast::Line::Test(test)) => assert_eq!(test.operation.to_string(), "tostring it's"),
            other => panic!("unexpected line: {:?}", other),
        }
    }

    #[test]
    fn test_parse_directives() {
        match parse("scaleIncrement: 6").unwrap() {
            Some(ast::Line::Directive(ast::Directive::ScaleIncrement(6))) => (),
            other => panic!("unexpected line: {:?}", other),
        }
        assert!(parse("   -- only a comment").unwrap().is_none());
        assert!(parse("").unwrap().is_none());
    }

    #[test]
    fn test_parse_errors() {
        for (line, err) in [
            ("x001 frobnicate 1 -> 1", "unknown operation \"frobnicate\""),
            ("x001 add 1", "missing \"operand\" token"),
            ("x001 add 1 2 => 3", "missing \"->\" token"),
            ("x001 add 1 2 -> 3 inexact", "unknown condition \"inexact\""),
            ("rounding: half_even", "unknown directive \"rounding\""),
        ] {
            assert_eq!(parse(line).unwrap_err().to_string(), err, "line {:?}", line);
        }
    }
}
