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

//! A runner for decimal test-case files.
//!
//! A test-case file is a sequence of directives, which configure how the
//! following tests are evaluated, and tests, each of which applies one
//! operation to textual operands and states the expected textual result.
//! See `testdata/` for examples.

pub mod ast;
pub mod lex;
pub mod parse;
pub mod run;
