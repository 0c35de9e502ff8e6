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

use std::panic;
use std::path::Path;

use dectest::ast;
use dectest::parse;
use dectest::run::{self, Outcome, Report};

#[derive(Default)]
struct CountingReporter {
    current: Option<String>,
    failures: Vec<String>,
    passes: usize,
    skips: usize,
}

impl Report for CountingReporter {
    fn start_file(&mut self, _: &ast::File) {}

    fn finish_file(&mut self) {}

    fn start_test(&mut self, test: &ast::Test) {
        self.current = Some(test.id.clone());
    }

    fn finish_test(&mut self, outcome: Outcome) {
        let id = self.current.take().unwrap_or_default();
        match outcome {
            Outcome::Passed => self.passes += 1,
            Outcome::Failed { cause } => self.failures.push(format!("{}: {}", id, cause)),
            Outcome::Skipped => self.skips += 1,
        }
    }
}

#[test]
fn test_testdata() {
    // Expected panics are part of the test data.
    panic::set_hook(Box::new(|_| {}));

    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("testdata")
        .join("all.dectest");
    let file = parse::parse_file(&path).unwrap();
    let mut reporter = CountingReporter::default();
    run::run_file(&mut reporter, &file).unwrap();

    let _ = panic::take_hook();
    assert!(
        reporter.failures.is_empty(),
        "failures:\n{}",
        reporter.failures.join("\n")
    );
    assert!(reporter.passes > 100);
    assert_eq!(reporter.skips, 1);
}
