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
use std::panic;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use dectest::ast;
use dectest::parse;
use dectest::run::{self, Outcome, Report};

/// Runs decimal test-case files and reports the outcome of every test.
#[derive(Parser, Debug)]
#[command(name = "dectest")]
struct Args {
    /// Print each test's operation and expected result.
    #[arg(short, long)]
    verbose: bool,

    /// Test-case files to run.
    #[arg(required = true)]
    files: Vec<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let default_filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();

    // Panics inside tests are caught and reported as outcomes.
    panic::set_hook(Box::new(|_| {}));

    match run(args) {
        Ok(true) => (),
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

/// Runs every file, returning whether all tests passed or were skipped.
fn run(args: Args) -> Result<bool, Box<dyn Error>> {
    let mut reporter = ConsoleReporter::new(args.verbose);

    for path in &args.files {
        let file = parse::parse_file(path)?;
        run::run_file(&mut reporter, &file)?;
    }

    println!("PASS {}", reporter.passes);
    println!("FAIL {}", reporter.failures);
    println!("SKIP {}", reporter.skips);

    Ok(reporter.failures == 0)
}

struct ConsoleReporter {
    failures: usize,
    passes: usize,
    skips: usize,
    verbose: bool,
}

impl ConsoleReporter {
    fn new(verbose: bool) -> ConsoleReporter {
        ConsoleReporter {
            failures: 0,
            passes: 0,
            skips: 0,
            verbose,
        }
    }
}

impl Report for ConsoleReporter {
    fn start_file(&mut self, file: &ast::File) {
        println!("==> {}", file.path.display())
    }

    fn finish_file(&mut self) {}

    fn start_test(&mut self, test: &ast::Test) {
        if self.verbose {
            print!("{} {} -> {}", test.id, test.operation, test.result);
            if !test.conditions.is_empty() {
                let conditions: Vec<_> = test.conditions.iter().map(|c| c.to_string()).collect();
                print!(" ({})", conditions.join(", "));
            }
            println!();
        } else {
            print!("{} ", test.id);
        }
    }

    fn finish_test(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Passed => self.passes += 1,
            Outcome::Failed { .. } => self.failures += 1,
            Outcome::Skipped => self.skips += 1,
        }
        match outcome {
            Outcome::Passed => println!("PASS"),
            Outcome::Failed { cause } => println!("FAIL: {}", cause),
            Outcome::Skipped => println!("SKIP"),
        }
        if self.verbose {
            println!()
        }
    }
}
