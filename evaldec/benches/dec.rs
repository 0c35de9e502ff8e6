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

use criterion::{criterion_group, criterion_main, Bencher, Criterion};
use rand::{thread_rng, Rng};

use evaldec::{BigInt, Decimal};

fn random_digits(len: usize, scale: usize) -> String {
    let mut rng = thread_rng();
    let mut s: String = (0..len)
        .map(|i| {
            let lo = if i == 0 { b'1' } else { b'0' };
            char::from(rng.gen_range(lo, b'9' + 1))
        })
        .collect();
    if scale > 0 && scale < len {
        s.insert(len - scale, '.');
    }
    s
}

fn bench_parse_mysql(s: String, b: &mut Bencher) {
    b.iter(|| Decimal::from_mysql(s.as_bytes()))
}

pub fn bench_parse(c: &mut Criterion) {
    let short = random_digits(15, 4);
    c.bench_function("parse_mysql_fast_path", |b| {
        bench_parse_mysql(short.clone(), b)
    });

    let long = random_digits(40, 10);
    c.bench_function("parse_mysql_slow_path", |b| {
        bench_parse_mysql(long.clone(), b)
    });
}

pub fn bench_arith(c: &mut Criterion) {
    let mut rng = thread_rng();
    let x = Decimal::from_parts(BigInt::from(rng.gen::<i64>()), -4);
    let y = Decimal::from_parts(BigInt::from(rng.gen::<i32>() | 1), -2);

    c.bench_function("add", |b| b.iter(|| &x + &y));
    c.bench_function("mul", |b| b.iter(|| &x * &y));
    c.bench_function("div", |b| b.iter(|| &x / &y));
    c.bench_function("div_scaled", |b| b.iter(|| x.div_scaled(&y, 4)));
    c.bench_function("round", |b| b.iter(|| x.round(1)));
}

pub fn bench_format(c: &mut Criterion) {
    let d: Decimal = random_digits(30, 12).parse().expect("valid decimal");
    c.bench_function("to_string", |b| b.iter(|| d.to_string()));
    c.bench_function("to_mysql_string", |b| b.iter(|| d.to_mysql_string()));
    c.bench_function("to_string_fixed", |b| b.iter(|| d.to_string_fixed(2)));
}

criterion_group!(benches, bench_parse, bench_arith, bench_format);
criterion_main!(benches);
