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

use serde::{Deserialize, Serialize};
use serde_json::json;
use serde_test::{assert_de_tokens, assert_tokens, Token};

use evaldec::Decimal;

#[test]
fn test_serde() {
    let d: Decimal = "-12.340".parse().unwrap();
    assert_tokens(&d, &[Token::Str("-12.340")]);

    let d: Decimal = "1e3".parse().unwrap();
    assert_tokens(&Decimal::from(1000), &[Token::Str("1000")]);
    assert_de_tokens(&d, &[Token::Str("1e3")]);
    assert_de_tokens(&Decimal::from(-7), &[Token::I64(-7)]);
    assert_de_tokens(&Decimal::from(u64::MAX), &[Token::U64(u64::MAX)]);

    // Ensure incompatible values do not work.
    for (json, err) in vec![
        (
            json!(true),
            "invalid type: boolean `true`, expected a decimal string or an integer",
        ),
        (
            json!(0.5f32),
            "invalid type: floating point `0.5`, expected a decimal string or an integer",
        ),
        (
            json!("1.2.3"),
            "invalid value: string \"1.2.3\", expected a decimal string or an integer",
        ),
    ] {
        assert_eq!(
            serde_json::from_value::<Decimal>(json)
                .unwrap_err()
                .to_string(),
            err
        );
    }

    #[derive(Debug, PartialEq, Deserialize, Serialize)]
    struct Price {
        amount: Decimal,
    }

    let price: Price =
        serde_json::from_str(r#"{"amount": "19.990"}"#).expect("deserialization works");
    assert_eq!(price.amount.to_string(), "19.990");
    assert_eq!(
        serde_json::to_string(&price).expect("serialization works"),
        r#"{"amount":"19.990"}"#
    );
    let price: Price = serde_json::from_str(r#"{"amount": 20}"#).expect("deserialization works");
    assert_eq!(price.amount, Decimal::from(20));
}
