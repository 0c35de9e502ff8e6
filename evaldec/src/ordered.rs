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

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::Zero;

use crate::decimal::Decimal;

/// Decimals compare by numeric value, so `1.2` and `1.20` are equal even
/// though their representations differ.
impl Ord for Decimal {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_sign = self.sign().cmp(&other.sign());
        if by_sign != Ordering::Equal {
            return by_sign;
        }
        if self.exp == other.exp {
            return self.value.cmp(&other.value);
        }
        let (lhs, rhs) = self.align(other);
        lhs.value.cmp(&rhs.value)
    }
}

impl PartialOrd for Decimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Decimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Decimal {}

impl Hash for Decimal {
    fn hash<H>(&self, state: &mut H)
    where
        H: Hasher,
    {
        let (value, exp) = self.reduce();
        value.hash(state);
        exp.hash(state);
    }
}

impl Decimal {
    /// Compares the absolute values of `self` and `other`.
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use evaldec::Decimal;
    ///
    /// let a = Decimal::new(-25, -1);
    /// let b = Decimal::from(2);
    /// assert_eq!(a.cmp(&b), Ordering::Less);
    /// assert_eq!(a.cmp_abs(&b), Ordering::Greater);
    /// ```
    pub fn cmp_abs(&self, other: &Decimal) -> Ordering {
        if self.exp == other.exp {
            return self.value.magnitude().cmp(other.value.magnitude());
        }
        let (lhs, rhs) = self.align(other);
        lhs.value.magnitude().cmp(rhs.value.magnitude())
    }

    /// Strips trailing zeros from the significand, yielding the same
    /// representation for every decimal with the same value.
    fn reduce(&self) -> (BigInt, i64) {
        if self.value.is_zero() {
            return (BigInt::zero(), 0);
        }
        let ten = BigInt::from(10u8);
        let mut value = self.value.clone();
        let mut exp = i64::from(self.exp);
        loop {
            let (q, r) = value.div_rem(&ten);
            if !r.is_zero() {
                return (value, exp);
            }
            value = q;
            exp += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;

    use super::*;

    fn hash(d: &Decimal) -> u64 {
        let mut hasher = DefaultHasher::new();
        d.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_reduce() {
        assert_eq!(Decimal::new(1200, -3).reduce(), (BigInt::from(12), -1));
        assert_eq!(Decimal::new(0, -7).reduce(), (BigInt::from(0), 0));
        assert_eq!(Decimal::new(-7, 2).reduce(), (BigInt::from(-7), 2));
    }

    #[test]
    fn test_equal_values_hash_equal() {
        let a = Decimal::new(12, -1);
        let b = Decimal::new(1200, -3);
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
        assert_eq!(hash(&Decimal::ZERO), hash(&Decimal::new(0, -4)));
    }

    #[test]
    fn test_cmp_across_signs_and_exponents() {
        let values = [
            Decimal::new(-5, 3),
            Decimal::new(-15, -1),
            Decimal::ZERO,
            Decimal::new(1, -9),
            Decimal::new(10, -1),
            Decimal::new(2, 0),
            Decimal::new(1, 4),
        ];
        for (i, a) in values.iter().enumerate() {
            for (j, b) in values.iter().enumerate() {
                assert_eq!(a.cmp(b), i.cmp(&j), "{} vs {}", a, b);
            }
        }
    }

    #[test]
    fn test_cmp_abs_zero() {
        assert_eq!(Decimal::ZERO.cmp_abs(&Decimal::new(0, -3)), Ordering::Equal);
        assert_eq!(Decimal::new(-1, -3).cmp_abs(&Decimal::ZERO), Ordering::Greater);
    }
}
