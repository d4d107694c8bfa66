//! 18-decimal fixed point numbers, the unit in which pool weights and fee
//! percentages are expressed.

use anyhow::{anyhow, ensure, Result};
use primitive_types::U256;
use std::{fmt, str::FromStr};

/// A fixed point number with 18 decimals of precision, stored as its raw wei
/// value.
#[derive(Clone, Copy, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Bfp(U256);

impl Bfp {
    pub fn zero() -> Self {
        Self(U256::zero())
    }

    /// 1.0 in fixed point units, i.e. `1e18` wei.
    pub fn one() -> Self {
        Self(U256::exp10(18))
    }

    pub fn from_wei(wei: U256) -> Self {
        Self(wei)
    }

    pub fn as_uint256(self) -> U256 {
        self.0
    }
}

impl From<u64> for Bfp {
    fn from(value: u64) -> Self {
        Self(U256::from(value) * U256::exp10(18))
    }
}

impl FromStr for Bfp {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (integer, fraction) = s.split_once('.').unwrap_or((s, ""));
        ensure!(
            !integer.is_empty() && (s.len() == integer.len() || !fraction.is_empty()),
            "malformed fixed point number {s:?}",
        );
        ensure!(
            fraction.len() <= 18,
            "fixed point number {s:?} has more than 18 decimals",
        );

        let parse = |digits: &str| {
            U256::from_dec_str(digits)
                .map_err(|err| anyhow!("invalid decimal digits {digits:?}: {err:?}"))
        };
        let integer = parse(integer)?
            .checked_mul(U256::exp10(18))
            .ok_or_else(|| anyhow!("fixed point number {s:?} too large"))?;
        let fraction = if fraction.is_empty() {
            U256::zero()
        } else {
            parse(fraction)? * U256::exp10(18 - fraction.len())
        };

        integer
            .checked_add(fraction)
            .map(Self)
            .ok_or_else(|| anyhow!("fixed point number {s:?} too large"))
    }
}

impl fmt::Display for Bfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let one = U256::exp10(18);
        let integer = self.0 / one;
        let fraction = self.0 % one;
        if fraction.is_zero() {
            write!(f, "{integer}")
        } else {
            let fraction = format!("{:0>18}", fraction.to_string());
            write!(f, "{}.{}", integer, fraction.trim_end_matches('0'))
        }
    }
}

impl fmt::Debug for Bfp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Bfp({self})")
    }
}

#[macro_export]
macro_rules! bfp {
    ($val:literal) => {
        ($val).parse::<$crate::fixed_point::Bfp>().unwrap()
    };
}
