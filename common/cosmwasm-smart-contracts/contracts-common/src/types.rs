// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_std::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

pub type IdentityKey = String;
pub type IdentityKeyRef<'a> = &'a str;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractsCommonError {
    #[error("provided percent value ({0}) is greater than 100%")]
    InvalidPercent(Decimal),
}

/// Percent represents a value between 0 and 100%
/// (i.e. between 0.0 and 1.0)
#[derive(
    Copy, Clone, Default, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(try_from = "Decimal")]
pub struct Percent(Decimal);

impl Percent {
    pub fn new(value: Decimal) -> Result<Self, ContractsCommonError> {
        if value > Decimal::one() {
            Err(ContractsCommonError::InvalidPercent(value))
        } else {
            Ok(Percent(value))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::zero()
    }

    pub fn zero() -> Self {
        Percent(Decimal::zero())
    }

    pub fn hundred() -> Self {
        Percent(Decimal::one())
    }

    pub fn from_percentage_value(value: u64) -> Result<Self, ContractsCommonError> {
        Percent::new(Decimal::percent(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Rounds the percentage to the nearest whole percent, i.e. 12.5% becomes 13.
    pub fn round_to_integer(&self) -> u8 {
        let hundred = Decimal::from_ratio(100u32, 1u32);
        let rounded = (self.0 * hundred + Decimal::percent(50)).to_uint_floor();
        u8::try_from(rounded.u128()).unwrap_or(100)
    }
}

impl Display for Percent {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let adjusted = Decimal::from_ratio(100u32, 1u32) * self.0;
        write!(f, "{adjusted}%")
    }
}

impl TryFrom<Decimal> for Percent {
    type Error = ContractsCommonError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Percent::new(value)
    }
}

impl From<Percent> for Decimal {
    fn from(percent: Percent) -> Self {
        percent.0
    }
}

/// Build information reported by a contract.
/// Older contract releases omit some of the fields, those default to empty strings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ContractBuildInformation {
    /// Provides the build timestamp, for example `2021-02-23T20:14:46.558472672+00:00`.
    pub build_timestamp: String,

    /// Provides the build version, for example `0.1.0-9-g46f83e1`.
    pub build_version: String,

    /// Provides the hash of the commit used for the build, for example `46f83e112520533338245862d366f6a02cef07d4`.
    pub commit_sha: String,

    /// Provides the timestamp of the commit used for the build, for example `2021-02-23T08:08:02-05:00`.
    pub commit_timestamp: String,

    /// Provides the name of the git branch that was used for the build, for example `master`.
    pub commit_branch: String,

    /// Provides the rustc version that was used for the build, for example `1.52.0-nightly`.
    pub rustc_version: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn percent_rejects_values_above_one() {
        assert!(Percent::new(Decimal::from_str("1.0001").unwrap()).is_err());
        assert!(Percent::new(Decimal::one()).is_ok());
        assert!(Percent::from_percentage_value(101).is_err());
    }

    #[test]
    fn percent_display() {
        let p = Percent::from_percentage_value(10).unwrap();
        assert_eq!(p.to_string(), "10%");

        let p = Percent::new(Decimal::from_str("0.125").unwrap()).unwrap();
        assert_eq!(p.to_string(), "12.5%");
    }

    #[test]
    fn percent_rounding() {
        let p = Percent::new(Decimal::from_str("0.125").unwrap()).unwrap();
        assert_eq!(p.round_to_integer(), 13);

        let p = Percent::new(Decimal::from_str("0.1249").unwrap()).unwrap();
        assert_eq!(p.round_to_integer(), 12);

        assert_eq!(Percent::hundred().round_to_integer(), 100);
        assert_eq!(Percent::zero().round_to_integer(), 0);
    }

    #[test]
    fn percent_deserialization_is_validated() {
        let ok: Percent = serde_json::from_str("\"0.2\"").unwrap();
        assert_eq!(ok, Percent::from_percentage_value(20).unwrap());

        let bad: Result<Percent, _> = serde_json::from_str("\"1.2\"");
        assert!(bad.is_err());
    }
}
