// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use crate::nyxd::{Coin, Gas};
use cosmwasm_std::{Decimal, Uint128};
use nym_network_defaults::{ChainDetails, DEFAULT_GAS_PRICE_AMOUNT};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::ops::Mul;
use std::str::FromStr;

/// A gas price, i.e. the base coin amount paid per unit of gas.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasPrice {
    pub amount: Decimal,
    pub denom: String,
}

impl GasPrice {
    pub fn new_with_default_price<S: Into<String>>(denom: S) -> Result<Self, NyxdError> {
        let denom = denom.into();
        format!("{DEFAULT_GAS_PRICE_AMOUNT}{denom}").parse()
    }

    pub fn default_for_chain(chain_details: &ChainDetails) -> Result<Self, NyxdError> {
        Self::new_with_default_price(&chain_details.mix_denom.base)
    }

    /// Fee to pay for the provided gas limit, rounded up to the nearest base unit.
    pub fn fee_for(&self, gas_limit: Gas) -> Coin {
        let amount = Uint128::from(gas_limit)
            .checked_mul_ceil(self.amount)
            .unwrap_or(Uint128::MAX);
        Coin::new(amount.u128(), &self.denom)
    }
}

impl Mul<Gas> for &GasPrice {
    type Output = Coin;

    fn mul(self, gas_limit: Gas) -> Self::Output {
        self.fee_for(gas_limit)
    }
}

impl Display for GasPrice {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl FromStr for GasPrice {
    type Err = NyxdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || NyxdError::MalformedGasPrice(s.to_string());

        let s = s.trim();
        let pos = s
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(malformed)?;
        let (amount, denom) = s.split_at(pos);
        if amount.is_empty() {
            return Err(malformed());
        }

        let amount = Decimal::from_str(amount).map_err(|_| malformed())?;
        Ok(GasPrice {
            amount,
            denom: denom.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_gas_prices() {
        let price: GasPrice = "0.025unym".parse().unwrap();
        assert_eq!(price.amount, Decimal::from_str("0.025").unwrap());
        assert_eq!(price.denom, "unym");

        let price: GasPrice = "1unyx".parse().unwrap();
        assert_eq!(price.amount, Decimal::one());

        assert!("unym".parse::<GasPrice>().is_err());
        assert!("0.025".parse::<GasPrice>().is_err());
        assert!("0.0.25unym".parse::<GasPrice>().is_err());
    }

    #[test]
    fn default_price() {
        let price = GasPrice::new_with_default_price("unym").unwrap();
        assert_eq!(price.to_string(), "0.025unym");
    }

    #[test]
    fn fee_is_rounded_up() {
        let price: GasPrice = "0.025unym".parse().unwrap();
        assert_eq!(price.fee_for(100_000), Coin::new(2500, "unym"));
        assert_eq!(price.fee_for(1), Coin::new(1, "unym"));
        assert_eq!(&price * 0, Coin::new(0, "unym"));
    }
}
