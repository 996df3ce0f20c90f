// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use crate::nyxd::{Gas, GasPrice};
pub use cosmrs::Coin as CosmosCoin;
pub use cosmwasm_std::Coin as CosmWasmCoin;
use cosmwasm_std::{Fraction, Uint128};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Serialize, Deserialize, Clone, Copy, Default, Debug, PartialEq, Eq, Error)]
#[error("attempted to combine coins of different denominations")]
pub struct MismatchedDenoms;

// kept independent of the contract types so that the chain client
// does not have to know anything about the contracts it talks to
#[derive(Serialize, Deserialize, Clone, Default, Debug, PartialEq, Eq)]
pub struct Coin {
    pub amount: u128,
    pub denom: String,
}

impl Coin {
    pub fn new<S: Into<String>>(amount: u128, denom: S) -> Self {
        Coin {
            amount,
            denom: denom.into(),
        }
    }

    pub fn try_add(&self, other: &Self) -> Result<Self, MismatchedDenoms> {
        if self.denom != other.denom {
            Err(MismatchedDenoms)
        } else {
            Ok(Coin {
                amount: self.amount.saturating_add(other.amount),
                denom: self.denom.clone(),
            })
        }
    }

    /// Gas limit implied by paying this amount at the provided gas price.
    /// Returns `None` if the denominations differ or the price is zero.
    pub fn implied_gas_limit(&self, gas_price: &GasPrice) -> Option<Gas> {
        if self.denom != gas_price.denom {
            return None;
        }

        let gas_price_inv = gas_price.amount.inv()?;
        let implicit_gas_limit = Uint128::new(self.amount).mul_floor(gas_price_inv);
        Some(u64::try_from(implicit_gas_limit.u128()).unwrap_or(u64::MAX))
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

impl TryFrom<Coin> for CosmosCoin {
    type Error = NyxdError;

    fn try_from(coin: Coin) -> Result<Self, Self::Error> {
        let denom = coin.denom.parse().map_err(|_| NyxdError::MalformedCoin {
            coin_representation: coin.to_string(),
        })?;

        Ok(CosmosCoin {
            denom,
            amount: coin.amount,
        })
    }
}

impl From<CosmosCoin> for Coin {
    fn from(coin: CosmosCoin) -> Self {
        Coin {
            amount: coin.amount,
            denom: coin.denom.to_string(),
        }
    }
}

impl From<Coin> for CosmWasmCoin {
    fn from(coin: Coin) -> Self {
        CosmWasmCoin::new(coin.amount, coin.denom)
    }
}

impl From<CosmWasmCoin> for Coin {
    fn from(coin: CosmWasmCoin) -> Self {
        Coin {
            amount: coin.amount.u128(),
            denom: coin.denom,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoinFromStrError {
    #[error("Missing denominator")]
    MissingDenom,
    #[error("Missing amount or non-digit characters in amount")]
    MissingAmount,
    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] std::num::ParseIntError),
}

impl FromStr for Coin {
    type Err = CoinFromStrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pos = s
            .find(|c: char| !c.is_ascii_digit())
            .ok_or(CoinFromStrError::MissingDenom)?;
        let (amount, denom) = s.split_at(pos);

        if amount.is_empty() {
            return Err(CoinFromStrError::MissingAmount);
        }

        Ok(Coin {
            amount: amount.parse::<u128>()?,
            denom: denom.to_string(),
        })
    }
}

pub trait CoinConverter {
    type Target;

    fn convert_coin(&self) -> Result<Self::Target, NyxdError>;
}

impl CoinConverter for CosmosCoin {
    type Target = CosmWasmCoin;

    fn convert_coin(&self) -> Result<Self::Target, NyxdError> {
        Ok(CosmWasmCoin::new(self.amount, self.denom.to_string()))
    }
}

impl CoinConverter for CosmWasmCoin {
    type Target = CosmosCoin;

    fn convert_coin(&self) -> Result<Self::Target, NyxdError> {
        Coin::from(self.clone()).try_into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parsing_coins() {
        assert_eq!("1234unym".parse::<Coin>().unwrap(), Coin::new(1234, "unym"));
        assert_eq!(
            "unym".parse::<Coin>().unwrap_err(),
            CoinFromStrError::MissingAmount
        );
        assert_eq!(
            "1234".parse::<Coin>().unwrap_err(),
            CoinFromStrError::MissingDenom
        );
        assert_eq!(Coin::new(42, "unyx").to_string(), "42unyx");
    }

    #[test]
    fn adding_coins_requires_matching_denoms() {
        let a = Coin::new(1, "unym");
        let b = Coin::new(2, "unym");
        let c = Coin::new(3, "unyx");
        assert_eq!(a.try_add(&b).unwrap(), Coin::new(3, "unym"));
        assert_eq!(a.try_add(&c), Err(MismatchedDenoms));
    }

    #[test]
    fn implied_gas_limit_rejects_invalid_prices() {
        let amount = Coin::new(123, "unym");
        let zero: GasPrice = "0unym".parse().unwrap();
        assert!(amount.implied_gas_limit(&zero).is_none());

        let other_denom: GasPrice = "0.025unyx".parse().unwrap();
        assert!(amount.implied_gas_limit(&other_denom).is_none());
    }

    #[test]
    fn implied_gas_limit() {
        let gas_price: GasPrice = "0.025unym".parse().unwrap();
        assert_eq!(
            Coin::new(3938, "unym").implied_gas_limit(&gas_price),
            Some(157520)
        );
        assert_eq!(Coin::new(1, "unym").implied_gas_limit(&gas_price), Some(40));

        let gas_price: GasPrice = "1unym".parse().unwrap();
        assert_eq!(
            Coin::new(150_000_000, "unym").implied_gas_limit(&gas_price),
            Some(150_000_000)
        );
    }

    #[test]
    fn gas_price_round_trip_through_implied_limit() {
        let amount = Coin::new(1234567890, "unym");
        let gas_price: GasPrice = "0.025unym".parse().unwrap();
        let gas = amount.implied_gas_limit(&gas_price).unwrap();
        assert_eq!(amount, gas_price.fee_for(gas));
    }

    #[test]
    fn conversion_to_cosmos_coin() {
        let coin = Coin::new(100, "unym");
        let cosmos: CosmosCoin = coin.clone().try_into().unwrap();
        assert_eq!(cosmos.amount, 100);
        assert_eq!(Coin::from(cosmos), coin);

        let invalid = Coin::new(100, "1");
        assert!(CosmosCoin::try_from(invalid).is_err());
    }
}
