// Copyright 2022-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Conversions between base coins (`unym`) and their human-readable display form (`nym`).

use crate::nyxd::Coin;
use cosmwasm_std::{Decimal, Fraction, Uint128};
use nym_network_defaults::{DenomDetails, DenomDetailsOwned, NymNetworkDetails};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};
use thiserror::Error;

pub type Denom = String;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyError {
    #[error("{0} is not a registered coin denomination")]
    UnknownCoinDenom(Denom),

    #[error("exponent {0} is not supported")]
    UnsupportedExponent(u32),

    #[error("the amount can't be represented in the base denomination without losing precision")]
    LossyCoinConversion,

    #[error("the amount does not fit in a decimal coin")]
    AmountOverflow,
}

// semi-replicates cosmos-sdk's coin metadata (ADR-024)
#[derive(Debug, Clone)]
pub struct DenomUnit {
    pub denom: Denom,
    pub exponent: u32,
}

impl DenomUnit {
    pub fn new(denom: Denom, exponent: u32) -> Self {
        DenomUnit { denom, exponent }
    }
}

#[derive(Debug, Clone)]
pub struct CoinMetadata {
    pub denom_units: Vec<DenomUnit>,
    pub base: Denom,
    pub display: Denom,
}

impl CoinMetadata {
    pub fn new(denom_units: Vec<DenomUnit>, base: Denom, display: Denom) -> Self {
        CoinMetadata {
            denom_units,
            base,
            display,
        }
    }

    pub fn get_exponent(&self, denom: &str) -> Option<u32> {
        self.denom_units
            .iter()
            .find(|denom_unit| denom_unit.denom == denom)
            .map(|denom_unit| denom_unit.exponent)
    }
}

impl From<DenomDetails> for CoinMetadata {
    fn from(denom_details: DenomDetails) -> Self {
        DenomDetailsOwned::from(denom_details).into()
    }
}

impl From<DenomDetailsOwned> for CoinMetadata {
    fn from(denom_details: DenomDetailsOwned) -> Self {
        CoinMetadata::new(
            vec![
                DenomUnit::new(denom_details.base.clone(), 0),
                DenomUnit::new(
                    denom_details.display.clone(),
                    denom_details.display_exponent,
                ),
            ],
            denom_details.base,
            denom_details.display,
        )
    }
}

/// Coins known to the network, keyed by their base denomination.
#[derive(Debug, Default, Clone)]
pub struct RegisteredCoins(HashMap<Denom, CoinMetadata>);

impl RegisteredCoins {
    pub fn default_denoms(network: &NymNetworkDetails) -> Self {
        let mut network_coins = HashMap::new();
        network_coins.insert(
            network.chain_details.mix_denom.base.clone(),
            network.chain_details.mix_denom.clone().into(),
        );
        network_coins.insert(
            network.chain_details.stake_denom.base.clone(),
            network.chain_details.stake_denom.clone().into(),
        );
        RegisteredCoins(network_coins)
    }

    pub fn insert(&mut self, denom: Denom, metadata: CoinMetadata) -> Option<CoinMetadata> {
        self.0.insert(denom, metadata)
    }

    pub fn remove(&mut self, denom: &Denom) -> Option<CoinMetadata> {
        self.0.remove(denom)
    }

    pub fn attempt_convert_to_base_coin(&self, coin: DecCoin) -> Result<Coin, CurrencyError> {
        // already in the base denom
        if self.0.contains_key(&coin.denom) {
            return coin.try_into();
        }

        for registered_coin in self.0.values() {
            if let Some(exponent) = registered_coin.get_exponent(&coin.denom) {
                let amount = try_convert_decimal_to_u128(coin.try_scale_up_value(exponent)?)?;
                return Ok(Coin::new(amount, &registered_coin.base));
            }
        }
        Err(CurrencyError::UnknownCoinDenom(coin.denom))
    }

    pub fn attempt_convert_to_display_dec_coin(
        &self,
        coin: Coin,
    ) -> Result<DecCoin, CurrencyError> {
        for registered_coin in self.0.values() {
            if let Some(exponent) = registered_coin.get_exponent(&coin.denom) {
                let display_exponent = registered_coin
                    .get_exponent(&registered_coin.display)
                    .ok_or_else(|| CurrencyError::UnknownCoinDenom(coin.denom.clone()))?;

                return match exponent.cmp(&display_exponent) {
                    Ordering::Greater => DecCoin::new_scaled_up(
                        coin.amount,
                        &registered_coin.display,
                        exponent - display_exponent,
                    ),
                    Ordering::Equal => DecCoin::new_base(coin.amount, &registered_coin.display),
                    // the common case, e.g. unym (exponent 0) into nym (exponent 6)
                    Ordering::Less => DecCoin::new_scaled_down(
                        coin.amount,
                        &registered_coin.display,
                        display_exponent - exponent,
                    ),
                };
            }
        }

        Err(CurrencyError::UnknownCoinDenom(coin.denom))
    }
}

/// Coin with a decimal amount, mirroring cosmos-sdk's `DecCoin`.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct DecCoin {
    pub denom: Denom,
    pub amount: Decimal,
}

impl DecCoin {
    pub fn new_base<S: Into<String>>(
        amount: impl Into<Uint128>,
        denom: S,
    ) -> Result<Self, CurrencyError> {
        Ok(DecCoin {
            denom: denom.into(),
            amount: Decimal::from_atomics(amount, 0)
                .map_err(|_| CurrencyError::AmountOverflow)?,
        })
    }

    pub fn zero<S: Into<String>>(denom: S) -> Self {
        DecCoin {
            denom: denom.into(),
            amount: Decimal::zero(),
        }
    }

    pub fn new_scaled_up<S: Into<String>>(
        base_amount: impl Into<Uint128>,
        denom: S,
        exponent: u32,
    ) -> Result<Self, CurrencyError> {
        let base = Self::new_base(base_amount, denom)?;
        Ok(DecCoin {
            amount: base.try_scale_up_value(exponent)?,
            denom: base.denom,
        })
    }

    pub fn new_scaled_down<S: Into<String>>(
        base_amount: impl Into<Uint128>,
        denom: S,
        exponent: u32,
    ) -> Result<Self, CurrencyError> {
        let base = Self::new_base(base_amount, denom)?;
        Ok(DecCoin {
            amount: base.try_scale_down_value(exponent)?,
            denom: base.denom,
        })
    }

    pub fn try_scale_down_value(&self, exponent: u32) -> Result<Decimal, CurrencyError> {
        try_scale_down_decimal(self.amount, exponent)
    }

    pub fn try_scale_up_value(&self, exponent: u32) -> Result<Decimal, CurrencyError> {
        try_scale_up_decimal(self.amount, exponent)
    }
}

fn power_of_ten(exponent: u32) -> Result<Uint128, CurrencyError> {
    10u128
        .checked_pow(exponent)
        .map(Uint128::new)
        .ok_or(CurrencyError::UnsupportedExponent(exponent))
}

pub fn try_scale_down_decimal(dec: Decimal, exponent: u32) -> Result<Decimal, CurrencyError> {
    let denominator = dec
        .denominator()
        .checked_mul(power_of_ten(exponent)?)
        .map_err(|_| CurrencyError::UnsupportedExponent(exponent))?;

    Decimal::checked_from_ratio(dec.numerator(), denominator)
        .map_err(|_| CurrencyError::UnsupportedExponent(exponent))
}

pub fn try_scale_up_decimal(dec: Decimal, exponent: u32) -> Result<Decimal, CurrencyError> {
    let denominator = dec
        .denominator()
        .checked_div(power_of_ten(exponent)?)
        .map_err(|_| CurrencyError::UnsupportedExponent(exponent))?;
    if denominator.is_zero() {
        return Err(CurrencyError::UnsupportedExponent(exponent));
    }

    Decimal::checked_from_ratio(dec.numerator(), denominator)
        .map_err(|_| CurrencyError::AmountOverflow)
}

pub fn try_convert_decimal_to_u128(dec: Decimal) -> Result<u128, CurrencyError> {
    // decimals always have a non-zero denominator
    let whole = dec.numerator() / dec.denominator();
    let fractional = dec.numerator() % dec.denominator();

    if !fractional.is_zero() {
        return Err(CurrencyError::LossyCoinConversion);
    }
    Ok(whole.u128())
}

impl Display for DecCoin {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.denom)
    }
}

// assumes the same denomination
impl TryFrom<DecCoin> for Coin {
    type Error = CurrencyError;

    fn try_from(value: DecCoin) -> Result<Self, Self::Error> {
        Ok(Coin {
            amount: try_convert_decimal_to_u128(value.amount)?,
            denom: value.denom,
        })
    }
}
