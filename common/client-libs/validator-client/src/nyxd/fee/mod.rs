// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use crate::nyxd::{Coin, Gas, GasPrice};
use cosmrs::tx;
use std::fmt::{Display, Formatter};

pub mod gas_price;

pub type GasAdjustment = f32;

pub const DEFAULT_SIMULATED_GAS_MULTIPLIER: GasAdjustment = 1.5;

#[derive(Debug, Clone, PartialEq)]
pub enum Fee {
    Manual(tx::Fee),
    Auto(Option<GasAdjustment>),
}

impl Display for Fee {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Fee::Manual(fee) => {
                write!(f, "Fee in manual mode with ")?;
                for fee in &fee.amount {
                    write!(f, "{}{} paid in fees, ", fee.amount, fee.denom)?;
                }
                write!(f, "{} set as gas limit", fee.gas_limit)
            }
            Fee::Auto(Some(multiplier)) => {
                write!(f, "Fee in auto mode with {multiplier} simulated multiplier")
            }
            Fee::Auto(None) => write!(f, "Fee in auto mode with no custom simulated multiplier"),
        }
    }
}

impl Fee {
    /// Manual fee paying exactly `fee`, with the gas limit implied by the gas price.
    pub fn manual_with_gas_price(fee: Coin, gas_price: &GasPrice) -> Result<Self, NyxdError> {
        let gas_limit = fee
            .implied_gas_limit(gas_price)
            .ok_or_else(|| NyxdError::MalformedGasPrice(gas_price.to_string()))?;

        Ok(Fee::Manual(tx::Fee::from_amount_and_gas(
            fee.try_into()?,
            gas_limit,
        )))
    }

    pub fn try_get_manual_amount(&self) -> Option<Vec<Coin>> {
        match self {
            Fee::Manual(tx_fee) => Some(tx_fee.amount.iter().cloned().map(Into::into).collect()),
            Fee::Auto(_) => None,
        }
    }
}

impl From<tx::Fee> for Fee {
    fn from(fee: tx::Fee) -> Self {
        Fee::Manual(fee)
    }
}

impl From<GasAdjustment> for Fee {
    fn from(multiplier: GasAdjustment) -> Self {
        Fee::Auto(Some(multiplier))
    }
}

impl Default for Fee {
    fn default() -> Self {
        Fee::Auto(Some(DEFAULT_SIMULATED_GAS_MULTIPLIER))
    }
}

pub trait GasAdjustable {
    fn adjust_gas(&self, adjustment: GasAdjustment) -> Self;
}

impl GasAdjustable for Gas {
    fn adjust_gas(&self, adjustment: GasAdjustment) -> Self {
        if adjustment == 1.0 {
            *self
        } else {
            let adjusted = (*self as f64 * adjustment as f64).ceil();
            adjusted as u64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_fee_is_simulated() {
        assert_eq!(Fee::default(), Fee::Auto(Some(1.5)));
        assert_eq!(Fee::from(1.3), Fee::Auto(Some(1.3)));
    }

    #[test]
    fn gas_adjustment() {
        assert_eq!(100_000u64.adjust_gas(1.0), 100_000);
        assert_eq!(100_000u64.adjust_gas(1.5), 150_000);
        assert_eq!(3u64.adjust_gas(1.5), 5);
    }

    #[test]
    fn manual_fee_from_gas_price() {
        let gas_price: GasPrice = "0.025unym".parse().unwrap();
        let fee = Fee::manual_with_gas_price(Coin::new(2500, "unym"), &gas_price).unwrap();
        match &fee {
            Fee::Manual(tx_fee) => assert_eq!(tx_fee.gas_limit, 100_000),
            Fee::Auto(_) => panic!("expected manual fee"),
        }
        assert_eq!(
            fee.try_get_manual_amount(),
            Some(vec![Coin::new(2500, "unym")])
        );

        let mismatched: GasPrice = "0.025unyx".parse().unwrap();
        assert!(Fee::manual_with_gas_price(Coin::new(2500, "unym"), &mismatched).is_err());
    }
}
