// Copyright 2020 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Explicit network configuration for the Nyx chain clients: chain prefix and denominations,
//! the nyxd and nym-api endpoints as well as the addresses of the mixnet and vesting contracts.
//!
//! Nothing in here is consulted implicitly. Clients only ever see the values
//! that were put into a [`NymNetworkDetails`] and handed to them during construction.

#[cfg(feature = "network")]
use schemars::JsonSchema;
#[cfg(feature = "network")]
use serde::{Deserialize, Serialize};

#[cfg(all(feature = "env", feature = "network"))]
pub mod env_setup;
pub mod mainnet;
#[cfg(feature = "network")]
pub mod network;
pub mod qa;
#[cfg(feature = "env")]
pub mod var_names;

#[cfg(all(feature = "env", feature = "network"))]
pub use env_setup::*;
#[cfg(feature = "network")]
pub use network::*;

/// Default amount of the fee denom paid per unit of gas.
pub const DEFAULT_GAS_PRICE_AMOUNT: f64 = 0.025;

pub const NYM_API_VERSION: &str = "v1";
pub const DEFAULT_NYM_API_PORT: u16 = 8080;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DenomDetails {
    pub base: &'static str,
    pub display: &'static str,
    // i.e. display_amount * 10^display_exponent = base_amount
    pub display_exponent: u32,
}

impl DenomDetails {
    pub const fn new(base: &'static str, display: &'static str, display_exponent: u32) -> Self {
        DenomDetails {
            base,
            display,
            display_exponent,
        }
    }
}

#[cfg_attr(feature = "network", derive(Serialize, Deserialize, JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DenomDetailsOwned {
    pub base: String,
    pub display: String,
    pub display_exponent: u32,
}

impl From<DenomDetails> for DenomDetailsOwned {
    fn from(value: DenomDetails) -> Self {
        DenomDetailsOwned {
            base: value.base.to_owned(),
            display: value.display.to_owned(),
            display_exponent: value.display_exponent,
        }
    }
}

#[cfg_attr(feature = "network", derive(Serialize, Deserialize, JsonSchema))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorDetails {
    // it is assumed those values are always valid since they're being provided in our defaults file
    pub nyxd_url: String,

    // the REST status api attached to the validator, if it runs one
    pub api_url: Option<String>,
}

impl ValidatorDetails {
    pub fn new<S: Into<String>>(nyxd_url: S, api_url: Option<S>) -> Self {
        ValidatorDetails {
            nyxd_url: nyxd_url.into(),
            api_url: api_url.map(Into::into),
        }
    }

    pub fn new_nyxd_only<S: Into<String>>(nyxd_url: S) -> Self {
        ValidatorDetails {
            nyxd_url: nyxd_url.into(),
            api_url: None,
        }
    }

    #[cfg(feature = "network")]
    pub fn nyxd_url(&self) -> Result<url::Url, url::ParseError> {
        self.nyxd_url.parse()
    }

    #[cfg(feature = "network")]
    pub fn api_url(&self) -> Option<Result<url::Url, url::ParseError>> {
        self.api_url.as_ref().map(|url| url.parse())
    }
}
