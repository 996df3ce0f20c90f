// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::{mainnet, qa, DenomDetails, DenomDetailsOwned, ValidatorDetails};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum NetworkDefaultsError {
    #[error("the provided network '{0}' was invalid")]
    MalformedNetworkProvided(String),

    #[error("environment variable '{0}' is not set")]
    MissingEnvVariable(&'static str),

    #[error("environment variable '{name}' has a malformed value: '{value}'")]
    MalformedEnvVariable { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ChainDetails {
    pub bech32_account_prefix: String,
    pub mix_denom: DenomDetailsOwned,
    pub stake_denom: DenomDetailsOwned,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NymContracts {
    pub mixnet_contract_address: Option<String>,
    pub vesting_contract_address: Option<String>,
}

/// Everything a client needs to know about a network before it can talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NymNetworkDetails {
    pub network_name: String,
    pub chain_details: ChainDetails,
    pub endpoints: Vec<ValidatorDetails>,
    pub contracts: NymContracts,
}

impl NymNetworkDetails {
    pub fn new_empty() -> Self {
        NymNetworkDetails {
            network_name: String::new(),
            chain_details: ChainDetails {
                bech32_account_prefix: String::new(),
                mix_denom: DenomDetailsOwned {
                    base: String::new(),
                    display: String::new(),
                    display_exponent: 0,
                },
                stake_denom: DenomDetailsOwned {
                    base: String::new(),
                    display: String::new(),
                    display_exponent: 0,
                },
            },
            endpoints: Vec::new(),
            contracts: NymContracts::default(),
        }
    }

    pub fn new_mainnet() -> Self {
        NymNetworkDetails {
            network_name: mainnet::NETWORK_NAME.into(),
            chain_details: ChainDetails {
                bech32_account_prefix: mainnet::BECH32_PREFIX.into(),
                mix_denom: mainnet::MIX_DENOM.into(),
                stake_denom: mainnet::STAKE_DENOM.into(),
            },
            endpoints: mainnet::validators(),
            contracts: NymContracts {
                mixnet_contract_address: Some(mainnet::MIXNET_CONTRACT_ADDRESS.into()),
                vesting_contract_address: Some(mainnet::VESTING_CONTRACT_ADDRESS.into()),
            },
        }
    }

    pub fn new_qa() -> Self {
        NymNetworkDetails {
            network_name: qa::NETWORK_NAME.into(),
            chain_details: ChainDetails {
                bech32_account_prefix: qa::BECH32_PREFIX.into(),
                mix_denom: qa::MIX_DENOM.into(),
                stake_denom: qa::STAKE_DENOM.into(),
            },
            endpoints: qa::validators(),
            contracts: NymContracts {
                mixnet_contract_address: Some(qa::MIXNET_CONTRACT_ADDRESS.into()),
                vesting_contract_address: Some(qa::VESTING_CONTRACT_ADDRESS.into()),
            },
        }
    }

    #[must_use]
    pub fn with_network_name(mut self, network_name: String) -> Self {
        self.network_name = network_name;
        self
    }

    #[must_use]
    pub fn with_bech32_account_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.chain_details.bech32_account_prefix = prefix.into();
        self
    }

    #[must_use]
    pub fn with_mix_denom(mut self, mix_denom: DenomDetailsOwned) -> Self {
        self.chain_details.mix_denom = mix_denom;
        self
    }

    #[must_use]
    pub fn with_base_mix_denom<S: Into<String>>(mut self, base_mix_denom: S) -> Self {
        self.chain_details.mix_denom.base = base_mix_denom.into();
        self
    }

    #[must_use]
    pub fn with_stake_denom(mut self, stake_denom: DenomDetailsOwned) -> Self {
        self.chain_details.stake_denom = stake_denom;
        self
    }

    #[must_use]
    pub fn with_validator_endpoint(mut self, endpoint: ValidatorDetails) -> Self {
        self.endpoints.push(endpoint);
        self
    }

    #[must_use]
    pub fn with_mixnet_contract<S: Into<String>>(mut self, contract: Option<S>) -> Self {
        self.contracts.mixnet_contract_address = contract.map(Into::into);
        self
    }

    #[must_use]
    pub fn with_vesting_contract<S: Into<String>>(mut self, contract: Option<S>) -> Self {
        self.contracts.vesting_contract_address = contract.map(Into::into);
        self
    }

    pub fn default_gas_price_amount(&self) -> f64 {
        crate::DEFAULT_GAS_PRICE_AMOUNT
    }

    /// Nyxd urls of every configured endpoint, in the configured order.
    /// Malformed entries are skipped.
    pub fn nyxd_urls(&self) -> Vec<Url> {
        self.endpoints
            .iter()
            .filter_map(|endpoint| endpoint.nyxd_url().ok())
            .collect()
    }

    /// REST status api urls of every configured endpoint that runs one.
    /// Malformed entries are skipped.
    pub fn nym_api_urls(&self) -> Vec<Url> {
        self.endpoints
            .iter()
            .filter_map(|endpoint| endpoint.api_url())
            .filter_map(Result::ok)
            .collect()
    }
}

#[derive(Copy, Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Network {
    QA,
    MAINNET,
}

impl Network {
    pub fn details(&self) -> NymNetworkDetails {
        match self {
            Network::QA => NymNetworkDetails::new_qa(),
            Network::MAINNET => NymNetworkDetails::new_mainnet(),
        }
    }

    pub fn mix_denom(&self) -> DenomDetails {
        match self {
            Network::QA => qa::MIX_DENOM,
            Network::MAINNET => mainnet::MIX_DENOM,
        }
    }
}

impl FromStr for Network {
    type Err = NetworkDefaultsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "qa" => Ok(Network::QA),
            "mainnet" => Ok(Network::MAINNET),
            _ => Err(NetworkDefaultsError::MalformedNetworkProvided(
                s.to_string(),
            )),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Network::QA => f.write_str("QA"),
            Network::MAINNET => f.write_str("Mainnet"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_parsing_is_case_insensitive() {
        assert_eq!("Mainnet".parse::<Network>().unwrap(), Network::MAINNET);
        assert_eq!("qa".parse::<Network>().unwrap(), Network::QA);
        assert!("sandbox".parse::<Network>().is_err());
    }

    #[test]
    fn mainnet_details_carry_both_contracts() {
        let details = Network::MAINNET.details();
        assert_eq!(details.chain_details.bech32_account_prefix, "n");
        assert_eq!(details.chain_details.mix_denom.base, "unym");
        assert_eq!(details.chain_details.mix_denom.display_exponent, 6);
        assert!(details.contracts.mixnet_contract_address.is_some());
        assert!(details.contracts.vesting_contract_address.is_some());
    }

    #[test]
    fn urls_skip_missing_api_endpoints() {
        let details = NymNetworkDetails::new_empty()
            .with_validator_endpoint(ValidatorDetails::new(
                "https://rpc.foo.com",
                Some("https://api.foo.com"),
            ))
            .with_validator_endpoint(ValidatorDetails::new_nyxd_only("https://rpc.bar.com"));

        assert_eq!(details.nyxd_urls().len(), 2);
        assert_eq!(details.nym_api_urls().len(), 1);
        assert_eq!(
            details.nym_api_urls()[0].as_str(),
            "https://api.foo.com/"
        );
    }
}
