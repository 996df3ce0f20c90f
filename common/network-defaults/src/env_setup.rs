// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::network::{ChainDetails, NetworkDefaultsError, NymContracts, NymNetworkDetails};
use crate::{var_names, DenomDetailsOwned, ValidatorDetails};
use std::env::{var, VarError};
use std::path::Path;

/// Loads the provided `.env` file, if any, into the process environment.
/// Variables that are already set are left untouched.
pub fn setup_env<P: AsRef<Path>>(config_env_file: Option<P>) {
    match config_env_file {
        Some(env_file) => {
            if let Err(err) = dotenvy::from_path(env_file.as_ref()) {
                log::error!(
                    "failed to load environment file {}: {err}",
                    env_file.as_ref().display()
                )
            }
        }
        None => {
            if var(var_names::CONFIGURED).is_err() {
                log::debug!(
                    "no environment file provided and the environment was not configured \
                     before, the caller is expected to use explicit network details"
                )
            }
        }
    }
}

fn required(name: &'static str) -> Result<String, NetworkDefaultsError> {
    var(name).map_err(|err| {
        log::warn!("required environment variable {name} is unavailable: {err}");
        NetworkDefaultsError::MissingEnvVariable(name)
    })
}

fn optional(name: &'static str) -> Option<String> {
    match var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(err) => {
            log::warn!("ignoring environment variable {name}: {err}");
            None
        }
    }
}

impl NymNetworkDetails {
    /// Builds network details purely out of the process environment.
    pub fn new_from_env() -> Result<Self, NetworkDefaultsError> {
        let exponent_raw = required(var_names::DENOMS_EXPONENT)?;
        let display_exponent =
            exponent_raw
                .parse()
                .map_err(|_| NetworkDefaultsError::MalformedEnvVariable {
                    name: var_names::DENOMS_EXPONENT,
                    value: exponent_raw.clone(),
                })?;

        let endpoints = vec![ValidatorDetails {
            nyxd_url: required(var_names::NYXD)?,
            api_url: optional(var_names::NYM_API),
        }];

        Ok(NymNetworkDetails {
            network_name: required(var_names::NETWORK_NAME)?,
            chain_details: ChainDetails {
                bech32_account_prefix: required(var_names::BECH32_PREFIX)?,
                mix_denom: DenomDetailsOwned {
                    base: required(var_names::MIX_DENOM)?,
                    display: required(var_names::MIX_DENOM_DISPLAY)?,
                    display_exponent,
                },
                stake_denom: DenomDetailsOwned {
                    base: required(var_names::STAKE_DENOM)?,
                    display: required(var_names::STAKE_DENOM_DISPLAY)?,
                    display_exponent,
                },
            },
            endpoints,
            contracts: NymContracts {
                mixnet_contract_address: optional(var_names::MIXNET_CONTRACT_ADDRESS),
                vesting_contract_address: optional(var_names::VESTING_CONTRACT_ADDRESS),
            },
        })
    }
}
