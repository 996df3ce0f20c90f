// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use cosmrs::AccountId;
use nym_network_defaults::NymContracts;
use std::str::FromStr;

mod mixnet_query_client;
mod mixnet_signing_client;
mod querier;
pub mod schema;
mod vesting_query_client;
mod vesting_signing_client;

pub use mixnet_query_client::{MixnetQueryClient, PagedMixnetQueryClient};
pub use mixnet_signing_client::MixnetSigningClient;
pub use querier::Querier;
pub use schema::{MixnetQuery, NodeKey, SchemaVersion, VestingQuery};
pub use vesting_query_client::{PagedVestingQueryClient, VestingQueryClient};
pub use vesting_signing_client::VestingSigningClient;

/// Source of the addresses of the Nym contracts deployed on the chain.
pub trait NymContractsProvider {
    fn mixnet_contract_address(&self) -> Option<&AccountId>;

    fn vesting_contract_address(&self) -> Option<&AccountId>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypedNymContracts {
    pub mixnet_contract_address: Option<AccountId>,
    pub vesting_contract_address: Option<AccountId>,
}

fn parse_address(raw: Option<String>) -> Result<Option<AccountId>, NyxdError> {
    raw.map(|address| {
        AccountId::from_str(&address).map_err(|_| NyxdError::MalformedAccountAddress(address))
    })
    .transpose()
}

impl TryFrom<NymContracts> for TypedNymContracts {
    type Error = NyxdError;

    fn try_from(value: NymContracts) -> Result<Self, Self::Error> {
        Ok(TypedNymContracts {
            mixnet_contract_address: parse_address(value.mixnet_contract_address)?,
            vesting_contract_address: parse_address(value.vesting_contract_address)?,
        })
    }
}

impl NymContractsProvider for TypedNymContracts {
    fn mixnet_contract_address(&self) -> Option<&AccountId> {
        self.mixnet_contract_address.as_ref()
    }

    fn vesting_contract_address(&self) -> Option<&AccountId> {
        self.vesting_contract_address.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contract_addresses_are_validated() {
        let valid = AccountId::new("n", &[1; 32]).unwrap().to_string();

        let contracts = TypedNymContracts::try_from(NymContracts {
            mixnet_contract_address: Some(valid.clone()),
            vesting_contract_address: None,
        })
        .unwrap();
        assert_eq!(
            contracts.mixnet_contract_address().map(ToString::to_string),
            Some(valid)
        );
        assert!(contracts.vesting_contract_address().is_none());

        let res = TypedNymContracts::try_from(NymContracts {
            mixnet_contract_address: Some("definitely-not-bech32".into()),
            vesting_contract_address: None,
        });
        assert!(matches!(res, Err(NyxdError::MalformedAccountAddress(_))));
    }
}
