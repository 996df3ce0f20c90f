// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_std::{Addr, Coin};
use nym_contracts_common::{IdentityKey, PagedResponse};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type PagedGatewayResponse = PagedResponse<GatewayBond>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Gateway {
    pub host: String,
    pub mix_port: u16,
    pub clients_port: u16,
    pub location: String,
    pub sphinx_key: String,
    /// Base58 encoded ed25519 EdDSA public key of the gateway used to derive shared keys with clients
    pub identity_key: IdentityKey,
    pub version: String,
}

/// The gateway bond has kept its shape across all contract releases.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GatewayBond {
    pub pledge_amount: Coin,
    pub owner: Addr,
    pub block_height: u64,
    pub gateway: Gateway,
    pub proxy: Option<Addr>,
}

impl GatewayBond {
    pub fn identity(&self) -> &str {
        &self.gateway.identity_key
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GatewayOwnershipResponse {
    pub address: Addr,
    pub gateway: Option<GatewayBond>,
}
