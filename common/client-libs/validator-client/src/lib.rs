// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod cache;
pub mod client;
pub mod currency;
pub mod error;
pub mod nyxd;
pub mod paging;
pub mod signing;
pub mod validator_api;

pub use crate::error::ValidatorClientError;
pub use cache::{GatewaysCache, MixnodesCache};
pub use client::{
    Config, DirectSigningHttpRpcValidatorClient, QueryHttpRpcValidatorClient, ValidatorClient,
};
pub use nym_mixnet_contract_common::{
    mixnode::MixNodeDetails, GatewayBond, IdentityKey, MixId, MixNodeBond,
};
pub use nyxd::contract_traits::{Querier, SchemaVersion};
pub use nyxd::NyxdClient;
pub use paging::collect_paged;
pub use validator_api::ValidatorApiQuerier;

// some type aliasing
pub use tendermint_rpc::HttpClient as HttpRpcClient;
