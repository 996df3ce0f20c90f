// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod delegation;
pub mod gateway;
pub mod legacy;
pub mod mixnode;
mod msg;
pub mod reward_params;
mod types;

pub const MIXNODE_DELEGATORS_PAGE_LIMIT: usize = 250;

pub use cosmwasm_std::{Addr, Coin, Decimal, Uint128};
pub use delegation::{
    Delegation, MixNodeDelegationResponse, PagedAllDelegationsResponse,
    PagedDelegatorDelegationsResponse, PagedMixNodeDelegationsResponse,
};
pub use gateway::{Gateway, GatewayBond, GatewayOwnershipResponse, PagedGatewayResponse};
pub use mixnode::{
    Layer, MixNode, MixNodeBond, MixNodeConfigUpdate, MixNodeCostParams, MixNodeDetails,
    MixNodeRewarding, MixOwnershipResponse, MixnodeRewardingDetailsResponse,
    PagedMixnodeBondsResponse, PagedMixnodesDetailsResponse, PagedUnbondedMixnodesResponse,
    StakeSaturationResponse, UnbondedMixnode, UnbondedMixnodeResponse,
};
pub use msg::*;
pub use nym_contracts_common::{
    ContractBuildInformation, Cursor, IdentityKey, PagedResponse, Percent,
};
pub use reward_params::{IntervalRewardParams, RewardingParams};
pub use types::*;
