// Copyright 2021-2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::types::MixId;
use cosmwasm_std::{Addr, Coin, Decimal};
use nym_contracts_common::PagedResponse;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type PagedMixNodeDelegationsResponse = PagedResponse<Delegation>;
pub type PagedDelegatorDelegationsResponse = PagedResponse<Delegation>;
pub type PagedAllDelegationsResponse = PagedResponse<Delegation>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Delegation {
    /// Address of the owner of this delegation.
    pub owner: Addr,

    /// Id of the MixNode that this delegation was performed against.
    pub mix_id: MixId,

    /// Value of the "unit delegation" at the point of creating this delegation.
    pub cumulative_reward_ratio: Decimal,

    /// Original delegation amount. Note that it is never mutated as delegation accumulates rewards.
    pub amount: Coin,

    /// Block height where this delegation occurred.
    pub height: u64,

    /// Proxy address used to delegate the funds on behalf of another address
    pub proxy: Option<Addr>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeDelegationResponse {
    pub delegation: Option<Delegation>,
    pub mixnode_still_bonded: bool,
}
