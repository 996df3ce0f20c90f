// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_std::Decimal;
use nym_contracts_common::Percent;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct IntervalRewardParams {
    /// Current value of the rewarding pool.
    pub reward_pool: Decimal,

    /// Current value of the staking supply.
    pub staking_supply: Decimal,

    /// Defines the percentage of stake needed to reach saturation for all of the nodes in the rewarded set.
    pub staking_supply_scale_factor: Percent,

    /// Current value of the computed reward budget per epoch, per node.
    pub epoch_reward_budget: Decimal,

    /// Current value of the stake saturation point.
    pub stake_saturation_point: Decimal,

    /// Current value of the sybil resistance percent (`alpha`).
    pub sybil_resistance: Percent,

    /// Current active set work factor.
    pub active_set_work_factor: Decimal,

    /// Current maximum percentage of the reward pool being emitted per interval.
    pub interval_pool_emission: Percent,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RewardingParams {
    /// Parameters that should remain unchanged throughout an interval.
    pub interval: IntervalRewardParams,

    pub rewarded_set_size: u32,
    pub active_set_size: u32,
}

impl RewardingParams {
    pub fn standby_set_size(&self) -> u32 {
        self.rewarded_set_size.saturating_sub(self.active_set_size)
    }
}
