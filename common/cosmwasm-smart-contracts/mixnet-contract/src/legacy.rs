// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Response shapes of the mixnet contract releases that identified nodes by their identity keys
//! rather than by numeric ids.

use crate::mixnode::Layer;
use cosmwasm_std::{Addr, Coin, Uint128};
use nym_contracts_common::{IdentityKey, PagedResponse};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub type LegacyPagedMixnodeResponse = PagedResponse<LegacyMixNodeBond>;
pub type LegacyPagedDelegationsResponse = PagedResponse<LegacyDelegation>;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegacyMixNode {
    pub host: String,
    pub mix_port: u16,
    pub verloc_port: u16,
    pub http_api_port: u16,
    pub sphinx_key: String,
    pub identity_key: IdentityKey,
    pub version: String,
    #[serde(default)]
    pub profit_margin_percent: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegacyMixNodeBond {
    #[serde(alias = "bond_amount")]
    pub pledge_amount: Coin,
    pub total_delegation: Coin,
    pub owner: Addr,
    pub layer: Layer,
    pub block_height: u64,
    pub mix_node: LegacyMixNode,
    pub proxy: Option<Addr>,
    #[serde(default)]
    pub accumulated_rewards: Option<Uint128>,
}

impl LegacyMixNodeBond {
    pub fn identity(&self) -> &str {
        &self.mix_node.identity_key
    }

    pub fn total_bond(&self) -> Option<Uint128> {
        if self.pledge_amount.denom != self.total_delegation.denom {
            return None;
        }
        Some(self.pledge_amount.amount + self.total_delegation.amount)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegacyDelegation {
    pub owner: Addr,
    #[serde(alias = "mix_identity")]
    pub node_identity: IdentityKey,
    pub amount: Coin,
    pub block_height: u64,
    pub proxy: Option<Addr>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LegacyContractStateParams {
    pub minimum_mixnode_pledge: Uint128,
    pub minimum_gateway_pledge: Uint128,
    pub mixnode_rewarded_set_size: u32,
    pub mixnode_active_set_size: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RewardingResult {
    pub operator_reward: Uint128,
    pub total_delegator_reward: Uint128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PendingDelegatorRewarding {
    // keep track of the running rewarding results so we'd known how much was the operator and its delegators rewarded
    pub running_results: RewardingResult,

    pub next_start: Addr,
}

/// Rewarding progress of a single node within a rewarding interval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum RewardingStatus {
    Complete(RewardingResult),
    PendingNextDelegatorPage(PendingDelegatorRewarding),
}

impl RewardingStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, RewardingStatus::Complete(_))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixnodeRewardingStatusResponse {
    pub status: Option<RewardingStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rewarding_status_uses_explicit_discriminant() {
        let complete: RewardingStatus = serde_json::from_value(json!({
            "Complete": { "operator_reward": "100", "total_delegator_reward": "50" }
        }))
        .unwrap();
        assert!(complete.is_complete());

        let pending: RewardingStatus = serde_json::from_value(json!({
            "PendingNextDelegatorPage": {
                "running_results": { "operator_reward": "100", "total_delegator_reward": "0" },
                "next_start": "n1delegator"
            }
        }))
        .unwrap();
        match pending {
            RewardingStatus::PendingNextDelegatorPage(pending) => {
                assert_eq!(pending.next_start.as_str(), "n1delegator");
                assert_eq!(pending.running_results.operator_reward, Uint128::new(100));
            }
            RewardingStatus::Complete(_) => panic!("unexpected status"),
        }
    }

    #[test]
    fn old_bond_amount_field_is_accepted() {
        let bond: LegacyMixNodeBond = serde_json::from_value(json!({
            "bond_amount": { "denom": "upunk", "amount": "1000" },
            "total_delegation": { "denom": "upunk", "amount": "500" },
            "owner": "punk1owner",
            "layer": 1,
            "block_height": 42,
            "mix_node": {
                "host": "1.1.1.1",
                "mix_port": 1789,
                "verloc_port": 1790,
                "http_api_port": 8000,
                "sphinx_key": "sphinx",
                "identity_key": "identity",
                "version": "0.10.0"
            },
            "proxy": null
        }))
        .unwrap();

        assert_eq!(bond.identity(), "identity");
        assert_eq!(bond.total_bond(), Some(Uint128::new(1500)));
        assert_eq!(bond.mix_node.profit_margin_percent, 0);
    }
}
