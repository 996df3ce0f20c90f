// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! Mapping of logical contract queries onto the messages understood by the
//! different releases of the mixnet and vesting contracts.

use crate::nyxd::error::NyxdError;
use nym_contracts_common::{Cursor, IdentityKey};
use nym_mixnet_contract_common::MixId;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt::{self, Display, Formatter};

/// Release of the contract query schema a client is talking to.
///
/// - `Nym`: the original mixnet contract, nodes identified by identity keys, no vesting contract,
/// - `Nymd`: identity keys, reward pool and rewarding status queries, first vesting contract,
/// - `Nyxd`: numeric mix ids, rewarding parameters and stake saturation queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    Nym,
    Nymd,
    #[default]
    Nyxd,
}

impl SchemaVersion {
    fn mixnode_key(&self) -> &'static str {
        match self {
            SchemaVersion::Nym | SchemaVersion::Nymd => "mix_identity",
            SchemaVersion::Nyxd => "mix_id",
        }
    }
}

impl Display for SchemaVersion {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            SchemaVersion::Nym => write!(f, "nym"),
            SchemaVersion::Nymd => write!(f, "nymd"),
            SchemaVersion::Nyxd => write!(f, "nyxd"),
        }
    }
}

/// Way a mixnode is identified in contract queries.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKey {
    Identity(IdentityKey),
    MixId(MixId),
}

impl NodeKey {
    fn for_schema(&self, query: &'static str, schema: SchemaVersion) -> Result<Value, NyxdError> {
        match (self, schema) {
            (NodeKey::Identity(identity), SchemaVersion::Nym | SchemaVersion::Nymd) => {
                Ok(json!(identity))
            }
            (NodeKey::MixId(mix_id), SchemaVersion::Nyxd) => Ok(json!(mix_id)),
            (NodeKey::MixId(_), SchemaVersion::Nym | SchemaVersion::Nymd) => {
                Err(NyxdError::NodeKeyMismatch {
                    query,
                    schema,
                    expected: "identity key",
                })
            }
            (NodeKey::Identity(_), SchemaVersion::Nyxd) => Err(NyxdError::NodeKeyMismatch {
                query,
                schema,
                expected: "mix id",
            }),
        }
    }
}

impl From<MixId> for NodeKey {
    fn from(mix_id: MixId) -> Self {
        NodeKey::MixId(mix_id)
    }
}

impl From<IdentityKey> for NodeKey {
    fn from(identity: IdentityKey) -> Self {
        NodeKey::Identity(identity)
    }
}

impl From<&str> for NodeKey {
    fn from(identity: &str) -> Self {
        NodeKey::Identity(identity.to_owned())
    }
}

impl Display for NodeKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Identity(identity) => write!(f, "{identity}"),
            NodeKey::MixId(mix_id) => write!(f, "{mix_id}"),
        }
    }
}

fn single_key(name: &str, body: Value) -> Value {
    let mut message = serde_json::Map::with_capacity(1);
    message.insert(name.to_owned(), body);
    Value::Object(message)
}

fn paged(limit: Option<u32>, start_after: &Option<Cursor>) -> Value {
    json!({ "limit": limit, "start_after": start_after })
}

/// Logical query against the mixnet contract, independent of the contract release.
#[derive(Debug, Clone, PartialEq)]
pub enum MixnetQuery {
    ContractVersion,
    StateParams,
    MixNodes {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    MixNodesDetailed {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    UnbondedMixNodes {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    Gateways {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    OwnedMixnode {
        address: String,
    },
    OwnedGateway {
        address: String,
    },
    LayerDistribution,
    RewardPool,
    CirculatingSupply,
    IntervalRewardPercent,
    SybilResistancePercent,
    RewardingStatus {
        node: NodeKey,
        interval_id: u32,
    },
    RewardingParams,
    StakeSaturation {
        mix_id: MixId,
    },
    MixnodeRewardingDetails {
        mix_id: MixId,
    },
    MixnodeDelegations {
        node: NodeKey,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    DelegatorDelegations {
        delegator: String,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    DelegationDetails {
        node: NodeKey,
        delegator: String,
        proxy: Option<String>,
    },
    AllDelegations {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    GatewayDelegations {
        gateway_identity: IdentityKey,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
}

impl MixnetQuery {
    /// Name of the logical operation, used in errors and logs.
    pub fn operation(&self) -> &'static str {
        match self {
            MixnetQuery::ContractVersion => "contract version",
            MixnetQuery::StateParams => "state params",
            MixnetQuery::MixNodes { .. } => "mixnodes paged",
            MixnetQuery::MixNodesDetailed { .. } => "mixnodes detailed paged",
            MixnetQuery::UnbondedMixNodes { .. } => "unbonded mixnodes paged",
            MixnetQuery::Gateways { .. } => "gateways paged",
            MixnetQuery::OwnedMixnode { .. } => "owned mixnode",
            MixnetQuery::OwnedGateway { .. } => "owned gateway",
            MixnetQuery::LayerDistribution => "layer distribution",
            MixnetQuery::RewardPool => "reward pool",
            MixnetQuery::CirculatingSupply => "circulating supply",
            MixnetQuery::IntervalRewardPercent => "interval reward percent",
            MixnetQuery::SybilResistancePercent => "sybil resistance percent",
            MixnetQuery::RewardingStatus { .. } => "rewarding status",
            MixnetQuery::RewardingParams => "rewarding params",
            MixnetQuery::StakeSaturation { .. } => "stake saturation",
            MixnetQuery::MixnodeRewardingDetails { .. } => "mixnode rewarding details",
            MixnetQuery::MixnodeDelegations { .. } => "mixnode delegations paged",
            MixnetQuery::DelegatorDelegations { .. } => "delegator delegations paged",
            MixnetQuery::DelegationDetails { .. } => "delegation details",
            MixnetQuery::AllDelegations { .. } => "all delegations paged",
            MixnetQuery::GatewayDelegations { .. } => "gateway delegations paged",
        }
    }

    /// Name of the contract message implementing this query in the given release,
    /// if the release supports it at all.
    pub fn message_name(&self, schema: SchemaVersion) -> Option<&'static str> {
        use SchemaVersion::{Nym, Nymd, Nyxd};

        let name = match (self, schema) {
            (MixnetQuery::ContractVersion, Nymd | Nyxd) => "get_contract_version",
            (MixnetQuery::StateParams, Nym | Nymd) => "state_params",
            (MixnetQuery::StateParams, Nyxd) => "get_state_params",
            (MixnetQuery::MixNodes { .. }, Nym | Nymd) => "get_mix_nodes",
            (MixnetQuery::MixNodes { .. }, Nyxd) => "get_mix_node_bonds",
            (MixnetQuery::MixNodesDetailed { .. }, Nyxd) => "get_mix_nodes_detailed",
            (MixnetQuery::UnbondedMixNodes { .. }, Nyxd) => "get_unbonded_mix_nodes",
            (MixnetQuery::Gateways { .. }, _) => "get_gateways",
            (MixnetQuery::OwnedMixnode { .. }, Nym | Nymd) => "owns_mixnode",
            (MixnetQuery::OwnedMixnode { .. }, Nyxd) => "get_owned_mixnode",
            (MixnetQuery::OwnedGateway { .. }, Nym | Nymd) => "owns_gateway",
            (MixnetQuery::OwnedGateway { .. }, Nyxd) => "get_owned_gateway",
            (MixnetQuery::LayerDistribution, Nymd) => "layer_distribution",
            (MixnetQuery::LayerDistribution, Nyxd) => "get_layer_distribution",
            (MixnetQuery::RewardPool, Nymd) => "get_reward_pool",
            (MixnetQuery::CirculatingSupply, Nymd) => "get_circulating_supply",
            (MixnetQuery::IntervalRewardPercent, Nymd) => "get_interval_reward_percent",
            (MixnetQuery::SybilResistancePercent, Nymd) => "get_sybil_resistance_percent",
            (MixnetQuery::RewardingStatus { .. }, Nymd) => "get_rewarding_status",
            (MixnetQuery::RewardingParams, Nyxd) => "get_rewarding_params",
            (MixnetQuery::StakeSaturation { .. }, Nyxd) => "get_stake_saturation",
            (MixnetQuery::MixnodeRewardingDetails { .. }, Nyxd) => "get_mixnode_rewarding_details",
            (MixnetQuery::MixnodeDelegations { .. }, Nym) => "get_mix_delegations",
            (MixnetQuery::MixnodeDelegations { .. }, Nymd | Nyxd) => "get_mixnode_delegations",
            (MixnetQuery::DelegatorDelegations { .. }, Nymd | Nyxd) => "get_delegator_delegations",
            (MixnetQuery::DelegationDetails { .. }, Nym) => "get_mix_delegation",
            (MixnetQuery::DelegationDetails { .. }, Nymd | Nyxd) => "get_delegation_details",
            (MixnetQuery::AllDelegations { .. }, Nymd) => "get_all_network_delegations",
            (MixnetQuery::AllDelegations { .. }, Nyxd) => "get_all_delegations",
            (MixnetQuery::GatewayDelegations { .. }, Nym) => "get_gateway_delegations",
            _ => return None,
        };
        Some(name)
    }

    /// Builds the json query message for the given release.
    ///
    /// Fails without touching the network if the release doesn't support the query
    /// or if a node was identified with the wrong kind of key.
    pub fn to_message(&self, schema: SchemaVersion) -> Result<Value, NyxdError> {
        let operation = self.operation();
        let name = self
            .message_name(schema)
            .ok_or_else(|| NyxdError::unsupported_query(operation, schema))?;

        let body = match self {
            MixnetQuery::ContractVersion
            | MixnetQuery::StateParams
            | MixnetQuery::LayerDistribution
            | MixnetQuery::RewardPool
            | MixnetQuery::CirculatingSupply
            | MixnetQuery::IntervalRewardPercent
            | MixnetQuery::SybilResistancePercent
            | MixnetQuery::RewardingParams => json!({}),
            MixnetQuery::MixNodes { limit, start_after }
            | MixnetQuery::MixNodesDetailed { limit, start_after }
            | MixnetQuery::UnbondedMixNodes { limit, start_after }
            | MixnetQuery::Gateways { limit, start_after }
            | MixnetQuery::AllDelegations { limit, start_after } => paged(*limit, start_after),
            MixnetQuery::OwnedMixnode { address } | MixnetQuery::OwnedGateway { address } => {
                json!({ "address": address })
            }
            MixnetQuery::RewardingStatus { node, interval_id } => {
                let mut body = json!({ "interval_id": interval_id });
                body[schema.mixnode_key()] = node.for_schema(operation, schema)?;
                body
            }
            MixnetQuery::StakeSaturation { mix_id }
            | MixnetQuery::MixnodeRewardingDetails { mix_id } => json!({ "mix_id": mix_id }),
            MixnetQuery::MixnodeDelegations {
                node,
                limit,
                start_after,
            } => {
                let mut body = paged(*limit, start_after);
                body[schema.mixnode_key()] = node.for_schema(operation, schema)?;
                body
            }
            MixnetQuery::DelegatorDelegations {
                delegator,
                limit,
                start_after,
            } => {
                let mut body = paged(*limit, start_after);
                body["delegator"] = json!(delegator);
                body
            }
            MixnetQuery::DelegationDetails {
                node,
                delegator,
                proxy,
            } => {
                let mut body = match schema {
                    // the original contract only knew about direct delegations
                    SchemaVersion::Nym => json!({ "address": delegator }),
                    SchemaVersion::Nymd | SchemaVersion::Nyxd => {
                        json!({ "delegator": delegator, "proxy": proxy })
                    }
                };
                body[schema.mixnode_key()] = node.for_schema(operation, schema)?;
                body
            }
            MixnetQuery::GatewayDelegations {
                gateway_identity,
                limit,
                start_after,
            } => {
                let mut body = paged(*limit, start_after);
                body["gateway_identity"] = json!(gateway_identity);
                body
            }
        };

        Ok(single_key(name, body))
    }
}

/// Logical query against the vesting contract. The `Nym` release predates the contract.
#[derive(Debug, Clone, PartialEq)]
pub enum VestingQuery {
    ContractVersion,
    LockedCoins {
        vesting_account_address: String,
        block_time: Option<u64>,
    },
    SpendableCoins {
        vesting_account_address: String,
        block_time: Option<u64>,
    },
    VestedCoins {
        vesting_account_address: String,
        block_time: Option<u64>,
    },
    VestingCoins {
        vesting_account_address: String,
        block_time: Option<u64>,
    },
    SpendableVestedCoins {
        vesting_account_address: String,
    },
    SpendableRewardCoins {
        vesting_account_address: String,
    },
    DelegatedCoins {
        vesting_account_address: String,
    },
    PledgedCoins {
        vesting_account_address: String,
    },
    StakedCoins {
        vesting_account_address: String,
    },
    WithdrawnCoins {
        vesting_account_address: String,
    },
    StartTime {
        vesting_account_address: String,
    },
    EndTime {
        vesting_account_address: String,
    },
    OriginalVesting {
        vesting_account_address: String,
    },
    HistoricalStakingRewards {
        vesting_account_address: String,
    },
    Account {
        address: String,
    },
    Mixnode {
        address: String,
    },
    Gateway {
        address: String,
    },
    CurrentVestingPeriod {
        address: String,
    },
    DelegationTimes {
        address: String,
        node: NodeKey,
    },
    AllDelegations {
        limit: Option<u32>,
        start_after: Option<Cursor>,
    },
    Delegation {
        address: String,
        node: NodeKey,
        block_timestamp_secs: u64,
    },
    TotalDelegationAmount {
        address: String,
        node: NodeKey,
    },
    Accounts {
        limit: Option<u32>,
        start_next_after: Option<Cursor>,
    },
    AccountsVestingCoins {
        limit: Option<u32>,
        start_next_after: Option<Cursor>,
    },
}

impl VestingQuery {
    pub fn operation(&self) -> &'static str {
        match self {
            VestingQuery::ContractVersion => "vesting contract version",
            VestingQuery::LockedCoins { .. } => "locked coins",
            VestingQuery::SpendableCoins { .. } => "spendable coins",
            VestingQuery::VestedCoins { .. } => "vested coins",
            VestingQuery::VestingCoins { .. } => "vesting coins",
            VestingQuery::SpendableVestedCoins { .. } => "spendable vested coins",
            VestingQuery::SpendableRewardCoins { .. } => "spendable reward coins",
            VestingQuery::DelegatedCoins { .. } => "delegated coins",
            VestingQuery::PledgedCoins { .. } => "pledged coins",
            VestingQuery::StakedCoins { .. } => "staked coins",
            VestingQuery::WithdrawnCoins { .. } => "withdrawn coins",
            VestingQuery::StartTime { .. } => "start time",
            VestingQuery::EndTime { .. } => "end time",
            VestingQuery::OriginalVesting { .. } => "original vesting",
            VestingQuery::HistoricalStakingRewards { .. } => "historical staking rewards",
            VestingQuery::Account { .. } => "vesting account",
            VestingQuery::Mixnode { .. } => "vesting mixnode",
            VestingQuery::Gateway { .. } => "vesting gateway",
            VestingQuery::CurrentVestingPeriod { .. } => "current vesting period",
            VestingQuery::DelegationTimes { .. } => "delegation times",
            VestingQuery::AllDelegations { .. } => "all vesting delegations paged",
            VestingQuery::Delegation { .. } => "vesting delegation",
            VestingQuery::TotalDelegationAmount { .. } => "total delegation amount",
            VestingQuery::Accounts { .. } => "vesting accounts paged",
            VestingQuery::AccountsVestingCoins { .. } => "accounts vesting coins paged",
        }
    }

    pub fn message_name(&self, schema: SchemaVersion) -> Option<&'static str> {
        use SchemaVersion::{Nym, Nymd, Nyxd};

        if schema == Nym {
            return None;
        }

        let name = match (self, schema) {
            (VestingQuery::ContractVersion, _) => "get_contract_version",
            (VestingQuery::LockedCoins { .. }, _) => "locked_coins",
            (VestingQuery::SpendableCoins { .. }, _) => "spendable_coins",
            (VestingQuery::VestedCoins { .. }, _) => "get_vested_coins",
            (VestingQuery::VestingCoins { .. }, _) => "get_vesting_coins",
            (VestingQuery::DelegatedCoins { .. }, _) => "get_delegated_coins",
            (VestingQuery::PledgedCoins { .. }, _) => "get_pledged_coins",
            (VestingQuery::StartTime { .. }, _) => "get_start_time",
            (VestingQuery::EndTime { .. }, _) => "get_end_time",
            (VestingQuery::OriginalVesting { .. }, _) => "get_original_vesting",
            (VestingQuery::Account { .. }, _) => "get_account",
            (VestingQuery::Mixnode { .. }, _) => "get_mixnode",
            (VestingQuery::Gateway { .. }, _) => "get_gateway",
            (VestingQuery::CurrentVestingPeriod { .. }, _) => "get_current_vesting_period",
            (VestingQuery::DelegationTimes { .. }, _) => "get_delegation_times",
            (VestingQuery::TotalDelegationAmount { .. }, _) => "get_total_delegation_amount",
            (VestingQuery::SpendableVestedCoins { .. }, Nyxd) => "get_spendable_vested_coins",
            (VestingQuery::SpendableRewardCoins { .. }, Nyxd) => "get_spendable_reward_coins",
            (VestingQuery::StakedCoins { .. }, Nyxd) => "get_staked_coins",
            (VestingQuery::WithdrawnCoins { .. }, Nyxd) => "get_withdrawn_coins",
            (VestingQuery::HistoricalStakingRewards { .. }, Nyxd) => {
                "get_historical_vesting_staking_reward"
            }
            (VestingQuery::AllDelegations { .. }, Nyxd) => "get_all_delegations",
            (VestingQuery::Delegation { .. }, Nyxd) => "get_delegation",
            (VestingQuery::Accounts { .. }, Nyxd) => "get_accounts_paged",
            (VestingQuery::AccountsVestingCoins { .. }, Nyxd) => {
                "get_accounts_vesting_coins_paged"
            }
            (_, Nym | Nymd) => return None,
        };
        Some(name)
    }

    pub fn to_message(&self, schema: SchemaVersion) -> Result<Value, NyxdError> {
        let operation = self.operation();
        let name = self
            .message_name(schema)
            .ok_or_else(|| NyxdError::unsupported_query(operation, schema))?;

        let body = match self {
            VestingQuery::ContractVersion => json!({}),
            VestingQuery::LockedCoins {
                vesting_account_address,
                block_time,
            }
            | VestingQuery::SpendableCoins {
                vesting_account_address,
                block_time,
            }
            | VestingQuery::VestedCoins {
                vesting_account_address,
                block_time,
            }
            | VestingQuery::VestingCoins {
                vesting_account_address,
                block_time,
            } => {
                // block time is sent as a cosmwasm `Timestamp`, i.e. nanoseconds as a string
                let block_time =
                    block_time.map(|secs| secs.saturating_mul(1_000_000_000).to_string());
                json!({
                    "vesting_account_address": vesting_account_address,
                    "block_time": block_time,
                })
            }
            VestingQuery::SpendableVestedCoins {
                vesting_account_address,
            }
            | VestingQuery::SpendableRewardCoins {
                vesting_account_address,
            }
            | VestingQuery::DelegatedCoins {
                vesting_account_address,
            }
            | VestingQuery::PledgedCoins {
                vesting_account_address,
            }
            | VestingQuery::StakedCoins {
                vesting_account_address,
            }
            | VestingQuery::WithdrawnCoins {
                vesting_account_address,
            }
            | VestingQuery::StartTime {
                vesting_account_address,
            }
            | VestingQuery::EndTime {
                vesting_account_address,
            }
            | VestingQuery::OriginalVesting {
                vesting_account_address,
            }
            | VestingQuery::HistoricalStakingRewards {
                vesting_account_address,
            } => json!({ "vesting_account_address": vesting_account_address }),
            VestingQuery::Account { address }
            | VestingQuery::Mixnode { address }
            | VestingQuery::Gateway { address }
            | VestingQuery::CurrentVestingPeriod { address } => json!({ "address": address }),
            VestingQuery::DelegationTimes { address, node }
            | VestingQuery::TotalDelegationAmount { address, node } => {
                let mut body = json!({ "address": address });
                body[schema.mixnode_key()] = node.for_schema(operation, schema)?;
                body
            }
            VestingQuery::Delegation {
                address,
                node,
                block_timestamp_secs,
            } => {
                let mut body = json!({
                    "address": address,
                    "block_timestamp_secs": block_timestamp_secs,
                });
                body[schema.mixnode_key()] = node.for_schema(operation, schema)?;
                body
            }
            VestingQuery::AllDelegations { limit, start_after } => paged(*limit, start_after),
            VestingQuery::Accounts {
                limit,
                start_next_after,
            }
            | VestingQuery::AccountsVestingCoins {
                limit,
                start_next_after,
            } => json!({ "limit": limit, "start_next_after": start_next_after }),
        };

        Ok(single_key(name, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paged_mixnode_query_per_schema() {
        let query = MixnetQuery::MixNodes {
            limit: Some(100),
            start_after: None,
        };

        assert_eq!(
            query.to_message(SchemaVersion::Nyxd).unwrap(),
            json!({ "get_mix_node_bonds": { "limit": 100, "start_after": null } })
        );
        assert_eq!(
            query.to_message(SchemaVersion::Nymd).unwrap(),
            json!({ "get_mix_nodes": { "limit": 100, "start_after": null } })
        );
        assert_eq!(
            query.to_message(SchemaVersion::Nym).unwrap(),
            json!({ "get_mix_nodes": { "limit": 100, "start_after": null } })
        );
    }

    #[test]
    fn renamed_queries() {
        assert_eq!(
            MixnetQuery::StateParams.to_message(SchemaVersion::Nymd).unwrap(),
            json!({ "state_params": {} })
        );
        assert_eq!(
            MixnetQuery::StateParams.to_message(SchemaVersion::Nyxd).unwrap(),
            json!({ "get_state_params": {} })
        );
        assert_eq!(
            MixnetQuery::AllDelegations {
                limit: None,
                start_after: None
            }
            .message_name(SchemaVersion::Nymd),
            Some("get_all_network_delegations")
        );
    }

    #[test]
    fn unsupported_queries_are_rejected() {
        let err = MixnetQuery::RewardPool
            .to_message(SchemaVersion::Nyxd)
            .unwrap_err();
        assert!(matches!(
            err,
            NyxdError::UnsupportedQuery {
                query: "reward pool",
                schema: SchemaVersion::Nyxd
            }
        ));

        assert!(MixnetQuery::ContractVersion
            .to_message(SchemaVersion::Nym)
            .is_err());
        assert!(VestingQuery::ContractVersion
            .to_message(SchemaVersion::Nym)
            .is_err());
        assert!(VestingQuery::StakedCoins {
            vesting_account_address: "n1foo".into()
        }
        .to_message(SchemaVersion::Nymd)
        .is_err());
    }

    #[test]
    fn node_keys_follow_the_schema() {
        let nyxd = MixnetQuery::MixnodeDelegations {
            node: NodeKey::MixId(42),
            limit: Some(10),
            start_after: Some(Cursor::Key("n1foo".into())),
        };
        assert_eq!(
            nyxd.to_message(SchemaVersion::Nyxd).unwrap(),
            json!({
                "get_mixnode_delegations": { "mix_id": 42, "limit": 10, "start_after": "n1foo" }
            })
        );

        let nym = MixnetQuery::MixnodeDelegations {
            node: "identity".into(),
            limit: None,
            start_after: None,
        };
        assert_eq!(
            nym.to_message(SchemaVersion::Nym).unwrap(),
            json!({
                "get_mix_delegations": {
                    "mix_identity": "identity",
                    "limit": null,
                    "start_after": null,
                }
            })
        );

        assert!(matches!(
            nyxd.to_message(SchemaVersion::Nymd),
            Err(NyxdError::NodeKeyMismatch {
                expected: "identity key",
                ..
            })
        ));
        assert!(matches!(
            nym.to_message(SchemaVersion::Nyxd),
            Err(NyxdError::NodeKeyMismatch {
                expected: "mix id",
                ..
            })
        ));
    }

    #[test]
    fn delegation_details_shape() {
        let query = MixnetQuery::DelegationDetails {
            node: "identity".into(),
            delegator: "n1delegator".into(),
            proxy: None,
        };
        assert_eq!(
            query.to_message(SchemaVersion::Nym).unwrap(),
            json!({
                "get_mix_delegation": { "mix_identity": "identity", "address": "n1delegator" }
            })
        );
        assert_eq!(
            query.to_message(SchemaVersion::Nymd).unwrap(),
            json!({
                "get_delegation_details": {
                    "mix_identity": "identity",
                    "delegator": "n1delegator",
                    "proxy": null,
                }
            })
        );
    }

    #[test]
    fn vesting_block_time_is_sent_in_nanoseconds() {
        let query = VestingQuery::LockedCoins {
            vesting_account_address: "n1foo".into(),
            block_time: Some(1),
        };
        assert_eq!(
            query.to_message(SchemaVersion::Nyxd).unwrap(),
            json!({
                "locked_coins": { "vesting_account_address": "n1foo", "block_time": "1000000000" }
            })
        );
    }
}
