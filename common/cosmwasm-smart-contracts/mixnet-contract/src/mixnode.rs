// Copyright 2021-2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::types::MixId;
use cosmwasm_std::{Addr, Coin, Decimal};
use nym_contracts_common::{IdentityKey, PagedResponse, Percent};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt::{self, Display, Formatter};

pub type PagedMixnodeBondsResponse = PagedResponse<MixNodeBond>;
pub type PagedMixnodesDetailsResponse = PagedResponse<MixNodeDetails>;
pub type PagedUnbondedMixnodesResponse = PagedResponse<(MixId, UnbondedMixnode)>;

#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize_repr,
    Deserialize_repr,
    JsonSchema,
)]
#[repr(u8)]
pub enum Layer {
    One = 1,
    Two = 2,
    Three = 3,
}

impl Display for Layer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Connection information announced by a mixnode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNode {
    pub host: String,
    pub mix_port: u16,
    pub verloc_port: u16,
    pub http_api_port: u16,
    pub sphinx_key: String,
    /// Base58-encoded ed25519 EdDSA public key.
    pub identity_key: IdentityKey,
    pub version: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeCostParams {
    pub profit_margin_percent: Percent,

    /// Operating cost of the associated mixnode per the entire interval.
    pub interval_operating_cost: Coin,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeConfigUpdate {
    pub host: String,
    pub mix_port: u16,
    pub verloc_port: u16,
    pub http_api_port: u16,
    pub version: String,
}

/// Bond information of a mixnode, as stored by the current contract.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeBond {
    pub mix_id: MixId,
    pub owner: Addr,
    pub original_pledge: Coin,
    pub layer: Layer,
    pub mix_node: MixNode,
    pub proxy: Option<Addr>,
    pub bonding_height: u64,

    /// Flag to indicate whether this node is in the process of unbonding,
    /// that will conclude upon the epoch finishing.
    #[serde(default)]
    pub is_unbonding: bool,
}

impl MixNodeBond {
    pub fn identity(&self) -> &str {
        &self.mix_node.identity_key
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeRewarding {
    pub cost_params: MixNodeCostParams,

    /// Total pledge and compounded reward earned by the node operator.
    pub operator: Decimal,

    /// Total delegation and compounded reward earned by all node delegators.
    pub delegates: Decimal,

    /// Cumulative reward earned by the "unit delegation" since the block 0.
    pub total_unit_reward: Decimal,

    /// Value of the theoretical "unit delegation" that has delegated to this mixnode at block 0.
    pub unit_delegation: Decimal,

    pub last_rewarded_epoch: u32,

    pub unique_delegations: u32,
}

impl MixNodeRewarding {
    pub fn operator_pledge_with_reward(&self) -> Decimal {
        self.operator
    }

    pub fn node_bond(&self) -> Decimal {
        self.operator + self.delegates
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixNodeDetails {
    pub bond_information: MixNodeBond,
    pub rewarding_details: MixNodeRewarding,
}

impl MixNodeDetails {
    pub fn mix_id(&self) -> MixId {
        self.bond_information.mix_id
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnbondedMixnode {
    pub identity_key: IdentityKey,
    pub owner: Addr,
    pub proxy: Option<Addr>,
    pub unbonding_height: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixOwnershipResponse {
    pub address: Addr,
    pub mixnode_details: Option<MixNodeDetails>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MixnodeRewardingDetailsResponse {
    pub mix_id: MixId,
    pub rewarding_details: Option<MixNodeRewarding>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UnbondedMixnodeResponse {
    pub mix_id: MixId,
    pub unbonded_info: Option<UnbondedMixnode>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct StakeSaturationResponse {
    pub mix_id: MixId,
    pub current_saturation: Option<Decimal>,
    pub uncapped_saturation: Option<Decimal>,
}

impl StakeSaturationResponse {
    /// Current saturation expressed as a percentage, capped at 100%.
    pub fn current_saturation_percent(&self) -> Option<Percent> {
        self.current_saturation
            .map(|saturation| Percent::new(saturation).unwrap_or_else(|_| Percent::hundred()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::str::FromStr;

    #[test]
    fn layer_is_encoded_as_number() {
        assert_eq!(serde_json::to_value(Layer::Two).unwrap(), json!(2));
        let layer: Layer = serde_json::from_value(json!(3)).unwrap();
        assert_eq!(layer, Layer::Three);
    }

    #[test]
    fn saturation_percent_is_capped() {
        let response = StakeSaturationResponse {
            mix_id: 1,
            current_saturation: Some(Decimal::from_str("1.25").unwrap()),
            uncapped_saturation: Some(Decimal::from_str("1.25").unwrap()),
        };
        assert_eq!(response.current_saturation_percent(), Some(Percent::hundred()));

        let response = StakeSaturationResponse {
            mix_id: 1,
            current_saturation: Some(Decimal::from_str("0.5").unwrap()),
            uncapped_saturation: None,
        };
        assert_eq!(
            response.current_saturation_percent().unwrap().to_string(),
            "50%"
        );
    }
}
