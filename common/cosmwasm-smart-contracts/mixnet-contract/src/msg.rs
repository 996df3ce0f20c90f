// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::gateway::Gateway;
use crate::mixnode::{MixNode, MixNodeConfigUpdate, MixNodeCostParams};
use crate::types::{ContractStateParams, MixId};
use cosmwasm_schema::cw_serde;

#[cw_serde]
pub enum ExecuteMsg {
    // mixnode-related:
    BondMixnode {
        mix_node: MixNode,
        cost_params: MixNodeCostParams,
        owner_signature: String,
    },
    UnbondMixnode {},
    UpdateMixnodeCostParams {
        new_costs: MixNodeCostParams,
    },
    UpdateMixnodeConfig {
        new_config: MixNodeConfigUpdate,
    },

    // gateway-related:
    BondGateway {
        gateway: Gateway,
        owner_signature: String,
    },
    UnbondGateway {},

    // delegation-related:
    DelegateToMixnode {
        mix_id: MixId,
    },
    UndelegateFromMixnode {
        mix_id: MixId,
    },

    // reward-related
    WithdrawOperatorReward {},
    WithdrawDelegatorReward {
        mix_id: MixId,
    },

    // state/sys-params-related
    UpdateContractStateParams {
        updated_parameters: ContractStateParams,
    },
}

impl ExecuteMsg {
    pub fn default_memo(&self) -> String {
        match self {
            ExecuteMsg::BondMixnode { mix_node, .. } => {
                format!("bonding mixnode {}", mix_node.identity_key)
            }
            ExecuteMsg::UnbondMixnode {} => "unbonding mixnode".into(),
            ExecuteMsg::UpdateMixnodeCostParams { .. } => "updating mixnode cost parameters".into(),
            ExecuteMsg::UpdateMixnodeConfig { .. } => "updating mixnode configuration".into(),
            ExecuteMsg::BondGateway { gateway, .. } => {
                format!("bonding gateway {}", gateway.identity_key)
            }
            ExecuteMsg::UnbondGateway {} => "unbonding gateway".into(),
            ExecuteMsg::DelegateToMixnode { mix_id } => format!("delegating to mixnode {mix_id}"),
            ExecuteMsg::UndelegateFromMixnode { mix_id } => {
                format!("removing delegation from mixnode {mix_id}")
            }
            ExecuteMsg::WithdrawOperatorReward {} => "withdrawing operator reward".into(),
            ExecuteMsg::WithdrawDelegatorReward { mix_id } => {
                format!("withdrawing delegator reward from mixnode {mix_id}")
            }
            ExecuteMsg::UpdateContractStateParams { .. } => {
                "updating mixnet contract state parameters".into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn execute_messages_are_single_key_objects() {
        let msg = ExecuteMsg::DelegateToMixnode { mix_id: 42 };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "delegate_to_mixnode": { "mix_id": 42 } })
        );

        let msg = ExecuteMsg::UnbondGateway {};
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({ "unbond_gateway": {} })
        );
    }
}
