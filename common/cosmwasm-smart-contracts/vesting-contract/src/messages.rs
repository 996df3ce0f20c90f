// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_schema::cw_serde;
use cosmwasm_std::Coin;
use nym_mixnet_contract_common::{Gateway, MixId, MixNode, MixNodeCostParams};

#[cw_serde]
pub enum ExecuteMsg {
    DelegateToMixnode {
        on_behalf_of: Option<String>,
        mix_id: MixId,
        amount: Coin,
    },
    UndelegateFromMixnode {
        on_behalf_of: Option<String>,
        mix_id: MixId,
    },
    BondMixnode {
        mix_node: MixNode,
        cost_params: MixNodeCostParams,
        owner_signature: String,
        amount: Coin,
    },
    UnbondMixnode {},
    UpdateMixnodeCostParams {
        new_costs: MixNodeCostParams,
    },
    BondGateway {
        gateway: Gateway,
        owner_signature: String,
        amount: Coin,
    },
    UnbondGateway {},
    WithdrawVestedCoins {
        amount: Coin,
    },
    ClaimOperatorReward {},
    ClaimDelegatorReward {
        mix_id: MixId,
    },
}

impl ExecuteMsg {
    pub fn name(&self) -> &str {
        match self {
            ExecuteMsg::DelegateToMixnode { .. } => "VestingExecuteMsg::DelegateToMixnode",
            ExecuteMsg::UndelegateFromMixnode { .. } => "VestingExecuteMsg::UndelegateFromMixnode",
            ExecuteMsg::BondMixnode { .. } => "VestingExecuteMsg::BondMixnode",
            ExecuteMsg::UnbondMixnode {} => "VestingExecuteMsg::UnbondMixnode",
            ExecuteMsg::UpdateMixnodeCostParams { .. } => {
                "VestingExecuteMsg::UpdateMixnodeCostParams"
            }
            ExecuteMsg::BondGateway { .. } => "VestingExecuteMsg::BondGateway",
            ExecuteMsg::UnbondGateway {} => "VestingExecuteMsg::UnbondGateway",
            ExecuteMsg::WithdrawVestedCoins { .. } => "VestingExecuteMsg::WithdrawVestedCoins",
            ExecuteMsg::ClaimOperatorReward {} => "VestingExecuteMsg::ClaimOperatorReward",
            ExecuteMsg::ClaimDelegatorReward { .. } => "VestingExecuteMsg::ClaimDelegatorReward",
        }
    }
}
