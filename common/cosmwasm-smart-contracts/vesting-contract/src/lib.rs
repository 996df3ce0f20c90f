// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmwasm_std::{Addr, Coin, Timestamp, Uint128};
use nym_contracts_common::PagedResponse;
use nym_mixnet_contract_common::MixId;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub mod messages;

pub use messages::ExecuteMsg;

pub type AccountsResponse = PagedResponse<BaseVestingAccountInfo>;
pub type VestingCoinsResponse = PagedResponse<AccountVestingCoins>;
pub type AllDelegationsResponse = PagedResponse<VestingDelegation>;

/// Position of the current block time relative to the vesting schedule.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Before,
    In(usize),
    After,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VestingPeriod {
    pub start_time: u64,
    pub period_seconds: u64,
}

impl VestingPeriod {
    pub fn end_time(&self) -> Timestamp {
        Timestamp::from_seconds(self.start_time + self.period_seconds)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Account {
    pub owner_address: Addr,
    pub staking_address: Option<Addr>,
    pub start_time: Timestamp,
    pub periods: Vec<VestingPeriod>,
    pub coin: Coin,
    #[serde(default)]
    pub storage_key: u32,
}

impl Account {
    pub fn num_vesting_periods(&self) -> usize {
        self.periods.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OriginalVestingResponse {
    pub amount: Coin,
    pub number_of_periods: usize,
    pub period_duration: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PledgeData {
    pub amount: Coin,
    pub block_time: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct VestingDelegation {
    pub account_id: u32,
    pub mix_id: MixId,
    pub block_timestamp: u64,
    pub amount: Uint128,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DelegationTimesResponse {
    pub owner: Addr,
    pub account_id: u32,
    pub mix_id: MixId,
    pub delegation_timestamps: Vec<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct BaseVestingAccountInfo {
    pub account_id: u32,
    pub owner: Addr,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AccountVestingCoins {
    pub account_id: u32,
    pub owner: Addr,
    pub still_vesting: Coin,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn period_variants() {
        let before: Period = serde_json::from_value(json!("before")).unwrap();
        assert_eq!(before, Period::Before);

        let during: Period = serde_json::from_value(json!({ "in": 3 })).unwrap();
        assert_eq!(during, Period::In(3));
    }

    #[test]
    fn vesting_accounts_page() {
        let page: AccountsResponse = serde_json::from_value(json!({
            "accounts": [{ "account_id": 1, "owner": "n1foo" }],
            "start_next_after": "n1foo"
        }))
        .unwrap();

        assert_eq!(page.items.len(), 1);
        assert!(!page.is_last_page());
    }
}
