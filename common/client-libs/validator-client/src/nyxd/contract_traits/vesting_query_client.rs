// Copyright 2022-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::coin::Coin;
use crate::nyxd::contract_traits::schema::{NodeKey, VestingQuery};
use crate::nyxd::error::NyxdError;
use crate::nyxd::CosmWasmCoin;
use crate::paging::{collect_paged, DEFAULT_MAX_PAGES};
use async_trait::async_trait;
use cosmrs::AccountId;
use cosmwasm_std::Timestamp;
use nym_contracts_common::{ContractBuildInformation, Cursor};
use nym_vesting_contract_common::{
    Account, AccountVestingCoins, AccountsResponse, AllDelegationsResponse,
    BaseVestingAccountInfo, DelegationTimesResponse, OriginalVestingResponse, Period, PledgeData,
    VestingCoinsResponse, VestingDelegation,
};
use serde::Deserialize;

#[async_trait]
pub trait VestingQueryClient {
    async fn query_vesting_contract<T>(
        &self,
        contract_address: &AccountId,
        query: VestingQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>;

    async fn query_vesting_coin(
        &self,
        contract_address: &AccountId,
        query: VestingQuery,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_contract::<CosmWasmCoin>(contract_address, query)
            .await
            .map(Into::into)
    }

    async fn get_vesting_contract_version(
        &self,
        contract_address: &AccountId,
    ) -> Result<ContractBuildInformation, NyxdError> {
        self.query_vesting_contract(contract_address, VestingQuery::ContractVersion)
            .await
    }

    async fn locked_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::LockedCoins {
                vesting_account_address: vesting_account_address.to_string(),
                block_time,
            },
        )
        .await
    }

    async fn spendable_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::SpendableCoins {
                vesting_account_address: vesting_account_address.to_string(),
                block_time,
            },
        )
        .await
    }

    async fn vested_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::VestedCoins {
                vesting_account_address: vesting_account_address.to_string(),
                block_time,
            },
        )
        .await
    }

    async fn vesting_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::VestingCoins {
                vesting_account_address: vesting_account_address.to_string(),
                block_time,
            },
        )
        .await
    }

    async fn get_spendable_vested_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::SpendableVestedCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_spendable_reward_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::SpendableRewardCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_delegated_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::DelegatedCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_pledged_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::PledgedCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_staked_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::StakedCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_withdrawn_coins(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::WithdrawnCoins {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn vesting_start_time(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Timestamp, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::StartTime {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn vesting_end_time(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Timestamp, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::EndTime {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn original_vesting(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<OriginalVestingResponse, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::OriginalVesting {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_historical_vesting_staking_reward(
        &self,
        contract_address: &AccountId,
        vesting_account_address: &str,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::HistoricalStakingRewards {
                vesting_account_address: vesting_account_address.to_string(),
            },
        )
        .await
    }

    async fn get_vesting_account(
        &self,
        contract_address: &AccountId,
        address: &str,
    ) -> Result<Account, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::Account {
                address: address.to_string(),
            },
        )
        .await
    }

    async fn get_mixnode_pledge(
        &self,
        contract_address: &AccountId,
        address: &str,
    ) -> Result<Option<PledgeData>, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::Mixnode {
                address: address.to_string(),
            },
        )
        .await
    }

    async fn get_gateway_pledge(
        &self,
        contract_address: &AccountId,
        address: &str,
    ) -> Result<Option<PledgeData>, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::Gateway {
                address: address.to_string(),
            },
        )
        .await
    }

    async fn get_current_vesting_period(
        &self,
        contract_address: &AccountId,
        address: &str,
    ) -> Result<Period, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::CurrentVestingPeriod {
                address: address.to_string(),
            },
        )
        .await
    }

    async fn get_delegation_timestamps(
        &self,
        contract_address: &AccountId,
        address: &str,
        node: NodeKey,
    ) -> Result<DelegationTimesResponse, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::DelegationTimes {
                address: address.to_string(),
                node,
            },
        )
        .await
    }

    async fn get_vesting_delegation(
        &self,
        contract_address: &AccountId,
        address: &str,
        node: NodeKey,
        block_timestamp_secs: u64,
    ) -> Result<VestingDelegation, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::Delegation {
                address: address.to_string(),
                node,
                block_timestamp_secs,
            },
        )
        .await
    }

    async fn get_total_delegation_amount(
        &self,
        contract_address: &AccountId,
        address: &str,
        node: NodeKey,
    ) -> Result<Coin, NyxdError> {
        self.query_vesting_coin(
            contract_address,
            VestingQuery::TotalDelegationAmount {
                address: address.to_string(),
                node,
            },
        )
        .await
    }

    async fn get_all_vesting_delegations_paged(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<AllDelegationsResponse, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::AllDelegations { limit, start_after },
        )
        .await
    }

    async fn get_all_accounts_paged(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_next_after: Option<Cursor>,
    ) -> Result<AccountsResponse, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::Accounts {
                limit,
                start_next_after,
            },
        )
        .await
    }

    async fn get_all_accounts_vesting_coins_paged(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_next_after: Option<Cursor>,
    ) -> Result<VestingCoinsResponse, NyxdError> {
        self.query_vesting_contract(
            contract_address,
            VestingQuery::AccountsVestingCoins {
                limit,
                start_next_after,
            },
        )
        .await
    }
}

#[async_trait]
pub trait PagedVestingQueryClient: VestingQueryClient + Sync {
    async fn get_all_vesting_delegations(
        &self,
        contract_address: &AccountId,
    ) -> Result<Vec<VestingDelegation>, NyxdError> {
        collect_paged(
            |start_after| {
                self.get_all_vesting_delegations_paged(contract_address, None, start_after)
            },
            DEFAULT_MAX_PAGES,
        )
        .await
    }

    async fn get_all_accounts_info(
        &self,
        contract_address: &AccountId,
    ) -> Result<Vec<BaseVestingAccountInfo>, NyxdError> {
        collect_paged(
            |start_after| self.get_all_accounts_paged(contract_address, None, start_after),
            DEFAULT_MAX_PAGES,
        )
        .await
    }

    async fn get_all_accounts_vesting_coins(
        &self,
        contract_address: &AccountId,
    ) -> Result<Vec<AccountVestingCoins>, NyxdError> {
        collect_paged(
            |start_after| {
                self.get_all_accounts_vesting_coins_paged(contract_address, None, start_after)
            },
            DEFAULT_MAX_PAGES,
        )
        .await
    }
}

#[async_trait]
impl<C> PagedVestingQueryClient for C where C: VestingQueryClient + Sync {}
