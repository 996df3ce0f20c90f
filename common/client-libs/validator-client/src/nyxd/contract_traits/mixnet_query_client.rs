// Copyright 2022-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::contract_traits::schema::{MixnetQuery, NodeKey};
use crate::nyxd::error::NyxdError;
use crate::paging::{collect_paged, DEFAULT_MAX_PAGES};
use async_trait::async_trait;
use cosmrs::AccountId;
use nym_mixnet_contract_common::legacy::MixnodeRewardingStatusResponse;
use nym_mixnet_contract_common::{
    ContractBuildInformation, Cursor, IdentityKey, LayerDistribution, MixId,
    MixnodeRewardingDetailsResponse, PagedMixnodesDetailsResponse, PagedResponse,
    PagedUnbondedMixnodesResponse, RewardingParams, StakeSaturationResponse, Uint128,
    MIXNODE_DELEGATORS_PAGE_LIMIT,
};
use serde::Deserialize;

/// Typed queries of the mixnet contract.
///
/// Methods whose response changed shape between contract releases are generic over the
/// response type, e.g. paging through `get_mix_nodes` of a `Nymd` contract yields
/// [`LegacyMixNodeBond`](nym_mixnet_contract_common::legacy::LegacyMixNodeBond)s while the
/// `Nyxd` contract returns [`MixNodeBond`](nym_mixnet_contract_common::MixNodeBond)s.
#[async_trait]
pub trait MixnetQueryClient {
    async fn query_mixnet_contract<T>(
        &self,
        contract_address: &AccountId,
        query: MixnetQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>;

    // state/sys-params-related

    async fn get_mixnet_contract_version(
        &self,
        contract_address: &AccountId,
    ) -> Result<ContractBuildInformation, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::ContractVersion)
            .await
    }

    async fn get_mixnet_contract_settings<T>(
        &self,
        contract_address: &AccountId,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(contract_address, MixnetQuery::StateParams)
            .await
    }

    async fn get_layer_distribution(
        &self,
        contract_address: &AccountId,
    ) -> Result<LayerDistribution, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::LayerDistribution)
            .await
    }

    async fn get_reward_pool(&self, contract_address: &AccountId) -> Result<Uint128, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::RewardPool)
            .await
    }

    async fn get_circulating_supply(
        &self,
        contract_address: &AccountId,
    ) -> Result<Uint128, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::CirculatingSupply)
            .await
    }

    async fn get_interval_reward_percent(
        &self,
        contract_address: &AccountId,
    ) -> Result<u8, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::IntervalRewardPercent)
            .await
    }

    async fn get_sybil_resistance_percent(
        &self,
        contract_address: &AccountId,
    ) -> Result<u8, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::SybilResistancePercent)
            .await
    }

    async fn get_rewarding_status(
        &self,
        contract_address: &AccountId,
        node: NodeKey,
        interval_id: u32,
    ) -> Result<MixnodeRewardingStatusResponse, NyxdError> {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::RewardingStatus { node, interval_id },
        )
        .await
    }

    async fn get_rewarding_parameters(
        &self,
        contract_address: &AccountId,
    ) -> Result<RewardingParams, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::RewardingParams)
            .await
    }

    // mixnode-related:

    async fn get_mixnodes_paged<T>(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::MixNodes { limit, start_after },
        )
        .await
    }

    async fn get_mixnodes_detailed_paged(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedMixnodesDetailsResponse, NyxdError> {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::MixNodesDetailed { limit, start_after },
        )
        .await
    }

    async fn get_unbonded_paged(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedUnbondedMixnodesResponse, NyxdError> {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::UnbondedMixNodes { limit, start_after },
        )
        .await
    }

    async fn get_owned_mixnode<T>(
        &self,
        contract_address: &AccountId,
        address: &AccountId,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::OwnedMixnode {
                address: address.to_string(),
            },
        )
        .await
    }

    async fn get_mixnode_stake_saturation(
        &self,
        contract_address: &AccountId,
        mix_id: MixId,
    ) -> Result<StakeSaturationResponse, NyxdError> {
        self.query_mixnet_contract(contract_address, MixnetQuery::StakeSaturation { mix_id })
            .await
    }

    async fn get_mixnode_rewarding_details(
        &self,
        contract_address: &AccountId,
        mix_id: MixId,
    ) -> Result<MixnodeRewardingDetailsResponse, NyxdError> {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::MixnodeRewardingDetails { mix_id },
        )
        .await
    }

    // gateway-related:

    async fn get_gateways_paged<T>(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::Gateways { limit, start_after },
        )
        .await
    }

    async fn get_owned_gateway<T>(
        &self,
        contract_address: &AccountId,
        address: &AccountId,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::OwnedGateway {
                address: address.to_string(),
            },
        )
        .await
    }

    // delegation-related:

    async fn get_mixnode_delegations_paged<T>(
        &self,
        contract_address: &AccountId,
        node: NodeKey,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::MixnodeDelegations {
                node,
                limit,
                start_after,
            },
        )
        .await
    }

    async fn get_delegator_delegations_paged<T>(
        &self,
        contract_address: &AccountId,
        delegator: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::DelegatorDelegations {
                delegator: delegator.to_string(),
                limit,
                start_after,
            },
        )
        .await
    }

    async fn get_delegation_details<T>(
        &self,
        contract_address: &AccountId,
        node: NodeKey,
        delegator: &AccountId,
        proxy: Option<String>,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::DelegationDetails {
                node,
                delegator: delegator.to_string(),
                proxy,
            },
        )
        .await
    }

    async fn get_all_network_delegations_paged<T>(
        &self,
        contract_address: &AccountId,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::AllDelegations { limit, start_after },
        )
        .await
    }

    async fn get_gateway_delegations_paged<T>(
        &self,
        contract_address: &AccountId,
        gateway_identity: IdentityKey,
        limit: Option<u32>,
        start_after: Option<Cursor>,
    ) -> Result<PagedResponse<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        self.query_mixnet_contract(
            contract_address,
            MixnetQuery::GatewayDelegations {
                gateway_identity,
                limit,
                start_after,
            },
        )
        .await
    }
}

// extension trait to the query client to deal with the paged queries
#[async_trait]
pub trait PagedMixnetQueryClient: MixnetQueryClient + Sync {
    async fn get_all_mixnode_delegations<T>(
        &self,
        contract_address: &AccountId,
        node: NodeKey,
    ) -> Result<Vec<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a> + Send,
    {
        let page_limit = Some(MIXNODE_DELEGATORS_PAGE_LIMIT as u32);
        collect_paged(
            |start_after| {
                self.get_mixnode_delegations_paged(
                    contract_address,
                    node.clone(),
                    page_limit,
                    start_after,
                )
            },
            DEFAULT_MAX_PAGES,
        )
        .await
    }

    async fn get_all_delegator_delegations<T>(
        &self,
        contract_address: &AccountId,
        delegator: &AccountId,
    ) -> Result<Vec<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a> + Send,
    {
        let page_limit = Some(MIXNODE_DELEGATORS_PAGE_LIMIT as u32);
        collect_paged(
            |start_after| {
                self.get_delegator_delegations_paged(
                    contract_address,
                    delegator,
                    page_limit,
                    start_after,
                )
            },
            DEFAULT_MAX_PAGES,
        )
        .await
    }

    async fn get_all_network_delegations<T>(
        &self,
        contract_address: &AccountId,
    ) -> Result<Vec<T>, NyxdError>
    where
        for<'a> T: Deserialize<'a> + Send,
    {
        let page_limit = Some(MIXNODE_DELEGATORS_PAGE_LIMIT as u32);
        collect_paged(
            |start_after| {
                self.get_all_network_delegations_paged(contract_address, page_limit, start_after)
            },
            DEFAULT_MAX_PAGES,
        )
        .await
    }
}

#[async_trait]
impl<C> PagedMixnetQueryClient for C where C: MixnetQueryClient + Sync {}
