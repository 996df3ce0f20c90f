// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! In-memory snapshots of the bonded mixnodes and gateways.
//!
//! A refresh pages through the contract until it stops returning a cursor and only then
//! replaces the snapshot, so a failed refresh leaves the previous one intact.

use crate::nyxd::contract_traits::{MixnetQueryClient, Querier};
use crate::nyxd::cosmwasm_client::CosmWasmClient;
use crate::nyxd::error::NyxdError;
use crate::paging::{collect_paged, DEFAULT_MAX_PAGES};
use crate::validator_api::error::ValidatorAPIError;
use crate::validator_api::ValidatorApiQuerier;
use cosmrs::AccountId;
use nym_mixnet_contract_common::{GatewayBond, MixNodeBond};
use serde::de::DeserializeOwned;
use tracing::{info, instrument};

pub const DEFAULT_PAGE_SIZE: u32 = 100;

#[derive(Debug, Clone)]
struct Snapshot<T> {
    page_size: u32,
    max_pages: usize,
    items: Vec<T>,
}

impl<T> Snapshot<T> {
    fn new() -> Self {
        Snapshot {
            page_size: DEFAULT_PAGE_SIZE,
            max_pages: DEFAULT_MAX_PAGES,
            items: Vec::new(),
        }
    }

    fn replace(&mut self, items: Vec<T>) -> &[T] {
        self.items = items;
        &self.items
    }
}

#[derive(Debug, Clone)]
pub struct MixnodesCache<C, T = MixNodeBond> {
    querier: Querier<C>,
    snapshot: Snapshot<T>,
}

impl<C, T> MixnodesCache<C, T> {
    pub fn new(querier: Querier<C>) -> Self {
        MixnodesCache {
            querier,
            snapshot: Snapshot::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.snapshot.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.snapshot.max_pages = max_pages;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.snapshot.page_size
    }

    pub fn querier(&self) -> &Querier<C> {
        &self.querier
    }

    /// Points future refreshes at another querier. The current snapshot is kept.
    pub fn set_querier(&mut self, querier: Querier<C>) {
        self.querier = querier;
    }

    /// Mixnodes obtained by the most recent successful refresh.
    pub fn items(&self) -> &[T] {
        &self.snapshot.items
    }
}

impl<C, T> MixnodesCache<C, T>
where
    C: CosmWasmClient + Send + Sync,
    T: DeserializeOwned + Send,
{
    #[instrument(level = "debug", skip(self), fields(schema = %self.querier.schema()))]
    pub async fn refresh(&mut self, contract_address: &AccountId) -> Result<&[T], NyxdError> {
        let page_size = Some(self.snapshot.page_size);
        let querier = &self.querier;
        let mixnodes = collect_paged(
            |start_after| {
                querier.get_mixnodes_paged::<T>(contract_address, page_size, start_after)
            },
            self.snapshot.max_pages,
        )
        .await?;

        info!("refreshed the mixnodes cache with {} nodes", mixnodes.len());
        Ok(self.snapshot.replace(mixnodes))
    }

    /// Replaces the snapshot with the list served by the REST status API.
    pub async fn refresh_from_api(
        &mut self,
        api: &ValidatorApiQuerier,
    ) -> Result<&[T], ValidatorAPIError> {
        let mixnodes = api.get_mixnodes().await?;
        info!("refreshed the mixnodes cache with {} nodes from the api", mixnodes.len());
        Ok(self.snapshot.replace(mixnodes))
    }
}

#[derive(Debug, Clone)]
pub struct GatewaysCache<C, T = GatewayBond> {
    querier: Querier<C>,
    snapshot: Snapshot<T>,
}

impl<C, T> GatewaysCache<C, T> {
    pub fn new(querier: Querier<C>) -> Self {
        GatewaysCache {
            querier,
            snapshot: Snapshot::new(),
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.snapshot.page_size = page_size;
        self
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.snapshot.max_pages = max_pages;
        self
    }

    pub fn page_size(&self) -> u32 {
        self.snapshot.page_size
    }

    pub fn querier(&self) -> &Querier<C> {
        &self.querier
    }

    /// Points future refreshes at another querier. The current snapshot is kept.
    pub fn set_querier(&mut self, querier: Querier<C>) {
        self.querier = querier;
    }

    /// Gateways obtained by the most recent successful refresh.
    pub fn items(&self) -> &[T] {
        &self.snapshot.items
    }
}

impl<C, T> GatewaysCache<C, T>
where
    C: CosmWasmClient + Send + Sync,
    T: DeserializeOwned + Send,
{
    #[instrument(level = "debug", skip(self), fields(schema = %self.querier.schema()))]
    pub async fn refresh(&mut self, contract_address: &AccountId) -> Result<&[T], NyxdError> {
        let page_size = Some(self.snapshot.page_size);
        let querier = &self.querier;
        let gateways = collect_paged(
            |start_after| {
                querier.get_gateways_paged::<T>(contract_address, page_size, start_after)
            },
            self.snapshot.max_pages,
        )
        .await?;

        info!("refreshed the gateways cache with {} nodes", gateways.len());
        Ok(self.snapshot.replace(gateways))
    }

    /// Replaces the snapshot with the list served by the REST status API.
    pub async fn refresh_from_api(
        &mut self,
        api: &ValidatorApiQuerier,
    ) -> Result<&[T], ValidatorAPIError> {
        let gateways = api.get_gateways().await?;
        info!("refreshed the gateways cache with {} nodes from the api", gateways.len());
        Ok(self.snapshot.replace(gateways))
    }
}
