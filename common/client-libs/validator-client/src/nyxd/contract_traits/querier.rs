// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::contract_traits::schema::{MixnetQuery, SchemaVersion, VestingQuery};
use crate::nyxd::contract_traits::{MixnetQueryClient, VestingQueryClient};
use crate::nyxd::cosmwasm_client::CosmWasmClient;
use crate::nyxd::error::NyxdError;
use async_trait::async_trait;
use cosmrs::AccountId;
use serde::Deserialize;
use tracing::{debug, instrument};

/// Contract querier bound to a single release of the contract query schema.
///
/// Every typed query is translated into the message understood by that release before being
/// sent to the chain; queries the release doesn't know about fail without a network round trip.
#[derive(Debug, Clone)]
pub struct Querier<C> {
    client: C,
    schema: SchemaVersion,
}

impl<C> Querier<C> {
    pub fn new(client: C, schema: SchemaVersion) -> Self {
        Querier { client, schema }
    }

    pub fn nym(client: C) -> Self {
        Self::new(client, SchemaVersion::Nym)
    }

    pub fn nymd(client: C) -> Self {
        Self::new(client, SchemaVersion::Nymd)
    }

    pub fn nyxd(client: C) -> Self {
        Self::new(client, SchemaVersion::Nyxd)
    }

    pub fn schema(&self) -> SchemaVersion {
        self.schema
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn into_inner(self) -> C {
        self.client
    }
}

#[async_trait]
impl<C> MixnetQueryClient for Querier<C>
where
    C: CosmWasmClient + Send + Sync,
{
    #[instrument(level = "debug", skip(self, query), fields(operation = query.operation()))]
    async fn query_mixnet_contract<T>(
        &self,
        contract_address: &AccountId,
        query: MixnetQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let message = query.to_message(self.schema)?;
        debug!("querying mixnet contract with {message}");
        self.client
            .query_contract_smart(contract_address, &message)
            .await
    }
}

#[async_trait]
impl<C> VestingQueryClient for Querier<C>
where
    C: CosmWasmClient + Send + Sync,
{
    #[instrument(level = "debug", skip(self, query), fields(operation = query.operation()))]
    async fn query_vesting_contract<T>(
        &self,
        contract_address: &AccountId,
        query: VestingQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let message = query.to_message(self.schema)?;
        debug!("querying vesting contract with {message}");
        self.client
            .query_contract_smart(contract_address, &message)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nyxd::contract_traits::schema::NodeKey;
    use crate::nyxd::contract_traits::PagedMixnetQueryClient;
    use crate::nyxd::cosmwasm_client::mock::MockChain;
    use nym_mixnet_contract_common::legacy::LegacyMixNodeBond;
    use nym_mixnet_contract_common::{Cursor, LayerDistribution, PagedResponse};
    use serde_json::{json, Value};

    fn contract() -> AccountId {
        AccountId::new("n", &[7; 32]).unwrap()
    }

    fn empty_page(_: &Value) -> Result<Value, NyxdError> {
        Ok(json!({ "nodes": [], "per_page": 100, "start_next_after": null }))
    }

    #[tokio::test]
    async fn nyxd_pages_mixnodes_by_numeric_id() {
        let chain = MockChain::new(|query| {
            let start_after = &query["get_mix_node_bonds"]["start_after"];
            Ok(if start_after.is_null() {
                json!({ "nodes": [], "per_page": 2, "start_next_after": 2 })
            } else {
                json!({ "nodes": [], "per_page": 2, "start_next_after": null })
            })
        });
        let querier = Querier::nyxd(chain.clone());

        let first: PagedResponse<Value> = querier
            .get_mixnodes_paged(&contract(), Some(2), None)
            .await
            .unwrap();
        assert_eq!(first.start_next_after, Some(Cursor::Id(2)));

        let _: PagedResponse<Value> = querier
            .get_mixnodes_paged(&contract(), Some(2), first.start_next_after)
            .await
            .unwrap();

        let queries = chain.queries();
        assert_eq!(queries.len(), 2);
        assert_eq!(queries[0].0, contract());
        assert_eq!(
            queries[1].1,
            json!({ "get_mix_node_bonds": { "limit": 2, "start_after": 2 } })
        );
    }

    #[tokio::test]
    async fn nymd_pages_mixnodes_by_identity() {
        let chain = MockChain::new(empty_page);
        let querier = Querier::nymd(chain.clone());

        let page: PagedResponse<LegacyMixNodeBond> = querier
            .get_mixnodes_paged(&contract(), Some(100), Some("identity".into()))
            .await
            .unwrap();
        assert!(page.items.is_empty());

        assert_eq!(
            chain.queries()[0].1,
            json!({ "get_mix_nodes": { "limit": 100, "start_after": "identity" } })
        );
    }

    #[tokio::test]
    async fn unsupported_queries_never_reach_the_chain() {
        let chain = MockChain::new(|_| Ok(json!("1000")));
        let querier = Querier::nyxd(chain.clone());

        let res = querier.get_reward_pool(&contract()).await;
        assert!(matches!(res, Err(NyxdError::UnsupportedQuery { .. })));

        let res = Querier::nym(chain.clone())
            .get_layer_distribution(&contract())
            .await;
        assert!(matches!(res, Err(NyxdError::UnsupportedQuery { .. })));

        let res: Result<PagedResponse<Value>, _> = querier
            .get_mixnode_delegations_paged(&contract(), "identity".into(), None, None)
            .await;
        assert!(matches!(res, Err(NyxdError::NodeKeyMismatch { .. })));

        assert_eq!(chain.query_count(), 0);
    }

    #[tokio::test]
    async fn responses_are_typed() {
        let chain = MockChain::new(|query| {
            assert_eq!(query, &json!({ "layer_distribution": {} }));
            Ok(json!({ "layer1": 3, "layer2": 2, "layer3": 1 }))
        });
        let querier = Querier::nymd(chain);

        let distribution = querier.get_layer_distribution(&contract()).await.unwrap();
        assert_eq!(
            distribution,
            LayerDistribution {
                layer1: 3,
                layer2: 2,
                layer3: 1
            }
        );
    }

    #[tokio::test]
    async fn remote_errors_are_propagated() {
        let chain = MockChain::new(|_| {
            Err(NyxdError::AbciError {
                code: 18,
                log: "query wasm contract failed".into(),
            })
        });
        let querier = Querier::nyxd(chain.clone());

        let res = querier.get_layer_distribution(&contract()).await;
        assert!(matches!(res, Err(NyxdError::AbciError { code: 18, .. })));
        assert_eq!(chain.query_count(), 1);
    }

    #[tokio::test]
    async fn all_mixnode_delegations_are_collected_with_the_delegators_page_limit() {
        let chain = MockChain::new(|query| {
            let body = &query["get_mixnode_delegations"];
            assert_eq!(body["mix_id"], json!(5));
            assert_eq!(body["limit"], json!(250));
            Ok(if body["start_after"].is_null() {
                json!({ "delegations": [1, 2], "start_next_after": ["n1a", 5] })
            } else {
                json!({ "delegations": [3], "start_next_after": null })
            })
        });
        let querier = Querier::nyxd(chain.clone());

        let delegations: Vec<u32> = querier
            .get_all_mixnode_delegations(&contract(), NodeKey::MixId(5))
            .await
            .unwrap();
        assert_eq!(delegations, vec![1, 2, 3]);
        assert_eq!(chain.query_count(), 2);
    }
}
