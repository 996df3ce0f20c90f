// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::cache::{GatewaysCache, MixnodesCache, DEFAULT_PAGE_SIZE};
use crate::nyxd::contract_traits::{
    MixnetQueryClient, NodeKey, NymContractsProvider, PagedMixnetQueryClient,
    PagedVestingQueryClient, Querier, SchemaVersion, VestingQueryClient,
};
use crate::nyxd::error::NyxdError;
use crate::nyxd::{
    self, Coin, CosmWasmClient, GasAdjustment, GasPrice, NyxdClient, SigningCosmWasmClient,
};
use crate::signing::direct_wallet::DirectSecp256k1HdWallet;
use crate::signing::signer::{NoSigner, OfflineSigner};
use crate::validator_api::ValidatorApiQuerier;
use crate::ValidatorClientError;
use cosmrs::AccountId;
use nym_contracts_common::ContractBuildInformation;
use nym_mixnet_contract_common::legacy::LegacyContractStateParams;
use nym_mixnet_contract_common::{
    ContractStateParams, GatewayBond, LayerDistribution, MixId, MixNodeBond, RewardingParams,
    StakeSaturationResponse,
};
use nym_network_defaults::{NymNetworkDetails, ValidatorDetails};
use nym_vesting_contract_common::{Account, VestingDelegation};
use rand::seq::SliceRandom;
use serde::de::DeserializeOwned;
use std::future::Future;
use tendermint_rpc::HttpClient;
use tracing::{debug, info, instrument, warn};
use url::Url;

pub type QueryHttpRpcValidatorClient = ValidatorClient<HttpClient>;
pub type DirectSigningHttpRpcValidatorClient = ValidatorClient<HttpClient, DirectSecp256k1HdWallet>;

#[must_use]
#[derive(Debug, Clone)]
pub struct Config {
    nyxd_urls: Vec<Url>,
    api_urls: Vec<Url>,
    page_size: u32,
    nyxd_config: nyxd::Config,
}

impl TryFrom<NymNetworkDetails> for Config {
    type Error = ValidatorClientError;

    fn try_from(value: NymNetworkDetails) -> Result<Self, Self::Error> {
        Config::try_from_nym_network_details(&value)
    }
}

impl Config {
    pub fn try_from_nym_network_details(
        details: &NymNetworkDetails,
    ) -> Result<Self, ValidatorClientError> {
        // unlike `NymNetworkDetails::nyxd_urls`, a single malformed url rejects the whole config
        let nyxd_urls = details
            .endpoints
            .iter()
            .map(ValidatorDetails::nyxd_url)
            .collect::<Result<Vec<_>, _>>()?;

        let api_urls = details
            .endpoints
            .iter()
            .filter_map(ValidatorDetails::api_url)
            .collect::<Result<Vec<_>, _>>()?;

        if nyxd_urls.is_empty() {
            return Err(ValidatorClientError::NoNyxdUrlsProvided);
        }
        if api_urls.is_empty() {
            return Err(ValidatorClientError::NoAPIUrlAvailable);
        }

        Ok(Config {
            nyxd_urls,
            api_urls,
            page_size: DEFAULT_PAGE_SIZE,
            nyxd_config: nyxd::Config::try_from_nym_network_details(details)?,
        })
    }

    pub fn with_nyxd_url(mut self, nyxd_url: Url) -> Self {
        self.nyxd_urls = vec![nyxd_url];
        self
    }

    pub fn with_nyxd_urls(mut self, nyxd_urls: Vec<Url>) -> Self {
        self.nyxd_urls = nyxd_urls;
        self
    }

    pub fn with_api_urls(mut self, api_urls: Vec<Url>) -> Self {
        self.api_urls = api_urls;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.nyxd_config = self.nyxd_config.with_schema_version(schema_version);
        self
    }

    pub fn with_gas_price(mut self, gas_price: GasPrice) -> Self {
        self.nyxd_config = self.nyxd_config.with_gas_price(gas_price);
        self
    }

    pub fn with_simulated_gas_multiplier(mut self, gas_multiplier: GasAdjustment) -> Self {
        self.nyxd_config = self
            .nyxd_config
            .with_simulated_gas_multiplier(gas_multiplier);
        self
    }

    pub fn nyxd_urls(&self) -> &[Url] {
        &self.nyxd_urls
    }

    pub fn api_urls(&self) -> &[Url] {
        &self.api_urls
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.nyxd_config.schema_version()
    }
}

/// Tries every candidate exactly once, in a random order when there is more than one,
/// and returns the first client that managed to report the current block height.
async fn connect_to_responsive<C, F, Fut>(
    urls: &[Url],
    connect: F,
) -> Result<C, ValidatorClientError>
where
    C: CosmWasmClient + Send + Sync,
    F: Fn(Url) -> Fut,
    Fut: Future<Output = Result<C, NyxdError>>,
{
    let mut candidates = urls.to_vec();
    if candidates.len() > 1 {
        candidates.shuffle(&mut rand::thread_rng());
    }

    for url in candidates {
        let client = match connect(url.clone()).await {
            Ok(client) => client,
            Err(err) => {
                warn!("failed to create a client for {url}: {err}");
                continue;
            }
        };

        match client.get_height().await {
            Ok(height) => {
                debug!("{url} is alive at height {height}");
                return Ok(client);
            }
            Err(err) => warn!("{url} does not seem to be alive: {err}"),
        }
    }

    Err(ValidatorClientError::NoValidatorsAvailable)
}

async fn connect_http(url: Url) -> Result<HttpClient, NyxdError> {
    Ok(HttpClient::new(url.as_str())?)
}

/// Entry point combining the chain client, the REST status api and the node caches.
pub struct ValidatorClient<C, S = NoSigner, M = MixNodeBond, G = GatewayBond> {
    // ideally they would have been read-only, but unfortunately rust doesn't have such features
    pub nyxd: NyxdClient<C, S>,
    pub validator_api: ValidatorApiQuerier,

    mixnodes: MixnodesCache<C, M>,
    gateways: GatewaysCache<C, G>,
}

impl ValidatorClient<HttpClient> {
    #[instrument(level = "debug", skip_all)]
    pub async fn connect_for_query(
        config: Config,
    ) -> Result<QueryHttpRpcValidatorClient, ValidatorClientError> {
        let rpc_client = connect_to_responsive(&config.nyxd_urls, connect_http).await?;
        ValidatorClient::new_with_rpc_client(config, rpc_client)
    }
}

impl<S, M, G> ValidatorClient<HttpClient, S, M, G> {
    /// Switches every chain query, the caches' included, to another nyxd endpoint.
    pub fn change_nyxd(&mut self, new_endpoint: Url) -> Result<(), ValidatorClientError> {
        let rpc_client = HttpClient::new(new_endpoint.as_str()).map_err(NyxdError::from)?;
        self.change_rpc_client(rpc_client);
        Ok(())
    }
}

impl ValidatorClient<HttpClient, DirectSecp256k1HdWallet> {
    #[instrument(level = "debug", skip_all)]
    pub async fn connect(
        config: Config,
        mnemonic: bip39::Mnemonic,
    ) -> Result<DirectSigningHttpRpcValidatorClient, ValidatorClientError> {
        let prefix = &config.nyxd_config.chain_details.bech32_account_prefix;
        let wallet = DirectSecp256k1HdWallet::from_mnemonic(prefix, mnemonic)
            .map_err(NyxdError::from)?;

        let rpc_client = connect_to_responsive(&config.nyxd_urls, connect_http).await?;
        ValidatorClient::new_signing_with_rpc_client(config, rpc_client, wallet)
    }
}

impl<C, M, G> ValidatorClient<C, NoSigner, M, G>
where
    C: Clone,
{
    pub fn new_with_rpc_client(
        config: Config,
        rpc_client: C,
    ) -> Result<Self, ValidatorClientError> {
        let (mixnodes, gateways) = caches(&config, &rpc_client);

        Ok(ValidatorClient {
            validator_api: ValidatorApiQuerier::new(config.api_urls)?,
            nyxd: NyxdClient::new(config.nyxd_config, rpc_client),
            mixnodes,
            gateways,
        })
    }
}

impl<C, S, M, G> ValidatorClient<C, S, M, G>
where
    C: Clone,
{
    pub fn new_signing_with_rpc_client(
        config: Config,
        rpc_client: C,
        signer: S,
    ) -> Result<Self, ValidatorClientError>
    where
        S: OfflineSigner,
    {
        let (mixnodes, gateways) = caches(&config, &rpc_client);

        Ok(ValidatorClient {
            validator_api: ValidatorApiQuerier::new(config.api_urls)?,
            nyxd: NyxdClient::new_signing(config.nyxd_config, rpc_client, signer),
            mixnodes,
            gateways,
        })
    }
}

fn caches<C: Clone, M, G>(
    config: &Config,
    rpc_client: &C,
) -> (MixnodesCache<C, M>, GatewaysCache<C, G>) {
    let schema = config.schema_version();
    let mixnodes = MixnodesCache::new(Querier::new(rpc_client.clone(), schema))
        .with_page_size(config.page_size);
    let gateways = GatewaysCache::new(Querier::new(rpc_client.clone(), schema))
        .with_page_size(config.page_size);
    (mixnodes, gateways)
}

// no trait bounds
impl<C, S, M, G> ValidatorClient<C, S, M, G> {
    pub fn api_urls(&self) -> &[Url] {
        self.validator_api.urls()
    }

    pub fn change_validator_api(&mut self, urls: Vec<Url>) -> Result<(), ValidatorClientError> {
        Ok(self.validator_api.change_urls(urls)?)
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.nyxd.schema_version()
    }

    pub fn mixnet_contract(&self) -> Result<&AccountId, ValidatorClientError> {
        self.nyxd
            .mixnet_contract_address()
            .ok_or(ValidatorClientError::NoContractAddressAvailable("mixnet"))
    }

    pub fn vesting_contract(&self) -> Result<&AccountId, ValidatorClientError> {
        self.nyxd
            .vesting_contract_address()
            .ok_or(ValidatorClientError::NoContractAddressAvailable("vesting"))
    }

    /// Mixnodes obtained by the most recent successful refresh.
    pub fn get_cached_mixnodes(&self) -> &[M] {
        self.mixnodes.items()
    }

    /// Gateways obtained by the most recent successful refresh.
    pub fn get_cached_gateways(&self) -> &[G] {
        self.gateways.items()
    }
}

impl<C, S, M, G> ValidatorClient<C, S, M, G>
where
    C: Clone,
{
    /// Replaces the chain client used by nyxd queries and by both caches.
    /// Page sizes, schema and cached snapshots are left untouched.
    pub fn change_rpc_client(&mut self, rpc_client: C) {
        let schema = self.schema_version();
        self.mixnodes.set_querier(Querier::new(rpc_client.clone(), schema));
        self.gateways.set_querier(Querier::new(rpc_client.clone(), schema));
        self.nyxd.change_rpc_client(rpc_client);
    }
}

// caches
impl<C, S, M, G> ValidatorClient<C, S, M, G>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
    M: DeserializeOwned + Send,
    G: DeserializeOwned + Send,
{
    pub async fn refresh_mixnodes(&mut self) -> Result<&[M], ValidatorClientError> {
        let contract = self.mixnet_contract()?.clone();
        Ok(self.mixnodes.refresh(&contract).await?)
    }

    pub async fn refresh_gateways(&mut self) -> Result<&[G], ValidatorClientError> {
        let contract = self.mixnet_contract()?.clone();
        Ok(self.gateways.refresh(&contract).await?)
    }

    pub async fn refresh_validator_api_mixnodes(&mut self) -> Result<&[M], ValidatorClientError> {
        Ok(self.mixnodes.refresh_from_api(&self.validator_api).await?)
    }

    pub async fn refresh_validator_api_gateways(&mut self) -> Result<&[G], ValidatorClientError> {
        Ok(self.gateways.refresh_from_api(&self.validator_api).await?)
    }

    pub async fn get_active_mixnodes(&self) -> Result<Vec<M>, ValidatorClientError> {
        Ok(self.validator_api.get_active_mixnodes().await?)
    }

    pub async fn get_rewarded_mixnodes(&self) -> Result<Vec<M>, ValidatorClientError> {
        Ok(self.validator_api.get_rewarded_mixnodes().await?)
    }
}

// contract queries with the configured addresses
impl<C, S, M, G> ValidatorClient<C, S, M, G>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
{
    async fn minimum_pledges(&self) -> Result<(Coin, Coin), ValidatorClientError> {
        let contract = self.mixnet_contract()?;
        match self.schema_version() {
            SchemaVersion::Nyxd => {
                let params: ContractStateParams =
                    self.nyxd.get_mixnet_contract_settings(contract).await?;
                Ok((
                    params.minimum_mixnode_pledge.into(),
                    params.minimum_gateway_pledge.into(),
                ))
            }
            // older contracts only stored the amounts, always in the mix denom
            SchemaVersion::Nym | SchemaVersion::Nymd => {
                let params: LegacyContractStateParams =
                    self.nyxd.get_mixnet_contract_settings(contract).await?;
                let denom = &self.nyxd.current_chain_details().mix_denom.base;
                Ok((
                    Coin::new(params.minimum_mixnode_pledge.u128(), denom),
                    Coin::new(params.minimum_gateway_pledge.u128(), denom),
                ))
            }
        }
    }

    pub async fn minimum_mixnode_pledge(&self) -> Result<Coin, ValidatorClientError> {
        self.minimum_pledges().await.map(|(mixnode, _)| mixnode)
    }

    pub async fn minimum_gateway_pledge(&self) -> Result<Coin, ValidatorClientError> {
        self.minimum_pledges().await.map(|(_, gateway)| gateway)
    }

    pub async fn get_mixnet_contract_version(
        &self,
    ) -> Result<ContractBuildInformation, ValidatorClientError> {
        let contract = self.mixnet_contract()?;
        Ok(self.nyxd.get_mixnet_contract_version(contract).await?)
    }

    pub async fn get_layer_distribution(&self) -> Result<LayerDistribution, ValidatorClientError> {
        let contract = self.mixnet_contract()?;
        Ok(self.nyxd.get_layer_distribution(contract).await?)
    }

    pub async fn get_rewarding_parameters(&self) -> Result<RewardingParams, ValidatorClientError> {
        let contract = self.mixnet_contract()?;
        Ok(self.nyxd.get_rewarding_parameters(contract).await?)
    }

    pub async fn get_mixnode_stake_saturation(
        &self,
        mix_id: MixId,
    ) -> Result<StakeSaturationResponse, ValidatorClientError> {
        let contract = self.mixnet_contract()?;
        Ok(self
            .nyxd
            .get_mixnode_stake_saturation(contract, mix_id)
            .await?)
    }

    pub async fn get_owned_mixnode<T>(&self, owner: &AccountId) -> Result<T, ValidatorClientError>
    where
        for<'a> T: serde::Deserialize<'a>,
    {
        let contract = self.mixnet_contract()?;
        Ok(self.nyxd.get_owned_mixnode(contract, owner).await?)
    }

    pub async fn get_owned_gateway<T>(&self, owner: &AccountId) -> Result<T, ValidatorClientError>
    where
        for<'a> T: serde::Deserialize<'a>,
    {
        let contract = self.mixnet_contract()?;
        Ok(self.nyxd.get_owned_gateway(contract, owner).await?)
    }

    pub async fn get_all_mixnode_delegations<T>(
        &self,
        node: impl Into<NodeKey>,
    ) -> Result<Vec<T>, ValidatorClientError>
    where
        for<'a> T: serde::Deserialize<'a> + Send,
    {
        let contract = self.mixnet_contract()?;
        Ok(self
            .nyxd
            .get_all_mixnode_delegations(contract, node.into())
            .await?)
    }

    pub async fn get_all_delegator_delegations<T>(
        &self,
        delegator: &AccountId,
    ) -> Result<Vec<T>, ValidatorClientError>
    where
        for<'a> T: serde::Deserialize<'a> + Send,
    {
        let contract = self.mixnet_contract()?;
        Ok(self
            .nyxd
            .get_all_delegator_delegations(contract, delegator)
            .await?)
    }

    pub async fn get_vesting_account(
        &self,
        address: &str,
    ) -> Result<Account, ValidatorClientError> {
        let contract = self.vesting_contract()?;
        Ok(self.nyxd.get_vesting_account(contract, address).await?)
    }

    pub async fn get_vesting_locked_coins(
        &self,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, ValidatorClientError> {
        let contract = self.vesting_contract()?;
        Ok(self
            .nyxd
            .locked_coins(contract, vesting_account_address, block_time)
            .await?)
    }

    pub async fn get_vesting_spendable_coins(
        &self,
        vesting_account_address: &str,
        block_time: Option<u64>,
    ) -> Result<Coin, ValidatorClientError> {
        let contract = self.vesting_contract()?;
        Ok(self
            .nyxd
            .spendable_coins(contract, vesting_account_address, block_time)
            .await?)
    }

    pub async fn get_all_vesting_delegations(
        &self,
    ) -> Result<Vec<VestingDelegation>, ValidatorClientError> {
        let contract = self.vesting_contract()?;
        Ok(self.nyxd.get_all_vesting_delegations(contract).await?)
    }
}

// signing helpers, only available with a signer attached
impl<C, S, M, G> ValidatorClient<C, S, M, G>
where
    C: CosmWasmClient + Send + Sync,
    S: OfflineSigner + Send + Sync,
    NyxdError: From<S::Error>,
{
    pub fn address(&self) -> Result<AccountId, ValidatorClientError> {
        Ok(self.nyxd.address()?)
    }

    pub async fn balance(&self) -> Result<Option<Coin>, ValidatorClientError> {
        let address = self.address()?;
        info!("querying the mix denom balance of {address}");
        Ok(self.nyxd.get_mix_denom_balance(&address).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nyxd::cosmwasm_client::mock::MockChain;
    use crate::signing::direct_wallet::generate_new_mnemonic;
    use mockito::Server;
    use serde_json::{json, Value};

    type MockValidatorClient = ValidatorClient<MockChain, NoSigner, Value, Value>;

    fn config() -> Config {
        Config::try_from_nym_network_details(&NymNetworkDetails::new_mainnet()).unwrap()
    }

    #[test]
    fn config_is_built_from_network_details() {
        let config = config();
        assert_eq!(config.nyxd_urls()[0].as_str(), "https://rpc.nymtech.net/");
        assert_eq!(
            config.api_urls()[0].as_str(),
            "https://validator.nymtech.net/api/"
        );
        assert_eq!(config.page_size(), DEFAULT_PAGE_SIZE);
        assert_eq!(config.schema_version(), SchemaVersion::Nyxd);

        let malformed = NymNetworkDetails::new_empty().with_validator_endpoint(
            ValidatorDetails::new("not a url", Some("https://api.foo.com")),
        );
        assert!(matches!(
            Config::try_from_nym_network_details(&malformed),
            Err(ValidatorClientError::MalformedUrlProvided(_))
        ));

        let empty = Config::try_from_nym_network_details(&NymNetworkDetails::new_empty());
        assert!(matches!(
            empty,
            Err(ValidatorClientError::NoNyxdUrlsProvided)
        ));
    }

    #[tokio::test]
    async fn caches_use_the_configured_page_size_and_schema() {
        let chain = MockChain::new(|query| {
            let body = &query["get_mix_nodes"];
            assert_eq!(body["limit"], json!(2));
            Ok(if body["start_after"].is_null() {
                json!({ "nodes": ["A", "B"], "per_page": 2, "start_next_after": "2" })
            } else {
                json!({ "nodes": ["C"], "per_page": 2 })
            })
        });
        let config = config()
            .with_page_size(2)
            .with_schema_version(SchemaVersion::Nymd);
        let mut client: MockValidatorClient =
            ValidatorClient::new_with_rpc_client(config, chain.clone()).unwrap();

        let nodes = client.refresh_mixnodes().await.unwrap().to_vec();
        assert_eq!(nodes, vec![json!("A"), json!("B"), json!("C")]);
        assert_eq!(client.get_cached_mixnodes(), nodes.as_slice());
        assert_eq!(chain.query_count(), 2);
        assert_eq!(
            chain.queries()[0].0.to_string(),
            nym_network_defaults::mainnet::MIXNET_CONTRACT_ADDRESS
        );
    }

    #[tokio::test]
    async fn minimum_pledges_follow_the_contract_schema() {
        let chain = MockChain::new(|query| {
            Ok(if query.get("get_state_params").is_some() {
                json!({
                    "minimum_mixnode_delegation": null,
                    "minimum_mixnode_pledge": { "denom": "unym", "amount": "100000000" },
                    "minimum_gateway_pledge": { "denom": "unym", "amount": "50000000" },
                })
            } else {
                json!({
                    "minimum_mixnode_pledge": "100",
                    "minimum_gateway_pledge": "50",
                    "mixnode_rewarded_set_size": 240,
                    "mixnode_active_set_size": 240,
                })
            })
        });

        let client: MockValidatorClient =
            ValidatorClient::new_with_rpc_client(config(), chain.clone()).unwrap();
        assert_eq!(
            client.minimum_mixnode_pledge().await.unwrap(),
            Coin::new(100_000_000, "unym")
        );
        assert_eq!(
            client.minimum_gateway_pledge().await.unwrap(),
            Coin::new(50_000_000, "unym")
        );

        let legacy: MockValidatorClient = ValidatorClient::new_with_rpc_client(
            config().with_schema_version(SchemaVersion::Nym),
            chain.clone(),
        )
        .unwrap();
        assert_eq!(
            legacy.minimum_mixnode_pledge().await.unwrap(),
            Coin::new(100, "unym")
        );
        assert_eq!(chain.queries()[2].1, json!({ "state_params": {} }));
    }

    #[tokio::test]
    async fn delegations_are_paged_with_the_delegators_limit() {
        let chain = MockChain::new(|query| {
            let body = &query["get_mixnode_delegations"];
            assert_eq!(body["limit"], json!(250));
            Ok(json!({ "delegations": [1, 2], "start_next_after": null }))
        });
        let client: MockValidatorClient =
            ValidatorClient::new_with_rpc_client(config(), chain.clone()).unwrap();

        let delegations: Vec<u32> = client.get_all_mixnode_delegations(7u32).await.unwrap();
        assert_eq!(delegations, vec![1, 2]);
        assert_eq!(chain.query_count(), 1);
    }

    #[tokio::test]
    async fn refresh_without_a_mixnet_contract_fails_before_querying() {
        let mut details = NymNetworkDetails::new_mainnet();
        details.contracts.mixnet_contract_address = None;
        let chain = MockChain::new(|_| Ok(json!({ "nodes": [] })));
        let mut client: MockValidatorClient = ValidatorClient::new_with_rpc_client(
            Config::try_from_nym_network_details(&details).unwrap(),
            chain.clone(),
        )
        .unwrap();

        let res = client.refresh_gateways().await;
        assert!(matches!(
            res,
            Err(ValidatorClientError::NoContractAddressAvailable("mixnet"))
        ));
        assert_eq!(chain.query_count(), 0);
    }

    #[tokio::test]
    async fn validator_api_refresh_replaces_the_snapshot() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/gateways")
            .with_status(200)
            .with_body(r#"[{ "identity": "gw1" }]"#)
            .create_async()
            .await;

        let config = config().with_api_urls(vec![server.url().parse().unwrap()]);
        let mut client: MockValidatorClient =
            ValidatorClient::new_with_rpc_client(config, MockChain::new(|_| Ok(json!({}))))
                .unwrap();

        client.refresh_validator_api_gateways().await.unwrap();
        assert_eq!(client.get_cached_gateways(), [json!({ "identity": "gw1" })]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn signing_client_derives_its_address_from_the_mnemonic() {
        let wallet =
            DirectSecp256k1HdWallet::from_mnemonic("n", generate_new_mnemonic(24).unwrap())
                .unwrap();
        let client: ValidatorClient<MockChain, _, Value, Value> =
            ValidatorClient::new_signing_with_rpc_client(
                config(),
                MockChain::new(|_| Ok(json!({}))),
                wallet,
            )
            .unwrap();

        let address = client.address().unwrap();
        assert_eq!(address.prefix(), "n");
        assert_eq!(
            client.balance().await.unwrap(),
            Some(Coin::new(0, "unym"))
        );
    }

    #[tokio::test]
    async fn changed_rpc_client_serves_nyxd_and_cache_queries() {
        let old_chain = MockChain::new(|_| Ok(json!({ "nodes": ["old"] })));
        let new_chain = MockChain::new(|query| {
            Ok(if query.get("get_layer_distribution").is_some() {
                json!({ "layer1": 1, "layer2": 2, "layer3": 3 })
            } else {
                json!({ "nodes": ["new"] })
            })
        });
        let mut client: MockValidatorClient = ValidatorClient::new_with_rpc_client(
            config().with_page_size(5),
            old_chain.clone(),
        )
        .unwrap();
        client.refresh_mixnodes().await.unwrap();

        client.change_rpc_client(new_chain.clone());
        assert_eq!(client.get_cached_mixnodes(), [json!("old")]);

        client.refresh_mixnodes().await.unwrap();
        client.refresh_gateways().await.unwrap();
        client.get_layer_distribution().await.unwrap();
        assert_eq!(client.get_cached_mixnodes(), [json!("new")]);
        assert_eq!(client.get_cached_gateways(), [json!("new")]);
        assert_eq!(old_chain.query_count(), 1);
        assert_eq!(new_chain.query_count(), 3);
        assert_eq!(new_chain.queries()[0].1["get_mix_node_bonds"]["limit"], json!(5));
    }

    #[tokio::test]
    async fn change_nyxd_moves_every_chain_query_to_the_new_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .expect(3)
            .create_async()
            .await;

        let unused = HttpClient::new("http://127.0.0.1:1").unwrap();
        let mut client: ValidatorClient<HttpClient> =
            ValidatorClient::new_with_rpc_client(config(), unused).unwrap();
        client.change_nyxd(server.url().parse().unwrap()).unwrap();

        assert!(client.refresh_mixnodes().await.is_err());
        assert!(client.refresh_gateways().await.is_err());
        assert!(client.get_layer_distribution().await.is_err());
        mock.assert_async().await;

        let res = client.change_nyxd("ftp://rpc.nymtech.net".parse().unwrap());
        assert!(matches!(res, Err(ValidatorClientError::NyxdError(_))));
    }

    #[tokio::test]
    async fn every_nyxd_url_is_tried_once() {
        let mut first = Server::new_async().await;
        let mut second = Server::new_async().await;
        let first_mock = first
            .mock("POST", "/")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;
        let second_mock = second
            .mock("POST", "/")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let config = config().with_nyxd_urls(vec![
            first.url().parse().unwrap(),
            second.url().parse().unwrap(),
        ]);
        let res = ValidatorClient::connect_for_query(config).await;
        assert!(matches!(
            res,
            Err(ValidatorClientError::NoValidatorsAvailable)
        ));
        assert_eq!(
            res.err().map(|err| err.to_string()).as_deref(),
            Some("None of the provided validators seem to be alive")
        );

        first_mock.assert_async().await;
        second_mock.assert_async().await;
    }
}
