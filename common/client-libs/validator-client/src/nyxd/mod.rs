// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::contract_traits::schema::{MixnetQuery, SchemaVersion, VestingQuery};
use crate::nyxd::contract_traits::{
    MixnetQueryClient, NymContractsProvider, TypedNymContracts, VestingQueryClient,
};
use crate::nyxd::cosmwasm_client::types::{Account, SimulateResponse};
use crate::nyxd::cosmwasm_client::{ClientOptions, MaybeSigningClient};
use crate::nyxd::error::NyxdError;
use crate::nyxd::fee::DEFAULT_SIMULATED_GAS_MULTIPLIER;
use crate::signing::direct_wallet::DirectSecp256k1HdWallet;
use crate::signing::signer::{NoSigner, OfflineSigner};
use crate::signing::SignerData;
use async_trait::async_trait;
use cosmrs::crypto::PublicKey;
use cosmrs::tendermint::{block, chain, Hash};
use cosmrs::Any;
use nym_network_defaults::{ChainDetails, NymNetworkDetails};
use serde::Deserialize;
use tendermint_rpc::endpoint::broadcast;
use tendermint_rpc::{Error as TendermintRpcError, HttpClient, HttpClientUrl};
use tracing::debug;

pub use crate::nyxd::{
    cosmwasm_client::client_traits::{CosmWasmClient, SigningCosmWasmClient},
    fee::Fee,
};
pub use coin::{Coin, CosmWasmCoin, CosmosCoin};
pub use cosmrs::{
    tendermint::block::Height,
    tx::{self, Msg},
    AccountId, Denom, Gas,
};
pub use fee::{gas_price::GasPrice, GasAdjustable, GasAdjustment};
pub use tendermint_rpc::endpoint::tx::Response as TxResponse;

pub mod coin;
pub mod contract_traits;
pub mod cosmwasm_client;
pub mod error;
pub mod fee;

pub type QueryHttpRpcNyxdClient = NyxdClient<HttpClient>;
pub type DirectSigningHttpRpcNyxdClient = NyxdClient<HttpClient, DirectSecp256k1HdWallet>;

#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) chain_details: ChainDetails,
    pub(crate) contracts: TypedNymContracts,
    pub(crate) gas_price: GasPrice,
    pub(crate) simulated_gas_multiplier: GasAdjustment,
    pub(crate) schema_version: SchemaVersion,
}

impl Config {
    pub fn try_from_nym_network_details(details: &NymNetworkDetails) -> Result<Self, NyxdError> {
        Ok(Config {
            chain_details: details.chain_details.clone(),
            contracts: TypedNymContracts::try_from(details.contracts.clone())?,
            gas_price: GasPrice::default_for_chain(&details.chain_details)?,
            simulated_gas_multiplier: DEFAULT_SIMULATED_GAS_MULTIPLIER,
            schema_version: SchemaVersion::default(),
        })
    }

    pub fn with_simulated_gas_multiplier(
        mut self,
        simulated_gas_multiplier: GasAdjustment,
    ) -> Self {
        self.simulated_gas_multiplier = simulated_gas_multiplier;
        self
    }

    pub fn with_gas_price(mut self, gas_price: GasPrice) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_schema_version(mut self, schema_version: SchemaVersion) -> Self {
        self.schema_version = schema_version;
        self
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.schema_version
    }
}

impl From<&Config> for ClientOptions {
    fn from(config: &Config) -> Self {
        ClientOptions {
            gas_price: config.gas_price.clone(),
            simulated_gas_multiplier: config.simulated_gas_multiplier,
        }
    }
}

/// Nyx chain client aware of the Nym contracts.
///
/// Without a signer it only exposes the query capabilities; attaching an [`OfflineSigner`]
/// unlocks [`SigningCosmWasmClient`] and, through it, the contract signing clients.
#[derive(Debug)]
pub struct NyxdClient<C, S = NoSigner> {
    client: MaybeSigningClient<C, S>,
    config: Config,
}

impl NyxdClient<HttpClient> {
    pub fn connect<U>(config: Config, endpoint: U) -> Result<QueryHttpRpcNyxdClient, NyxdError>
    where
        U: TryInto<HttpClientUrl, Error = TendermintRpcError>,
    {
        let client = HttpClient::new(endpoint)?;
        Ok(NyxdClient::new(config, client))
    }
}

impl NyxdClient<HttpClient, DirectSecp256k1HdWallet> {
    pub fn connect_with_mnemonic<U>(
        config: Config,
        endpoint: U,
        mnemonic: bip39::Mnemonic,
    ) -> Result<DirectSigningHttpRpcNyxdClient, NyxdError>
    where
        U: TryInto<HttpClientUrl, Error = TendermintRpcError>,
    {
        let client = HttpClient::new(endpoint)?;

        let prefix = &config.chain_details.bech32_account_prefix;
        let wallet = DirectSecp256k1HdWallet::from_mnemonic(prefix, mnemonic)?;
        Ok(NyxdClient::new_signing(config, client, wallet))
    }
}

impl<C> NyxdClient<C> {
    pub fn new(config: Config, client: C) -> Self {
        NyxdClient {
            client: MaybeSigningClient::new(client, (&config).into()),
            config,
        }
    }
}

impl<S> NyxdClient<HttpClient, S> {
    pub fn change_endpoint<U>(&mut self, new_endpoint: U) -> Result<(), NyxdError>
    where
        U: TryInto<HttpClientUrl, Error = TendermintRpcError>,
    {
        self.change_rpc_client(HttpClient::new(new_endpoint)?);
        Ok(())
    }
}

// no trait bounds
impl<C, S> NyxdClient<C, S> {
    pub fn new_signing(config: Config, client: C, signer: S) -> Self
    where
        S: OfflineSigner,
    {
        NyxdClient {
            client: MaybeSigningClient::new_signing(client, signer, (&config).into()),
            config,
        }
    }

    pub fn current_config(&self) -> &Config {
        &self.config
    }

    pub fn current_chain_details(&self) -> &ChainDetails {
        &self.config.chain_details
    }

    pub fn schema_version(&self) -> SchemaVersion {
        self.config.schema_version
    }

    pub fn inner_client(&self) -> &C {
        self.client.inner()
    }

    pub fn signer(&self) -> &S {
        self.client.signer()
    }

    pub fn change_rpc_client(&mut self, client: C) {
        self.client.change_client(client)
    }

    pub fn set_mixnet_contract_address(&mut self, address: AccountId) {
        self.config.contracts.mixnet_contract_address = Some(address);
    }

    pub fn set_vesting_contract_address(&mut self, address: AccountId) {
        self.config.contracts.vesting_contract_address = Some(address);
    }

    pub fn set_simulated_gas_multiplier(&mut self, multiplier: GasAdjustment) {
        self.config.simulated_gas_multiplier = multiplier;
        self.client.set_simulated_gas_multiplier(multiplier);
    }

    pub fn set_schema_version(&mut self, schema_version: SchemaVersion) {
        self.config.schema_version = schema_version;
    }
}

impl<C, S> NymContractsProvider for NyxdClient<C, S> {
    fn mixnet_contract_address(&self) -> Option<&AccountId> {
        self.config.contracts.mixnet_contract_address.as_ref()
    }

    fn vesting_contract_address(&self) -> Option<&AccountId> {
        self.config.contracts.vesting_contract_address.as_ref()
    }
}

// queries
impl<C, S> NyxdClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
{
    pub async fn get_account_public_key(
        &self,
        address: &AccountId,
    ) -> Result<Option<PublicKey>, NyxdError> {
        if let Some(account) = self.client.get_account(address).await? {
            let base_account = account.try_get_base_account()?;
            return Ok(base_account.pubkey);
        }

        Ok(None)
    }

    pub async fn get_current_block_height(&self) -> Result<Height, NyxdError> {
        self.client.get_height().await
    }

    /// Balance of the provided address in the mix denomination of the chain.
    pub async fn get_mix_denom_balance(
        &self,
        address: &AccountId,
    ) -> Result<Option<Coin>, NyxdError> {
        self.client
            .get_balance(address, self.config.chain_details.mix_denom.base.clone())
            .await
    }
}

#[async_trait]
impl<C, S> CosmWasmClient for NyxdClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
{
    async fn get_chain_id(&self) -> Result<chain::Id, NyxdError> {
        self.client.get_chain_id().await
    }

    async fn get_height(&self) -> Result<block::Height, NyxdError> {
        self.client.get_height().await
    }

    async fn get_account(&self, address: &AccountId) -> Result<Option<Account>, NyxdError> {
        self.client.get_account(address).await
    }

    async fn get_balance(
        &self,
        address: &AccountId,
        search_denom: String,
    ) -> Result<Option<Coin>, NyxdError> {
        self.client.get_balance(address, search_denom).await
    }

    async fn get_tx(&self, id: Hash) -> Result<TxResponse, NyxdError> {
        self.client.get_tx(id).await
    }

    async fn broadcast_tx_sync(
        &self,
        tx: Vec<u8>,
    ) -> Result<broadcast::tx_sync::Response, NyxdError> {
        self.client.broadcast_tx_sync(tx).await
    }

    async fn query_contract_smart_raw(
        &self,
        address: &AccountId,
        query_data: Vec<u8>,
    ) -> Result<Vec<u8>, NyxdError> {
        self.client.query_contract_smart_raw(address, query_data).await
    }

    async fn query_simulate(&self, tx_bytes: Vec<u8>) -> Result<SimulateResponse, NyxdError> {
        self.client.query_simulate(tx_bytes).await
    }
}

#[async_trait]
impl<C, S> SigningCosmWasmClient for NyxdClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: OfflineSigner + Send + Sync,
    NyxdError: From<S::Error>,
{
    fn gas_price(&self) -> &GasPrice {
        self.client.gas_price()
    }

    fn simulated_gas_multiplier(&self) -> GasAdjustment {
        self.client.simulated_gas_multiplier()
    }

    fn signer_addresses(&self) -> Result<Vec<AccountId>, NyxdError> {
        self.client.signer_addresses()
    }

    fn signer_public_key(&self, signer_address: &AccountId) -> Result<PublicKey, NyxdError> {
        self.client.signer_public_key(signer_address)
    }

    fn sign_direct_tx(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: String,
        signer_data: SignerData,
    ) -> Result<tx::Raw, NyxdError> {
        self.client
            .sign_direct_tx(signer_address, messages, fee, memo, signer_data)
    }
}

#[async_trait]
impl<C, S> MixnetQueryClient for NyxdClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
{
    async fn query_mixnet_contract<T>(
        &self,
        contract_address: &AccountId,
        query: MixnetQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let message = query.to_message(self.config.schema_version)?;
        debug!("querying mixnet contract with {message}");
        self.client
            .query_contract_smart(contract_address, &message)
            .await
    }
}

#[async_trait]
impl<C, S> VestingQueryClient for NyxdClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: Send + Sync,
{
    async fn query_vesting_contract<T>(
        &self,
        contract_address: &AccountId,
        query: VestingQuery,
    ) -> Result<T, NyxdError>
    where
        for<'a> T: Deserialize<'a>,
    {
        let message = query.to_message(self.config.schema_version)?;
        debug!("querying vesting contract with {message}");
        self.client
            .query_contract_smart(contract_address, &message)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nyxd::contract_traits::{MixnetSigningClient, PagedMixnetQueryClient};
    use crate::nyxd::cosmwasm_client::mock::MockChain;
    use crate::signing::direct_wallet::generate_new_mnemonic;
    use nym_mixnet_contract_common::LayerDistribution;
    use serde_json::json;

    fn mixnet_contract() -> AccountId {
        AccountId::new("n", &[3; 32]).unwrap()
    }

    fn config() -> Config {
        let mut config =
            Config::try_from_nym_network_details(&NymNetworkDetails::new_mainnet()).unwrap();
        config.contracts.mixnet_contract_address = Some(mixnet_contract());
        config
    }

    #[test]
    fn config_defaults_to_the_latest_schema() {
        let config = config();
        assert_eq!(config.schema_version(), SchemaVersion::Nyxd);
        assert_eq!(config.gas_price.denom, "unym");
        assert_eq!(
            config.with_schema_version(SchemaVersion::Nym).schema_version(),
            SchemaVersion::Nym
        );
    }

    #[tokio::test]
    async fn queries_follow_the_configured_schema() {
        let chain = MockChain::new(|_| Ok(json!({ "layer1": 1, "layer2": 1, "layer3": 1 })));
        let mut client = NyxdClient::new(config(), chain.clone());

        client
            .get_layer_distribution(&mixnet_contract())
            .await
            .unwrap();
        client.set_schema_version(SchemaVersion::Nym);
        let res: Result<LayerDistribution, _> =
            client.get_layer_distribution(&mixnet_contract()).await;
        assert!(matches!(res, Err(NyxdError::UnsupportedQuery { .. })));

        // only the first query made it to the chain
        assert_eq!(chain.query_count(), 1);
    }

    #[tokio::test]
    async fn paged_collection_goes_through_the_client() {
        let chain = MockChain::new(|query| {
            Ok(if query["get_delegator_delegations"]["start_after"].is_null() {
                json!({ "delegations": ["a"], "start_next_after": [7, "n1proxy"] })
            } else {
                json!({ "delegations": ["b"], "start_next_after": null })
            })
        });
        let client = NyxdClient::new(config(), chain.clone());

        let delegations: Vec<String> = client
            .get_all_delegator_delegations(&mixnet_contract(), &mixnet_contract())
            .await
            .unwrap();
        assert_eq!(delegations, vec!["a", "b"]);
        assert_eq!(chain.query_count(), 2);
    }

    #[tokio::test]
    async fn execution_requires_a_mixnet_contract() {
        let wallet =
            DirectSecp256k1HdWallet::from_mnemonic("n", generate_new_mnemonic(24).unwrap())
                .unwrap();
        let mut config = config();
        config.contracts.mixnet_contract_address = None;

        let client = NyxdClient::new_signing(config, MockChain::new(|_| Ok(json!({}))), wallet);
        let res = client.unbond_mixnode(None).await;
        assert!(matches!(
            res,
            Err(NyxdError::NoContractAddressAvailable("mixnet"))
        ));
    }
}
