// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::cosmwasm_client::types::{Account, SimulateResponse};
use crate::nyxd::error::NyxdError;
use crate::nyxd::fee::{GasAdjustment, DEFAULT_SIMULATED_GAS_MULTIPLIER};
use crate::nyxd::{Coin, GasPrice, TxResponse};
use crate::signing::signer::{NoSigner, OfflineSigner};
use crate::signing::tx_signer::TxSigner;
use crate::signing::SignerData;
use async_trait::async_trait;
use cosmrs::crypto::PublicKey;
use cosmrs::tendermint::{block, chain, Hash};
use cosmrs::{tx, AccountId, Any};
use tendermint_rpc::endpoint::broadcast;

pub use client_traits::{CosmWasmClient, SigningCosmWasmClient};

pub mod client_traits;
mod helpers;
pub mod types;

#[cfg(test)]
pub(crate) mod mock;

/// Fee-related settings shared by every transaction created by a signing client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub gas_price: GasPrice,
    pub simulated_gas_multiplier: GasAdjustment,
}

impl ClientOptions {
    pub fn new(gas_price: GasPrice) -> Self {
        ClientOptions {
            gas_price,
            simulated_gas_multiplier: DEFAULT_SIMULATED_GAS_MULTIPLIER,
        }
    }
}

/// Chain client that might or might not be able to sign transactions,
/// depending on whether it was given an [`OfflineSigner`].
#[derive(Debug)]
pub struct MaybeSigningClient<C, S = NoSigner> {
    client: C,
    signer: TxSigner<S>,
    opts: ClientOptions,
}

impl<C> MaybeSigningClient<C> {
    pub fn new(client: C, opts: ClientOptions) -> Self {
        MaybeSigningClient {
            client,
            signer: TxSigner::new(NoSigner),
            opts,
        }
    }
}

impl<C, S> MaybeSigningClient<C, S> {
    pub fn new_signing(client: C, signer: S, opts: ClientOptions) -> Self
    where
        S: OfflineSigner,
    {
        MaybeSigningClient {
            client,
            signer: TxSigner::new(signer),
            opts,
        }
    }

    pub fn inner(&self) -> &C {
        &self.client
    }

    /// Swaps the underlying chain client, keeping the signer and the options.
    pub fn change_client(&mut self, client: C) {
        self.client = client
    }

    pub fn signer(&self) -> &S {
        self.signer.signer()
    }

    pub fn set_simulated_gas_multiplier(&mut self, multiplier: GasAdjustment) {
        self.opts.simulated_gas_multiplier = multiplier
    }

    pub fn into_signer(self) -> S {
        self.signer.into_inner_signer()
    }
}

#[async_trait]
impl<C, S> CosmWasmClient for MaybeSigningClient<C, S>
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
impl<C, S> SigningCosmWasmClient for MaybeSigningClient<C, S>
where
    C: CosmWasmClient + Send + Sync,
    S: OfflineSigner + Send + Sync,
    NyxdError: From<S::Error>,
{
    fn gas_price(&self) -> &GasPrice {
        &self.opts.gas_price
    }

    fn simulated_gas_multiplier(&self) -> GasAdjustment {
        self.opts.simulated_gas_multiplier
    }

    fn signer_addresses(&self) -> Result<Vec<AccountId>, NyxdError> {
        Ok(self
            .signer
            .signer()
            .get_accounts()?
            .into_iter()
            .map(|account| account.address)
            .collect())
    }

    fn signer_public_key(&self, signer_address: &AccountId) -> Result<PublicKey, NyxdError> {
        Ok(self.signer.signer().find_account(signer_address)?.public_key)
    }

    fn sign_direct_tx(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: String,
        signer_data: SignerData,
    ) -> Result<tx::Raw, NyxdError> {
        Ok(self
            .signer
            .sign_direct(signer_address, messages, fee, memo, signer_data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nyxd::cosmwasm_client::mock::MockChain;
    use crate::nyxd::Fee;
    use crate::signing::direct_wallet::{generate_new_mnemonic, DirectSecp256k1HdWallet};
    use cosmrs::bank::MsgSend;
    use cosmrs::tx::Msg;

    fn signing_client(chain: MockChain) -> MaybeSigningClient<MockChain, DirectSecp256k1HdWallet> {
        let wallet =
            DirectSecp256k1HdWallet::from_mnemonic("n", generate_new_mnemonic(24).unwrap())
                .unwrap();
        MaybeSigningClient::new_signing(
            chain,
            wallet,
            ClientOptions::new("0.025unym".parse().unwrap()),
        )
    }

    fn self_transfer(address: &AccountId) -> Any {
        MsgSend {
            from_address: address.clone(),
            to_address: address.clone(),
            amount: vec![],
        }
        .to_any()
        .unwrap()
    }

    #[tokio::test]
    async fn automatic_fee_is_derived_from_simulation() {
        let chain = MockChain::new(|_| Ok(serde_json::Value::Null)).with_simulated_gas(100_000);
        let client = signing_client(chain.clone());
        let address = client.address().unwrap();
        chain.set_account(&address, 3, 5);

        let fee = client
            .determine_fee(&address, &[self_transfer(&address)], Fee::Auto(None), String::new())
            .await
            .unwrap();

        // 100000 * 1.5 gas at 0.025unym
        assert_eq!(fee.gas_limit, 150_000);
        assert_eq!(fee.amount[0].amount, 3750);
        assert_eq!(fee.amount[0].denom.as_ref(), "unym");
    }

    #[tokio::test]
    async fn explicit_multiplier_overrides_the_default() {
        let chain = MockChain::new(|_| Ok(serde_json::Value::Null)).with_simulated_gas(100_000);
        let client = signing_client(chain.clone());
        let address = client.address().unwrap();
        chain.set_account(&address, 3, 5);

        let fee = client
            .determine_fee(
                &address,
                &[self_transfer(&address)],
                Fee::Auto(Some(2.0)),
                String::new(),
            )
            .await
            .unwrap();
        assert_eq!(fee.gas_limit, 200_000);
    }

    #[tokio::test]
    async fn manual_fee_skips_simulation() {
        let chain = MockChain::new(|_| Ok(serde_json::Value::Null));
        let client = signing_client(chain);
        let address = client.address().unwrap();

        let manual = tx::Fee::from_amount_and_gas(
            cosmrs::Coin {
                denom: "unym".parse().unwrap(),
                amount: 1234,
            },
            42u64,
        );

        // the account doesn't exist on the mock chain, so any simulation attempt would fail
        let fee = client
            .determine_fee(&address, &[], Fee::Manual(manual.clone()), String::new())
            .await
            .unwrap();
        assert_eq!(fee, manual);
    }

    #[tokio::test]
    async fn signing_uses_chain_sequence() {
        let chain = MockChain::new(|_| Ok(serde_json::Value::Null));
        let client = signing_client(chain.clone());
        let address = client.address().unwrap();

        let fee = tx::Fee::from_amount_and_gas(
            cosmrs::Coin {
                denom: "unym".parse().unwrap(),
                amount: 1,
            },
            100u64,
        );

        assert!(matches!(
            client
                .sign(&address, vec![self_transfer(&address)], fee.clone(), "")
                .await,
            Err(NyxdError::NonExistentAccountError(_))
        ));

        chain.set_account(&address, 3, 5);
        let signed = client
            .sign(&address, vec![self_transfer(&address)], fee, "")
            .await
            .unwrap();
        assert!(!signed.to_bytes().unwrap().is_empty());
    }

    #[tokio::test]
    async fn unknown_signer_address_is_rejected() {
        let chain = MockChain::new(|_| Ok(serde_json::Value::Null));
        let client = signing_client(chain);
        let stranger = AccountId::new("n", &[1; 20]).unwrap();

        assert!(client.signer_public_key(&stranger).is_err());
    }
}
