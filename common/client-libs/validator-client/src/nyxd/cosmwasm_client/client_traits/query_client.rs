// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::coin::Coin;
use crate::nyxd::cosmwasm_client::helpers::CheckResponse;
use crate::nyxd::cosmwasm_client::types::{Account, SequenceResponse, SimulateResponse};
use crate::nyxd::error::NyxdError;
use crate::nyxd::TxResponse;
use async_trait::async_trait;
use cosmrs::proto::cosmos::auth::v1beta1::{QueryAccountRequest, QueryAccountResponse};
use cosmrs::proto::cosmos::bank::v1beta1::{QueryBalanceRequest, QueryBalanceResponse};
use cosmrs::proto::cosmos::tx::v1beta1::{
    SimulateRequest, SimulateResponse as ProtoSimulateResponse,
};
use cosmrs::proto::cosmwasm::wasm::v1::{
    QuerySmartContractStateRequest, QuerySmartContractStateResponse,
};
use cosmrs::tendermint::{block, chain, Hash};
use cosmrs::{AccountId, Coin as CosmosCoin};
use prost::Message;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tendermint_rpc::endpoint::broadcast;
use tendermint_rpc::Client as TendermintRpcClient;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

pub const DEFAULT_BROADCAST_POLLING_RATE: Duration = Duration::from_secs(4);
pub const DEFAULT_BROADCAST_TIMEOUT: Duration = Duration::from_secs(60);

pub(crate) const SMART_CONTRACT_STATE_PATH: &str = "/cosmwasm.wasm.v1.Query/SmartContractState";
const ACCOUNT_PATH: &str = "/cosmos.auth.v1beta1.Query/Account";
const BALANCE_PATH: &str = "/cosmos.bank.v1beta1.Query/Balance";
const SIMULATE_PATH: &str = "/cosmos.tx.v1beta1.Service/Simulate";

/// Read access to the chain: account state, transactions and cosmwasm smart queries.
///
/// Every [`tendermint_rpc::Client`] gets it for free, other implementors only have to provide
/// the handful of primitive calls, everything else is derived from them.
#[async_trait]
pub trait CosmWasmClient {
    async fn get_chain_id(&self) -> Result<chain::Id, NyxdError>;

    async fn get_height(&self) -> Result<block::Height, NyxdError>;

    async fn get_account(&self, address: &AccountId) -> Result<Option<Account>, NyxdError>;

    async fn get_balance(
        &self,
        address: &AccountId,
        search_denom: String,
    ) -> Result<Option<Coin>, NyxdError>;

    async fn get_tx(&self, id: Hash) -> Result<TxResponse, NyxdError>;

    /// Broadcast a transaction, returning the response from `CheckTx`.
    async fn broadcast_tx_sync(
        &self,
        tx: Vec<u8>,
    ) -> Result<broadcast::tx_sync::Response, NyxdError>;

    /// Runs the raw json query against the contract's smart query entry point.
    async fn query_contract_smart_raw(
        &self,
        address: &AccountId,
        query_data: Vec<u8>,
    ) -> Result<Vec<u8>, NyxdError>;

    async fn query_simulate(&self, tx_bytes: Vec<u8>) -> Result<SimulateResponse, NyxdError>;

    async fn get_sequence(&self, address: &AccountId) -> Result<SequenceResponse, NyxdError> {
        let account = self
            .get_account(address)
            .await?
            .ok_or_else(|| NyxdError::NonExistentAccountError(address.clone()))?;
        let base_account = account.try_get_base_account()?;

        Ok(SequenceResponse {
            account_number: base_account.account_number,
            sequence: base_account.sequence,
        })
    }

    async fn query_contract_smart<M, T>(
        &self,
        address: &AccountId,
        query_msg: &M,
    ) -> Result<T, NyxdError>
    where
        M: ?Sized + Serialize + Sync,
        for<'a> T: Deserialize<'a>,
    {
        // As per serde documentation:
        // Serialization can fail if `T`'s implementation of `Serialize` decides to
        // fail, or if `T` contains a map with non-string keys.
        let query_data = serde_json::to_vec(query_msg)?;
        let res = self.query_contract_smart_raw(address, query_data).await?;

        trace!("raw query response: {}", String::from_utf8_lossy(&res));
        Ok(serde_json::from_slice(&res)?)
    }

    /// Broadcasts the transaction and waits until it gets included in a block,
    /// polling the chain every `poll_interval` for at most `timeout`.
    async fn broadcast_tx(
        &self,
        tx: Vec<u8>,
        timeout: Option<Duration>,
        poll_interval: Option<Duration>,
    ) -> Result<TxResponse, NyxdError> {
        let timeout = timeout.unwrap_or(DEFAULT_BROADCAST_TIMEOUT);
        let poll_interval = poll_interval.unwrap_or(DEFAULT_BROADCAST_POLLING_RATE);

        let broadcasted = self.broadcast_tx_sync(tx).await?;

        if broadcasted.code.is_err() {
            return Err(NyxdError::BroadcastTxErrorCheckTx {
                hash: broadcasted.hash,
                code: broadcasted.code.value(),
                raw_log: broadcasted.log,
            });
        }

        let tx_hash = broadcasted.hash;

        let start = Instant::now();
        loop {
            debug!("Polling for result of including {tx_hash} in a block...");
            if Instant::now().duration_since(start) >= timeout {
                return Err(NyxdError::BroadcastTimeout {
                    hash: tx_hash,
                    timeout,
                });
            }

            if let Ok(poll_res) = self.get_tx(tx_hash).await {
                return Ok(poll_res);
            }

            sleep(poll_interval).await;
        }
    }
}

// helper method to remove duplicate code involved in making abci requests with protobuf messages
async fn make_abci_query<C, Req, Res>(client: &C, path: &str, req: Req) -> Result<Res, NyxdError>
where
    C: TendermintRpcClient + Sync,
    Req: Message,
    Res: Message + Default,
{
    trace!("performing query on abci path {path}");
    let mut buf = Vec::with_capacity(req.encoded_len());
    req.encode(&mut buf)?;

    let res = client
        .abci_query(Some(path.to_owned()), buf, None, false)
        .await?
        .check_response()?;

    Ok(Res::decode(res.value.as_ref())?)
}

#[async_trait]
impl<C> CosmWasmClient for C
where
    C: TendermintRpcClient + Send + Sync,
{
    async fn get_chain_id(&self) -> Result<chain::Id, NyxdError> {
        Ok(self.status().await?.node_info.network)
    }

    async fn get_height(&self) -> Result<block::Height, NyxdError> {
        Ok(self.status().await?.sync_info.latest_block_height)
    }

    async fn get_account(&self, address: &AccountId) -> Result<Option<Account>, NyxdError> {
        let req = QueryAccountRequest {
            address: address.to_string(),
        };

        let res: QueryAccountResponse = make_abci_query(self, ACCOUNT_PATH, req).await?;

        res.account.map(TryFrom::try_from).transpose()
    }

    async fn get_balance(
        &self,
        address: &AccountId,
        search_denom: String,
    ) -> Result<Option<Coin>, NyxdError> {
        let req = QueryBalanceRequest {
            address: address.to_string(),
            denom: search_denom,
        };

        let res: QueryBalanceResponse = make_abci_query(self, BALANCE_PATH, req).await?;

        res.balance
            .map(|proto| CosmosCoin::try_from(proto).map(Into::into))
            .transpose()
            .map_err(|_| NyxdError::SerializationError("Coin".to_owned()))
    }

    async fn get_tx(&self, id: Hash) -> Result<TxResponse, NyxdError> {
        Ok(self.tx(id, false).await?)
    }

    async fn broadcast_tx_sync(
        &self,
        tx: Vec<u8>,
    ) -> Result<broadcast::tx_sync::Response, NyxdError> {
        Ok(TendermintRpcClient::broadcast_tx_sync(self, tx).await?)
    }

    async fn query_contract_smart_raw(
        &self,
        address: &AccountId,
        query_data: Vec<u8>,
    ) -> Result<Vec<u8>, NyxdError> {
        let req = QuerySmartContractStateRequest {
            address: address.to_string(),
            query_data,
        };

        let res: QuerySmartContractStateResponse =
            make_abci_query(self, SMART_CONTRACT_STATE_PATH, req).await?;

        Ok(res.data)
    }

    // the deprecated `tx` field is left empty, the chain only looks at the raw bytes
    #[allow(deprecated)]
    async fn query_simulate(&self, tx_bytes: Vec<u8>) -> Result<SimulateResponse, NyxdError> {
        let req = SimulateRequest { tx: None, tx_bytes };

        let res: ProtoSimulateResponse = make_abci_query(self, SIMULATE_PATH, req).await?;

        Ok(res.into())
    }
}
