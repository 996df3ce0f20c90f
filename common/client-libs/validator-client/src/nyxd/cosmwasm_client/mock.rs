// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

//! In-memory chain used by the unit tests. Smart queries are answered by the provided
//! responder and recorded, so tests can assert on the exact messages that were sent.

use crate::nyxd::cosmwasm_client::types::{Account, BaseAccount, GasInfo, SimulateResponse};
use crate::nyxd::cosmwasm_client::CosmWasmClient;
use crate::nyxd::error::NyxdError;
use crate::nyxd::{Coin, Gas, TxResponse};
use async_trait::async_trait;
use cosmrs::tendermint::{block, chain, Hash};
use cosmrs::AccountId;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tendermint_rpc::endpoint::broadcast;

type Responder = dyn Fn(&Value) -> Result<Value, NyxdError> + Send + Sync;

fn unsupported(call: &str) -> NyxdError {
    NyxdError::AbciError {
        code: 1,
        log: format!("{call} is not supported by the mock chain"),
    }
}

#[derive(Clone)]
pub(crate) struct MockChain {
    responder: Arc<Responder>,
    queries: Arc<Mutex<Vec<(AccountId, Value)>>>,
    account: Arc<Mutex<Option<BaseAccount>>>,
    simulated_gas: Option<Gas>,
}

impl MockChain {
    pub(crate) fn new<F>(responder: F) -> Self
    where
        F: Fn(&Value) -> Result<Value, NyxdError> + Send + Sync + 'static,
    {
        MockChain {
            responder: Arc::new(responder),
            queries: Default::default(),
            account: Default::default(),
            simulated_gas: None,
        }
    }

    pub(crate) fn with_simulated_gas(mut self, gas: Gas) -> Self {
        self.simulated_gas = Some(gas);
        self
    }

    pub(crate) fn set_account(&self, address: &AccountId, account_number: u64, sequence: u64) {
        *self.account.lock().unwrap() = Some(BaseAccount {
            address: address.clone(),
            pubkey: None,
            account_number,
            sequence,
        })
    }

    pub(crate) fn queries(&self) -> Vec<(AccountId, Value)> {
        self.queries.lock().unwrap().clone()
    }

    pub(crate) fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl CosmWasmClient for MockChain {
    async fn get_chain_id(&self) -> Result<chain::Id, NyxdError> {
        Ok("nyx-mock".parse().unwrap())
    }

    async fn get_height(&self) -> Result<block::Height, NyxdError> {
        Ok(block::Height::from(42u32))
    }

    async fn get_account(&self, address: &AccountId) -> Result<Option<Account>, NyxdError> {
        Ok(self
            .account
            .lock()
            .unwrap()
            .clone()
            .filter(|account| &account.address == address)
            .map(Account::Base))
    }

    async fn get_balance(
        &self,
        _address: &AccountId,
        search_denom: String,
    ) -> Result<Option<Coin>, NyxdError> {
        Ok(Some(Coin::new(0, search_denom)))
    }

    async fn get_tx(&self, _id: Hash) -> Result<TxResponse, NyxdError> {
        Err(unsupported("get_tx"))
    }

    async fn broadcast_tx_sync(
        &self,
        _tx: Vec<u8>,
    ) -> Result<broadcast::tx_sync::Response, NyxdError> {
        Err(unsupported("broadcast_tx_sync"))
    }

    async fn query_contract_smart_raw(
        &self,
        address: &AccountId,
        query_data: Vec<u8>,
    ) -> Result<Vec<u8>, NyxdError> {
        let query: Value = serde_json::from_slice(&query_data)?;
        self.queries
            .lock()
            .unwrap()
            .push((address.clone(), query.clone()));

        let response = (self.responder)(&query)?;
        Ok(serde_json::to_vec(&response)?)
    }

    async fn query_simulate(&self, _tx_bytes: Vec<u8>) -> Result<SimulateResponse, NyxdError> {
        Ok(SimulateResponse {
            gas_info: self
                .simulated_gas
                .map(|gas_used| GasInfo::new(gas_used * 2, gas_used)),
            result: None,
        })
    }
}
