// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::coin::Coin;
use crate::nyxd::cosmwasm_client::client_traits::CosmWasmClient;
use crate::nyxd::cosmwasm_client::helpers::{
    compress_wasm_code, find_event_attribute, CheckResponse,
};
use crate::nyxd::cosmwasm_client::types::{
    ChangeAdminResult, ContractCodeId, ExecuteResult, GasInfo, InstantiateOptions,
    InstantiateResult, MigrateResult, SimulateResponse, UploadResult,
};
use crate::nyxd::error::NyxdError;
use crate::nyxd::fee::{Fee, GasAdjustable, GasAdjustment};
use crate::nyxd::{GasPrice, TxResponse};
use crate::signing::SignerData;
use async_trait::async_trait;
use cosmrs::bank::MsgSend;
use cosmrs::crypto::PublicKey;
use cosmrs::proto::cosmos::tx::v1beta1::TxRaw;
use cosmrs::tx::{self, Msg, SignerInfo};
use cosmrs::{cosmwasm, AccountId, Any, Coin as CosmosCoin};
use prost::Message;
use serde::Serialize;
use tracing::debug;

fn to_any<M: Msg>(msg: M, name: &str) -> Result<Any, NyxdError> {
    msg.to_any()
        .map_err(|_| NyxdError::SerializationError(name.to_owned()))
}

fn cosmos_coins(coins: Vec<Coin>) -> Result<Vec<CosmosCoin>, NyxdError> {
    coins.into_iter().map(TryInto::try_into).collect()
}

fn empty_fee() -> tx::Fee {
    tx::Fee {
        amount: Vec::new(),
        gas_limit: 0,
        payer: None,
        granter: None,
    }
}

/// Transaction surface of the chain client: everything that requires a signer.
///
/// Query-only clients never implement it, so calling any of those methods on them
/// is rejected at compile time.
#[async_trait]
pub trait SigningCosmWasmClient: CosmWasmClient {
    fn gas_price(&self) -> &GasPrice;

    fn simulated_gas_multiplier(&self) -> GasAdjustment;

    fn signer_addresses(&self) -> Result<Vec<AccountId>, NyxdError>;

    fn signer_public_key(&self, signer_address: &AccountId) -> Result<PublicKey, NyxdError>;

    fn sign_direct_tx(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: String,
        signer_data: SignerData,
    ) -> Result<tx::Raw, NyxdError>;

    /// Address of the first account held by the signer.
    fn address(&self) -> Result<AccountId, NyxdError> {
        self.signer_addresses()?
            .into_iter()
            .next()
            .ok_or(NyxdError::NoSignerAccounts)
    }

    async fn simulate(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<SimulateResponse, NyxdError> {
        let public_key = self.signer_public_key(signer_address)?;
        let sequence_response = self.get_sequence(signer_address).await?;

        let body = tx::Body::new(messages, memo, 0u32);
        let auth_info =
            SignerInfo::single_direct(Some(public_key), sequence_response.sequence)
                .auth_info(empty_fee());

        // the chain does not verify signatures during simulation, but it does expect one to exist
        let raw = TxRaw {
            body_bytes: body
                .into_bytes()
                .map_err(|_| NyxdError::SerializationError("TxBody".to_owned()))?,
            auth_info_bytes: auth_info
                .into_bytes()
                .map_err(|_| NyxdError::SerializationError("AuthInfo".to_owned()))?,
            signatures: vec![Vec::new()],
        };

        self.query_simulate(raw.encode_to_vec()).await
    }

    /// Resolves the fee into its manual form, simulating the transaction if needed.
    async fn determine_fee(
        &self,
        signer_address: &AccountId,
        messages: &[Any],
        fee: Fee,
        memo: String,
    ) -> Result<tx::Fee, NyxdError> {
        let multiplier = match fee {
            Fee::Manual(fee) => return Ok(fee),
            Fee::Auto(multiplier) => multiplier.unwrap_or(self.simulated_gas_multiplier()),
        };

        let gas_estimation = self
            .simulate(signer_address, messages.to_vec(), memo)
            .await?
            .gas_info
            .ok_or(NyxdError::GasEstimationFailure)?
            .gas_used;

        let gas = gas_estimation.adjust_gas(multiplier);
        debug!(
            "gas estimation: {gas_estimation}, using {gas} after applying {multiplier} multiplier"
        );

        let fee_amount = self.gas_price().fee_for(gas);
        Ok(tx::Fee::from_amount_and_gas(fee_amount.try_into()?, gas))
    }

    async fn sign(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<tx::Raw, NyxdError> {
        let sequence_response = self.get_sequence(signer_address).await?;
        let chain_id = self.get_chain_id().await?;

        let signer_data = SignerData {
            account_number: sequence_response.account_number,
            sequence: sequence_response.sequence,
            chain_id,
        };

        self.sign_direct_tx(signer_address, messages, fee, memo.into(), signer_data)
    }

    /// Signs the messages, broadcasts them and waits for the transaction to get included in a block.
    async fn sign_and_broadcast(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<TxResponse, NyxdError> {
        let memo = memo.into();
        let fee = self
            .determine_fee(signer_address, &messages, fee, memo.clone())
            .await?;

        let tx_raw = self.sign(signer_address, messages, fee, memo).await?;
        let tx_bytes = tx_raw
            .to_bytes()
            .map_err(|_| NyxdError::SerializationError("Tx".to_owned()))?;

        self.broadcast_tx(tx_bytes, None, None)
            .await?
            .check_response()
    }

    async fn send_tokens(
        &self,
        sender_address: &AccountId,
        recipient_address: &AccountId,
        amount: Vec<Coin>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<TxResponse, NyxdError> {
        let send_msg = MsgSend {
            from_address: sender_address.clone(),
            to_address: recipient_address.clone(),
            amount: cosmos_coins(amount)?,
        };

        self.sign_and_broadcast(sender_address, vec![to_any(send_msg, "MsgSend")?], fee, memo)
            .await
    }

    async fn send_tokens_multiple(
        &self,
        sender_address: &AccountId,
        msgs: Vec<(AccountId, Vec<Coin>)>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<TxResponse, NyxdError> {
        let messages = msgs
            .into_iter()
            .map(|(recipient, amount)| {
                let send_msg = MsgSend {
                    from_address: sender_address.clone(),
                    to_address: recipient,
                    amount: cosmos_coins(amount)?,
                };
                to_any(send_msg, "MsgSend")
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.sign_and_broadcast(sender_address, messages, fee, memo)
            .await
    }

    async fn execute<M>(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        msg: &M,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
        funds: Vec<Coin>,
    ) -> Result<ExecuteResult, NyxdError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let execute_msg = cosmwasm::MsgExecuteContract {
            sender: sender_address.clone(),
            contract: contract_address.clone(),
            msg: serde_json::to_vec(msg)?,
            funds: cosmos_coins(funds)?,
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(execute_msg, "MsgExecuteContract")?],
                fee,
                memo,
            )
            .await?;

        Ok(tx_res.into())
    }

    async fn execute_multiple<I, M>(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        msgs: I,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<ExecuteResult, NyxdError>
    where
        I: IntoIterator<Item = (M, Vec<Coin>)> + Send,
        M: Serialize,
    {
        let messages = msgs
            .into_iter()
            .map(|(msg, funds)| {
                let execute_msg = cosmwasm::MsgExecuteContract {
                    sender: sender_address.clone(),
                    contract: contract_address.clone(),
                    msg: serde_json::to_vec(&msg)?,
                    funds: cosmos_coins(funds)?,
                };
                to_any(execute_msg, "MsgExecuteContract")
            })
            .collect::<Result<Vec<_>, _>>()?;

        let tx_res = self
            .sign_and_broadcast(sender_address, messages, fee, memo)
            .await?;

        Ok(tx_res.into())
    }

    /// Uploads gzip-compressed wasm code and returns the code id assigned by the chain.
    async fn upload(
        &self,
        sender_address: &AccountId,
        wasm_code: Vec<u8>,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<UploadResult, NyxdError> {
        let compressed = compress_wasm_code(&wasm_code)?;
        let compressed_size = compressed.len();

        let upload_msg = cosmwasm::MsgStoreCode {
            sender: sender_address.clone(),
            wasm_byte_code: compressed,
            instantiate_permission: None,
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(upload_msg, "MsgStoreCode")?],
                fee,
                memo,
            )
            .await?;

        let code_id: ContractCodeId =
            find_event_attribute(&tx_res.tx_result.events, "store_code", "code_id")?
                .parse()
                .map_err(|_| NyxdError::MissingEventAttribute {
                    event_type: "store_code",
                    attribute: "code_id",
                })?;

        Ok(UploadResult {
            original_size: wasm_code.len(),
            compressed_size,
            code_id,
            gas_info: GasInfo::from_tx_response(&tx_res),
            transaction_hash: tx_res.hash,
            height: tx_res.height,
        })
    }

    #[allow(clippy::too_many_arguments)]
    async fn instantiate<M>(
        &self,
        sender_address: &AccountId,
        code_id: ContractCodeId,
        msg: &M,
        label: String,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
        options: Option<InstantiateOptions>,
    ) -> Result<InstantiateResult, NyxdError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let options = options.unwrap_or_default();
        let init_msg = cosmwasm::MsgInstantiateContract {
            sender: sender_address.clone(),
            admin: options.admin,
            code_id,
            label: Some(label),
            msg: serde_json::to_vec(msg)?,
            funds: cosmos_coins(options.funds)?,
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(init_msg, "MsgInstantiateContract")?],
                fee,
                memo,
            )
            .await?;

        let raw_address =
            find_event_attribute(&tx_res.tx_result.events, "instantiate", "_contract_address")?;
        let contract_address = raw_address
            .parse()
            .map_err(|_| NyxdError::MalformedAccountAddress(raw_address))?;

        Ok(InstantiateResult {
            contract_address,
            gas_info: GasInfo::from_tx_response(&tx_res),
            transaction_hash: tx_res.hash,
            height: tx_res.height,
            events: tx_res.tx_result.events,
        })
    }

    async fn update_admin(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        new_admin: &AccountId,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<ChangeAdminResult, NyxdError> {
        let change_admin_msg = cosmwasm::MsgUpdateAdmin {
            sender: sender_address.clone(),
            new_admin: new_admin.clone(),
            contract: contract_address.clone(),
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(change_admin_msg, "MsgUpdateAdmin")?],
                fee,
                memo,
            )
            .await?;

        Ok(ChangeAdminResult {
            gas_info: GasInfo::from_tx_response(&tx_res),
            transaction_hash: tx_res.hash,
            height: tx_res.height,
            events: tx_res.tx_result.events,
        })
    }

    async fn clear_admin(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        fee: Fee,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<ChangeAdminResult, NyxdError> {
        let clear_admin_msg = cosmwasm::MsgClearAdmin {
            sender: sender_address.clone(),
            contract: contract_address.clone(),
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(clear_admin_msg, "MsgClearAdmin")?],
                fee,
                memo,
            )
            .await?;

        Ok(ChangeAdminResult {
            gas_info: GasInfo::from_tx_response(&tx_res),
            transaction_hash: tx_res.hash,
            height: tx_res.height,
            events: tx_res.tx_result.events,
        })
    }

    async fn migrate<M>(
        &self,
        sender_address: &AccountId,
        contract_address: &AccountId,
        code_id: ContractCodeId,
        fee: Fee,
        msg: &M,
        memo: impl Into<String> + Send + 'static,
    ) -> Result<MigrateResult, NyxdError>
    where
        M: ?Sized + Serialize + Sync,
    {
        let migrate_msg = cosmwasm::MsgMigrateContract {
            sender: sender_address.clone(),
            contract: contract_address.clone(),
            code_id,
            msg: serde_json::to_vec(msg)?,
        };

        let tx_res = self
            .sign_and_broadcast(
                sender_address,
                vec![to_any(migrate_msg, "MsgMigrateContract")?],
                fee,
                memo,
            )
            .await?;

        Ok(MigrateResult {
            gas_info: GasInfo::from_tx_response(&tx_res),
            transaction_hash: tx_res.hash,
            height: tx_res.height,
            events: tx_res.tx_result.events,
        })
    }
}
