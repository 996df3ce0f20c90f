// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::contract_traits::SchemaVersion;
use crate::signing::{DirectSecp256k1HdWalletError, SigningError};
use cosmrs::tendermint::{block, Hash};
use cosmrs::AccountId;
use nym_contracts_common::Cursor;
use std::io;
use std::time::Duration;
use thiserror::Error;

pub use tendermint_rpc::error::Error as TendermintRpcError;

#[derive(Debug, Error)]
pub enum NyxdError {
    #[error("no {0} contract address is available to perform the call")]
    NoContractAddressAvailable(&'static str),

    #[error(transparent)]
    WalletError(#[from] DirectSecp256k1HdWalletError),

    #[error(transparent)]
    SigningFailure(#[from] SigningError),

    #[error("the signer does not hold any accounts")]
    NoSignerAccounts,

    #[error("There was an issue with a tendermint RPC request - {0}")]
    TendermintErrorRpc(#[from] TendermintRpcError),

    #[error("There was an issue when attempting to serialize data ({0})")]
    SerializationError(String),

    #[error("There was an issue when attempting to encode our protobuf data - {0}")]
    ProtobufEncodingError(#[from] prost::EncodeError),

    #[error("There was an issue when attempting to decode our protobuf data - {0}")]
    ProtobufDecodingError(#[from] prost::DecodeError),

    #[error("Account {0} does not exist on the chain")]
    NonExistentAccountError(AccountId),

    #[error("There was an issue with the serialization/deserialization - {0}")]
    SerdeJsonError(#[from] serde_json::Error),

    #[error("Account {0} is not a valid account address")]
    MalformedAccountAddress(String),

    #[error("Account {0} has an invalid associated public key")]
    InvalidPublicKey(AccountId),

    #[error("Unsupported account type: {type_url}")]
    UnsupportedAccountType { type_url: String },

    #[error("This account does not have BaseAccount information available to it")]
    NoBaseAccountInformationAvailable,

    #[error("Failed to compress provided wasm code - {0}")]
    WasmCompressionError(io::Error),

    #[error(
        "Error when broadcasting tx {hash}. Error occurred during CheckTx phase. Code: {code}; Raw log: {raw_log}"
    )]
    BroadcastTxErrorCheckTx {
        hash: Hash,
        code: u32,
        raw_log: String,
    },

    #[error("Error when broadcasting tx {hash} at height {height}. Code: {code}; Raw log: {raw_log}")]
    BroadcastTxErrorDeliverTx {
        hash: Hash,
        height: block::Height,
        code: u32,
        raw_log: String,
    },

    #[error("tx {hash} was broadcast but was not included in a block within {timeout:?}")]
    BroadcastTimeout { hash: Hash, timeout: Duration },

    #[error("The provided gas price ({0}) is malformed")]
    MalformedGasPrice(String),

    #[error("{coin_representation} is not a valid Cosmos Coin")]
    MalformedCoin { coin_representation: String },

    #[error("Failed to estimate gas for the transaction")]
    GasEstimationFailure,

    #[error("Abci query failed with code {code} - {log}")]
    AbciError { code: u32, log: String },

    #[error("the transaction did not emit the expected '{attribute}' attribute of the '{event_type}' event")]
    MissingEventAttribute {
        event_type: &'static str,
        attribute: &'static str,
    },

    #[error("the '{query}' query is not supported by the {schema} contract schema")]
    UnsupportedQuery {
        query: &'static str,
        schema: SchemaVersion,
    },

    #[error("the '{query}' query of the {schema} contract schema identifies nodes by {expected}")]
    NodeKeyMismatch {
        query: &'static str,
        schema: SchemaVersion,
        expected: &'static str,
    },

    #[error("the contract returned pagination cursor '{cursor}' which has already been used. the underlying key might have been removed in the meantime")]
    InvalidCursor { cursor: Cursor },

    #[error("paginated query did not complete within {max_pages} pages")]
    TooManyPages { max_pages: usize },
}

impl NyxdError {
    pub fn unsupported_query(query: &'static str, schema: SchemaVersion) -> Self {
        NyxdError::UnsupportedQuery { query, schema }
    }

    pub fn is_pagination_error(&self) -> bool {
        matches!(
            self,
            NyxdError::InvalidCursor { .. } | NyxdError::TooManyPages { .. }
        )
    }
}
