// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use crate::nyxd::{Coin, Gas, TxResponse};
use cosmrs::crypto::PublicKey;
use cosmrs::proto::cosmos::auth::v1beta1::{
    BaseAccount as ProtoBaseAccount, ModuleAccount as ProtoModuleAccount,
};
use cosmrs::proto::cosmos::base::abci::v1beta1::{
    GasInfo as ProtoGasInfo, Result as ProtoAbciResult,
};
use cosmrs::proto::cosmos::tx::v1beta1::SimulateResponse as ProtoSimulateResponse;
use cosmrs::proto::cosmos::vesting::v1beta1::{
    BaseVestingAccount as ProtoBaseVestingAccount,
    ContinuousVestingAccount as ProtoContinuousVestingAccount,
    DelayedVestingAccount as ProtoDelayedVestingAccount,
    PeriodicVestingAccount as ProtoPeriodicVestingAccount,
    PermanentLockedAccount as ProtoPermanentLockedAccount,
};
use cosmrs::tendermint::{abci, block, Hash};
use cosmrs::{AccountId, Any, Coin as CosmosCoin};
use prost::Message;
use serde::Serialize;

pub type ContractCodeId = u64;
pub type AccountNumber = u64;
pub type SequenceNumber = u64;

#[derive(Serialize)]
pub struct EmptyMsg {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceResponse {
    pub account_number: AccountNumber,
    pub sequence: SequenceNumber,
}

/// BaseAccount defines a base account type. It contains all the necessary fields
/// for basic account functionality. Any custom account type should extend this
/// type for additional functionality (e.g. vesting).
#[derive(Debug, Clone)]
pub struct BaseAccount {
    /// Bech32 account address
    pub address: AccountId,
    pub pubkey: Option<PublicKey>,
    pub account_number: AccountNumber,
    pub sequence: SequenceNumber,
}

impl TryFrom<ProtoBaseAccount> for BaseAccount {
    type Error = NyxdError;

    fn try_from(value: ProtoBaseAccount) -> Result<Self, Self::Error> {
        let address: AccountId = value
            .address
            .parse()
            .map_err(|_| NyxdError::MalformedAccountAddress(value.address.clone()))?;

        let pubkey = value
            .pub_key
            .map(PublicKey::try_from)
            .transpose()
            .map_err(|_| NyxdError::InvalidPublicKey(address.clone()))?;

        Ok(BaseAccount {
            address,
            pubkey,
            account_number: value.account_number,
            sequence: value.sequence,
        })
    }
}

/// ModuleAccount defines an account for modules that holds coins on a pool.
#[derive(Debug, Clone)]
pub struct ModuleAccount {
    pub base_account: Option<BaseAccount>,
    pub name: String,
    pub permissions: Vec<String>,
}

impl TryFrom<ProtoModuleAccount> for ModuleAccount {
    type Error = NyxdError;

    fn try_from(value: ProtoModuleAccount) -> Result<Self, Self::Error> {
        let base_account = value.base_account.map(TryFrom::try_from).transpose()?;

        Ok(ModuleAccount {
            base_account,
            name: value.name,
            permissions: value.permissions,
        })
    }
}

/// Fields shared by every chain-level vesting account variant.
#[derive(Debug, Clone)]
pub struct BaseVestingAccount {
    pub base_account: Option<BaseAccount>,
    pub original_vesting: Vec<Coin>,
    pub delegated_free: Vec<Coin>,
    pub delegated_vesting: Vec<Coin>,
    pub end_time: i64,
}

fn parse_proto_coins(
    coins: Vec<cosmrs::proto::cosmos::base::v1beta1::Coin>,
) -> Result<Vec<Coin>, NyxdError> {
    coins
        .into_iter()
        .map(|proto| CosmosCoin::try_from(proto).map(Into::into))
        .collect::<Result<_, _>>()
        .map_err(|_| NyxdError::SerializationError("Coins".to_owned()))
}

impl TryFrom<ProtoBaseVestingAccount> for BaseVestingAccount {
    type Error = NyxdError;

    fn try_from(value: ProtoBaseVestingAccount) -> Result<Self, Self::Error> {
        Ok(BaseVestingAccount {
            base_account: value.base_account.map(TryFrom::try_from).transpose()?,
            original_vesting: parse_proto_coins(value.original_vesting)?,
            delegated_free: parse_proto_coins(value.delegated_free)?,
            delegated_vesting: parse_proto_coins(value.delegated_vesting)?,
            end_time: value.end_time,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VestingAccountKind {
    Base,
    Continuous,
    Delayed,
    Periodic,
    PermanentLocked,
}

#[derive(Debug, Clone)]
pub enum Account {
    Base(BaseAccount),
    Module(ModuleAccount),
    Vesting {
        kind: VestingAccountKind,
        account: Option<BaseVestingAccount>,
    },
}

impl Account {
    pub fn try_get_base_account(&self) -> Result<&BaseAccount, NyxdError> {
        match self {
            Account::Base(acc) => Ok(acc),
            Account::Module(acc) => acc
                .base_account
                .as_ref()
                .ok_or(NyxdError::NoBaseAccountInformationAvailable),
            Account::Vesting { account, .. } => account
                .as_ref()
                .and_then(|vesting_acc| vesting_acc.base_account.as_ref())
                .ok_or(NyxdError::NoBaseAccountInformationAvailable),
        }
    }
}

fn vesting_account(
    kind: VestingAccountKind,
    base_vesting_account: Option<ProtoBaseVestingAccount>,
) -> Result<Account, NyxdError> {
    Ok(Account::Vesting {
        kind,
        account: base_vesting_account.map(TryFrom::try_from).transpose()?,
    })
}

impl TryFrom<Any> for Account {
    type Error = NyxdError;

    fn try_from(raw_account: Any) -> Result<Self, Self::Error> {
        let value = raw_account.value.as_slice();
        match raw_account.type_url.as_ref() {
            "/cosmos.auth.v1beta1.BaseAccount" => Ok(Account::Base(
                ProtoBaseAccount::decode(value)?.try_into()?,
            )),
            "/cosmos.auth.v1beta1.ModuleAccount" => Ok(Account::Module(
                ProtoModuleAccount::decode(value)?.try_into()?,
            )),
            "/cosmos.vesting.v1beta1.BaseVestingAccount" => Ok(Account::Vesting {
                kind: VestingAccountKind::Base,
                account: Some(ProtoBaseVestingAccount::decode(value)?.try_into()?),
            }),
            "/cosmos.vesting.v1beta1.ContinuousVestingAccount" => vesting_account(
                VestingAccountKind::Continuous,
                ProtoContinuousVestingAccount::decode(value)?.base_vesting_account,
            ),
            "/cosmos.vesting.v1beta1.DelayedVestingAccount" => vesting_account(
                VestingAccountKind::Delayed,
                ProtoDelayedVestingAccount::decode(value)?.base_vesting_account,
            ),
            "/cosmos.vesting.v1beta1.PeriodicVestingAccount" => vesting_account(
                VestingAccountKind::Periodic,
                ProtoPeriodicVestingAccount::decode(value)?.base_vesting_account,
            ),
            "/cosmos.vesting.v1beta1.PermanentLockedAccount" => vesting_account(
                VestingAccountKind::PermanentLocked,
                ProtoPermanentLockedAccount::decode(value)?.base_vesting_account,
            ),
            _ => Err(NyxdError::UnsupportedAccountType {
                type_url: raw_account.type_url,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GasInfo {
    /// GasWanted is the maximum units of work we allow this tx to perform.
    pub gas_wanted: Gas,

    /// GasUsed is the amount of gas actually consumed.
    pub gas_used: Gas,
}

impl From<ProtoGasInfo> for GasInfo {
    fn from(value: ProtoGasInfo) -> Self {
        GasInfo {
            gas_wanted: value.gas_wanted,
            gas_used: value.gas_used,
        }
    }
}

impl GasInfo {
    pub fn new(gas_wanted: Gas, gas_used: Gas) -> Self {
        GasInfo {
            gas_wanted,
            gas_used,
        }
    }

    pub(crate) fn from_tx_response(response: &TxResponse) -> Self {
        GasInfo {
            gas_wanted: u64::try_from(response.tx_result.gas_wanted).unwrap_or_default(),
            gas_used: u64::try_from(response.tx_result.gas_used).unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AbciResult {
    /// Data is any data returned from message or handler execution.
    pub data: Vec<u8>,

    /// Log contains the log information from message or handler execution.
    pub log: String,

    /// Events contains a slice of Event objects that were emitted during message
    /// or handler execution.
    pub events: Vec<abci::Event>,
}

impl From<ProtoAbciResult> for AbciResult {
    fn from(value: ProtoAbciResult) -> Self {
        let events = value
            .events
            .into_iter()
            .map(|proto_event| {
                abci::Event::new(
                    proto_event.r#type,
                    proto_event
                        .attributes
                        .into_iter()
                        .map(|attribute| (attribute.key, attribute.value)),
                )
            })
            .collect();

        AbciResult {
            data: value.data,
            log: value.log,
            events,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SimulateResponse {
    pub gas_info: Option<GasInfo>,
    pub result: Option<AbciResult>,
}

impl From<ProtoSimulateResponse> for SimulateResponse {
    fn from(value: ProtoSimulateResponse) -> Self {
        SimulateResponse {
            gas_info: value.gas_info.map(Into::into),
            result: value.result.map(Into::into),
        }
    }
}

// ##############################################################################
// types specific to the signing client
// ##############################################################################

#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Size of the original wasm code in bytes
    pub original_size: usize,

    /// Size of the compressed wasm code in bytes
    pub compressed_size: usize,

    /// The ID of the code assigned by the chain
    pub code_id: ContractCodeId,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone, Default)]
pub struct InstantiateOptions {
    /// The funds that are transferred from the sender to the newly created contract.
    ///
    /// Only native tokens are supported.
    pub funds: Vec<Coin>,

    /// A bech32 encoded address of an admin account.
    /// Caution: an admin has the privilege to upgrade a contract.
    /// If this is not desired, do not set this value.
    pub admin: Option<AccountId>,
}

impl InstantiateOptions {
    pub fn new<T: Into<Coin>>(funds: Vec<T>, admin: Option<AccountId>) -> Self {
        InstantiateOptions {
            funds: funds.into_iter().map(Into::into).collect(),
            admin,
        }
    }
}

#[derive(Debug, Clone)]
pub struct InstantiateResult {
    /// The address of the newly instantiated contract
    pub contract_address: AccountId,

    pub events: Vec<abci::Event>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone)]
pub struct ChangeAdminResult {
    pub events: Vec<abci::Event>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone)]
pub struct MigrateResult {
    pub events: Vec<abci::Event>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

#[derive(Debug, Clone)]
pub struct ExecuteResult {
    pub events: Vec<abci::Event>,

    /// Data returned by the contract, if any.
    pub data: Vec<u8>,

    /// Transaction hash (might be used as transaction ID)
    pub transaction_hash: Hash,

    pub height: block::Height,

    pub gas_info: GasInfo,
}

impl From<TxResponse> for ExecuteResult {
    fn from(response: TxResponse) -> Self {
        let gas_info = GasInfo::from_tx_response(&response);
        ExecuteResult {
            data: response.tx_result.data.to_vec(),
            events: response.tx_result.events,
            transaction_hash: response.hash,
            height: response.height,
            gas_info,
        }
    }
}

impl ExecuteResult {
    /// Parses the data returned by the contract as json.
    pub fn parse_data<T>(&self) -> Result<T, NyxdError>
    where
        for<'a> T: serde::Deserialize<'a>,
    {
        Ok(serde_json::from_slice(&self.data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_account_types_are_rejected() {
        let raw = Any {
            type_url: "/cosmos.auth.v1beta1.SomethingElse".to_string(),
            value: Vec::new(),
        };
        assert!(matches!(
            Account::try_from(raw),
            Err(NyxdError::UnsupportedAccountType { .. })
        ));
    }

    #[test]
    fn module_account_without_base_has_no_sequence_info() {
        let raw = Any {
            type_url: "/cosmos.auth.v1beta1.ModuleAccount".to_string(),
            value: ProtoModuleAccount {
                base_account: None,
                name: "distribution".to_string(),
                permissions: vec![],
            }
            .encode_to_vec(),
        };
        let account = Account::try_from(raw).unwrap();
        assert!(matches!(
            account.try_get_base_account(),
            Err(NyxdError::NoBaseAccountInformationAvailable)
        ));
    }

    #[test]
    fn base_account_is_decoded() {
        let address = AccountId::new("n", &[42; 20]).unwrap();
        let raw = Any {
            type_url: "/cosmos.auth.v1beta1.BaseAccount".to_string(),
            value: ProtoBaseAccount {
                address: address.to_string(),
                pub_key: None,
                account_number: 12,
                sequence: 34,
            }
            .encode_to_vec(),
        };

        let account = Account::try_from(raw).unwrap();
        let base = account.try_get_base_account().unwrap();
        assert_eq!(base.address, address);
        assert_eq!(base.account_number, 12);
        assert_eq!(base.sequence, 34);
    }
}
