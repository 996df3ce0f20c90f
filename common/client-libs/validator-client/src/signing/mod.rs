// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use cosmrs::crypto::PublicKey;
use cosmrs::tendermint::chain;
use cosmrs::AccountId;

pub mod direct_wallet;
pub mod signer;
pub mod tx_signer;

pub use direct_wallet::{DirectSecp256k1HdWallet, DirectSecp256k1HdWalletError};
pub use signer::{OfflineSigner, SigningError};
pub use tx_signer::TxSigner;

/// Chain state of the signing account required to produce a valid signature.
#[derive(Debug, Clone)]
pub struct SignerData {
    pub account_number: u64,
    pub sequence: u64,
    pub chain_id: chain::Id,
}

/// Public part of an account held by a signer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountData {
    pub address: AccountId,

    pub public_key: PublicKey,
}

impl AccountData {
    pub fn address(&self) -> &AccountId {
        &self.address
    }

    pub fn public_key(&self) -> PublicKey {
        self.public_key
    }
}
