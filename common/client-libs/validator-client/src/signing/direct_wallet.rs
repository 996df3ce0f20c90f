// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::signer::{OfflineSigner, SigningError};
use crate::signing::AccountData;
use cosmrs::bip32::{DerivationPath, XPrv};
use cosmrs::crypto::secp256k1::SigningKey;
use cosmrs::tx::SignDoc;
use cosmrs::{bip32, tx, ErrorReport};
use thiserror::Error;

pub const DEFAULT_COSMOS_DERIVATION_PATH: &str = "m/44'/118'/0'/0/0";

#[derive(Debug, Error)]
pub enum DirectSecp256k1HdWalletError {
    #[error("There was an issue with bip32 - {0}")]
    Bip32Error(#[from] bip32::Error),

    #[error("There was an issue with bip39 - {0}")]
    Bip39Error(#[from] bip39::Error),

    #[error("failed to derive account address: {source}")]
    AccountDerivationError { source: ErrorReport },

    #[error(transparent)]
    SigningFailure(#[from] SigningError),
}

/// Generates a fresh BIP39 mnemonic with the requested number of words.
pub fn generate_new_mnemonic(word_count: usize) -> Result<bip39::Mnemonic, bip39::Error> {
    bip39::Mnemonic::generate(word_count)
}

struct Secp256k1Account {
    data: AccountData,
    private_key: SigningKey,
}

/// Wallet holding secp256k1 keys derived from a BIP39 mnemonic.
///
/// Keys are derived once at construction rather than on every signature.
pub struct DirectSecp256k1HdWallet {
    secret: bip39::Mnemonic,
    accounts: Vec<Secp256k1Account>,
}

impl DirectSecp256k1HdWallet {
    pub fn builder<S: Into<String>>(prefix: S) -> DirectSecp256k1HdWalletBuilder {
        DirectSecp256k1HdWalletBuilder::new(prefix)
    }

    /// Restores a wallet from the given BIP39 mnemonic using the default derivation path.
    pub fn from_mnemonic<S: Into<String>>(
        prefix: S,
        mnemonic: bip39::Mnemonic,
    ) -> Result<Self, DirectSecp256k1HdWalletError> {
        DirectSecp256k1HdWalletBuilder::new(prefix).build(mnemonic)
    }

    pub fn generate<S: Into<String>>(
        prefix: S,
        word_count: usize,
    ) -> Result<Self, DirectSecp256k1HdWalletError> {
        let mnemonic = generate_new_mnemonic(word_count)?;
        Self::from_mnemonic(prefix, mnemonic)
    }

    pub fn mnemonic(&self) -> String {
        self.secret.to_string()
    }

    pub fn try_derive_accounts(&self) -> Vec<AccountData> {
        self.accounts.iter().map(|acc| acc.data.clone()).collect()
    }
}

impl OfflineSigner for DirectSecp256k1HdWallet {
    type Error = DirectSecp256k1HdWalletError;

    fn get_accounts(&self) -> Result<Vec<AccountData>, Self::Error> {
        Ok(self.try_derive_accounts())
    }

    fn sign_direct_with_account(
        &self,
        signer: &AccountData,
        sign_doc: SignDoc,
    ) -> Result<tx::Raw, Self::Error> {
        let account = self
            .accounts
            .iter()
            .find(|account| account.data.address == signer.address)
            .ok_or_else(|| SigningError::AccountNotFound {
                account: signer.address.clone(),
            })?;

        sign_doc
            .sign(&account.private_key)
            .map_err(|source| SigningError::SigningFailure { source }.into())
    }
}

pub struct DirectSecp256k1HdWalletBuilder {
    /// The password to use when deriving a BIP39 seed from a mnemonic.
    bip39_password: String,

    /// The BIP-32/SLIP-10 derivation paths. Defaults to the Cosmos Hub/ATOM path `m/44'/118'/0'/0/0`
    hd_paths: Vec<DerivationPath>,

    /// The bech32 address prefix (human readable part).
    prefix: String,
}

impl DirectSecp256k1HdWalletBuilder {
    pub fn new<S: Into<String>>(prefix: S) -> Self {
        DirectSecp256k1HdWalletBuilder {
            bip39_password: String::new(),
            hd_paths: Vec::new(),
            prefix: prefix.into(),
        }
    }

    #[must_use]
    pub fn with_bip39_password<S: Into<String>>(mut self, password: S) -> Self {
        self.bip39_password = password.into();
        self
    }

    #[must_use]
    pub fn with_hd_path(mut self, path: DerivationPath) -> Self {
        self.hd_paths.push(path);
        self
    }

    fn derive_account(
        &self,
        seed: &[u8],
        hd_path: &DerivationPath,
    ) -> Result<Secp256k1Account, DirectSecp256k1HdWalletError> {
        let extended_private_key = XPrv::derive_from_path(seed, hd_path)?;

        let private_key: SigningKey = extended_private_key.into();
        let public_key = private_key.public_key();

        // it seems this can only fail if the provided account prefix is invalid
        let address = public_key
            .account_id(&self.prefix)
            .map_err(|source| DirectSecp256k1HdWalletError::AccountDerivationError { source })?;

        Ok(Secp256k1Account {
            data: AccountData {
                address,
                public_key,
            },
            private_key,
        })
    }

    pub fn build(
        self,
        mnemonic: bip39::Mnemonic,
    ) -> Result<DirectSecp256k1HdWallet, DirectSecp256k1HdWalletError> {
        let seed = mnemonic.to_seed(&self.bip39_password);

        let hd_paths = if self.hd_paths.is_empty() {
            vec![DEFAULT_COSMOS_DERIVATION_PATH.parse()?]
        } else {
            self.hd_paths.clone()
        };

        let accounts = hd_paths
            .iter()
            .map(|hd_path| self.derive_account(&seed, hd_path))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DirectSecp256k1HdWallet {
            secret: mnemonic,
            accounts,
        })
    }
}
