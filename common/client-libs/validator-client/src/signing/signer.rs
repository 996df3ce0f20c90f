// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::AccountData;
use cosmrs::tx::SignDoc;
use cosmrs::{tx, AccountId, ErrorReport};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SigningError {
    #[error("the requested signing type: {typ:?} is not supported by this signer.")]
    UnsupportedSigningType { typ: SignerType },

    #[error("account {account} was not found within this signer")]
    AccountNotFound { account: AccountId },

    #[error("failed to sign the requested message: {source}")]
    SigningFailure { source: ErrorReport },

    #[error("failed to construct the sign doc: {source}")]
    SignDocFailure { source: ErrorReport },
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SignerType {
    Amino,
    Direct,
}

pub trait OfflineSigner {
    type Error: From<SigningError>;

    fn get_accounts(&self) -> Result<Vec<AccountData>, Self::Error>;

    fn find_account(&self, signer_address: &AccountId) -> Result<AccountData, Self::Error> {
        let accounts = self.get_accounts()?;
        accounts
            .into_iter()
            .find(|account| &account.address == signer_address)
            .ok_or_else(|| {
                SigningError::AccountNotFound {
                    account: signer_address.clone(),
                }
                .into()
            })
    }

    fn sign_direct(
        &self,
        signer_address: &AccountId,
        sign_doc: SignDoc,
    ) -> Result<tx::Raw, Self::Error> {
        let signer = self.find_account(signer_address)?;
        self.sign_direct_with_account(&signer, sign_doc)
    }

    // unless explicitly defined, each signing method is unsupported
    fn sign_direct_with_account(
        &self,
        _signer: &AccountData,
        _sign_doc: SignDoc,
    ) -> Result<tx::Raw, Self::Error> {
        Err(SigningError::UnsupportedSigningType {
            typ: SignerType::Direct,
        }
        .into())
    }
}

/// Marker used by clients that were constructed without any signing capabilities.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSigner;
