// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::signing::signer::{OfflineSigner, SigningError};
use crate::signing::SignerData;
use cosmrs::tx::{SignDoc, SignerInfo};
use cosmrs::{tx, AccountId, Any};

/// A client that has only one responsibility - sign transactions
/// and not touch chain.
#[derive(Debug)]
pub struct TxSigner<S> {
    signer: S,
}

impl<S> TxSigner<S> {
    pub fn new(signer: S) -> Self {
        TxSigner { signer }
    }

    pub fn signer(&self) -> &S {
        &self.signer
    }

    pub fn into_inner_signer(self) -> S {
        self.signer
    }

    pub fn sign_direct(
        &self,
        signer_address: &AccountId,
        messages: Vec<Any>,
        fee: tx::Fee,
        memo: impl Into<String>,
        signer_data: SignerData,
    ) -> Result<tx::Raw, S::Error>
    where
        S: OfflineSigner,
    {
        let account_from_signer = self.signer.find_account(signer_address)?;

        // transactions never expire based on block height
        let timeout_height = 0u32;

        let tx_body = tx::Body::new(messages, memo, timeout_height);
        let signer_info =
            SignerInfo::single_direct(Some(account_from_signer.public_key), signer_data.sequence);
        let auth_info = signer_info.auth_info(fee);

        let sign_doc = SignDoc::new(
            &tx_body,
            &auth_info,
            &signer_data.chain_id,
            signer_data.account_number,
        )
        .map_err(|source| SigningError::SignDocFailure { source })?;

        self.signer
            .sign_direct_with_account(&account_from_signer, sign_doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::direct_wallet::{generate_new_mnemonic, DirectSecp256k1HdWallet};
    use cosmrs::bank::MsgSend;
    use cosmrs::tx::Msg;
    use cosmrs::Coin;

    #[test]
    fn signed_transaction_contains_body_and_signature() {
        let wallet =
            DirectSecp256k1HdWallet::from_mnemonic("n", generate_new_mnemonic(24).unwrap())
                .unwrap();
        let address = wallet.get_accounts().unwrap()[0].address.clone();
        let signer = TxSigner::new(wallet);

        let msg = MsgSend {
            from_address: address.clone(),
            to_address: address.clone(),
            amount: vec![Coin {
                denom: "unym".parse().unwrap(),
                amount: 1000,
            }],
        }
        .to_any()
        .unwrap();

        let fee = tx::Fee::from_amount_and_gas(
            Coin {
                denom: "unym".parse().unwrap(),
                amount: 2500,
            },
            100_000u64,
        );

        let signer_data = SignerData {
            account_number: 42,
            sequence: 7,
            chain_id: "nyx".parse().unwrap(),
        };

        let raw = signer
            .sign_direct(&address, vec![msg], fee, "memo", signer_data)
            .unwrap();
        assert!(!raw.to_bytes().unwrap().is_empty());
    }
}
