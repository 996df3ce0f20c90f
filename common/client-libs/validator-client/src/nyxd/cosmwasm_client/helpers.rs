// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use crate::nyxd::TxResponse;
use cosmrs::tendermint::abci;
use tendermint_rpc::endpoint::abci_query::AbciQuery;

pub(crate) trait CheckResponse: Sized {
    fn check_response(self) -> Result<Self, NyxdError>;
}

impl CheckResponse for TxResponse {
    fn check_response(self) -> Result<Self, NyxdError> {
        if self.tx_result.code.is_err() {
            return Err(NyxdError::BroadcastTxErrorDeliverTx {
                hash: self.hash,
                height: self.height,
                code: self.tx_result.code.value(),
                raw_log: self.tx_result.log,
            });
        }

        Ok(self)
    }
}

impl CheckResponse for AbciQuery {
    fn check_response(self) -> Result<Self, NyxdError> {
        if self.code.is_err() {
            return Err(NyxdError::AbciError {
                code: self.code.value(),
                log: self.log,
            });
        }

        Ok(self)
    }
}

pub(crate) fn compress_wasm_code(code: &[u8]) -> Result<Vec<u8>, NyxdError> {
    use flate2::write::GzEncoder;
    use flate2::Compression;
    use std::io::Write;

    // using compression level 9, same as cosmjs, that optimises for size
    let mut encoder = GzEncoder::new(Vec::new(), Compression::best());
    encoder
        .write_all(code)
        .map_err(NyxdError::WasmCompressionError)?;
    encoder.finish().map_err(NyxdError::WasmCompressionError)
}

/// Value of the first attribute with the given key of the first event of the given type.
pub(crate) fn find_event_attribute(
    events: &[abci::Event],
    event_type: &'static str,
    attribute: &'static str,
) -> Result<String, NyxdError> {
    events
        .iter()
        .filter(|event| event.kind == event_type)
        .flat_map(|event| event.attributes.iter())
        .find(|attr| attr.key_str().is_ok_and(|key| key == attribute))
        .and_then(|attr| attr.value_str().ok())
        .map(ToOwned::to_owned)
        .ok_or(NyxdError::MissingEventAttribute {
            event_type,
            attribute,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use flate2::read::GzDecoder;
    use std::io::Read;

    #[test]
    fn wasm_code_is_gzipped() {
        let code = vec![0u8; 10_000];
        let compressed = compress_wasm_code(&code).unwrap();
        assert!(compressed.len() < code.len());
        // gzip magic bytes
        assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

        let mut decoder = GzDecoder::new(compressed.as_slice());
        let mut decompressed = Vec::new();
        decoder.read_to_end(&mut decompressed).unwrap();
        assert_eq!(decompressed, code);
    }

    #[test]
    fn finding_event_attributes() {
        let events = vec![
            abci::Event::new("message", [("action", "/cosmwasm.wasm.v1.MsgStoreCode")]),
            abci::Event::new("store_code", [("code_id", "42")]),
        ];

        assert_eq!(
            find_event_attribute(&events, "store_code", "code_id").unwrap(),
            "42"
        );
        assert!(matches!(
            find_event_attribute(&events, "instantiate", "_contract_address"),
            Err(NyxdError::MissingEventAttribute { .. })
        ));
    }
}
