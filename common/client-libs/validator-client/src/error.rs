// Copyright 2021-2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::currency::CurrencyError;
use crate::nyxd::error::NyxdError;
use crate::validator_api::error::ValidatorAPIError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidatorClientError {
    #[error("There was an issue with the validator api request - {source}")]
    ValidatorAPIError {
        #[from]
        source: ValidatorAPIError,
    },

    #[error("One of the provided URLs was malformed - {0}")]
    MalformedUrlProvided(#[from] url::ParseError),

    #[error("There was an issue with the Nyxd client - {0}")]
    NyxdError(#[from] NyxdError),

    #[error("Failed to convert between coin denominations - {0}")]
    CurrencyError(#[from] CurrencyError),

    #[error("No validator API url has been provided")]
    NoAPIUrlAvailable,

    #[error("No nyxd url has been provided")]
    NoNyxdUrlsProvided,

    #[error("None of the provided validators seem to be alive")]
    NoValidatorsAvailable,

    #[error("No {0} contract address is available")]
    NoContractAddressAvailable(&'static str),
}

impl ValidatorClientError {
    /// Whether the error came from a paged collection that never reached its end.
    pub fn is_pagination_error(&self) -> bool {
        matches!(self, ValidatorClientError::NyxdError(err) if err.is_pagination_error())
    }
}
