// Copyright 2021 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum ValidatorAPIError {
    #[error("There was an issue with the REST request - {source}")]
    ReqwestClientError {
        #[from]
        source: reqwest::Error,
    },

    #[error("None of the provided validator APIs seem to be alive")]
    NoAliveApis,

    #[error("No validator API urls have been provided")]
    NoApiUrlsProvided,

    #[error("{url} can't be used as the base of a validator API url")]
    UnusableBaseUrl { url: Url },
}
