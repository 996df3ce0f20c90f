// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod query_client;
pub mod signing_client;

pub use query_client::CosmWasmClient;
pub use signing_client::SigningCosmWasmClient;
