// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Single element of a compound pagination key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum CursorPart {
    Number(u64),
    Text(String),
}

impl Display for CursorPart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CursorPart::Number(number) => write!(f, "{number}"),
            CursorPart::Text(text) => write!(f, "{text}"),
        }
    }
}

/// Pagination key returned by a contract as `start_next_after` and sent back as `start_after`.
///
/// Depending on the endpoint it's a numeric id (e.g. `mix_id`), a string key
/// (e.g. an identity key or an address) or a compound key serialized as a json array.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Cursor {
    Id(u64),
    Key(String),
    Compound(Vec<CursorPart>),
}

impl Display for Cursor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Cursor::Id(id) => write!(f, "{id}"),
            Cursor::Key(key) => write!(f, "{key}"),
            Cursor::Compound(parts) => {
                let joined = parts
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(",");
                write!(f, "({joined})")
            }
        }
    }
}

impl From<u32> for Cursor {
    fn from(id: u32) -> Self {
        Cursor::Id(id.into())
    }
}

impl From<u64> for Cursor {
    fn from(id: u64) -> Self {
        Cursor::Id(id)
    }
}

impl From<String> for Cursor {
    fn from(key: String) -> Self {
        Cursor::Key(key)
    }
}

impl From<&str> for Cursor {
    fn from(key: &str) -> Self {
        Cursor::Key(key.to_owned())
    }
}

impl From<(u32, String)> for Cursor {
    fn from((id, key): (u32, String)) -> Self {
        Cursor::Compound(vec![CursorPart::Number(id.into()), CursorPart::Text(key)])
    }
}

impl From<(String, String)> for Cursor {
    fn from((first, second): (String, String)) -> Self {
        Cursor::Compound(vec![CursorPart::Text(first), CursorPart::Text(second)])
    }
}

impl From<(u32, u32, u64)> for Cursor {
    fn from((account_id, mix_id, timestamp): (u32, u32, u64)) -> Self {
        Cursor::Compound(vec![
            CursorPart::Number(account_id.into()),
            CursorPart::Number(mix_id.into()),
            CursorPart::Number(timestamp),
        ])
    }
}

/// A single page of a paginated contract query.
///
/// Every contract names the list differently (`nodes`, `delegations`, `accounts`, ...),
/// all of those names are accepted.
/// Absence of `start_next_after` means there are no further pages,
/// its presence only means another page *might* exist.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PagedResponse<T> {
    #[serde(
        alias = "nodes",
        alias = "delegations",
        alias = "accounts",
        alias = "families",
        alias = "members"
    )]
    pub items: Vec<T>,

    #[serde(default)]
    pub per_page: usize,

    #[serde(default)]
    pub start_next_after: Option<Cursor>,
}

impl<T> PagedResponse<T> {
    pub fn new(items: Vec<T>, per_page: usize, start_next_after: Option<Cursor>) -> Self {
        PagedResponse {
            items,
            per_page,
            start_next_after,
        }
    }

    pub fn is_last_page(&self) -> bool {
        self.start_next_after.is_none()
    }
}
