// Copyright 2022 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

pub mod paging;
pub mod types;

pub use paging::{Cursor, CursorPart, PagedResponse};
pub use types::*;
