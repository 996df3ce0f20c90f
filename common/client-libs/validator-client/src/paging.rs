// Copyright 2023 - Nym Technologies SA <contact@nymtech.net>
// SPDX-License-Identifier: Apache-2.0

use crate::nyxd::error::NyxdError;
use nym_contracts_common::{Cursor, PagedResponse};
use std::collections::HashSet;
use std::future::Future;
use tracing::{debug, trace};

/// Upper bound on the number of pages fetched by a single collection.
pub const DEFAULT_MAX_PAGES: usize = 10_000;

/// Repeatedly fetches pages, feeding back the cursor returned by the previous page,
/// until the contract stops returning a cursor.
///
/// Pages are requested strictly sequentially and concatenated in arrival order.
/// A cursor that has already been used fails the collection with [`NyxdError::InvalidCursor`]
/// before any further request is made and going over `max_pages` fails it with
/// [`NyxdError::TooManyPages`].
pub async fn collect_paged<T, F, Fut>(
    mut fetch_page: F,
    max_pages: usize,
) -> Result<Vec<T>, NyxdError>
where
    F: FnMut(Option<Cursor>) -> Fut,
    Fut: Future<Output = Result<PagedResponse<T>, NyxdError>>,
{
    let mut items = Vec::new();
    let mut used_cursors = HashSet::new();
    let mut start_after = None;
    let mut fetched_pages = 0;

    loop {
        if fetched_pages >= max_pages {
            return Err(NyxdError::TooManyPages { max_pages });
        }

        let page = fetch_page(start_after.take()).await?;
        fetched_pages += 1;
        trace!(
            "received page {fetched_pages} with {} items",
            page.items.len()
        );
        items.extend(page.items);

        match page.start_next_after {
            None => break,
            Some(cursor) => {
                if !used_cursors.insert(cursor.clone()) {
                    return Err(NyxdError::InvalidCursor { cursor });
                }
                start_after = Some(cursor);
            }
        }
    }

    debug!("collected {} items over {fetched_pages} pages", items.len());
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn pages_are_concatenated_in_order() {
        let requests = AtomicUsize::new(0);
        let items = collect_paged(
            |start_after| {
                requests.fetch_add(1, Ordering::SeqCst);
                async move {
                    Ok::<_, NyxdError>(match start_after {
                        None => PagedResponse::new(vec!["A", "B"], 2, Some("2".into())),
                        Some(_) => PagedResponse::new(vec!["C"], 2, None),
                    })
                }
            },
            DEFAULT_MAX_PAGES,
        )
        .await
        .unwrap();

        assert_eq!(items, vec!["A", "B", "C"]);
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn repeated_cursor_is_rejected() {
        let requests = AtomicUsize::new(0);
        let res = collect_paged(
            |_| {
                requests.fetch_add(1, Ordering::SeqCst);
                async {
                    Ok::<_, NyxdError>(PagedResponse::new(vec![1u32], 1, Some(Cursor::Id(1))))
                }
            },
            DEFAULT_MAX_PAGES,
        )
        .await;

        assert!(matches!(
            res,
            Err(NyxdError::InvalidCursor {
                cursor: Cursor::Id(1)
            })
        ));
        assert_eq!(requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn page_limit_is_enforced() {
        let requests = AtomicUsize::new(0);
        let res = collect_paged(
            |_| {
                let page = requests.fetch_add(1, Ordering::SeqCst) as u64;
                async move {
                    Ok::<_, NyxdError>(PagedResponse::new(vec![page], 1, Some(Cursor::Id(page))))
                }
            },
            3,
        )
        .await;

        assert!(matches!(res, Err(NyxdError::TooManyPages { max_pages: 3 })));
        assert_eq!(requests.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn errors_are_propagated() {
        let res: Result<Vec<u32>, _> = collect_paged(
            |_| async { Err(NyxdError::SerializationError("page".into())) },
            DEFAULT_MAX_PAGES,
        )
        .await;
        assert!(res.is_err());
    }
}
