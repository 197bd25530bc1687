//! Lazy cursor pagination.
//!
//! [`Paginator`] walks a cursor-paginated listing one item at a time. Pages
//! are fetched on demand: page n+1 is not requested until every item of page
//! n has been consumed, which bounds both memory and request volume.

use std::collections::VecDeque;

use serde::de::DeserializeOwned;

use crate::client::http::HttpClient;
use crate::client::request::QueryPairs;
use crate::error::NotificaError;

/// A forward-only, lazily fetched sequence of items across cursor pages.
///
/// Created by [`HttpClient::paginate`]. Not restartable: to re-traverse from
/// the start, create a fresh paginator.
///
/// # Example
///
/// ```rust,ignore
/// let mut pages = client.paginate::<Notification>("/notifications", Vec::new());
/// while let Some(notification) = pages.try_next().await? {
///     println!("{}", notification.id);
/// }
/// ```
pub struct Paginator<'a, T> {
    http: &'a HttpClient,
    path: String,
    query: QueryPairs,
    cursor: Option<String>,
    buffer: VecDeque<T>,
    exhausted: bool,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    pub(crate) fn new(http: &'a HttpClient, path: &str, query: QueryPairs) -> Self {
        Self {
            http,
            path: path.to_string(),
            query,
            cursor: None,
            buffer: VecDeque::new(),
            exhausted: false,
        }
    }

    /// Yields the next item, fetching the next page only when the current
    /// one is drained.
    ///
    /// Returns `Ok(None)` once the listing reports `has_more == false` and
    /// every buffered item has been yielded. The cursor is advisory only: a
    /// non-null cursor on a final page is ignored.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the failed page fetch.
    pub async fn try_next(&mut self) -> Result<Option<T>, NotificaError> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Ok(Some(item));
            }
            if self.exhausted {
                return Ok(None);
            }

            let mut query = self.query.clone();
            if let Some(cursor) = &self.cursor {
                query.push(("cursor".to_string(), Some(cursor.clone())));
            }

            let page = self.http.list::<T>(&self.path, &query, None).await?;
            self.cursor = page.meta.cursor;
            // has_more=false is the sole termination condition
            self.exhausted = !page.meta.has_more;
            self.buffer.extend(page.data);
        }
    }

    /// Drains the remaining items into a `Vec`.
    ///
    /// # Errors
    ///
    /// Returns the classified [`NotificaError`] of the first failed page fetch.
    pub async fn try_collect(mut self) -> Result<Vec<T>, NotificaError> {
        let mut items = Vec::new();
        while let Some(item) = self.try_next().await? {
            items.push(item);
        }
        Ok(items)
    }
}
