//! Lazy listing across result pages

use crate::filter::{children_filter, with_page_token_field};
use drive_types::{Entry, FileId, PageToken};
use remote_store::{ListRequest, RemoteFileStore, StoreError};
use retry_policy::{RetryingExecutor, Sleeper};
use std::vec;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Cursor {
    /// Nothing fetched yet
    First,
    /// Another page is available behind this token
    Next(PageToken),
    /// Last page fetched, or a fetch failed
    Done,
}

/// Single-pass iterator over the children of a folder
///
/// Each page is fetched through the retrying executor only when the
/// entries of the previous page are used up, so a consumer that stops
/// early never pays for pages it does not read. The iterator cannot be
/// restarted; listing again issues new remote calls.
///
/// A fetch that fails for good is yielded once as `Err`, after which the
/// iterator is finished. Collecting into `Result<Vec<_>, _>` therefore
/// fails the whole listing.
pub struct PageIterator<'a, S: ?Sized, Z> {
    store: &'a S,
    executor: &'a RetryingExecutor<Z>,
    request: ListRequest,
    buffered: vec::IntoIter<Entry>,
    cursor: Cursor,
    pages_fetched: usize,
}

impl<'a, S, Z> PageIterator<'a, S, Z>
where
    S: RemoteFileStore + ?Sized,
    Z: Sleeper,
{
    /// Prepares a listing; nothing is fetched until the first `next`
    ///
    /// See [`children_filter`] and [`with_page_token_field`] for how
    /// `parent`, `query` and `fields` shape the request.
    pub fn new(
        store: &'a S,
        executor: &'a RetryingExecutor<Z>,
        parent: Option<&FileId>,
        query: Option<&str>,
        fields: Option<&str>,
    ) -> Self {
        let request = ListRequest::new(children_filter(parent, query))
            .with_fields(with_page_token_field(fields));

        Self {
            store,
            executor,
            request,
            buffered: Vec::new().into_iter(),
            cursor: Cursor::First,
            pages_fetched: 0,
        }
    }

    /// The filter expression sent with every page request
    pub fn query(&self) -> &str {
        &self.request.query
    }

    /// Number of pages fetched so far
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    fn fetch(&mut self, page_token: Option<PageToken>) -> Result<(), StoreError> {
        self.request.page_token = page_token;

        let store = self.store;
        let request = &self.request;
        let page = self.executor.execute(|| store.list_children(request))?;

        self.pages_fetched += 1;
        debug!(
            query = %self.request.query,
            page = self.pages_fetched,
            entries = page.files.len(),
            more = page.next_page_token.is_some(),
            "fetched listing page"
        );

        self.cursor = match page.next_page_token {
            Some(token) => Cursor::Next(token),
            None => Cursor::Done,
        };
        self.buffered = page.files.into_iter();
        Ok(())
    }
}

impl<'a, S, Z> Iterator for PageIterator<'a, S, Z>
where
    S: RemoteFileStore + ?Sized,
    Z: Sleeper,
{
    type Item = Result<Entry, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.buffered.next() {
                return Some(Ok(entry));
            }

            let token = match std::mem::replace(&mut self.cursor, Cursor::Done) {
                Cursor::Done => return None,
                Cursor::First => None,
                Cursor::Next(token) => Some(token),
            };

            // An empty page with a cursor just moves on to the next one
            if let Err(err) = self.fetch(token) {
                return Some(Err(err));
            }
        }
    }
}
