//! Paginated list controller.
//!
//! # Design
//! - No caching: every navigation re-fetches and replaces the displayed page.
//! - Navigation follows the loaded page; after a failed load it falls back to the
//!   requested index and the page count last reported for the current size.
//! - Changing the page size always restarts at page 0.

use userhub_client::ApiError;
use userhub_client::models::{Page, PageQuery};

use crate::core::request::{RequestState, Ticket};

/// Page size used by the user list.
pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Current query plus the state of the page loaded for it.
#[derive(Debug)]
pub struct Pager<T> {
    query: PageQuery,
    seq: u64,
    total_pages: Option<u32>,
    state: RequestState<Page<T>>,
}

impl<T> Default for Pager<T> {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl<T> Pager<T> {
    /// Pager positioned before page 0 with the given size.
    #[must_use]
    pub const fn new(size: u32) -> Self {
        Self {
            query: PageQuery { page: 0, size },
            seq: 0,
            total_pages: None,
            state: RequestState::Idle,
        }
    }

    /// Query of the latest load.
    #[must_use]
    pub const fn query(&self) -> PageQuery {
        self.query
    }

    /// State of the latest load.
    #[must_use]
    pub const fn state(&self) -> &RequestState<Page<T>> {
        &self.state
    }

    /// Start loading page `page` at the current size.
    pub fn load_page(&mut self, page: u32) -> Ticket<PageQuery> {
        self.query.page = page;
        self.seq += 1;
        self.state = RequestState::Loading;
        Ticket::new(self.seq, self.query)
    }

    /// Load the following page, if the last page reported one.
    pub fn next(&mut self) -> Option<Ticket<PageQuery>> {
        if !self.has_next() {
            return None;
        }
        Some(self.load_page(self.query.page + 1))
    }

    /// Load the preceding page, if any.
    pub fn previous(&mut self) -> Option<Ticket<PageQuery>> {
        if !self.has_previous() {
            return None;
        }
        Some(self.load_page(self.query.page - 1))
    }

    /// Change the page size and restart from page 0.
    pub fn resize(&mut self, size: u32) -> Ticket<PageQuery> {
        self.query.size = size;
        self.total_pages = None;
        self.load_page(0)
    }

    /// Apply a finished load; stale tickets are dropped.
    pub fn settle(&mut self, ticket: &Ticket<PageQuery>, result: Result<Page<T>, ApiError>) -> bool {
        if ticket.seq() != self.seq {
            tracing::debug!(
                page = ticket.param().page,
                latest = self.query.page,
                "discarding superseded page response"
            );
            return false;
        }
        self.state = RequestState::from_result(result);
        if let Some(page) = self.state.data() {
            self.total_pages = Some(page.total_pages);
        }
        true
    }

    /// Whether a next control should be shown.
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.state.data().map_or_else(
            || {
                self.total_pages
                    .is_some_and(|total| self.query.page.saturating_add(1) < total)
            },
            Page::has_next,
        )
    }

    /// Whether a previous control should be shown.
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.state
            .data()
            .map_or(self.query.page > 0, Page::has_previous)
    }
}
