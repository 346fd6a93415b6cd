//! Lazy walk over the paginated `questions` endpoint.
//!
//! The total page count is only known once the first page has been fetched,
//! so pages are requested one at a time. After each page is drained the
//! cursor compares the current page number against the server's reported
//! `pages`; independently, an optional limit ends the walk right after the
//! record that reaches it, without fetching anything further.

use crate::api::client::AskbotClient;
use crate::api::query::QueryParams;
use crate::error::Result;
use crate::models::Question;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorState {
    /// Needs the next page before it can yield anything.
    Idle,
    FetchingPage,
    EmittingRecords,
    Done,
    Errored,
}

#[derive(Debug)]
pub struct QuestionCursor {
    client: AskbotClient,
    params: QueryParams,
    limit: Option<NonZeroUsize>,
    page: u32,
    pages: Option<u32>,
    buffer: VecDeque<Question>,
    emitted: usize,
    state: CursorState,
}

impl QuestionCursor {
    pub(crate) fn new(
        client: AskbotClient,
        params: QueryParams,
        limit: Option<NonZeroUsize>,
    ) -> Self {
        Self {
            client,
            params,
            limit,
            page: 0,
            pages: None,
            buffer: VecDeque::new(),
            emitted: 0,
            state: CursorState::Idle,
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// Number of questions yielded so far.
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Number of the last page fetched, 0 before the first request.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Total page count as reported by the most recent response.
    pub fn pages(&self) -> Option<u32> {
        self.pages
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.emitted >= limit.get())
    }

    fn last_page_drained(&self) -> bool {
        self.pages.is_some_and(|pages| self.page >= pages)
    }

    /// Returns the next question, `Ok(None)` once the walk is over.
    ///
    /// A failed page request ends the walk; later calls return `Ok(None)`.
    pub async fn next(&mut self) -> Result<Option<Question>> {
        loop {
            match self.state {
                CursorState::Done | CursorState::Errored => return Ok(None),
                CursorState::EmittingRecords => {
                    if let Some(question) = self.buffer.pop_front() {
                        self.emitted += 1;
                        if self.limit_reached() {
                            debug!(emitted = self.emitted, page = self.page, "limit reached");
                            self.buffer.clear();
                            self.state = CursorState::Done;
                        }
                        return Ok(Some(question));
                    }

                    self.state = if self.last_page_drained() {
                        CursorState::Done
                    } else {
                        CursorState::Idle
                    };
                }
                CursorState::Idle | CursorState::FetchingPage => {
                    self.state = CursorState::FetchingPage;
                    let page = self.page + 1;

                    match self.client.fetch_page(&self.params, page).await {
                        Ok(body) => {
                            debug!(
                                page,
                                pages = body.pages,
                                questions = body.questions.len(),
                                "fetched page"
                            );
                            self.page = page;
                            self.pages = Some(body.pages);
                            self.buffer = body.questions.into();
                            self.state = CursorState::EmittingRecords;
                        }
                        Err(err) => {
                            self.buffer.clear();
                            self.state = CursorState::Errored;
                            return Err(err);
                        }
                    }
                }
            }
        }
    }
}
