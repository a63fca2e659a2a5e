//! Lazy iteration over every page of a search

use std::iter::FusedIterator;

use tracing::{debug, warn};

use crate::client::EpornerClient;
use crate::error::EpornerError;
use crate::params::SearchParams;
use crate::transport::Transport;
use crate::types::Video;

enum State {
    Unstarted,
    Positioned(std::vec::IntoIter<Video>),
    Exhausted,
}

/// Iterator over search results across pages
///
/// Fetches one page at a time, only when the previous page has been
/// consumed. Any error while fetching a page (validation, transport,
/// status, decoding) ends iteration exactly like running out of results;
/// [`last_error`](Self::last_error) tells the two apart after the fact.
///
/// A single iterator must not be driven from several threads at once.
pub struct VideoIter<'a, T> {
    client: &'a EpornerClient<T>,
    initial: SearchParams,
    params: SearchParams,
    state: State,
    yielded: u64,
    has_more_pages: bool,
    last_error: Option<EpornerError>,
}

impl<'a, T: Transport> VideoIter<'a, T> {
    pub(crate) fn new(client: &'a EpornerClient<T>, params: SearchParams) -> Self {
        Self {
            client,
            initial: params.clone(),
            params,
            state: State::Unstarted,
            yielded: 0,
            has_more_pages: true,
            last_error: None,
        }
    }

    /// Restarts from the first page and fetches it immediately
    pub fn reset(&mut self) {
        self.params = self.initial.clone();
        self.yielded = 0;
        self.has_more_pages = true;
        self.last_error = None;
        self.fetch_page();
    }

    /// Number of videos yielded so far, across all pages
    pub fn yielded(&self) -> u64 {
        self.yielded
    }

    /// Page the next fetch would request
    pub fn current_page(&self) -> u32 {
        self.params.page()
    }

    /// Whether the last fetched page reported further pages
    pub fn has_more(&self) -> bool {
        self.has_more_pages
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.state, State::Exhausted)
    }

    /// Error that ended iteration, if it ended on one
    pub fn last_error(&self) -> Option<&EpornerError> {
        self.last_error.as_ref()
    }

    fn fetch_page(&mut self) {
        match self.client.search(&self.params) {
            Ok(page) => {
                self.has_more_pages = page.has_more_pages();
                if self.has_more_pages {
                    self.params = self.params.next_page();
                }
                if page.is_empty() {
                    debug!("Page {} is empty, stopping iteration", page.page);
                    self.has_more_pages = false;
                    self.state = State::Exhausted;
                } else {
                    self.state = State::Positioned(page.videos.into_iter());
                }
            }
            Err(e) => {
                warn!(
                    "Stopping search iteration at page {}: {}",
                    self.params.page(),
                    e
                );
                self.has_more_pages = false;
                self.last_error = Some(e);
                self.state = State::Exhausted;
            }
        }
    }
}

impl<T: Transport> Iterator for VideoIter<'_, T> {
    type Item = Video;

    fn next(&mut self) -> Option<Video> {
        loop {
            match self.state {
                State::Exhausted => return None,
                State::Unstarted => self.fetch_page(),
                State::Positioned(ref mut videos) => {
                    if let Some(video) = videos.next() {
                        self.yielded += 1;
                        return Some(video);
                    }
                    if self.has_more_pages {
                        self.fetch_page();
                    } else {
                        self.state = State::Exhausted;
                    }
                }
            }
        }
    }
}

impl<T: Transport> FusedIterator for VideoIter<'_, T> {}
