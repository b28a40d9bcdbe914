//! Running searches off the caller's thread.
//!
//! A [`Searcher`] owns one background thread. Queries are submitted with [`Searcher::submit`] and
//! the completed [`SearchResult`]s are handed back over a channel to whichever context owns the
//! `Searcher` (usually the UI loop).
//!
//! Each submission is tagged with a [`Ticket`] and a newer submission supersedes older ones: a
//! queued search that is no longer the latest is dropped without being run. A search already in
//! flight is never cancelled, its result can be recognised as stale by its ticket and discarded.

use std::{
    fmt,
    sync::{
        atomic::{AtomicU64, Ordering},
        mpsc::{self, Receiver, RecvTimeoutError, Sender},
        Arc,
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use log::{error, trace};

use crate::{Book, Error, ErrorKind};

/// Sequence number identifying a single submitted search.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The completed outcome of one submitted search.
#[derive(Debug)]
pub struct SearchResult {
    /// The ticket returned when the search was submitted.
    pub ticket: Ticket,
    /// The query text that was searched for.
    pub query: String,
    /// The books found, or why the search failed.
    pub outcome: Result<Vec<Book>, Error>,
}

impl SearchResult {
    /// The books found, with any failure degraded to an empty list.
    #[must_use]
    pub fn into_books(self) -> Vec<Book> {
        self.outcome.unwrap_or_default()
    }
}

struct Request {
    ticket: Ticket,
    query: String,
}

/// Runs searches one at a time on a dedicated background thread.
pub struct Searcher {
    requests: Option<Sender<Request>>,
    results: Receiver<SearchResult>,
    latest: Arc<AtomicU64>,
    handle: Option<JoinHandle<()>>,
}

impl Searcher {
    /// Starts a searcher that queries the Google Books API.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the background thread cannot be spawned.
    pub fn new() -> Result<Self, Error> {
        Self::with_search(crate::try_search)
    }

    /// Starts a searcher that runs `search` for every submitted query.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the background thread cannot be spawned.
    pub fn with_search<F>(search: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Result<Vec<Book>, Error> + Send + 'static,
    {
        let (requests, request_rx) = mpsc::channel();
        let (result_tx, results) = mpsc::channel();
        let latest = Arc::new(AtomicU64::new(0));
        let worker_latest = Arc::clone(&latest);

        let handle = thread::Builder::new()
            .name("booklist-search".to_owned())
            .spawn(move || Self::run(&search, &worker_latest, &request_rx, &result_tx))
            .map_err(|e| Error::wrap(ErrorKind::IO, e))?;

        Ok(Self {
            requests: Some(requests),
            results,
            latest,
            handle: Some(handle),
        })
    }

    fn run<F>(
        search: &F,
        latest: &AtomicU64,
        requests: &Receiver<Request>,
        results: &Sender<SearchResult>,
    ) where
        F: Fn(&str) -> Result<Vec<Book>, Error>,
    {
        for Request { ticket, query } in requests {
            if latest.load(Ordering::SeqCst) != ticket.0 {
                trace!("Search {ticket} superseded before it started - skipping '{query}'");
                continue;
            }

            trace!("Search {ticket} started for '{query}'");
            let outcome = search(&query);

            if results
                .send(SearchResult {
                    ticket,
                    query,
                    outcome,
                })
                .is_err()
            {
                trace!("Result receiver dropped - stopping search worker");
                break;
            }
        }
    }

    /// Queues `query` to be searched in the background.
    ///
    /// The returned [`Ticket`] becomes the latest one, any earlier ticket is now stale. Earlier
    /// searches still waiting in the queue are skipped and produce no [`SearchResult`].
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the background thread has stopped.
    pub fn submit<S: Into<String>>(&self, query: S) -> Result<Ticket, Error> {
        let ticket = Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1);
        let request = Request {
            ticket,
            query: query.into(),
        };

        self.requests
            .as_ref()
            .ok_or_else(|| Error::new(ErrorKind::IO, "Search worker has been shut down"))?
            .send(request)
            .map_err(|_| {
                error!("Search worker has stopped, search {ticket} was not queued");
                Error::new(ErrorKind::IO, "Search worker has stopped")
            })?;

        trace!("Search {ticket} queued");
        Ok(ticket)
    }

    /// Returns `true` when `ticket` belongs to the most recent submission.
    #[must_use]
    pub fn is_latest(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Returns a completed result if one is ready, without blocking.
    #[must_use]
    pub fn try_recv(&self) -> Option<SearchResult> {
        self.results.try_recv().ok()
    }

    /// Blocks until the next result is ready.
    ///
    /// `None` is returned when the background thread has stopped.
    #[must_use]
    pub fn recv(&self) -> Option<SearchResult> {
        self.results.recv().ok()
    }

    /// Blocks until the next result is ready or `timeout` elapses.
    ///
    /// `Ok(None)` is returned when no result arrived in time.
    ///
    /// # Errors
    ///
    /// An [`ErrorKind::IO`] error is returned when the background thread has stopped.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<SearchResult>, Error> {
        match self.results.recv_timeout(timeout) {
            Ok(result) => Ok(Some(result)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                Err(Error::new(ErrorKind::IO, "Search worker has stopped"))
            }
        }
    }

    /// Blocks until the result of the latest submission arrives, discarding stale results.
    #[must_use]
    pub fn recv_latest(&self) -> Option<SearchResult> {
        loop {
            let result = self.recv()?;
            if self.is_latest(result.ticket) {
                return Some(result);
            }
            trace!("Discarding stale result of search {}", result.ticket);
        }
    }
}

impl Drop for Searcher {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        drop(self.requests.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                error!("Search worker panicked");
            }
        }
    }
}
