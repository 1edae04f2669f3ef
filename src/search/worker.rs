//! Background execution of search requests
//!
//! Each request runs on its own short-lived thread so a slow response never
//! blocks the UI loop or a newer request. Results come back over a channel
//! and are applied by whoever owns the [`SearchController`](super::SearchController).

use super::controller::{FetchTicket, SearchRequest};
use crate::source::{self, SourceError, VerseSource};
use crate::verse::VerseMatch;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};

/// The answer to one dispatched request
#[derive(Debug)]
pub struct FetchOutcome {
    pub ticket: FetchTicket,
    pub result: source::Result<Vec<VerseMatch>>,
}

/// Runs requests against a shared verse source
pub struct FetchWorker {
    source: Arc<dyn VerseSource>,
    tx: Sender<FetchOutcome>,
    rx: Receiver<FetchOutcome>,
}

impl FetchWorker {
    /// Create a worker for the given source
    #[must_use]
    pub fn new(source: Arc<dyn VerseSource>) -> Self {
        let (tx, rx) = unbounded();
        Self { source, tx, rx }
    }

    /// Start executing a request in the background
    ///
    /// Always produces exactly one outcome: if no thread can be spawned, a
    /// `SourceError::Unavailable` outcome is queued instead.
    pub fn dispatch(&self, request: SearchRequest) {
        let source = Arc::clone(&self.source);
        let tx = self.tx.clone();
        let ticket = request.ticket.clone();
        debug!(generation = ticket.generation(), "dispatching search");

        let spawned = thread::Builder::new()
            .name("iquote-fetch".to_string())
            .spawn(move || {
                let result = source.find(&request.query);
                // Receiver is gone only when the app is shutting down
                let _ = tx.send(FetchOutcome {
                    ticket: request.ticket,
                    result,
                });
            });

        if let Err(e) = spawned {
            warn!(error = %e, "could not spawn search thread");
            let _ = self.tx.send(FetchOutcome {
                ticket,
                result: Err(SourceError::Unavailable(e.to_string())),
            });
        }
    }

    /// Take a finished outcome without blocking
    #[must_use]
    pub fn try_recv(&self) -> Option<FetchOutcome> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for a finished outcome
    #[must_use]
    pub fn recv_timeout(&self, timeout: Duration) -> Option<FetchOutcome> {
        match self.rx.recv_timeout(timeout) {
            Ok(outcome) => Some(outcome),
            Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => None,
        }
    }

    /// Take every outcome that has already arrived
    #[must_use]
    pub fn drain(&self) -> Vec<FetchOutcome> {
        self.rx.try_iter().collect()
    }
}

impl std::fmt::Debug for FetchWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchWorker")
            .field("queued", &self.rx.len())
            .finish_non_exhaustive()
    }
}
