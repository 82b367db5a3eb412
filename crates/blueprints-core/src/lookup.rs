//! Background directory lookups.
//!
//! Directory calls may block on the network, so each lookup runs on its own
//! thread and reports back through a channel. The shell drains finished
//! lookups once per frame with [`LookupWorker::poll_events`]. Only the most
//! recent request is reported; answers to superseded requests are dropped.

use crate::blueprint::Blueprint;
use crate::directory::{BlueprintDirectory, DirectoryError, DirectoryResult};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;

/// A finished lookup.
#[derive(Debug, Clone)]
pub struct LookupEvent {
    /// Sequence number of the request.
    pub request_id: u64,
    /// Author the lookup was issued for.
    pub author: String,
    /// Directory answer.
    pub result: DirectoryResult<Vec<Blueprint>>,
}

/// Runs directory lookups off the calling thread.
pub struct LookupWorker {
    directory: Arc<dyn BlueprintDirectory>,
    event_tx: Sender<LookupEvent>,
    event_rx: Receiver<LookupEvent>,
    next_id: u64,
    pending: Option<u64>,
}

impl LookupWorker {
    /// Create a worker querying `directory`.
    pub fn new(directory: Arc<dyn BlueprintDirectory>) -> Self {
        let (event_tx, event_rx) = channel();
        Self {
            directory,
            event_tx,
            event_rx,
            next_id: 0,
            pending: None,
        }
    }

    /// Start a lookup for `author`.
    pub fn request(&mut self, author: &str) -> u64 {
        let author = author.trim().to_string();
        let directory = Arc::clone(&self.directory);
        let tx = self.event_tx.clone();
        let request_id = self.next_id;
        self.next_id += 1;
        self.pending = Some(request_id);

        thread::spawn(move || {
            log::debug!("Lookup thread: fetching blueprints of {}", author);
            // A panicking backend still has to report, or the request stays pending.
            let result = panic::catch_unwind(AssertUnwindSafe(|| directory.blueprints_by_author(&author)))
                .unwrap_or_else(|_| Err(DirectoryError::Other(format!("Lookup for {} panicked", author))));
            if let Err(e) = &result {
                log::warn!("Lookup for {} failed: {}", author, e);
            }
            // Receiver gone means the worker was dropped; nothing to report to.
            let _ = tx.send(LookupEvent { request_id, author, result });
        });

        request_id
    }

    /// Drain finished lookups (non-blocking), oldest first.
    pub fn poll_events(&mut self) -> Vec<LookupEvent> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            if self.pending != Some(event.request_id) {
                log::debug!("Dropping superseded lookup #{} for {}", event.request_id, event.author);
                continue;
            }
            self.pending = None;
            events.push(event);
        }
        events
    }

    /// Whether the latest lookup has not reported back yet.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }
}
