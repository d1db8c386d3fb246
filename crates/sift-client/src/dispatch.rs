//! Background search dispatch.
//!
//! The TUI loop is synchronous, so searches run as tokio tasks and report
//! back over an unbounded channel. The loop drains the channel once per tick
//! and hands each [`SearchOutcome`] to the session, which decides whether it
//! is still current.

use sift_core::{SearchBackend, SearchOutcome, SearchRequest, Ticket};
use std::sync::Arc;
use tokio::{runtime::Handle, sync::mpsc};

/// Spawns searches on a runtime and collects their outcomes.
pub struct SearchDispatcher<B> {
    backend: Arc<B>,
    runtime: Handle,
    tx: mpsc::UnboundedSender<SearchOutcome>,
    rx: mpsc::UnboundedReceiver<SearchOutcome>,
}

impl<B: SearchBackend + 'static> SearchDispatcher<B> {
    pub fn new(backend: B, runtime: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend: Arc::new(backend),
            runtime,
            tx,
            rx,
        }
    }

    /// Start `request` in the background. Its outcome will be tagged with `ticket`.
    pub fn dispatch(&self, ticket: Ticket, request: SearchRequest) {
        let backend = Arc::clone(&self.backend);
        let tx = self.tx.clone();
        tracing::debug!(ticket = ticket.id(), "dispatching search");
        self.runtime.spawn(async move {
            let result = backend.search(&request).await;
            // The receiver only disappears when the app is shutting down.
            let _ = tx.send(SearchOutcome { ticket, result });
        });
    }

    /// Every outcome that has arrived since the last call, in arrival order.
    pub fn drain(&mut self) -> Vec<SearchOutcome> {
        let mut outcomes = Vec::new();
        while let Ok(outcome) = self.rx.try_recv() {
            outcomes.push(outcome);
        }
        outcomes
    }

    /// Wait for the next outcome.
    pub async fn next(&mut self) -> Option<SearchOutcome> {
        self.rx.recv().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
