//! Search session — owns the [`SearchState`] and applies search outcomes.
//!
//! A search is split into two halves so it can be driven from a synchronous
//! UI loop as well as from async code:
//!
//! 1. [`SearchSession::begin`] marks the session as loading, clears the last
//!    error, and hands back a [`Ticket`] together with the request to send.
//! 2. [`SearchSession::complete`] applies the outcome for that ticket.
//!
//! [`SearchSession::run`] does both around a [`SearchBackend`] call.
//!
//! # Stale responses
//!
//! Tickets increase monotonically. An outcome is only applied when its ticket
//! is the newest one issued; anything older is dropped, so a slow response can
//! never overwrite the results of a search the user issued after it. The
//! loading flag stays set until the newest search resolves.

use crate::backend::SearchBackend;
use crate::error::SearchError;
use crate::query::{build_request, SearchRequest};
use crate::response::SearchResponse;
use crate::types::SearchState;

/// Identifies one issued search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(self) -> u64 {
        self.0
    }
}

/// What [`SearchSession::complete`] did with an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome updated the state.
    Applied,
    /// A newer search was issued since; the outcome was discarded.
    Stale,
}

/// The result of one search, tagged with the ticket it was issued under.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub ticket: Ticket,
    pub result: Result<SearchResponse, SearchError>,
}

#[derive(Debug, Default)]
pub struct SearchSession {
    state: SearchState,
    latest: u64,
}

impl SearchSession {
    pub fn new(state: SearchState) -> Self {
        Self { state, latest: 0 }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Mutable access for editing the inputs (query text, facets, sort key).
    ///
    /// Callers must not touch `is_loading`, `last_error` or `results`
    /// directly; those belong to `begin`/`complete`.
    pub fn state_mut(&mut self) -> &mut SearchState {
        &mut self.state
    }

    /// The request the current inputs would produce, without issuing it.
    pub fn request(&self) -> SearchRequest {
        build_request(&self.state)
    }

    /// Start a new search from the current inputs.
    pub fn begin(&mut self) -> (Ticket, SearchRequest) {
        self.latest += 1;
        self.state.is_loading = true;
        self.state.last_error = None;
        let ticket = Ticket(self.latest);
        tracing::debug!(ticket = ticket.0, query = %self.state.query_text, "search issued");
        (ticket, build_request(&self.state))
    }

    /// Apply the outcome of the search issued under `ticket`.
    ///
    /// On success the results are replaced wholesale. On failure the error
    /// message is recorded and the previous results are kept.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        result: Result<SearchResponse, SearchError>,
    ) -> Completion {
        if ticket.0 != self.latest {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest,
                "discarding stale search outcome"
            );
            return Completion::Stale;
        }

        match result {
            Ok(response) => {
                tracing::info!(
                    ticket = ticket.0,
                    hits = response.documents.len(),
                    found = response.found,
                    "search completed"
                );
                self.state.results = response.documents;
                self.state.found = response.found;
                self.state.search_time_ms = response.search_time_ms;
                self.state.facet_counts = response.facet_counts;
            }
            Err(err) => {
                tracing::warn!(ticket = ticket.0, error = %err, "search failed");
                self.state.last_error = Some(err.to_string());
            }
        }

        self.state.is_loading = false;
        self.state.completed_at = Some(chrono::Utc::now());
        Completion::Applied
    }

    /// Apply a tagged outcome received from a background task.
    pub fn apply(&mut self, outcome: SearchOutcome) -> Completion {
        self.complete(outcome.ticket, outcome.result)
    }

    /// Run one search to completion against `backend`.
    ///
    /// Returns the error, if any, after it has been recorded in the state.
    pub async fn run<B: SearchBackend>(&mut self, backend: &B) -> Result<(), SearchError> {
        let (ticket, request) = self.begin();
        let result = backend.search(&request).await;
        let failure = result.as_ref().err().cloned();
        self.complete(ticket, result);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
