//! The seam between the session and whatever actually talks to the search
//! service. `sift-client` provides the HTTP implementation; tests provide fakes.

use crate::error::SearchError;
use crate::query::SearchRequest;
use crate::response::SearchResponse;
use std::future::Future;

/// Executes one search request.
pub trait SearchBackend: Send + Sync {
    fn search(
        &self,
        request: &SearchRequest,
    ) -> impl Future<Output = Result<SearchResponse, SearchError>> + Send;
}
