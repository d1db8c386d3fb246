//! Response mapping — decodes the search service's JSON payload.
//!
//! Only the parts sift displays are modelled. Unknown keys are ignored, and
//! every top-level key is optional: a payload without `hits` is a valid
//! zero-result response.

use crate::error::SearchError;
use crate::types::{FacetCount, SupplierDoc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
struct Hit {
    document: SupplierDoc,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RawResponse {
    #[serde(default)]
    hits: Option<Vec<Hit>>,
    #[serde(default)]
    found: Option<u64>,
    #[serde(default)]
    search_time_ms: Option<u64>,
    #[serde(default)]
    facet_counts: Option<Vec<FacetCount>>,
}

/// A decoded search response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResponse {
    /// Hit documents in the order the service ranked them.
    pub documents: Vec<SupplierDoc>,
    pub found: u64,
    pub search_time_ms: u64,
    pub facet_counts: Vec<FacetCount>,
}

impl SearchResponse {
    /// Decode a response body.
    ///
    /// Returns [`SearchError::MalformedResponse`] when the body is not valid
    /// JSON or a hit lacks a usable `document`.
    pub fn from_json(body: &str) -> Result<Self, SearchError> {
        let raw: RawResponse = serde_json::from_str(body)?;

        let documents: Vec<SupplierDoc> = raw
            .hits
            .unwrap_or_default()
            .into_iter()
            .map(|hit| hit.document)
            .collect();

        Ok(Self {
            found: raw.found.unwrap_or(documents.len() as u64),
            search_time_ms: raw.search_time_ms.unwrap_or_default(),
            facet_counts: raw.facet_counts.unwrap_or_default(),
            documents,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
