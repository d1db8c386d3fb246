//! Query builder — a pure function from [`SearchState`] to [`SearchRequest`].
//!
//! The request carries everything the search endpoint needs. Most of it is
//! fixed: which fields are searched, which are faceted, which are returned,
//! and the page size. Only `q`, `sort_by` and `filter_by` depend on the state.
//!
//! # Filter expression
//!
//! One clause per selected facet, joined with ` && `, in the order
//! industry → province → verified → certifications:
//!
//! | Facet | Clause |
//! |-------|--------|
//! | industry | `industry:="<value>"` |
//! | province | `province:="<value>"` |
//! | verified | `verified:=true` if the selection is `"true"`, otherwise `verified:=false` |
//! | certifications | `certifications:=["<value>"]` |
//!
//! String values are JSON-quoted so embedded quotes and backslashes survive.

use crate::types::{Facet, FacetSelections, SearchState};
use serde::Serialize;

/// Query used when the free-text field is empty.
pub const WILDCARD_QUERY: &str = "*";
/// Searched fields, highest priority first.
pub const QUERY_BY: [&str; 4] = ["name", "industry", "province", "keywords"];
pub const FACET_BY: [&str; 4] = ["industry", "province", "verified", "certifications"];
pub const INCLUDE_FIELDS: [&str; 5] = ["id", "name", "industry", "province", "verified"];
pub const PER_PAGE: u32 = 20;

const CLAUSE_SEPARATOR: &str = " && ";

/// A fully-resolved search request.
///
/// Field names match the search API's parameter names so the same value
/// serialises to both a URL query string and a JSON body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub q: String,
    pub query_by: String,
    pub facet_by: String,
    pub sort_by: String,
    pub include_fields: String,
    pub per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_by: Option<String>,
}

impl SearchRequest {
    /// Derive the request for the given state. Never fails.
    pub fn from_state(state: &SearchState) -> Self {
        let q = if state.query_text.is_empty() {
            WILDCARD_QUERY.to_string()
        } else {
            state.query_text.clone()
        };

        Self {
            q,
            query_by: QUERY_BY.join(","),
            facet_by: FACET_BY.join(","),
            sort_by: state.sort_key.clone(),
            include_fields: INCLUDE_FIELDS.join(","),
            per_page: PER_PAGE,
            filter_by: filter_expression(&state.facets),
        }
    }

    /// URL query-string encoding (no leading `?`).
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(self)
    }

    /// JSON body encoding.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Shorthand for [`SearchRequest::from_state`].
pub fn build_request(state: &SearchState) -> SearchRequest {
    SearchRequest::from_state(state)
}

/// Build the `filter_by` expression, or `None` when nothing is selected.
pub fn filter_expression(facets: &FacetSelections) -> Option<String> {
    let clauses: Vec<String> = facets
        .active()
        .map(|(facet, value)| facet_clause(facet, value))
        .collect();

    if clauses.is_empty() {
        None
    } else {
        Some(clauses.join(CLAUSE_SEPARATOR))
    }
}

/// A single equality clause for a non-empty selection.
pub fn facet_clause(facet: Facet, value: &str) -> String {
    let field = facet.field();
    match facet {
        Facet::Industry | Facet::Province => format!("{field}:={}", quote(value)),
        Facet::Verified => {
            let flag = value == "true";
            format!("{field}:={flag}")
        }
        // Array-valued field: compared against a one-element array.
        Facet::Certifications => format!("{field}:=[{}]", quote(value)),
    }
}

fn quote(value: &str) -> String {
    // Serialising a &str to JSON cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| format!("\"{value}\""))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
