//! Test builders — ergonomic constructors for `SupplierDoc` and `SearchState`.
//!
//! These builders are designed for readability in test assertions, not for
//! production use.

use sift_core::{Facet, SearchState, SupplierDoc};

pub const DEFAULT_SORT: &str = "lead_time_production:asc";

// ---------------------------------------------------------------------------
// SupplierBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`SupplierDoc`] fixtures.
///
/// ```rust
/// let doc = SupplierBuilder::new("7").name("Birch Works").province("BC").build();
/// ```
pub struct SupplierBuilder {
    doc: SupplierDoc,
}

impl SupplierBuilder {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            doc: SupplierDoc {
                name: format!("Supplier {id}"),
                id,
                industry: "steel".to_string(),
                province: "ON".to_string(),
                verified: false,
            },
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.doc.name = name.into();
        self
    }

    pub fn industry(mut self, industry: impl Into<String>) -> Self {
        self.doc.industry = industry.into();
        self
    }

    pub fn province(mut self, province: impl Into<String>) -> Self {
        self.doc.province = province.into();
        self
    }

    pub fn verified(mut self, verified: bool) -> Self {
        self.doc.verified = verified;
        self
    }

    pub fn build(self) -> SupplierDoc {
        self.doc
    }
}

// ---------------------------------------------------------------------------
// StateBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for the search inputs of a [`SearchState`].
pub struct StateBuilder {
    state: SearchState,
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl StateBuilder {
    pub fn new() -> Self {
        Self { state: SearchState::new(DEFAULT_SORT) }
    }

    pub fn query(mut self, q: impl Into<String>) -> Self {
        self.state.query_text = q.into();
        self
    }

    pub fn facet(mut self, facet: Facet, value: impl Into<String>) -> Self {
        self.state.facets.set(facet, value);
        self
    }

    pub fn sort(mut self, key: impl Into<String>) -> Self {
        self.state.sort_key = key.into();
        self
    }

    pub fn build(self) -> SearchState {
        self.state
    }
}

/// `n` suppliers with ids `"0"..n`.
pub fn suppliers(n: usize) -> Vec<SupplierDoc> {
    (0..n).map(|i| SupplierBuilder::new(i.to_string()).build()).collect()
}
