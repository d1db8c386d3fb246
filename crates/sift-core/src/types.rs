//! Core types for sift-core.
//!
//! This module defines the data shared across the workspace: the projected
//! [`SupplierDoc`] returned by the search service, the four filterable
//! [`Facet`] dimensions, the user's [`FacetSelections`], and the
//! per-session [`SearchState`].

use serde::{Deserialize, Deserializer, Serialize};

/// One supplier record as projected by the search service.
///
/// Only the `include_fields` subset is ever requested, so this is the whole
/// document as far as sift is concerned. Records are read-only and replaced
/// wholesale on every successful search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierDoc {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub industry: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub province: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verified: bool,
}

/// Treat an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// A filterable dimension of the supplier collection.
///
/// The declaration order is the order clauses appear in a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Facet {
    Industry,
    Province,
    Verified,
    Certifications,
}

impl Facet {
    /// Every facet, in filter-clause order.
    pub const ALL: [Facet; 4] = [
        Facet::Industry,
        Facet::Province,
        Facet::Verified,
        Facet::Certifications,
    ];

    /// Field name in the remote collection schema.
    pub fn field(self) -> &'static str {
        match self {
            Facet::Industry => "industry",
            Facet::Province => "province",
            Facet::Verified => "verified",
            Facet::Certifications => "certifications",
        }
    }

    /// Look up a facet by its field name. `cert` is accepted as a shorthand
    /// for `certifications`.
    pub fn from_field(name: &str) -> Option<Facet> {
        match name {
            "industry" => Some(Facet::Industry),
            "province" => Some(Facet::Province),
            "verified" => Some(Facet::Verified),
            "certifications" | "cert" => Some(Facet::Certifications),
            _ => None,
        }
    }
}

impl std::fmt::Display for Facet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.field())
    }
}

/// The user's current facet picks. An empty string means "not selected".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetSelections {
    pub industry: String,
    pub province: String,
    pub verified: String,
    pub certifications: String,
}

impl FacetSelections {
    pub fn get(&self, facet: Facet) -> &str {
        match facet {
            Facet::Industry => &self.industry,
            Facet::Province => &self.province,
            Facet::Verified => &self.verified,
            Facet::Certifications => &self.certifications,
        }
    }

    pub fn set(&mut self, facet: Facet, value: impl Into<String>) {
        let slot = match facet {
            Facet::Industry => &mut self.industry,
            Facet::Province => &mut self.province,
            Facet::Verified => &mut self.verified,
            Facet::Certifications => &mut self.certifications,
        };
        *slot = value.into();
    }

    pub fn clear(&mut self, facet: Facet) {
        self.set(facet, String::new());
    }

    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Facets with a non-empty selection, in filter-clause order.
    pub fn active(&self) -> impl Iterator<Item = (Facet, &str)> {
        Facet::ALL
            .into_iter()
            .map(|facet| (facet, self.get(facet)))
            .filter(|(_, value)| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.active().next().is_none()
    }
}

/// Number of matching documents for one facet value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetValueCount {
    pub value: String,
    pub count: u64,
}

/// Facet counts for one field, as reported under `facet_counts`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetCount {
    pub field_name: String,
    #[serde(default)]
    pub counts: Vec<FacetValueCount>,
}

/// Everything the UI knows about the current search.
///
/// Owned by a single [`SearchSession`](crate::session::SearchSession); only the
/// session mutates the loading, error and result fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// Free-text query as typed. Empty means "match everything".
    pub query_text: String,
    pub facets: FacetSelections,
    /// `field:direction`, e.g. `lead_time_production:asc`.
    pub sort_key: String,
    pub is_loading: bool,
    /// Human-readable description of the last failed search.
    pub last_error: Option<String>,
    pub results: Vec<SupplierDoc>,
    /// Total number of matches reported by the service (may exceed `results.len()`).
    pub found: u64,
    pub facet_counts: Vec<FacetCount>,
    /// Server-side processing time of the last applied response.
    pub search_time_ms: u64,
    /// When the last outcome (success or failure) was applied.
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl SearchState {
    pub fn new(sort_key: impl Into<String>) -> Self {
        Self {
            sort_key: sort_key.into(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
