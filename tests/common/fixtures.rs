//! Canned search-service response bodies used across harnesses.

use sift_core::SupplierDoc;

/// A single hit for the Acme supplier.
pub const ACME_BODY: &str = r#"{
  "found": 1,
  "search_time_ms": 2,
  "hits": [
    {"document": {"id":"1","name":"Acme","industry":"steel","province":"ON","verified":true}}
  ],
  "facet_counts": [
    {"field_name": "industry", "counts": [{"value": "steel", "count": 1}]},
    {"field_name": "province", "counts": [{"value": "ON", "count": 1}]}
  ]
}"#;

/// A well-formed body with no `hits` key at all.
pub const NO_HITS_BODY: &str = r#"{"found":0,"search_time_ms":1}"#;

/// `hits` present but null.
pub const NULL_HITS_BODY: &str = r#"{"hits":null}"#;

/// Not JSON.
pub const MALFORMED_BODY: &str = "<html>bad gateway</html>";

/// The document described by [`ACME_BODY`].
pub fn acme() -> SupplierDoc {
    SupplierDoc {
        id: "1".to_string(),
        name: "Acme".to_string(),
        industry: "steel".to_string(),
        province: "ON".to_string(),
        verified: true,
    }
}

/// A response body whose hits are exactly `docs`, in order.
pub fn body_with(docs: &[SupplierDoc]) -> String {
    let hits: Vec<_> = docs
        .iter()
        .map(|d| serde_json::json!({ "document": d }))
        .collect();
    serde_json::json!({ "found": docs.len(), "hits": hits }).to_string()
}
