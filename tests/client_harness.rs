#![allow(unused)]
//! HTTP client integration harness.
//!
//! # What this covers
//!
//! Runs [`TypesenseClient`] against the fake Typesense server from
//! `common::fake_typesense`.
//!
//! - **Request shape**: path, API-key header, and every query parameter the
//!   request builder produces.
//! - **Response mapping**: hits become documents in order; a missing or null
//!   `hits` key is zero results, not an error; `found`, `search_time_ms` and
//!   facet counts are carried through.
//! - **Error channel**: non-success statuses, unparseable bodies, and
//!   unreachable hosts each surface as the matching `SearchError` and end up
//!   in `last_error` with the previous results intact.
//!
//! # Running
//!
//! ```sh
//! cargo test --test client_harness
//! ```

mod common;
use common::*;
use pretty_assertions::assert_eq;
use sift_client::TypesenseClient;
use sift_core::{
    build_request, config::SearchEndpoint, Facet, SearchBackend, SearchError, SearchSession,
};

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn sends_key_header_and_query_params() {
    let server = FakeTypesense::start().await.unwrap();
    let client = TypesenseClient::new(server.endpoint("search-only-key"));

    let state = StateBuilder::new()
        .query("acme")
        .facet(Facet::Industry, "steel")
        .facet(Facet::Verified, "true")
        .sort("name:asc")
        .build();
    client.search(&build_request(&state)).await.unwrap();

    let requests = server.requests().await;
    assert_eq!(requests.len(), 1);
    let req = &requests[0];
    assert_eq!(req.collection, "suppliers");
    assert_eq!(req.api_key.as_deref(), Some("search-only-key"));
    assert_eq!(req.params["q"], "acme");
    assert_eq!(req.params["filter_by"], r#"industry:="steel" && verified:=true"#);
    assert_eq!(req.params["sort_by"], "name:asc");
    assert_eq!(req.params["query_by"], "name,industry,province,keywords");
    assert_eq!(req.params["facet_by"], "industry,province,verified,certifications");
    assert_eq!(req.params["include_fields"], "id,name,industry,province,verified");
    assert_eq!(req.params["per_page"], "20");
}

#[tokio::test]
async fn empty_query_sends_wildcard_and_no_filter() {
    let server = FakeTypesense::start().await.unwrap();
    let client = TypesenseClient::new(server.endpoint("k"));

    client.search(&build_request(&StateBuilder::new().build())).await.unwrap();

    let req = &server.requests().await[0];
    assert_eq!(req.params["q"], "*");
    assert!(!req.params.contains_key("filter_by"));
}

// ---------------------------------------------------------------------------
// Response mapping
// ---------------------------------------------------------------------------

#[tokio::test]
async fn acme_hit_maps_to_document() {
    let server = FakeTypesense::start().await.unwrap();
    server.respond(200, ACME_BODY).await;
    let client = TypesenseClient::new(server.endpoint("k"));

    let resp = client.search(&build_request(&StateBuilder::new().build())).await.unwrap();
    assert_eq!(resp.documents, vec![acme()]);
    assert_eq!(resp.found, 1);
    assert_eq!(resp.search_time_ms, 2);
    assert_eq!(resp.facet_counts.len(), 2);
    assert_eq!(resp.facet_counts[0].field_name, "industry");
}

#[tokio::test]
async fn missing_or_null_hits_is_empty_not_error() {
    let server = FakeTypesense::start().await.unwrap();
    let client = TypesenseClient::new(server.endpoint("k"));
    let req = build_request(&StateBuilder::new().build());

    for body in [NO_HITS_BODY, NULL_HITS_BODY] {
        server.respond(200, body).await;
        let resp = client.search(&req).await.unwrap();
        assert!(resp.documents.is_empty(), "body {body}");
    }
}

#[tokio::test]
async fn hits_keep_service_order() {
    let server = FakeTypesense::start().await.unwrap();
    let docs = vec![
        SupplierBuilder::new("b").name("Birch").verified(true).build(),
        SupplierBuilder::new("a").name("Aspen").province("BC").build(),
        SupplierBuilder::new("c").name("Cedar").industry("lumber").build(),
    ];
    server.respond(200, body_with(&docs)).await;
    let client = TypesenseClient::new(server.endpoint("k"));

    let mut session = SearchSession::new(StateBuilder::new().build());
    session.run(&client).await.unwrap();
    assert_result_ids!(session.state(), ["b", "a", "c"]);
    assert_eq!(session.state().results, docs);
}

// ---------------------------------------------------------------------------
// Error channel
// ---------------------------------------------------------------------------

#[tokio::test]
async fn server_error_lands_in_last_error_and_keeps_results() {
    let server = FakeTypesense::start().await.unwrap();
    server.respond(200, ACME_BODY).await;
    let client = TypesenseClient::new(server.endpoint("k"));

    let mut session = SearchSession::new(StateBuilder::new().build());
    session.run(&client).await.unwrap();
    assert_result_ids!(session.state(), ["1"]);

    server.respond(500, "server error").await;
    let err = session.run(&client).await.unwrap_err();
    assert_eq!(err, SearchError::Service { status: 500, body: "server error".to_string() });

    assert_error_contains!(session.state(), "500", "server error");
    assert_result_ids!(session.state(), ["1"]);
    assert!(!session.state().is_loading);
}

#[tokio::test]
async fn unparseable_body_is_malformed_response() {
    let server = FakeTypesense::start().await.unwrap();
    server.respond(200, MALFORMED_BODY).await;
    let client = TypesenseClient::new(server.endpoint("k"));

    let err = client.search(&build_request(&StateBuilder::new().build())).await.unwrap_err();
    assert!(matches!(err, SearchError::MalformedResponse(_)), "{err:?}");
}

#[tokio::test]
async fn unreachable_host_is_transport_error() {
    // Bind then drop to get a port nothing listens on.
    let port = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap().port();
    let endpoint = SearchEndpoint::new(format!("http://127.0.0.1:{port}"), "k", "suppliers").unwrap();
    let client = TypesenseClient::new(endpoint);

    let mut session = SearchSession::new(StateBuilder::new().build());
    let err = session.run(&client).await.unwrap_err();
    assert!(matches!(err, SearchError::Transport(_)), "{err:?}");
    assert!(session.state().last_error.is_some());
    assert!(!session.state().is_loading);
}
