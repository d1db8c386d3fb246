//! Typesense HTTP client.
//!
//! Issues `GET {host}/collections/{collection}/documents/search?{request}`
//! with the search-only key in the `X-TYPESENSE-API-KEY` header. The body is
//! read in full before the status is inspected so a failing response can be
//! reported with its text.

use bytes::Bytes;
use http_body_util::{BodyExt, Empty};
use hyper::{header::ACCEPT, Method, Request, Uri};
use hyper_rustls::HttpsConnector;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use sift_core::{
    config::SearchEndpoint, SearchBackend, SearchError, SearchRequest, SearchResponse,
};

pub const API_KEY_HEADER: &str = "X-TYPESENSE-API-KEY";

type HttpsClient = Client<HttpsConnector<HttpConnector>, Empty<Bytes>>;

/// [`SearchBackend`] backed by a hosted Typesense collection.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct TypesenseClient {
    http: HttpsClient,
    endpoint: SearchEndpoint,
}

impl TypesenseClient {
    /// Build a client for `endpoint`. Both `http://` and `https://` hosts are
    /// accepted; TLS uses the bundled webpki roots.
    pub fn new(endpoint: SearchEndpoint) -> Self {
        let connector = hyper_rustls::HttpsConnectorBuilder::new()
            .with_webpki_roots()
            .https_or_http()
            .enable_http1()
            .build();
        let http = Client::builder(TokioExecutor::new()).build(connector);
        Self { http, endpoint }
    }

    pub fn endpoint(&self) -> &SearchEndpoint {
        &self.endpoint
    }

    /// Full request URI for `request`.
    pub fn search_uri(&self, request: &SearchRequest) -> Result<Uri, SearchError> {
        let query = request
            .to_query_string()
            .map_err(|e| SearchError::Transport(format!("cannot encode request: {e}")))?;
        let raw = format!("{}?{}", self.endpoint.search_url(), query);
        raw.parse::<Uri>()
            .map_err(|e| SearchError::Transport(format!("invalid search URL {raw:?}: {e}")))
    }
}

impl SearchBackend for TypesenseClient {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let uri = self.search_uri(request)?;
        tracing::debug!(%uri, "sending search request");

        let req = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(API_KEY_HEADER, self.endpoint.api_key.as_str())
            .header(ACCEPT, "application/json")
            .body(Empty::<Bytes>::new())
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let res = self
            .http
            .request(req)
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        let status = res.status();
        let body = res
            .into_body()
            .collect()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?
            .to_bytes();
        let text = String::from_utf8_lossy(&body).into_owned();

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), body = %text, "search service error");
            return Err(SearchError::Service {
                status: status.as_u16(),
                body: text,
            });
        }

        SearchResponse::from_json(&text)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
