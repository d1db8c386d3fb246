//! Request building and response parsing benchmarks.
//!
//! Both run on the UI thread for every search, so they should stay well
//! under a frame.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-----------------|
//! | `request/build` | `build_request` with no facets and with all four |
//! | `request/encode` | URL query string and JSON encodings of a full request |
//! | `response/parse` | `SearchResponse::from_json` at 0, 20 and 250 hits |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench query_bench
//! open target/criterion/report/index.html
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sift_core::{build_request, Facet, SearchResponse, SearchState};
use std::hint::black_box;

fn full_state() -> SearchState {
    let mut state = SearchState::new("lead_time_production:asc");
    state.query_text = "precision machining".to_string();
    state.facets.set(Facet::Industry, "metal fabrication");
    state.facets.set(Facet::Province, "ON");
    state.facets.set(Facet::Verified, "true");
    state.facets.set(Facet::Certifications, "ISO 9001");
    state
}

fn body(hits: usize) -> String {
    let hits: Vec<_> = (0..hits)
        .map(|i| {
            serde_json::json!({
                "document": {
                    "id": i.to_string(),
                    "name": format!("Supplier {i}"),
                    "industry": "steel",
                    "province": "ON",
                    "verified": i % 2 == 0,
                }
            })
        })
        .collect();
    serde_json::json!({
        "found": hits.len(),
        "search_time_ms": 4,
        "hits": hits,
        "facet_counts": [
            {"field_name": "industry", "counts": [{"value": "steel", "count": 12}]},
            {"field_name": "province", "counts": [{"value": "ON", "count": 9}, {"value": "QC", "count": 3}]},
        ],
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

fn request_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("request");

    let empty = SearchState::new("lead_time_production:asc");
    let full = full_state();
    group.bench_function("build/no_facets", |b| b.iter(|| build_request(black_box(&empty))));
    group.bench_function("build/all_facets", |b| b.iter(|| build_request(black_box(&full))));

    let request = build_request(&full);
    group.bench_function("encode/query_string", |b| {
        b.iter(|| black_box(&request).to_query_string().unwrap())
    });
    group.bench_function("encode/json", |b| b.iter(|| black_box(&request).to_json().unwrap()));

    group.finish();
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

fn response_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("response/parse");

    for hits in [0usize, 20, 250] {
        let body = body(hits);
        group.throughput(Throughput::Bytes(body.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hits), &body, |b, body| {
            b.iter(|| SearchResponse::from_json(black_box(body)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, request_bench, response_bench);
criterion_main!(benches);
