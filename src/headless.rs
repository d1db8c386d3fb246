//! Headless mode: run one search and print the results.
//!
//! Results go to stdout as either an aligned table or one JSON document per
//! line. A failed search is returned as an error so the binary exits
//! non-zero with the message on stderr.

use anyhow::Context;
use sift_core::{config::Config, Facet, SearchBackend, SearchSession, SearchState, SupplierDoc};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned columns with a header row.
    #[default]
    Table,
    /// One JSON object per result.
    Jsonl,
}

/// Search inputs for a headless run. Unset fields keep their defaults.
#[derive(Debug, Clone, Default)]
pub struct HeadlessArgs {
    pub query: Option<String>,
    pub industry: Option<String>,
    pub province: Option<String>,
    pub verified: Option<String>,
    pub cert: Option<String>,
    pub sort: Option<String>,
    pub format: OutputFormat,
}

impl HeadlessArgs {
    /// The initial search state these arguments describe.
    pub fn to_state(&self, config: &Config) -> SearchState {
        let sort = self
            .sort
            .clone()
            .unwrap_or_else(|| config.search.default_sort.clone());
        let mut state = SearchState::new(sort);
        if let Some(q) = &self.query {
            state.query_text = q.clone();
        }
        let picks = [
            (Facet::Industry, &self.industry),
            (Facet::Province, &self.province),
            (Facet::Verified, &self.verified),
            (Facet::Certifications, &self.cert),
        ];
        for (facet, value) in picks {
            if let Some(v) = value {
                state.facets.set(facet, v.as_str());
            }
        }
        state
    }
}

/// Run one search against `backend` and write the results to `out`.
pub async fn run<B: SearchBackend, W: Write>(
    backend: &B,
    config: &Config,
    args: &HeadlessArgs,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut session = SearchSession::new(args.to_state(config));
    session.run(backend).await.context("search failed")?;

    let state = session.state();
    tracing::info!(
        found = state.found,
        returned = state.results.len(),
        ms = state.search_time_ms,
        "headless search finished"
    );

    match args.format {
        OutputFormat::Table => write_table(&state.results, out)?,
        OutputFormat::Jsonl => write_jsonl(&state.results, out)?,
    }
    out.flush()?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatters
// ---------------------------------------------------------------------------

const HEADERS: [&str; 5] = ["ID", "NAME", "INDUSTRY", "PROVINCE", "VERIFIED"];

fn write_table<W: Write>(docs: &[SupplierDoc], out: &mut W) -> anyhow::Result<()> {
    let rows: Vec<[String; 5]> = docs
        .iter()
        .map(|d| {
            [
                d.id.clone(),
                d.name.clone(),
                d.industry.clone(),
                d.province.clone(),
                d.verified.to_string(),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let headers = HEADERS.map(str::to_string);
    for row in std::iter::once(&headers).chain(&rows) {
        let line = row
            .iter()
            .zip(widths)
            .map(|(cell, w)| format!("{cell:<w$}"))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(out, "{}", line.trim_end())?;
    }
    Ok(())
}

fn write_jsonl<W: Write>(docs: &[SupplierDoc], out: &mut W) -> anyhow::Result<()> {
    for doc in docs {
        writeln!(out, "{}", serde_json::to_string(doc)?)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
