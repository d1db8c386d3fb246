//! sift TUI — ratatui application shell.

pub mod app;
pub mod commands;
pub mod event;
pub mod theme;
pub mod widgets;

pub use app::App;

use sift_client::TypesenseClient;
use sift_core::config::{Config, SearchEndpoint};

/// Start the TUI against the search service at `endpoint`.
///
/// Searches run on a dedicated tokio runtime; the terminal loop stays on the
/// calling thread.
pub fn run(config: Config, endpoint: SearchEndpoint) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    tracing::info!(url = %endpoint.search_url(), "starting TUI");
    let client = TypesenseClient::new(endpoint);
    App::new(config, client, runtime.handle().clone()).run()
}
