use clap::Parser;
use sift::headless::{self, HeadlessArgs, OutputFormat};
use sift_client::TypesenseClient;
use sift_core::config::{Config, SearchEndpoint};

#[derive(Parser)]
#[command(name = "sift", about = "Supplier search — faceted Typesense queries in the terminal")]
struct Cli {
    /// Write debug logs to /tmp/sift-debug.log (tail -f to inspect).
    #[arg(long)]
    debug: bool,

    /// Search service base URL, e.g. https://xxxx.a1.typesense.net
    #[arg(long, env = "TYPESENSE_HOST")]
    host: Option<String>,

    /// Search-only API key.
    #[arg(long, env = "TYPESENSE_SEARCH_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Run one search, print the results and exit.
    #[arg(long)]
    headless: bool,

    /// Free-text query (headless).
    #[arg(long, requires = "headless")]
    query: Option<String>,

    #[arg(long, requires = "headless")]
    industry: Option<String>,

    #[arg(long, requires = "headless")]
    province: Option<String>,

    /// `true` for verified suppliers only; any other value for unverified.
    #[arg(long, requires = "headless")]
    verified: Option<String>,

    /// Certification to filter on.
    #[arg(long, requires = "headless")]
    cert: Option<String>,

    /// Sort key, e.g. `name:asc`.
    #[arg(long, requires = "headless")]
    sort: Option<String>,

    /// Output format (headless).
    #[arg(long, value_enum, default_value_t = OutputFormat::Table, requires = "headless")]
    format: OutputFormat,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sift-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sift debug log started — tail -f /tmp/sift-debug.log");
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(error = %err, "config file unreadable, using defaults and environment");
            Config::from_env()?
        }
    };
    let endpoint =
        SearchEndpoint::resolve(&config.search, cli.host.as_deref(), cli.api_key.as_deref())?;

    if !cli.headless {
        return sift_tui::run(config, endpoint);
    }

    let args = HeadlessArgs {
        query: cli.query,
        industry: cli.industry,
        province: cli.province,
        verified: cli.verified,
        cert: cli.cert,
        sort: cli.sort,
        format: cli.format,
    };
    let runtime = tokio::runtime::Runtime::new()?;
    let client = TypesenseClient::new(endpoint);
    runtime.block_on(headless::run(&client, &config, &args, &mut std::io::stdout().lock()))
}
