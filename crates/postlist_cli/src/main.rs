//! Command-line client for a remote posts collection.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use postlist_core::query::{self, QueryAnomaly};
use postlist_core::{Config, FilterState, PageResult, PostsClient, TagCatalog};
use serde::Serialize;
use std::io;
use std::time::{Duration, Instant};
use tracing::warn;
use tracing_subscriber::EnvFilter;

const TITLE_WIDTH: usize = 48;

#[derive(Parser)]
#[command(name = "postlist", about = "Browse a remote posts collection", version)]
struct Cli {
    /// Provider base URL (can also be set via POSTLIST_API_URL)
    #[arg(short, long, env = "POSTLIST_API_URL", global = true)]
    server: Option<String>,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    json: bool,

    /// Print timing for provider requests
    #[arg(long, global = true)]
    timing: bool,

    /// Request timeout in seconds (default: POSTLIST_TIMEOUT_SECS, otherwise none)
    #[arg(short = 't', long, global = true)]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Fetch one page of posts
    List {
        /// Start from a shared location, e.g. '?page=2&search=fox&tags=blog'
        #[arg(short, long)]
        query: Option<String>,
        /// Page number (1-based); applied after search and tags
        #[arg(short, long)]
        page: Option<u32>,
        /// Free-text search; resets the page to 1
        #[arg(long)]
        search: Option<String>,
        /// Comma-separated tag filter; resets the page to 1
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        /// Rows per page (default: POSTLIST_PAGE_SIZE)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Print the tag catalog sampled from the provider
    Tags {
        /// Number of posts to sample (default: POSTLIST_CATALOG_SAMPLE, otherwise the provider's)
        #[arg(long)]
        sample: Option<usize>,
    },
    /// Normalize a location into its canonical form (no network)
    Canonical {
        /// Query string or location, e.g. 'page=abc&tags=,b,a'
        query: String,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn log_timing(timing: bool, label: &str, duration: Duration) {
    if timing {
        eprintln!(
            "[timing] {}: {:.1} ms",
            label,
            duration.as_secs_f64() * 1000.0
        );
    }
}

fn explicit_server_override(server: Option<String>) -> Option<String> {
    server.and_then(|value| {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Environment configuration with command-line overrides applied.
fn resolve_config(
    mut config: Config,
    server: Option<String>,
    timeout: Option<u64>,
    limit: Option<usize>,
) -> Config {
    if let Some(server) = explicit_server_override(server) {
        config.api_base_url = server;
    }
    if let Some(secs) = timeout.filter(|secs| *secs > 0) {
        config.request_timeout = Some(Duration::from_secs(secs));
    }
    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        config.page_size = limit;
    }
    config
}

/// Filter state for `list`: the decoded `--query` location, then `--search`,
/// `--tags`, and finally `--page`.
///
/// # Returns
/// The state, the decode anomalies, and any tags that were rejected.
fn list_filter(
    location: Option<&str>,
    page: Option<u32>,
    search: Option<String>,
    tags: Option<Vec<String>>,
) -> (FilterState, Vec<QueryAnomaly>, Vec<String>) {
    let (mut state, anomalies) = query::decode_with_anomalies(location.unwrap_or_default());
    let mut rejected = Vec::new();
    if let Some(search) = search {
        state.set_search(search);
    }
    if let Some(tags) = tags {
        rejected = state.set_tags(tags.into_iter().map(|tag| tag.trim().to_string()));
    }
    if let Some(page) = page {
        state.set_page(page);
    }
    (state, anomalies, rejected)
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    location: String,
    filter: &'a FilterState,
    page_count: u32,
    limit: usize,
    #[serde(flatten)]
    page: &'a PageResult,
}

fn format_page_output(
    state: &FilterState,
    page: &PageResult,
    limit: usize,
    json: bool,
) -> Result<String> {
    if json {
        let output = ListingOutput {
            location: query::encode_location(state),
            filter: state,
            page_count: page.page_count(limit),
            limit,
            page,
        };
        return serde_json::to_string_pretty(&output).context("response encoding error");
    }

    let mut lines = Vec::with_capacity(page.items.len() + 2);
    for post in &page.items {
        lines.push(format!(
            "{:>6}  {:<width$}  {}",
            post.id,
            truncate_chars(&post.title, TITLE_WIDTH),
            post.tags.join(","),
            width = TITLE_WIDTH
        ));
    }
    if page.items.is_empty() {
        lines.push("No posts match.".to_string());
    }
    lines.push(format!(
        "page {} of {}, {} posts  {}",
        state.page(),
        page.page_count(limit).max(state.page()),
        page.total_count,
        query::encode_location(state)
    ));
    Ok(lines.join("\n"))
}

fn format_tags_output(catalog: &TagCatalog, json: bool) -> Result<String> {
    if json {
        return serde_json::to_string_pretty(catalog).context("response encoding error");
    }
    Ok(catalog.iter().collect::<Vec<_>>().join("\n"))
}

#[derive(Debug, Serialize)]
struct CanonicalReport {
    location: String,
    filter: FilterState,
    anomalies: Vec<String>,
}

fn canonical_report(input: &str) -> CanonicalReport {
    let (filter, anomalies) = query::decode_with_anomalies(input);
    CanonicalReport {
        location: query::encode_location(&filter),
        filter,
        anomalies: anomalies.iter().map(ToString::to_string).collect(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let Cli {
        server,
        json,
        timing,
        timeout,
        command,
    } = Cli::parse();

    match command {
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(shell, &mut cmd, name, &mut io::stdout());
        }
        Commands::Canonical { query } => {
            let report = canonical_report(&query);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for anomaly in &report.anomalies {
                    eprintln!("note: {}", anomaly);
                }
                println!("{}", report.location);
            }
        }
        Commands::List {
            query,
            page,
            search,
            tags,
            limit,
        } => {
            let config = resolve_config(Config::from_env(), server, timeout, limit);
            let (state, anomalies, rejected) = list_filter(query.as_deref(), page, search, tags);
            for anomaly in &anomalies {
                warn!("query: {}", anomaly);
            }
            for tag in &rejected {
                warn!("ignoring tag {:?}: tags must be non-empty and contain no ','", tag);
            }

            let client = PostsClient::new(&config)?;
            let params = state.fetch_params(config.page_size);
            let started = Instant::now();
            let result = client.fetch_page(&params).await.context("List failed")?;
            log_timing(timing, "list", started.elapsed());

            println!(
                "{}",
                format_page_output(&state, &result, config.page_size, json)?
            );
        }
        Commands::Tags { sample } => {
            let mut config = resolve_config(Config::from_env(), server, timeout, None);
            if let Some(sample) = sample.filter(|sample| *sample > 0) {
                config.catalog_sample_limit = Some(sample);
            }
            let client = PostsClient::new(&config)?;
            let started = Instant::now();
            let catalog = client.load_catalog().await.context("Tags failed")?;
            log_timing(timing, "tags", started.elapsed());

            let output = format_tags_output(&catalog, json)?;
            if !output.is_empty() {
                println!("{}", output);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
