//! Unit tests for the `postlist` CLI entrypoint module.

use super::{
    canonical_report, explicit_server_override, format_page_output, format_tags_output,
    list_filter, resolve_config, truncate_chars,
};
use super::{Cli, Commands};
use clap::Parser;
use postlist_core::config::API_URL_ENV;
use postlist_core::env::{env_lock, EnvGuard};
use postlist_core::{Config, FilterState, PageResult, Record, TagCatalog, DEFAULT_API_BASE_URL};
use std::time::Duration;

fn record(id: u64, title: &str, tags: &[&str]) -> Record {
    Record {
        id,
        title: title.to_string(),
        body: String::new(),
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        views: None,
        user_id: None,
    }
}

#[test]
fn cli_parses_list_flags() {
    let cli = Cli::try_parse_from([
        "postlist",
        "list",
        "--search",
        "fox",
        "--tags",
        "blog,tech",
        "-p",
        "2",
        "--json",
    ])
    .expect("cli should parse list");
    assert!(cli.json);
    match cli.command {
        Commands::List {
            page,
            search,
            tags,
            query,
            limit,
        } => {
            assert_eq!(page, Some(2));
            assert_eq!(search.as_deref(), Some("fox"));
            assert_eq!(tags, Some(vec!["blog".to_string(), "tech".to_string()]));
            assert!(query.is_none());
            assert!(limit.is_none());
        }
        _ => panic!("expected list command"),
    }
}

#[test]
fn cli_parses_canonical_subcommand() {
    let cli = Cli::try_parse_from(["postlist", "canonical", "page=abc"])
        .expect("cli should parse canonical");
    match cli.command {
        Commands::Canonical { query } => assert_eq!(query, "page=abc"),
        _ => panic!("expected canonical command"),
    }
}

#[test]
fn server_flag_env_name_matches_core_config() {
    let _lock = env_lock().lock().expect("env lock");
    let _guard = EnvGuard::set(API_URL_ENV, "http://127.0.0.1:47777");
    let cli = Cli::parse_from(["postlist", "tags"]);
    assert_eq!(cli.server.as_deref(), Some("http://127.0.0.1:47777"));
}

#[test]
fn resolve_config_applies_overrides() {
    let config = resolve_config(
        Config::default(),
        Some("  http://127.0.0.1:9000  ".to_string()),
        Some(5),
        Some(25),
    );
    assert_eq!(config.api_base_url, "http://127.0.0.1:9000");
    assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.page_size, 25);

    let untouched = resolve_config(Config::default(), Some("   ".to_string()), Some(0), Some(0));
    assert_eq!(untouched, Config::default());
    assert_eq!(untouched.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(explicit_server_override(None), None);
}

#[test]
fn list_filter_applies_page_after_filters() {
    let (state, anomalies, rejected) = list_filter(
        Some("?page=4&search=old&utm=1"),
        Some(3),
        Some("fox".to_string()),
        Some(vec![" blog ".to_string(), "a,b".to_string()]),
    );
    assert_eq!(state, FilterState::new(3, "fox", ["blog"]));
    assert_eq!(anomalies.len(), 1);
    assert_eq!(rejected, vec!["a,b".to_string()]);

    let (state, _, _) = list_filter(Some("?page=4&search=old"), None, Some("new".to_string()), None);
    assert_eq!(state.page(), 1);
    assert_eq!(state.search(), "new");

    let (state, anomalies, _) = list_filter(None, None, None, None);
    assert_eq!(state, FilterState::default());
    assert!(anomalies.is_empty());
}

#[test]
fn page_output_lists_rows_and_footer() {
    let state = FilterState::new(2, "fox", ["blog"]);
    let page = PageResult::new(
        vec![
            record(11, "A short title", &["blog", "life"]),
            record(12, &"x".repeat(80), &["blog"]),
        ],
        25,
    );
    let output = format_page_output(&state, &page, 10, false).expect("text output");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].contains("A short title"));
    assert!(lines[0].ends_with("blog,life"));
    assert!(lines[1].contains("..."));
    assert_eq!(lines[2], "page 2 of 3, 25 posts  ?page=2&search=fox&tags=blog");

    let empty = PageResult::new(Vec::new(), 0);
    let output = format_page_output(&FilterState::default(), &empty, 10, false).expect("text");
    assert_eq!(output, "No posts match.\npage 1 of 1, 0 posts  ?page=1");
}

#[test]
fn page_json_output_carries_location_and_rows() {
    let state = FilterState::new(1, "", ["news"]);
    let page = PageResult::new(vec![record(1, "One", &["news"])], 1);
    let rendered = format_page_output(&state, &page, 10, true).expect("json output");
    let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
    assert_eq!(value["location"], "?page=1&tags=news");
    assert_eq!(value["total_count"], 1);
    assert_eq!(value["page_count"], 1);
    assert_eq!(value["items"][0]["title"], "One");
    assert_eq!(value["filter"]["tags"][0], "news");
}

#[test]
fn tags_output_is_sorted() {
    let catalog: TagCatalog = ["tech", "blog", "news"].into_iter().collect();
    assert_eq!(
        format_tags_output(&catalog, false).expect("text"),
        "blog\nnews\ntech"
    );
    let value: serde_json::Value =
        serde_json::from_str(&format_tags_output(&catalog, true).expect("json")).expect("valid");
    assert_eq!(value, serde_json::json!(["blog", "news", "tech"]));
}

#[test]
fn canonical_report_normalizes_and_explains() {
    let report = canonical_report("tags=,b,a&page=abc&page=7&ref=home");
    assert_eq!(report.location, "?page=1&tags=a,b");
    assert_eq!(report.filter, FilterState::new(1, "", ["a", "b"]));
    assert_eq!(report.anomalies.len(), 3);

    let clean = canonical_report("?page=2&search=hello%20world");
    assert_eq!(clean.location, "?page=2&search=hello%20world");
    assert!(clean.anomalies.is_empty());
}

#[test]
fn truncate_chars_respects_char_boundaries() {
    assert_eq!(truncate_chars("short", 10), "short");
    assert_eq!(truncate_chars("ééééééé", 5), "éé...");
}
