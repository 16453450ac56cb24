//! Native list view library entry point.
//!
//! Exposes a `run` helper so the workspace root can launch the UI without
//! duplicating initialization logic.

mod app;
/// Backend worker + protocol types used by the GUI and headless tests.
pub mod backend;
/// List view state machine and its read-only snapshot.
pub mod controller;

use app::PostListApp;
use eframe::egui;
use postlist_core::Config;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "postlist=warn,postlist_gui=info";

fn suppress_vulkan_loader_debug() {
    if std::env::var("POSTLIST_KEEP_VK_DEBUG").is_ok() {
        return;
    }
    std::env::remove_var("VK_LOADER_DEBUG");
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .try_init();
}

/// Location the view mounts at, taken from the first command-line argument.
///
/// Accepts a bare query (`page=2&search=fox`), a location (`?page=2`), or a
/// full link whose query part is used (`https://host/posts?page=2`).
pub fn initial_query_from_args<I>(args: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let Some(arg) = args.into_iter().next() else {
        return String::new();
    };
    let arg = arg.trim();
    let query = match arg.split_once('?') {
        Some((_, query)) => query,
        None => arg,
    };
    let query = query.split('#').next().unwrap_or_default();
    if query.is_empty() {
        String::new()
    } else {
        format!("?{}", query)
    }
}

/// Start the native list view with tracing enabled.
///
/// # Returns
/// The result of `eframe::run_native`.
///
/// # Errors
/// Propagates any `eframe` initialization or runtime error (including app
/// creation failures when the provider URL is invalid).
pub fn run() -> eframe::Result<()> {
    suppress_vulkan_loader_debug();
    init_tracing();

    let config = Config::from_env();
    let initial_query = initial_query_from_args(std::env::args().skip(1));

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(app::DEFAULT_WINDOW_SIZE)
            .with_min_inner_size(app::MIN_WINDOW_SIZE)
            .with_title("Postlist"),
        ..Default::default()
    };

    eframe::run_native(
        "Postlist",
        options,
        Box::new(move |cc| {
            let app = PostListApp::new(&config, &initial_query, &cc.egui_ctx)?;
            Ok(Box::new(app))
        }),
    )
}
