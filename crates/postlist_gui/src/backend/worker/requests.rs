//! List and catalog request handlers for the GUI backend worker.

use super::WorkerContext;
use crate::backend::CoreEvent;
use postlist_core::FetchParams;
use std::time::Instant;
use tracing::{error, info, warn};

fn log_request_perf(enabled: bool, op: &str, request_id: u64, elapsed_ms: f64, items: usize) {
    if !enabled {
        return;
    }
    info!(
        target: "postlist_gui::backend_perf",
        op = op,
        request_id = request_id,
        elapsed_ms = elapsed_ms,
        items = items,
        "backend request perf"
    );
}

pub(super) async fn handle_fetch_page(context: WorkerContext, request_id: u64, params: FetchParams) {
    let started = Instant::now();
    match context.client.fetch_page(&params).await {
        Ok(page) => {
            log_request_perf(
                context.perf_log_enabled,
                "list",
                request_id,
                started.elapsed().as_secs_f64() * 1000.0,
                page.items.len(),
            );
            context.emit(CoreEvent::PageLoaded {
                request_id,
                params,
                page,
            });
        }
        Err(err) => {
            error!(
                request_id,
                transport = err.is_transport(),
                "list fetch failed: {}",
                err
            );
            context.emit(CoreEvent::PageFailed {
                request_id,
                params,
                message: format!("Failed to fetch posts: {}", err),
            });
        }
    }
}

pub(super) async fn handle_load_catalog(context: WorkerContext, request_id: u64) {
    let started = Instant::now();
    match context.client.load_catalog().await {
        Ok(catalog) => {
            log_request_perf(
                context.perf_log_enabled,
                "catalog",
                request_id,
                started.elapsed().as_secs_f64() * 1000.0,
                catalog.len(),
            );
            context.emit(CoreEvent::CatalogLoaded {
                request_id,
                catalog,
            });
        }
        Err(err) => {
            // The view keeps working without tag options.
            warn!(request_id, "tag catalog load failed: {}", err);
            context.emit(CoreEvent::CatalogFailed {
                request_id,
                message: format!("Failed to load tags: {}", err),
            });
        }
    }
}
