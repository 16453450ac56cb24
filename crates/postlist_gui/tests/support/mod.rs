//! Fake posts provider running on its own runtime thread, for synchronous GUI tests.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{mpsc, Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;
use tokio::sync::oneshot;

/// Search text that makes the provider answer with a 500.
pub const EXPLODING_SEARCH: &str = "explode";

#[derive(Default)]
struct ProviderState {
    requests: Mutex<Vec<HashMap<String, String>>>,
    /// Requests with this exact `skip` are delayed before answering.
    slow_skip: Option<(String, Duration)>,
}

fn fixture_posts() -> Vec<Value> {
    (1..=25u64)
        .map(|id| {
            let body = if id % 5 == 0 {
                "A fox crossed the road."
            } else {
                "Nothing to see here."
            };
            let first = if id % 2 == 0 { "blog" } else { "news" };
            let second = if id % 3 == 0 { "tech" } else { "life" };
            json!({
                "id": id,
                "title": format!("Post {}", id),
                "body": body,
                "tags": [first, second],
                "views": id,
            })
        })
        .collect()
}

async fn list_posts(
    State(state): State<Arc<ProviderState>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    state
        .requests
        .lock()
        .expect("requests lock")
        .push(params.clone());

    if let Some((slow_skip, delay)) = &state.slow_skip {
        if params.get("skip") == Some(slow_skip) {
            tokio::time::sleep(*delay).await;
        }
    }

    let search = params.get("q").map(|q| q.to_lowercase());
    if search.as_deref() == Some(EXPLODING_SEARCH) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Search backend exploded" })),
        )
            .into_response();
    }
    let tags: Vec<String> = params
        .get("tags")
        .map(|raw| raw.split(',').map(str::to_string).collect())
        .unwrap_or_default();
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(30);

    let filtered: Vec<Value> = fixture_posts()
        .into_iter()
        .filter(|post| {
            let text_ok = search.as_ref().map_or(true, |needle| {
                ["title", "body"].iter().any(|field| {
                    post[*field]
                        .as_str()
                        .is_some_and(|value| value.to_lowercase().contains(needle))
                })
            });
            let post_tags = post["tags"].as_array().cloned().unwrap_or_default();
            text_ok
                && tags
                    .iter()
                    .all(|tag| post_tags.iter().any(|value| value.as_str() == Some(tag)))
        })
        .collect();
    let page: Vec<Value> = filtered.iter().skip(skip).take(limit).cloned().collect();
    Json(json!({ "posts": page, "total": filtered.len() })).into_response()
}

/// A running fake provider. Stops (and drops open connections) on [`Self::stop`] or drop.
pub struct FakeProviderServer {
    base_url: String,
    state: Arc<ProviderState>,
    shutdown_tx: Option<oneshot::Sender<()>>,
    thread: Option<JoinHandle<()>>,
}

impl FakeProviderServer {
    pub fn start() -> Self {
        Self::start_with_slow_skip(None)
    }

    /// Start a provider that delays every list request whose `skip` equals `skip`.
    pub fn start_with_slow_skip(slow: Option<(usize, Duration)>) -> Self {
        let state = Arc::new(ProviderState {
            requests: Mutex::new(Vec::new()),
            slow_skip: slow.map(|(skip, delay)| (skip.to_string(), delay)),
        });
        let app = Router::new()
            .route("/posts", get(list_posts))
            .with_state(state.clone());
        let (addr_tx, addr_rx) = mpsc::channel();
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

        let thread = std::thread::Builder::new()
            .name("fake-provider".to_string())
            .spawn(move || {
                let runtime = tokio::runtime::Builder::new_current_thread()
                    .enable_all()
                    .build()
                    .expect("fake provider runtime");
                runtime.block_on(async move {
                    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                        .await
                        .expect("bind fake provider");
                    addr_tx
                        .send(listener.local_addr().expect("fake provider addr"))
                        .expect("report addr");
                    tokio::select! {
                        _ = axum::serve(listener, app) => {}
                        _ = shutdown_rx => {}
                    }
                });
            })
            .expect("spawn fake provider thread");

        let addr = addr_rx
            .recv_timeout(Duration::from_secs(5))
            .expect("fake provider started");
        Self {
            base_url: format!("http://{}", addr),
            state,
            shutdown_tx: Some(shutdown_tx),
            thread: Some(thread),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Query parameters of every list request that carried a `skip` (catalog samples excluded).
    pub fn page_requests(&self) -> Vec<HashMap<String, String>> {
        self.state
            .requests
            .lock()
            .expect("requests lock")
            .iter()
            .filter(|params| params.contains_key("skip"))
            .cloned()
            .collect()
    }

    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

impl Drop for FakeProviderServer {
    fn drop(&mut self) {
        self.stop();
    }
}
