//! In-process fake of the remote posts provider for integration tests.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Search text that makes the fake provider answer with a 500.
pub const EXPLODING_SEARCH: &str = "explode";

#[derive(Default)]
pub struct FakeProvider {
    requests: Mutex<Vec<HashMap<String, String>>>,
}

impl FakeProvider {
    pub fn requests(&self) -> Vec<HashMap<String, String>> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn last_request(&self) -> HashMap<String, String> {
        self.requests().pop().expect("at least one request")
    }
}

/// Twenty-five posts: even ids are tagged `blog`, odd ids `news`; ids divisible
/// by three are tagged `tech`, the rest `life`; ids divisible by five mention a fox.
pub fn fixture_posts() -> Vec<Value> {
    (1..=25u64)
        .map(|id| {
            let body = if id % 5 == 0 {
                "The quick brown fox jumps over the lazy dog."
            } else {
                "Lorem ipsum dolor sit amet."
            };
            let first = if id % 2 == 0 { "blog" } else { "news" };
            let second = if id % 3 == 0 { "tech" } else { "life" };
            json!({
                "id": id,
                "title": format!("Post number {}", id),
                "body": body,
                "tags": [first, second],
                "views": id * 10,
                "userId": id % 4 + 1,
            })
        })
        .collect()
}

fn matches_filters(post: &Value, search: Option<&str>, tags: &[&str]) -> bool {
    let text_ok = search.map_or(true, |needle| {
        let needle = needle.to_lowercase();
        ["title", "body"].iter().any(|field| {
            post[*field]
                .as_str()
                .map(|value| value.to_lowercase().contains(&needle))
                .unwrap_or(false)
        })
    });
    let post_tags: Vec<&str> = post["tags"]
        .as_array()
        .map(|values| values.iter().filter_map(Value::as_str).collect())
        .unwrap_or_default();
    text_ok && tags.iter().all(|tag| post_tags.contains(tag))
}

async fn list_posts(
    State(provider): State<Arc<FakeProvider>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    provider
        .requests
        .lock()
        .expect("requests lock")
        .push(params.clone());

    let search = params.get("q").map(String::as_str);
    if search == Some(EXPLODING_SEARCH) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "message": "Search backend exploded" })),
        )
            .into_response();
    }
    let tags: Vec<&str> = params
        .get("tags")
        .map(|raw| raw.split(',').collect())
        .unwrap_or_default();
    let skip: usize = params.get("skip").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(30);

    let filtered: Vec<Value> = fixture_posts()
        .into_iter()
        .filter(|post| matches_filters(post, search, &tags))
        .collect();
    let page: Vec<Value> = filtered.iter().skip(skip).take(limit).cloned().collect();
    Json(json!({
        "posts": page,
        "total": filtered.len(),
        "skip": skip,
        "limit": limit,
    }))
    .into_response()
}

/// Start the fake provider on an ephemeral port.
///
/// # Returns
/// The base URL to configure the client with, and the shared request log.
pub async fn spawn_fake_provider() -> (String, Arc<FakeProvider>) {
    let provider = Arc::new(FakeProvider::default());
    let app = Router::new()
        .route("/posts", get(list_posts))
        .route("/broken/posts", get(|| async { "<html>not json</html>" }))
        .with_state(provider.clone());
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake provider");
    let addr = listener.local_addr().expect("fake provider addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{}", addr), provider)
}
