//! HTTP client for the remote posts provider.
//!
//! Covers the two remote reads the list view needs: one filtered page of posts
//! and the unfiltered sample used to build the tag catalog. Nothing is cached;
//! every call goes to the provider.

mod wire;

pub use wire::error_message_for_response;

use crate::constants::POSTS_COLLECTION_PATH;
use crate::models::{FetchParams, PageResult, TagCatalog};
use crate::{AppError, Config};
use reqwest::{Response, Url};
use tracing::debug;
use wire::PostsResponse;

/// Resolve the posts collection URL under `base`.
///
/// # Errors
/// Returns [`AppError::InvalidBaseUrl`] when `base` does not parse or cannot
/// carry path segments.
pub fn posts_collection_url(base: &str) -> Result<Url, AppError> {
    let invalid = |reason: String| AppError::InvalidBaseUrl {
        url: base.to_string(),
        reason,
    };
    let mut url = Url::parse(base.trim()).map_err(|err| invalid(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|_| invalid("cannot be used as an API base".to_string()))?
        .pop_if_empty()
        .push(POSTS_COLLECTION_PATH);
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

/// Async client for `GET {base}/posts`.
#[derive(Debug, Clone)]
pub struct PostsClient {
    http: reqwest::Client,
    posts_url: Url,
    catalog_sample_limit: Option<usize>,
}

impl PostsClient {
    /// Build a client from runtime configuration.
    ///
    /// # Errors
    /// Fails when the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            posts_url: posts_collection_url(&config.api_base_url)?,
            catalog_sample_limit: config.catalog_sample_limit,
        })
    }

    pub fn posts_url(&self) -> &Url {
        &self.posts_url
    }

    /// Fetch one page of posts matching `params`.
    ///
    /// # Errors
    /// Returns transport, HTTP status, or decode failures. Callers turn these
    /// into a failed request status; nothing is retried here.
    pub async fn fetch_page(&self, params: &FetchParams) -> Result<PageResult, AppError> {
        debug!(
            offset = params.offset(),
            limit = params.limit,
            "fetching posts page {}",
            params.page
        );
        let response = self
            .http
            .get(self.posts_url.clone())
            .query(&params.query_pairs())
            .send()
            .await?;
        let body = success_body(response).await?;
        let wire: PostsResponse = serde_json::from_str(&body)?;
        Ok(wire.into_page(params.offset()))
    }

    /// Sample the unfiltered collection and union every record's tags.
    ///
    /// # Errors
    /// Same failure modes as [`PostsClient::fetch_page`].
    pub async fn load_catalog(&self) -> Result<TagCatalog, AppError> {
        let mut request = self.http.get(self.posts_url.clone());
        if let Some(limit) = self.catalog_sample_limit {
            request = request.query(&[("limit", limit)]);
        }
        let body = success_body(request.send().await?).await?;
        let wire: PostsResponse = serde_json::from_str(&body)?;
        Ok(TagCatalog::from_records(&wire.posts))
    }
}

async fn success_body(response: Response) -> Result<String, AppError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.text().await?);
    }
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => format!("failed to read error response body: {}", err),
    };
    Err(AppError::Status {
        status: status.as_u16(),
        message: error_message_for_response(status, &body),
    })
}

#[cfg(test)]
mod tests;
