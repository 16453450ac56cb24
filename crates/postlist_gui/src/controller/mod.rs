//! View state controller: the single owner of the list view's filter state.
//!
//! Every input funnels through here. User edits update the [`FilterState`],
//! push the re-encoded location into the [`History`], and issue a fetch.
//! External location changes (back, forward, direct entry) are decoded into
//! the filter state and also issue a fetch. Responses are applied only when
//! they belong to the most recently issued request; anything else is dropped.

mod navigation;
mod snapshot;

pub use navigation::History;
pub use snapshot::{CatalogStatus, ViewSnapshot};

use crate::backend::{BackendHandle, CoreCmd, CoreEvent};
use postlist_core::models::post::page_count;
use postlist_core::query::{self, QueryAnomaly};
use postlist_core::{FetchParams, FilterState, PageResult, RequestStatus, TagCatalog};
use std::collections::BTreeSet;
use std::time::Instant;
use tracing::{debug, error, info, warn};

/// A user or address-bar intent the presentation layer can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIntent {
    SetSearch(String),
    SetTags(BTreeSet<String>),
    SetPage(u32),
    Back,
    Forward,
    /// Direct entry of a location in the address bar.
    NavigateTo(String),
    Retry,
    ReloadCatalog,
}

#[derive(Debug, Clone)]
struct InFlightFetch {
    request_id: u64,
    params: FetchParams,
    sent_at: Instant,
}

/// Request/response counters for the list fetch lifecycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchPerfCounters {
    pub requests_sent: u64,
    pub results_applied: u64,
    pub failures_applied: u64,
    pub stale_drops: u64,
    pub last_roundtrip_ms: Option<f32>,
}

pub struct ListController {
    backend: BackendHandle,
    limit: usize,
    filter: FilterState,
    history: History,
    status: RequestStatus,
    page: Option<PageResult>,
    catalog: TagCatalog,
    catalog_status: CatalogStatus,
    next_request_id: u64,
    in_flight: Option<InFlightFetch>,
    catalog_request: Option<u64>,
    perf: FetchPerfCounters,
}

impl ListController {
    /// Mount the view at `initial_query`.
    ///
    /// Decodes the location, issues the first page fetch, and issues the one
    /// catalog load for this mount.
    pub fn mount(backend: BackendHandle, limit: usize, initial_query: &str) -> Self {
        let mut controller = Self {
            backend,
            limit: limit.max(1),
            filter: FilterState::default(),
            history: History::new(initial_query),
            status: RequestStatus::Idle,
            page: None,
            catalog: TagCatalog::default(),
            catalog_status: CatalogStatus::NotRequested,
            next_request_id: 1,
            in_flight: None,
            catalog_request: None,
            perf: FetchPerfCounters::default(),
        };
        info!("mounting list view at '{}'", initial_query);
        controller.initialize_from_url(initial_query);
        controller.reload_catalog();
        controller
    }

    /// Adopt an externally changed location.
    ///
    /// The current history entry is rewritten to the canonical encoding so the
    /// address bar never keeps unknown keys or malformed values.
    pub fn initialize_from_url(&mut self, url_query: &str) {
        let (state, anomalies) = query::decode_with_anomalies(url_query);
        for anomaly in &anomalies {
            match anomaly {
                QueryAnomaly::UnknownKey(_) => debug!("location: {}", anomaly),
                _ => warn!("location: {}", anomaly),
            }
        }
        self.filter = state;
        self.history.replace(query::encode_location(&self.filter));
        self.dispatch_fetch();
    }

    /// Replace the search text, reset to page 1, and fetch.
    pub fn set_search(&mut self, text: impl Into<String>) {
        self.filter.set_search(text);
        self.publish_location();
        self.dispatch_fetch();
    }

    /// Replace the tag selection, reset to page 1, and fetch.
    ///
    /// Empty tags and tags containing `,` cannot be encoded in the location and
    /// are dropped with a warning.
    pub fn set_tags<I, T>(&mut self, tags: I)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        for rejected in self.filter.set_tags(tags) {
            warn!("ignoring tag {:?}: tags must be non-empty and contain no ','", rejected);
        }
        self.publish_location();
        self.dispatch_fetch();
    }

    /// Select or deselect one tag.
    pub fn toggle_tag(&mut self, tag: &str) {
        let mut tags = self.filter.tags().clone();
        if !tags.remove(tag) {
            tags.insert(tag.to_string());
        }
        self.set_tags(tags);
    }

    /// Move to `page` (values below 1 clamp to 1) keeping the filters, and fetch.
    pub fn set_page(&mut self, page: u32) {
        self.filter.set_page(page);
        self.publish_location();
        self.dispatch_fetch();
    }

    /// # Returns
    /// `false` when there is no earlier entry.
    pub fn navigate_back(&mut self) -> bool {
        let Some(location) = self.history.back().map(str::to_string) else {
            return false;
        };
        self.initialize_from_url(&location);
        true
    }

    /// # Returns
    /// `false` when there is no later entry.
    pub fn navigate_forward(&mut self) -> bool {
        let Some(location) = self.history.forward().map(str::to_string) else {
            return false;
        };
        self.initialize_from_url(&location);
        true
    }

    /// Direct entry of a location in the address bar.
    pub fn navigate_to(&mut self, location: &str) {
        self.history.push(location.trim());
        self.initialize_from_url(location);
    }

    /// Re-issue the fetch for the current filter state without touching the location.
    pub fn retry(&mut self) {
        self.dispatch_fetch();
    }

    /// Sample the provider for tags. Runs once at mount; callable again manually.
    pub fn reload_catalog(&mut self) {
        let request_id = self.take_request_id();
        if self
            .backend
            .cmd_tx
            .send(CoreCmd::LoadCatalog { request_id })
            .is_err()
        {
            warn!("tag catalog not requested: backend unavailable");
            self.catalog_request = None;
            self.catalog_status = CatalogStatus::Unavailable("Backend unavailable.".to_string());
            return;
        }
        self.catalog_request = Some(request_id);
        self.catalog_status = CatalogStatus::Loading;
    }

    pub fn dispatch(&mut self, intent: ViewIntent) {
        match intent {
            ViewIntent::SetSearch(text) => self.set_search(text),
            ViewIntent::SetTags(tags) => self.set_tags(tags),
            ViewIntent::SetPage(page) => self.set_page(page),
            ViewIntent::Back => {
                self.navigate_back();
            }
            ViewIntent::Forward => {
                self.navigate_forward();
            }
            ViewIntent::NavigateTo(location) => self.navigate_to(&location),
            ViewIntent::Retry => self.retry(),
            ViewIntent::ReloadCatalog => self.reload_catalog(),
        }
    }

    /// Drain and apply every event the backend has produced so far.
    ///
    /// # Returns
    /// Number of events processed, including dropped stale ones.
    pub fn poll(&mut self) -> usize {
        let mut processed = 0;
        while let Ok(event) = self.backend.evt_rx.try_recv() {
            self.apply_event(event);
            processed += 1;
        }
        processed
    }

    pub fn apply_event(&mut self, event: CoreEvent) {
        match event {
            CoreEvent::PageLoaded {
                request_id,
                params,
                page,
            } => {
                if !self.settle_fetch(request_id, &params) {
                    return;
                }
                self.perf.results_applied = self.perf.results_applied.saturating_add(1);
                debug!(
                    request_id,
                    rows = page.items.len(),
                    total = page.total_count,
                    "applied page {}",
                    params.page
                );
                self.page = Some(page);
                self.status = RequestStatus::Success;
            }
            CoreEvent::PageFailed {
                request_id,
                params,
                message,
            } => {
                if !self.settle_fetch(request_id, &params) {
                    return;
                }
                // The last successful page stays; only the status changes.
                self.perf.failures_applied = self.perf.failures_applied.saturating_add(1);
                self.status = RequestStatus::Failed(message);
            }
            CoreEvent::CatalogLoaded {
                request_id,
                catalog,
            } => {
                if self.catalog_request != Some(request_id) {
                    debug!(request_id, "dropping superseded catalog response");
                    return;
                }
                self.catalog_request = None;
                info!("tag catalog loaded with {} tags", catalog.len());
                self.catalog = catalog;
                self.catalog_status = CatalogStatus::Ready;
            }
            CoreEvent::CatalogFailed {
                request_id,
                message,
            } => {
                if self.catalog_request != Some(request_id) {
                    debug!(request_id, "dropping superseded catalog failure");
                    return;
                }
                self.catalog_request = None;
                warn!("{}", message);
                self.catalog_status = CatalogStatus::Unavailable(message);
            }
        }
    }

    pub fn snapshot(&self) -> ViewSnapshot<'_> {
        let total_count = self.page.as_ref().map_or(0, |page| page.total_count);
        ViewSnapshot {
            rows: self
                .page
                .as_ref()
                .map_or(&[][..], |page| page.items.as_slice()),
            total_count,
            page: self.filter.page(),
            page_count: page_count(total_count, self.limit).max(self.filter.page()),
            limit: self.limit,
            search: self.filter.search(),
            tags: self.filter.tags(),
            available_tags: &self.catalog,
            status: &self.status,
            catalog_status: &self.catalog_status,
            location: self.history.current(),
            can_go_back: self.history.can_go_back(),
            can_go_forward: self.history.can_go_forward(),
            fetched_at: self.page.as_ref().map(|page| page.fetched_at),
        }
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn location(&self) -> &str {
        self.history.current()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn perf(&self) -> &FetchPerfCounters {
        &self.perf
    }

    /// Whether a list fetch or catalog load is still outstanding.
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some() || self.catalog_request.is_some()
    }

    fn take_request_id(&mut self) -> u64 {
        let request_id = self.next_request_id;
        self.next_request_id = self.next_request_id.wrapping_add(1);
        request_id
    }

    fn publish_location(&mut self) {
        let location = query::encode_location(&self.filter);
        if self.history.push(location) {
            debug!("location -> {}", self.history.current());
        }
    }

    fn dispatch_fetch(&mut self) {
        let request_id = self.take_request_id();
        let params = self.filter.fetch_params(self.limit);
        self.status = RequestStatus::Loading;
        self.perf.requests_sent = self.perf.requests_sent.saturating_add(1);
        if let Some(superseded) = self.in_flight.take() {
            debug!(
                request_id = superseded.request_id,
                "fetch superseded by request {}", request_id
            );
        }
        let command = CoreCmd::FetchPage {
            request_id,
            params: params.clone(),
        };
        if self.backend.cmd_tx.send(command).is_err() {
            error!(request_id, "list fetch not sent: backend unavailable");
            self.status = RequestStatus::Failed("Failed to fetch posts: backend unavailable.".to_string());
            return;
        }
        self.in_flight = Some(InFlightFetch {
            request_id,
            params,
            sent_at: Instant::now(),
        });
    }

    /// Clear the in-flight fetch if the response belongs to it.
    ///
    /// # Returns
    /// `false` for superseded responses, which must not touch visible state.
    fn settle_fetch(&mut self, request_id: u64, params: &FetchParams) -> bool {
        let is_current = self
            .in_flight
            .as_ref()
            .is_some_and(|fetch| fetch.request_id == request_id && &fetch.params == params);
        if !is_current {
            self.perf.stale_drops = self.perf.stale_drops.saturating_add(1);
            debug!(request_id, "dropping superseded list response");
            return false;
        }
        if let Some(fetch) = self.in_flight.take() {
            self.perf.last_roundtrip_ms = Some(fetch.sent_at.elapsed().as_secs_f32() * 1000.0);
        }
        true
    }
}
