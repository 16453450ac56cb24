//! Protocol types for the GUI backend worker.

use postlist_core::{FetchParams, PageResult, TagCatalog};

/// Commands issued by the UI thread for the backend worker to execute.
///
/// Every command carries a request id chosen by the controller; the matching
/// event echoes it so superseded responses can be recognized and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreCmd {
    /// Fetch one filtered page of posts.
    FetchPage { request_id: u64, params: FetchParams },
    /// Sample the unfiltered collection and build the tag catalog.
    LoadCatalog { request_id: u64 },
}

/// Events produced by the backend worker and polled by the UI thread.
#[derive(Debug, Clone)]
pub enum CoreEvent {
    /// A page fetch succeeded.
    PageLoaded {
        request_id: u64,
        params: FetchParams,
        page: PageResult,
    },
    /// A page fetch failed; `message` is ready to show to the user.
    PageFailed {
        request_id: u64,
        params: FetchParams,
        message: String,
    },
    /// The tag catalog sample succeeded.
    CatalogLoaded {
        request_id: u64,
        catalog: TagCatalog,
    },
    /// The tag catalog sample failed. Non-fatal for the view.
    CatalogFailed { request_id: u64, message: String },
}

impl CoreEvent {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::PageLoaded { request_id, .. }
            | Self::PageFailed { request_id, .. }
            | Self::CatalogLoaded { request_id, .. }
            | Self::CatalogFailed { request_id, .. } => *request_id,
        }
    }
}
