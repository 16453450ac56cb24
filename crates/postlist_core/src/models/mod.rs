//! Data models shared by the provider client, the controller, and the CLI.

/// Canonical filter state and the derived fetch parameters.
pub mod filter;
/// Records, result pages, and the tag catalog.
pub mod post;
/// Request lifecycle status.
pub mod status;

pub use filter::{is_valid_tag, FetchParams, FilterState};
pub use post::{PageResult, Record, TagCatalog};
pub use status::RequestStatus;
