//! UI panel modules extracted from the main app update loop.

/// Search box and tag selector.
pub(super) mod filters;
/// Pagination bar shown under a successful result.
pub(super) mod pagination;
/// Central table, spinner, and error surface.
pub(super) mod results;
/// Navigation buttons and the address bar.
pub(super) mod toolbar;
