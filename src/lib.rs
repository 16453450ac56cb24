//! Root crate facade for postlist: the core library plus the optional native GUI.

pub use postlist_core::*;

/// Native list view (feature-gated).
#[cfg(feature = "gui")]
pub use postlist_gui as gui;
