//! Backend worker wiring for the list view.
//!
//! This module exposes the command/event protocol plus the worker spawn helpers
//! used by the controller on the UI thread.

mod protocol;
mod worker;

pub use protocol::{CoreCmd, CoreEvent};
pub use worker::{spawn_backend, spawn_backend_with_notifier, BackendHandle, EventNotifier};
