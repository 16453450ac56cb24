//! Background worker that runs provider requests off the UI thread.

mod requests;

use crate::backend::{CoreCmd, CoreEvent};
use crossbeam_channel::{unbounded, Receiver, Sender};
use postlist_core::{AppError, PostsClient};
use std::sync::Arc;
use std::thread;
use tracing::info;

/// Callback invoked after every event is queued (the GUI uses it to request a repaint).
pub type EventNotifier = Arc<dyn Fn() + Send + Sync>;

/// Handle for sending commands to, and receiving events from, the backend worker.
pub struct BackendHandle {
    pub cmd_tx: Sender<CoreCmd>,
    pub evt_rx: Receiver<CoreEvent>,
}

impl BackendHandle {
    /// Wrap caller-owned channels, for driving the controller without a worker.
    pub fn from_test_channels(cmd_tx: Sender<CoreCmd>, evt_rx: Receiver<CoreEvent>) -> Self {
        Self { cmd_tx, evt_rx }
    }
}

/// Everything a request task needs; cloned into each spawned task.
#[derive(Clone)]
struct WorkerContext {
    client: PostsClient,
    evt_tx: Sender<CoreEvent>,
    notifier: Option<EventNotifier>,
    perf_log_enabled: bool,
}

impl WorkerContext {
    fn emit(&self, event: CoreEvent) {
        let _ = self.evt_tx.send(event);
        if let Some(notify) = &self.notifier {
            notify();
        }
    }
}

/// Spawn the backend worker without an event notifier.
///
/// # Errors
/// See [`spawn_backend_with_notifier`].
pub fn spawn_backend(client: PostsClient, perf_log_enabled: bool) -> Result<BackendHandle, AppError> {
    spawn_backend_with_notifier(client, perf_log_enabled, None)
}

/// Spawn the backend worker thread and its async runtime.
///
/// Each command becomes an independent task, so several fetches can be in
/// flight and may complete in any order. The worker stops when the command
/// sender is dropped; tasks still running at that point are abandoned.
///
/// # Returns
/// A [`BackendHandle`] containing the command sender and event receiver.
///
/// # Errors
/// Returns an error if the runtime or the worker thread cannot be created.
pub fn spawn_backend_with_notifier(
    client: PostsClient,
    perf_log_enabled: bool,
    notifier: Option<EventNotifier>,
) -> Result<BackendHandle, AppError> {
    let (cmd_tx, cmd_rx) = unbounded();
    let (evt_tx, evt_rx) = unbounded();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .thread_name("postlist-fetch")
        .enable_all()
        .build()?;
    let context = WorkerContext {
        client,
        evt_tx,
        notifier,
        perf_log_enabled,
    };

    thread::Builder::new()
        .name("postlist-gui-backend".to_string())
        .spawn(move || {
            info!(
                "backend worker started for {}",
                context.client.posts_url()
            );
            for cmd in cmd_rx.iter() {
                let context = context.clone();
                match cmd {
                    CoreCmd::FetchPage { request_id, params } => {
                        runtime.spawn(requests::handle_fetch_page(context, request_id, params));
                    }
                    CoreCmd::LoadCatalog { request_id } => {
                        runtime.spawn(requests::handle_load_catalog(context, request_id));
                    }
                }
            }
            info!("backend worker stopping");
            runtime.shutdown_background();
        })?;

    Ok(BackendHandle { cmd_tx, evt_rx })
}
