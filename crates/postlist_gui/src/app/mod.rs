//! Native egui shell around the list controller.
//!
//! The app owns only draft input state (the search box and the address bar
//! while they are being edited). Everything else is read from the controller
//! snapshot each frame, and every interaction becomes a [`ViewIntent`] applied
//! after the panels are drawn.

mod style;
mod ui;

use crate::backend::{spawn_backend_with_notifier, EventNotifier};
use crate::controller::{ListController, ViewIntent};
use eframe::egui;
use postlist_core::{AppError, Config, PostsClient};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

#[doc = "Default initial window size for native GUI startup."]
pub(crate) const DEFAULT_WINDOW_SIZE: [f32; 2] = [1100.0, 720.0];
#[doc = "Minimum enforced window size to keep the table and pagination usable."]
pub(crate) const MIN_WINDOW_SIZE: [f32; 2] = [720.0, 480.0];
const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);
const IDLE_REPAINT_INTERVAL: Duration = Duration::from_secs(1);

pub(crate) struct PostListApp {
    controller: ListController,
    search_draft: String,
    search_last_input_at: Option<Instant>,
    location_draft: String,
    location_editing: bool,
    pending_intents: Vec<ViewIntent>,
    api_label: String,
    style_applied: bool,
}

impl PostListApp {
    /// Spawn the backend worker and mount the list view at `initial_query`.
    ///
    /// Each backend event requests a repaint of `ctx` so responses show up
    /// without waiting for input.
    ///
    /// # Errors
    /// Returns an error when the provider URL is invalid or the worker cannot start.
    pub(crate) fn new(
        config: &Config,
        initial_query: &str,
        ctx: &egui::Context,
    ) -> Result<Self, AppError> {
        let client = PostsClient::new(config)?;
        let api_label = client.posts_url().to_string();
        let repaint_ctx = ctx.clone();
        let notifier: EventNotifier = Arc::new(move || repaint_ctx.request_repaint());
        let backend = spawn_backend_with_notifier(client, config.perf_log, Some(notifier))?;
        info!(
            "postlist GUI using {} ({} rows per page)",
            api_label, config.page_size
        );
        let controller = ListController::mount(backend, config.page_size, initial_query);
        let mut app = Self::with_controller(controller);
        app.api_label = api_label;
        Ok(app)
    }

    pub(crate) fn with_controller(controller: ListController) -> Self {
        let mut app = Self {
            controller,
            search_draft: String::new(),
            search_last_input_at: None,
            location_draft: String::new(),
            location_editing: false,
            pending_intents: Vec::new(),
            api_label: String::new(),
            style_applied: false,
        };
        app.sync_drafts();
        app
    }

    fn queue(&mut self, intent: ViewIntent) {
        self.pending_intents.push(intent);
    }

    fn note_search_input(&mut self, now: Instant) {
        self.search_last_input_at = Some(now);
    }

    /// Queue the search edit once typing has paused for [`SEARCH_DEBOUNCE`].
    fn maybe_dispatch_search(&mut self, now: Instant) {
        let Some(last_input) = self.search_last_input_at else {
            return;
        };
        if now.saturating_duration_since(last_input) < SEARCH_DEBOUNCE {
            return;
        }
        self.flush_search();
    }

    /// Queue the search edit immediately (Enter in the search box).
    fn flush_search(&mut self) {
        self.search_last_input_at = None;
        if self.search_draft != self.controller.filter().search() {
            self.queue(ViewIntent::SetSearch(self.search_draft.clone()));
        }
    }

    fn apply_pending_intents(&mut self) {
        let intents = std::mem::take(&mut self.pending_intents);
        for intent in intents {
            let external = matches!(
                intent,
                ViewIntent::Back | ViewIntent::Forward | ViewIntent::NavigateTo(_)
            );
            if external {
                // A location change discards any half-typed search.
                self.search_last_input_at = None;
            }
            self.controller.dispatch(intent);
            if external {
                self.sync_drafts();
            }
        }
        if !self.location_editing {
            self.location_draft = self.controller.location().to_string();
        }
    }

    fn sync_drafts(&mut self) {
        self.search_draft = self.controller.filter().search().to_string();
        self.location_draft = self.controller.location().to_string();
        self.location_editing = false;
    }

    fn repaint_after(&self, now: Instant) -> Duration {
        match self.search_last_input_at {
            Some(last_input) => {
                SEARCH_DEBOUNCE.saturating_sub(now.saturating_duration_since(last_input))
            }
            None => IDLE_REPAINT_INTERVAL,
        }
    }
}

impl eframe::App for PostListApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.ensure_style(ctx);
        self.controller.poll();

        self.render_toolbar(ctx);
        self.render_filters(ctx);
        self.render_pagination(ctx);
        self.render_results(ctx);

        let now = Instant::now();
        self.maybe_dispatch_search(now);
        self.apply_pending_intents();

        ctx.request_repaint_after(self.repaint_after(now));
    }
}
