//! Central results surface: progress indicator, error line, or the posts table.

use super::super::style::*;
use super::super::PostListApp;
use crate::controller::ViewIntent;
use eframe::egui::{self, RichText};
use postlist_core::{Record, RequestStatus};

const BODY_PREVIEW_CHARS: usize = 120;

/// Single-line preview of `text`, collapsing whitespace and cutting at `max_chars`.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let mut cut: String = collapsed.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str("...");
    cut
}

fn render_table(ui: &mut egui::Ui, rows: &[Record]) {
    egui::ScrollArea::vertical()
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Grid::new("posts_table")
                .striped(true)
                .num_columns(5)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    for header in ["ID", "Title", "Body", "Tags", "Views"] {
                        ui.label(RichText::new(header).strong().color(COLOR_TEXT_SECONDARY));
                    }
                    ui.end_row();
                    for row in rows {
                        ui.label(RichText::new(row.id.to_string()).monospace());
                        ui.label(row.title.as_str());
                        ui.label(
                            RichText::new(preview(&row.body, BODY_PREVIEW_CHARS))
                                .color(COLOR_TEXT_SECONDARY),
                        )
                        .on_hover_text(row.body.as_str());
                        ui.label(RichText::new(row.tags.join(", ")).color(COLOR_ACCENT));
                        ui.label(
                            row.views
                                .map(|views| views.to_string())
                                .unwrap_or_else(|| "-".to_string()),
                        );
                        ui.end_row();
                    }
                });
            if rows.is_empty() {
                ui.add_space(8.0);
                ui.label(RichText::new("No posts match the current filters.").color(COLOR_TEXT_MUTED));
            }
        });
}

impl PostListApp {
    pub(crate) fn render_results(&mut self, ctx: &egui::Context) {
        let mut retry = false;
        let snapshot = self.controller.snapshot();
        egui::CentralPanel::default().show(ctx, |ui| match snapshot.status {
            RequestStatus::Idle => {
                ui.label(RichText::new("No request issued yet.").color(COLOR_TEXT_MUTED));
            }
            RequestStatus::Loading => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading posts...");
                });
            }
            RequestStatus::Failed(reason) => {
                ui.horizontal(|ui| {
                    ui.colored_label(COLOR_ERROR, reason.as_str());
                    retry = ui.button("Retry").clicked();
                });
            }
            RequestStatus::Success => render_table(ui, snapshot.rows),
        });
        if retry {
            self.pending_intents.push(ViewIntent::Retry);
        }
    }
}
