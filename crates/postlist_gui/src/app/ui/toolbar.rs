//! Top bar with back/forward navigation and the editable address bar.

use super::super::style::*;
use super::super::PostListApp;
use crate::controller::ViewIntent;
use eframe::egui::{self, RichText};

impl PostListApp {
    pub(crate) fn render_toolbar(&mut self, ctx: &egui::Context) {
        let mut intents = Vec::new();
        let snapshot = self.controller.snapshot();
        egui::TopBottomPanel::top("toolbar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Posts").color(COLOR_ACCENT))
                        .on_hover_text(self.api_label.as_str());
                    ui.add_space(12.0);
                    if ui
                        .add_enabled(snapshot.can_go_back, egui::Button::new("<"))
                        .on_hover_text("Back")
                        .clicked()
                    {
                        intents.push(ViewIntent::Back);
                    }
                    if ui
                        .add_enabled(snapshot.can_go_forward, egui::Button::new(">"))
                        .on_hover_text("Forward")
                        .clicked()
                    {
                        intents.push(ViewIntent::Forward);
                    }
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.location_draft)
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY)
                            .hint_text("?page=1"),
                    );
                    if response.gained_focus() || response.changed() {
                        self.location_editing = true;
                    }
                    if response.lost_focus() {
                        if ui.input(|input| input.key_pressed(egui::Key::Enter)) {
                            intents.push(ViewIntent::NavigateTo(self.location_draft.clone()));
                        } else {
                            // Abandoned edit; the draft snaps back to the live location.
                            self.location_editing = false;
                        }
                    }
                });
                ui.label(
                    RichText::new(&self.api_label)
                        .small()
                        .monospace()
                        .color(COLOR_TEXT_MUTED),
                );
            });
        self.pending_intents.extend(intents);
    }
}
