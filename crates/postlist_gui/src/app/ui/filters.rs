//! Search input and tag multi-select.

use super::super::style::*;
use super::super::PostListApp;
use crate::controller::{CatalogStatus, ViewIntent};
use eframe::egui::{self, RichText};
use postlist_core::TagCatalog;
use std::collections::BTreeSet;
use std::time::Instant;

const TAG_SUMMARY_LIMIT: usize = 3;

/// Options offered by the tag selector: the catalog plus any selected tag the
/// catalog does not know (e.g. one that arrived through a shared link).
pub(crate) fn tag_options<'a>(catalog: &'a TagCatalog, selected: &'a BTreeSet<String>) -> Vec<&'a str> {
    let options: BTreeSet<&str> = catalog
        .iter()
        .chain(selected.iter().map(String::as_str))
        .collect();
    options.into_iter().collect()
}

pub(crate) fn toggled_selection(selected: &BTreeSet<String>, tag: &str) -> BTreeSet<String> {
    let mut next = selected.clone();
    if !next.remove(tag) {
        next.insert(tag.to_string());
    }
    next
}

/// Combo box caption, e.g. `Any`, `blog, news`, or `a, b, c +2`.
pub(crate) fn tag_summary(selected: &BTreeSet<String>) -> String {
    if selected.is_empty() {
        return "Any".to_string();
    }
    let shown: Vec<&str> = selected
        .iter()
        .take(TAG_SUMMARY_LIMIT)
        .map(String::as_str)
        .collect();
    let hidden = selected.len().saturating_sub(TAG_SUMMARY_LIMIT);
    if hidden == 0 {
        shown.join(", ")
    } else {
        format!("{} +{}", shown.join(", "), hidden)
    }
}

impl PostListApp {
    pub(crate) fn render_filters(&mut self, ctx: &egui::Context) {
        let mut intents = Vec::new();
        let mut search_changed = false;
        let mut search_submitted = false;
        let snapshot = self.controller.snapshot();
        egui::TopBottomPanel::top("filters")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                ui.horizontal_wrapped(|ui| {
                    ui.label(RichText::new("Search").small().color(COLOR_TEXT_MUTED));
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut self.search_draft)
                            .desired_width(280.0)
                            .hint_text("Search posts..."),
                    );
                    search_changed = response.changed();
                    search_submitted = response.lost_focus()
                        && ui.input(|input| input.key_pressed(egui::Key::Enter));

                    ui.separator();
                    ui.label(RichText::new("Tags").small().color(COLOR_TEXT_MUTED));
                    let options = tag_options(snapshot.available_tags, snapshot.tags);
                    let mut toggled: Option<String> = None;
                    egui::ComboBox::from_id_salt("tag_filter")
                        .selected_text(tag_summary(snapshot.tags))
                        .show_ui(ui, |ui| {
                            if options.is_empty() {
                                ui.label(RichText::new("No tags available").color(COLOR_TEXT_MUTED));
                            }
                            for tag in &options {
                                let mut checked = snapshot.tags.contains(*tag);
                                if ui.checkbox(&mut checked, *tag).changed() {
                                    toggled = Some(tag.to_string());
                                }
                            }
                        });
                    if let Some(tag) = toggled {
                        intents.push(ViewIntent::SetTags(toggled_selection(snapshot.tags, &tag)));
                    }
                    if !snapshot.tags.is_empty() && ui.button("Clear tags").clicked() {
                        intents.push(ViewIntent::SetTags(BTreeSet::new()));
                    }

                    match snapshot.catalog_status {
                        CatalogStatus::Loading => {
                            ui.spinner();
                            ui.label(RichText::new("Loading tags...").color(COLOR_TEXT_MUTED));
                        }
                        CatalogStatus::Unavailable(reason) => {
                            ui.colored_label(COLOR_ERROR, "Tags unavailable")
                                .on_hover_text(reason.as_str());
                            if ui.button("Reload tags").clicked() {
                                intents.push(ViewIntent::ReloadCatalog);
                            }
                        }
                        CatalogStatus::NotRequested | CatalogStatus::Ready => {}
                    }
                });
                ui.add_space(4.0);
            });

        self.pending_intents.extend(intents);
        if search_changed {
            self.note_search_input(Instant::now());
        }
        if search_submitted {
            self.flush_search();
        }
    }
}
