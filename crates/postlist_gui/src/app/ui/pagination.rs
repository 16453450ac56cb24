//! Pagination bar shown under a successful result.

use super::super::style::*;
use super::super::PostListApp;
use crate::controller::ViewIntent;
use eframe::egui::{self, RichText};

/// Pages shown on each side of the current page before collapsing into a gap.
const PAGE_WINDOW_RADIUS: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageSlot {
    Page(u32),
    Gap,
}

/// Page buttons to draw: always the first and last page, the pages within
/// `radius` of `current`, and a [`PageSlot::Gap`] wherever numbers are skipped.
pub(crate) fn page_window(current: u32, page_count: u32, radius: u32) -> Vec<PageSlot> {
    let page_count = page_count.max(1);
    let current = current.clamp(1, page_count);
    let low = current.saturating_sub(radius).max(1);
    let high = current.saturating_add(radius).min(page_count);

    let mut pages = vec![1];
    pages.extend(low..=high);
    pages.push(page_count);
    pages.sort_unstable();
    pages.dedup();

    let mut slots = Vec::with_capacity(pages.len() + 2);
    let mut previous = 0;
    for page in pages {
        if previous != 0 && page > previous + 1 {
            slots.push(PageSlot::Gap);
        }
        slots.push(PageSlot::Page(page));
        previous = page;
    }
    slots
}

impl PostListApp {
    pub(crate) fn render_pagination(&mut self, ctx: &egui::Context) {
        let snapshot = self.controller.snapshot();
        if !snapshot.shows_table() {
            return;
        }
        let mut target: Option<u32> = None;
        egui::TopBottomPanel::bottom("pagination")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui
                        .add_enabled(snapshot.page > 1, egui::Button::new("Prev"))
                        .clicked()
                    {
                        target = Some(snapshot.page - 1);
                    }
                    for slot in page_window(snapshot.page, snapshot.page_count, PAGE_WINDOW_RADIUS)
                    {
                        match slot {
                            PageSlot::Page(page) => {
                                if ui
                                    .selectable_label(page == snapshot.page, page.to_string())
                                    .clicked()
                                    && page != snapshot.page
                                {
                                    target = Some(page);
                                }
                            }
                            PageSlot::Gap => {
                                ui.label(RichText::new("...").color(COLOR_TEXT_MUTED));
                            }
                        }
                    }
                    if ui
                        .add_enabled(
                            snapshot.page < snapshot.page_count,
                            egui::Button::new("Next"),
                        )
                        .clicked()
                    {
                        target = Some(snapshot.page + 1);
                    }

                    ui.separator();
                    let summary = match snapshot.visible_range() {
                        Some((first, last)) => {
                            format!("Showing {}-{} of {}", first, last, snapshot.total_count)
                        }
                        None => format!("{} posts", snapshot.total_count),
                    };
                    ui.label(RichText::new(summary).color(COLOR_TEXT_SECONDARY));
                    if let Some(fetched_at) = snapshot.fetched_at {
                        ui.separator();
                        ui.label(
                            RichText::new(format!(
                                "updated {}",
                                fetched_at.with_timezone(&chrono::Local).format("%H:%M:%S")
                            ))
                            .small()
                            .color(COLOR_TEXT_MUTED),
                        );
                    }
                });
            });
        if let Some(page) = target {
            self.pending_intents.push(ViewIntent::SetPage(page));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{page_window, PageSlot};
    use PageSlot::{Gap, Page};

    #[test]
    fn small_counts_show_every_page() {
        assert_eq!(page_window(1, 1, 2), vec![Page(1)]);
        assert_eq!(page_window(2, 3, 2), vec![Page(1), Page(2), Page(3)]);
        assert_eq!(page_window(1, 0, 2), vec![Page(1)]);
    }

    #[test]
    fn gaps_appear_around_the_current_window() {
        assert_eq!(
            page_window(10, 20, 2),
            vec![
                Page(1),
                Gap,
                Page(8),
                Page(9),
                Page(10),
                Page(11),
                Page(12),
                Gap,
                Page(20)
            ]
        );
        assert_eq!(
            page_window(1, 10, 2),
            vec![Page(1), Page(2), Page(3), Gap, Page(10)]
        );
        assert_eq!(
            page_window(4, 10, 2),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5), Page(6), Gap, Page(10)]
        );
    }
}
