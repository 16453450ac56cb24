//! Theme constants and one-time style application for the egui app.

use super::PostListApp;
use eframe::egui::{self, Color32, CornerRadius, Stroke, Visuals};

pub(super) const COLOR_BG_PRIMARY: Color32 = Color32::from_rgb(0x0d, 0x11, 0x17);
pub(super) const COLOR_BG_SECONDARY: Color32 = Color32::from_rgb(0x16, 0x1b, 0x22);
pub(super) const COLOR_TEXT_PRIMARY: Color32 = Color32::from_rgb(0xc9, 0xd1, 0xd9);
pub(super) const COLOR_TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8b, 0x94, 0x9e);
pub(super) const COLOR_TEXT_MUTED: Color32 = Color32::from_rgb(0x6e, 0x76, 0x81);
pub(super) const COLOR_ACCENT: Color32 = Color32::from_rgb(0xE5, 0x70, 0x00);
pub(super) const COLOR_ERROR: Color32 = Color32::from_rgb(0xF8, 0x51, 0x49);
pub(super) const COLOR_BORDER: Color32 = Color32::from_rgb(0x30, 0x36, 0x3d);

impl PostListApp {
    pub(super) fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }

        let mut visuals = Visuals::dark();
        visuals.panel_fill = COLOR_BG_PRIMARY;
        visuals.window_fill = COLOR_BG_SECONDARY;
        visuals.extreme_bg_color = COLOR_BG_SECONDARY;
        visuals.override_text_color = Some(COLOR_TEXT_PRIMARY);
        visuals.hyperlink_color = COLOR_ACCENT;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, COLOR_BORDER);
        visuals.widgets.inactive.corner_radius = CornerRadius::same(4);
        visuals.widgets.hovered.corner_radius = CornerRadius::same(4);
        visuals.widgets.active.corner_radius = CornerRadius::same(4);
        visuals.selection.stroke = Stroke::new(1.0, COLOR_ACCENT);
        ctx.set_visuals(visuals);

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);

        self.style_applied = true;
    }
}
