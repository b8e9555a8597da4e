use crate::theme::Theme;
use eframe::egui::{self, CornerRadius, RichText};

pub mod chat;
pub mod new_workspace;
pub mod settings;
pub mod sidebar;
pub mod upload_section;

/// A two-state button used for the input-method and preference switches.
pub fn toggle_button(
    ui: &mut egui::Ui,
    theme: &Theme,
    label: &str,
    selected: bool,
) -> egui::Response {
    let button = egui::Button::new(RichText::new(label).color(theme.toggle_text(selected)))
        .fill(theme.toggle_fill(selected))
        .stroke(egui::Stroke::NONE)
        .corner_radius(CornerRadius::same(theme.radius_4))
        .min_size(egui::vec2(0.0, theme.button_height));
    ui.add(button)
}

/// Full-width dark button used for the sidebar's primary entries.
pub fn dark_button(ui: &mut egui::Ui, theme: &Theme, label: &str) -> egui::Response {
    let button = egui::Button::new(
        RichText::new(label)
            .color(theme.text_on_dark)
            .size(14.0)
            .strong(),
    )
    .fill(theme.surface_dark)
    .corner_radius(CornerRadius::same(theme.radius_8))
    .min_size(egui::vec2(ui.available_width(), theme.button_height + 6.0));
    ui.add(button)
}
