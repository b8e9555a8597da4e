use crate::session::state::{Action, AppState};
use crate::session::SessionId;
use crate::theme::Theme;
use crate::ui::dark_button;
use eframe::egui::{self, CornerRadius, Margin, RichText, ScrollArea};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarRequest {
    Dispatch(Action),
    OpenNewWorkspace,
}

pub fn show(ctx: &egui::Context, theme: &Theme, state: &AppState) -> Vec<SidebarRequest> {
    let mut requests = Vec::new();
    egui::SidePanel::left("sidebar")
        .resizable(true)
        .default_width(280.0)
        .min_width(220.0)
        .frame(theme.panel_frame(theme.surface_sidebar))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("CAZE")
                        .color(theme.text_primary)
                        .size(26.0)
                        .strong(),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let back = egui::Button::new(RichText::new("←").size(22.0)).frame(false);
                    if ui.add(back).on_hover_text("Back").clicked() {
                        requests.push(SidebarRequest::Dispatch(Action::CloseSettings));
                    }
                });
            });
            ui.add_space(theme.spacing_12);

            if dark_button(ui, theme, "Dashboard").clicked() {
                requests.push(SidebarRequest::Dispatch(Action::OpenDashboard));
            }
            if dark_button(ui, theme, "New Patient Workspace").clicked() {
                requests.push(SidebarRequest::OpenNewWorkspace);
            }

            ui.add_space(theme.spacing_16);
            ui.label(
                RichText::new("Recent")
                    .color(theme.text_secondary)
                    .size(16.0)
                    .strong(),
            );
            ScrollArea::vertical()
                .id_salt("session_list")
                .max_height(300.0)
                .show(ui, |ui| {
                    for session in state.sessions() {
                        session_row(ui, theme, state, &session.id, &session.title, &mut requests);
                    }
                });
        });
    requests
}

fn session_row(
    ui: &mut egui::Ui,
    theme: &Theme,
    state: &AppState,
    id: &SessionId,
    title: &str,
    requests: &mut Vec<SidebarRequest>,
) {
    let (fill, text) = theme.session_row_colors(state.is_active(id));
    egui::Frame::new()
        .fill(fill)
        .corner_radius(CornerRadius::same(theme.radius_8))
        .inner_margin(Margin::symmetric(12, 10))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let delete = egui::Button::new(RichText::new("✖").color(theme.danger)).frame(false);
                    if ui.add(delete).on_hover_text("Delete").clicked() {
                        requests.push(SidebarRequest::Dispatch(Action::DeleteSession(id.clone())));
                    }
                    let settings = egui::Button::new(RichText::new("⚙").color(text)).frame(false);
                    if ui.add(settings).on_hover_text("Settings").clicked() {
                        requests.push(SidebarRequest::Dispatch(Action::OpenSettings(id.clone())));
                    }

                    ui.with_layout(egui::Layout::left_to_right(egui::Align::Center), |ui| {
                        let label = egui::Label::new(RichText::new(title).color(text))
                            .sense(egui::Sense::click())
                            .truncate();
                        if ui.add(label).clicked() {
                            requests.push(SidebarRequest::Dispatch(Action::SelectSession(id.clone())));
                        }
                    });
                });
            });
        });
    ui.add_space(theme.spacing_4);
}
