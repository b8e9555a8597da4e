use crate::session::{LlmPreference, WorkspaceDetails};
use crate::theme::Theme;
use crate::ui::toggle_button;
use crate::ui::upload_section::{self, SectionMode};
use eframe::egui::{self, RichText, ScrollArea};

/// Read-only document view for one workspace. The preference toggle is the
/// only thing it can change; the caller applies the returned choice.
pub fn show(
    ui: &mut egui::Ui,
    theme: &Theme,
    details: Option<&WorkspaceDetails>,
) -> Option<LlmPreference> {
    let mut chosen = None;
    ScrollArea::vertical()
        .id_salt("settings_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.label(
                RichText::new("Medical Document Upload")
                    .color(theme.text_primary)
                    .size(28.0)
                    .strong(),
            );
            ui.add_space(theme.spacing_16);

            let Some(details) = details else {
                ui.label(
                    RichText::new("No workspace details for this session.")
                        .color(theme.text_muted),
                );
                return;
            };

            ui.label(
                RichText::new("LLM Preference")
                    .color(theme.text_primary)
                    .size(20.0),
            );
            ui.horizontal(|ui| {
                for preference in [LlmPreference::Offline, LlmPreference::Online] {
                    let selected = details.llm_preference == preference;
                    if toggle_button(ui, theme, preference.label(), selected).clicked() {
                        chosen = Some(preference);
                    }
                }
            });
            ui.add_space(theme.spacing_24);

            upload_section::show(
                ui,
                theme,
                "Uploaded Medical Documents",
                SectionMode::ReadOnly(&details.medical_files),
            );
            ui.add_space(theme.spacing_16);
            upload_section::show(
                ui,
                theme,
                "Uploaded Patient Documents",
                SectionMode::ReadOnly(&details.patient_files),
            );
        });
    chosen
}
