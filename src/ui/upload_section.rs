use crate::session::files::{InputMethod, PickedFile, UploadSectionState};
use crate::session::{FileData, FileId};
use crate::theme::Theme;
use crate::ui::toggle_button;
use eframe::egui::{self, RichText};

/// How an upload section may be used: with a state it can mutate, or as a
/// plain listing.
pub enum SectionMode<'a> {
    Editable(&'a mut UploadSectionState),
    ReadOnly(&'a [FileData]),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionRequest {
    Browse,
    StartUploads(Vec<FileId>),
    CancelUploads(Vec<FileId>),
}

#[derive(Debug, Default)]
pub struct SectionResponse {
    pub requests: Vec<SectionRequest>,
    /// Screen rect of the drop zone, when the section is showing one. Drops
    /// are routed by the caller, which can see every zone at once.
    pub drop_zone: Option<egui::Rect>,
}

pub fn show(
    ui: &mut egui::Ui,
    theme: &Theme,
    title: &str,
    mode: SectionMode<'_>,
) -> SectionResponse {
    let mut response = SectionResponse::default();
    theme.card_frame().show(ui, |ui| {
        ui.label(
            RichText::new(title)
                .color(theme.text_primary)
                .size(22.0)
                .strong(),
        );
        ui.add_space(theme.spacing_16);

        match mode {
            SectionMode::Editable(section) => {
                show_editable(ui, theme, section, &mut response);
            }
            SectionMode::ReadOnly(files) => {
                if files.is_empty() {
                    ui.label(RichText::new("No documents uploaded").color(theme.text_muted));
                }
                for file in files {
                    file_row(ui, theme, file, false);
                }
            }
        }
    });
    response
}

fn show_editable(
    ui: &mut egui::Ui,
    theme: &Theme,
    section: &mut UploadSectionState,
    response: &mut SectionResponse,
) {
    ui.horizontal(|ui| {
        let upload_selected = section.input_method == InputMethod::Upload;
        if toggle_button(ui, theme, "Upload PDF", upload_selected).clicked() {
            section.input_method = InputMethod::Upload;
        }
        if toggle_button(ui, theme, "Enter URL", !upload_selected).clicked() {
            section.input_method = InputMethod::Url;
        }
    });
    ui.add_space(theme.spacing_16);

    match section.input_method {
        InputMethod::Upload => {
            let zone = theme
                .drop_zone_frame(section.drag_active)
                .show(ui, |ui| {
                    ui.set_min_height(70.0);
                    ui.vertical_centered(|ui| {
                        ui.label(RichText::new("⬆").color(theme.accent).size(40.0));
                        ui.label(
                            RichText::new("Drag and drop your PDF files here, or click to browse.")
                                .color(theme.text_muted)
                                .size(13.0),
                        );
                    });
                })
                .response
                .interact(egui::Sense::click());

            if zone.clicked() {
                response.requests.push(SectionRequest::Browse);
            }
            response.drop_zone = Some(zone.rect);
        }
        InputMethod::Url => {
            ui.horizontal(|ui| {
                let add_width = 110.0;
                ui.add(
                    egui::TextEdit::singleline(&mut section.url)
                        .desired_width((ui.available_width() - add_width).max(80.0))
                        .hint_text("https://"),
                );
                if toggle_button(ui, theme, "Add URL", true).clicked() {
                    section.add_url();
                }
            });
        }
    }

    ui.add_space(theme.spacing_24);
    let mut removed: Option<FileId> = None;
    for file in &section.files {
        if file_row(ui, theme, file, true) {
            removed = Some(file.id);
        }
    }
    if let Some(file_id) = removed {
        response.requests.push(remove_file(section, file_id));
    }

    ui.add_space(theme.spacing_16);
    if toggle_button(ui, theme, "Reset Section", false).clicked() {
        response.requests.push(reset_section(section));
    }
}

/// Removes one file; its timer has to go with it.
pub fn remove_file(section: &mut UploadSectionState, file_id: FileId) -> SectionRequest {
    section.remove(file_id);
    SectionRequest::CancelUploads(vec![file_id])
}

pub fn reset_section(section: &mut UploadSectionState) -> SectionRequest {
    SectionRequest::CancelUploads(section.reset())
}

/// Renders one file row; returns true when its remove button was clicked.
fn file_row(ui: &mut egui::Ui, theme: &Theme, file: &FileData, removable: bool) -> bool {
    let mut remove_clicked = false;
    theme.file_row_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            let remove_width = if removable { 36.0 } else { 0.0 };
            ui.vertical(|ui| {
                ui.set_width((ui.available_width() - remove_width).max(60.0));
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&file.name).color(theme.text_primary));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let progress_color = if file.is_complete() {
                            theme.accent
                        } else {
                            theme.text_muted
                        };
                        ui.label(
                            RichText::new(format!("{}%", file.progress)).color(progress_color),
                        );
                    });
                });
                ui.add(
                    egui::ProgressBar::new(f32::from(file.progress) / 100.0)
                        .desired_height(theme.progress_height)
                        .fill(theme.accent),
                );
                if let Some(size) = file.size_label() {
                    ui.label(
                        RichText::new(size)
                            .color(theme.text_secondary)
                            .size(12.0),
                    );
                }
            });
            if removable {
                let remove = egui::Button::new(RichText::new("✖").color(theme.danger))
                    .frame(false);
                remove_clicked = ui.add(remove).on_hover_text("Remove").clicked();
            }
        });
    });
    ui.add_space(theme.spacing_12);
    remove_clicked
}

pub fn picked_from_drop(file: &egui::DroppedFile) -> PickedFile {
    match &file.path {
        Some(path) => PickedFile::from_path(path),
        None => PickedFile {
            name: file.name.clone(),
            size: file.bytes.as_ref().map(|bytes| bytes.len() as u64),
        },
    }
}
