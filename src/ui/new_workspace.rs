use crate::error::AppError;
use crate::event::SectionTarget;
use crate::session::files::{PickedFile, UploadSectionState};
use crate::session::state::WorkspaceDraft;
use crate::session::FileId;
use crate::theme::Theme;
use crate::ui::upload_section::{self, SectionMode, SectionRequest};
use eframe::egui::{self, CornerRadius, Pos2, Rect, RichText, ScrollArea};
use tracing::debug;

#[derive(Debug)]
pub enum DialogOutcome {
    Open,
    Cancelled,
    Submitted(Result<WorkspaceDraft, AppError>),
}

#[derive(Debug)]
pub struct DialogResponse {
    pub outcome: DialogOutcome,
    pub requests: Vec<(SectionTarget, SectionRequest)>,
}

/// Transient state of the "New Patient Workspace" modal.
#[derive(Debug, Clone, Default)]
pub struct NewWorkspaceDialog {
    pub name: String,
    pub medical: UploadSectionState,
    pub patient: UploadSectionState,
    generation: u64,
    picker_open: bool,
}

/// Picks the section a drop lands in. The pointer decides when it is over a
/// zone; otherwise the first visible zone takes it, since winit reports no
/// cursor movement while the OS drags files.
fn drop_target(
    pointer: Option<Pos2>,
    zones: &[(SectionTarget, Option<Rect>)],
) -> Option<SectionTarget> {
    let visible = || {
        zones
            .iter()
            .filter_map(|(target, zone)| zone.map(|rect| (*target, rect)))
    };
    pointer
        .and_then(|pos| visible().find(|(_, rect)| rect.contains(pos)))
        .or_else(|| visible().next())
        .map(|(target, _)| target)
}

impl NewWorkspaceDialog {
    /// A dialog tagged with `generation`, so picker results from an earlier
    /// dialog can be told apart.
    pub fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Default::default()
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Claims the single picker slot; false while a picker is already open.
    pub fn begin_pick(&mut self) -> bool {
        !std::mem::replace(&mut self.picker_open, true)
    }

    pub fn end_pick(&mut self) {
        self.picker_open = false;
    }

    pub fn section_mut(&mut self, target: SectionTarget) -> &mut UploadSectionState {
        match target {
            SectionTarget::Medical => &mut self.medical,
            SectionTarget::Patient => &mut self.patient,
        }
    }

    pub fn accept_picked(&mut self, target: SectionTarget, files: Vec<PickedFile>) -> Vec<FileId> {
        self.section_mut(target).add_files(files)
    }

    pub fn set_progress(&mut self, file_id: FileId, progress: u8) -> bool {
        self.medical.set_progress(file_id, progress) || self.patient.set_progress(file_id, progress)
    }

    pub fn file_ids(&self) -> Vec<FileId> {
        let mut ids = self.medical.file_ids();
        ids.extend(self.patient.file_ids());
        ids
    }

    /// Hands the collected files over; an empty name leaves everything in place.
    pub fn submit(&mut self) -> Result<WorkspaceDraft, AppError> {
        if self.name.is_empty() {
            return Err(AppError::EmptyWorkspaceName);
        }

        Ok(WorkspaceDraft {
            name: std::mem::take(&mut self.name),
            medical_files: std::mem::take(&mut self.medical.files),
            patient_files: std::mem::take(&mut self.patient.files),
        })
    }

    /// Highlights the zone a hovering drag would land in and adds dropped
    /// files to it.
    fn route_drop(
        &mut self,
        ctx: &egui::Context,
        zones: &[(SectionTarget, Option<Rect>)],
    ) -> Option<(SectionTarget, SectionRequest)> {
        let (pointer, hovering, dropped) = ctx.input(|input| {
            (
                input.pointer.latest_pos(),
                !input.raw.hovered_files.is_empty(),
                input.raw.dropped_files.clone(),
            )
        });
        let target = drop_target(pointer, zones);
        self.medical.drag_active = hovering && target == Some(SectionTarget::Medical);
        self.patient.drag_active = hovering && target == Some(SectionTarget::Patient);

        if dropped.is_empty() {
            return None;
        }
        let Some(target) = target else {
            debug!(count = dropped.len(), "dropped files ignored, no upload zone visible");
            return None;
        };
        let picked = dropped.iter().map(upload_section::picked_from_drop).collect();
        let added = self.section_mut(target).add_files(picked);
        debug!(?target, count = added.len(), "files dropped");
        Some((target, SectionRequest::StartUploads(added)))
    }

    pub fn show(&mut self, ctx: &egui::Context, theme: &Theme) -> DialogResponse {
        let mut outcome = DialogOutcome::Open;
        let mut requests = Vec::new();
        let screen = ctx.screen_rect();

        egui::Modal::new(egui::Id::new("new_workspace_dialog"))
            .backdrop_color(theme.modal_backdrop)
            .show(ctx, |ui| {
                ui.set_width(screen.width() * 0.7);
                ScrollArea::vertical()
                    .id_salt("new_workspace_scroll")
                    .max_height(screen.height() * 0.85)
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.heading(RichText::new("New Patient Workspace").color(theme.text_primary));
                        });
                        ui.add_space(theme.spacing_16);

                        ui.label(RichText::new("Patient Name").color(theme.text_primary));
                        ui.add(
                            egui::TextEdit::singleline(&mut self.name)
                                .desired_width(f32::INFINITY),
                        );
                        ui.add_space(theme.spacing_16);

                        let zones = ui.columns(2, |columns| {
                            let medical = upload_section::show(
                                &mut columns[0],
                                theme,
                                "Upload Medical Documents",
                                SectionMode::Editable(&mut self.medical),
                            );
                            let patient = upload_section::show(
                                &mut columns[1],
                                theme,
                                "Upload Patient Documents",
                                SectionMode::Editable(&mut self.patient),
                            );
                            requests.extend(
                                medical
                                    .requests
                                    .into_iter()
                                    .map(|request| (SectionTarget::Medical, request)),
                            );
                            requests.extend(
                                patient
                                    .requests
                                    .into_iter()
                                    .map(|request| (SectionTarget::Patient, request)),
                            );
                            [
                                (SectionTarget::Medical, medical.drop_zone),
                                (SectionTarget::Patient, patient.drop_zone),
                            ]
                        });
                        if let Some(request) = self.route_drop(ui.ctx(), &zones) {
                            requests.push(request);
                        }

                        ui.add_space(theme.spacing_16);
                        ui.horizontal(|ui| {
                            let cancel = egui::Button::new(RichText::new("Cancel").color(theme.text_primary))
                                .fill(theme.toggle_idle)
                                .stroke(egui::Stroke::new(1.0, theme.border))
                                .corner_radius(CornerRadius::same(theme.radius_4));
                            if ui.add(cancel).clicked() {
                                outcome = DialogOutcome::Cancelled;
                            }

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                let create = egui::Button::new(RichText::new("Create").color(theme.text_on_dark))
                                    .fill(theme.accent_strong)
                                    .corner_radius(CornerRadius::same(theme.radius_4));
                                if ui.add(create).clicked() {
                                    outcome = DialogOutcome::Submitted(self.submit());
                                }
                            });
                        });
                    });
            });

        DialogResponse { outcome, requests }
    }
}

/// Blocking notice shown on top of everything until acknowledged.
pub fn show_alert(ctx: &egui::Context, theme: &Theme, message: &str) -> bool {
    let mut acknowledged = false;
    egui::Modal::new(egui::Id::new("alert_dialog"))
        .backdrop_color(theme.modal_backdrop)
        .show(ctx, |ui| {
            ui.set_min_width(320.0);
            ui.label(RichText::new(message).color(theme.text_primary));
            ui.add_space(theme.spacing_12);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("OK").clicked() {
                    acknowledged = true;
                }
            });
        });
    acknowledged
}
