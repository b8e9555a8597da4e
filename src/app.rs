use crate::config::AppConfig;
use crate::error::AppError;
use crate::event::AppEvent;
use crate::session::chat::{CannedReply, ChatTranscript, ReplyProvider};
use crate::session::state::{Action, AppState, Effect};
use crate::theme::Theme;
use crate::ui::new_workspace::{self, DialogOutcome, DialogResponse, NewWorkspaceDialog};
use crate::ui::sidebar::{self, SidebarRequest};
use crate::ui::upload_section::SectionRequest;
use crate::ui::{chat, settings};
use crate::upload::UploadTimers;
use eframe::egui;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use tokio::runtime::Handle;
use tracing::{debug, info, warn};

pub struct MediChatApp {
    rx: Receiver<AppEvent>,
    state: AppState,
    timers: UploadTimers,
    replies: Box<dyn ReplyProvider>,
    greeting: String,
    theme: Theme,
    chat: Option<ChatTranscript>,
    new_workspace: Option<NewWorkspaceDialog>,
    dialogs_opened: u64,
    alert: Option<String>,
}

impl MediChatApp {
    pub fn new(ctx: egui::Context, runtime: Handle, config: &AppConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let theme = Theme::default();
        theme.apply_visuals(&ctx);

        Self {
            rx,
            state: AppState::default(),
            timers: UploadTimers::new(runtime, tx, ctx, config.upload_step, config.upload_tick()),
            replies: Box::new(CannedReply::new(config.canned_reply.clone())),
            greeting: config.greeting.clone(),
            theme,
            chat: None,
            new_workspace: None,
            dialogs_opened: 0,
            alert: None,
        }
    }

    fn dispatch(&mut self, action: Action) {
        match self.state.apply(action) {
            Ok(Effect::None) => {}
            Ok(Effect::SessionCreated(session_id)) => {
                debug!(%session_id, "session activated");
            }
            Ok(Effect::CancelUploads(file_ids)) => self.timers.cancel(file_ids),
            Err(err @ AppError::EmptyWorkspaceName) => self.alert = Some(err.to_string()),
            Err(err) => warn!(%err, "action rejected"),
        }
    }

    fn drain_events(&mut self) {
        loop {
            match self.rx.try_recv() {
                Ok(event) => self.apply_event(event),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    warn!("event channel disconnected");
                    break;
                }
            }
        }
    }

    fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::UploadProgress { file_id, progress } => {
                let in_dialog = self
                    .new_workspace
                    .as_mut()
                    .is_some_and(|dialog| dialog.set_progress(file_id, progress));
                if !in_dialog {
                    self.dispatch(Action::UploadProgress { file_id, progress });
                }
                if progress >= 100 {
                    self.timers.finish(file_id);
                }
            }
            AppEvent::FilesPicked {
                dialog,
                target,
                files,
            } => {
                let Some(open) = self
                    .new_workspace
                    .as_mut()
                    .filter(|open| open.generation() == dialog)
                else {
                    debug!(dialog, count = files.len(), "picked files arrived after dialog closed");
                    return;
                };
                open.end_pick();
                for file_id in open.accept_picked(target, files) {
                    self.timers.start(file_id);
                }
            }
        }
    }

    fn handle_sidebar_request(&mut self, request: SidebarRequest) {
        match request {
            SidebarRequest::Dispatch(action) => self.dispatch(action),
            SidebarRequest::OpenNewWorkspace => {
                if self.new_workspace.is_none() {
                    self.dialogs_opened += 1;
                    self.new_workspace = Some(NewWorkspaceDialog::new(self.dialogs_opened));
                }
            }
        }
    }

    fn handle_dialog_response(&mut self, response: DialogResponse) {
        for (target, request) in response.requests {
            match request {
                SectionRequest::Browse => {
                    let Some(dialog) = self.new_workspace.as_mut() else {
                        continue;
                    };
                    if dialog.begin_pick() {
                        self.timers.spawn_picker(dialog.generation(), target);
                    } else {
                        debug!("file picker already open");
                    }
                }
                SectionRequest::StartUploads(file_ids) => {
                    for file_id in file_ids {
                        self.timers.start(file_id);
                    }
                }
                SectionRequest::CancelUploads(file_ids) => self.timers.cancel(file_ids),
            }
        }

        match response.outcome {
            DialogOutcome::Open => {}
            DialogOutcome::Cancelled => {
                if let Some(dialog) = self.new_workspace.take() {
                    self.timers.cancel(dialog.file_ids());
                }
            }
            DialogOutcome::Submitted(Ok(draft)) => {
                self.new_workspace = None;
                let created_at_ms = chrono::Utc::now().timestamp_millis();
                self.dispatch(Action::CreateWorkspace {
                    draft,
                    created_at_ms,
                });
            }
            DialogOutcome::Submitted(Err(err)) => {
                info!(%err, "workspace creation rejected");
                self.alert = Some(err.to_string());
            }
        }
    }

    /// Keeps one transcript per visible chat panel, remounted on session change.
    fn sync_chat_mount(&mut self) {
        match self.state.active_session() {
            Some(active) => {
                let mounted = self
                    .chat
                    .as_ref()
                    .is_some_and(|chat| chat.session_id() == active);
                if !mounted {
                    self.chat = Some(ChatTranscript::mount(active.clone(), &self.greeting));
                }
            }
            None => self.chat = None,
        }
    }

    fn render_sidebar(&mut self, ctx: &egui::Context) {
        for request in sidebar::show(ctx, &self.theme, &self.state) {
            self.handle_sidebar_request(request);
        }
    }

    fn render_main(&mut self, ctx: &egui::Context) {
        if let Some(target) = self.state.settings_target().cloned() {
            self.chat = None;
            let mut chosen = None;
            egui::CentralPanel::default()
                .frame(self.theme.panel_frame(self.theme.surface_sidebar))
                .show(ctx, |ui| {
                    chosen = settings::show(ui, &self.theme, self.state.workspace(&target));
                });
            if let Some(preference) = chosen {
                self.dispatch(Action::SetPreference(preference));
            }
            return;
        }

        self.sync_chat_mount();
        let title = self.state.active_title().to_string();
        egui::CentralPanel::default()
            .frame(self.theme.panel_frame(self.theme.surface_dark))
            .show(ctx, |ui| {
                chat::show_main_content(
                    ui,
                    &self.theme,
                    &title,
                    self.chat.as_mut(),
                    self.replies.as_ref(),
                );
            });
    }

    fn render_dialog(&mut self, ctx: &egui::Context) {
        let Some(dialog) = self.new_workspace.as_mut() else {
            return;
        };
        let response = dialog.show(ctx, &self.theme);
        self.handle_dialog_response(response);
    }

    fn render_alert(&mut self, ctx: &egui::Context) {
        let Some(message) = self.alert.as_deref() else {
            return;
        };
        if new_workspace::show_alert(ctx, &self.theme, message) {
            self.alert = None;
        }
    }
}

impl eframe::App for MediChatApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_events();
        self.render_sidebar(ctx);
        self.render_main(ctx);
        self.render_dialog(ctx);
        self.render_alert(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::SectionTarget;
    use crate::session::files::PickedFile;
    use crate::session::state::RightPane;
    use crate::session::{FileId, SessionId};
    use crate::ui::upload_section;
    use tokio::time::{self, Duration};

    fn app_with_tick(upload_tick_ms: u64) -> MediChatApp {
        let config = AppConfig {
            upload_tick_ms,
            ..AppConfig::default()
        };
        MediChatApp::new(egui::Context::default(), Handle::current(), &config)
    }

    fn app() -> MediChatApp {
        app_with_tick(1)
    }

    /// Ids of the files that reported progress since the last drain.
    fn reported(app: &MediChatApp) -> Vec<FileId> {
        app.rx
            .try_iter()
            .filter_map(|event| match event {
                AppEvent::UploadProgress { file_id, .. } => Some(file_id),
                AppEvent::FilesPicked { .. } => None,
            })
            .collect()
    }

    fn open_with_files(app: &mut MediChatApp, target: SectionTarget, names: &[&str]) {
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        app.apply_event(AppEvent::FilesPicked {
            dialog: app.dialogs_opened,
            target,
            files: names.iter().map(|name| picked(name)).collect(),
        });
    }

    fn section_request(app: &mut MediChatApp, target: SectionTarget, request: SectionRequest) {
        app.handle_dialog_response(DialogResponse {
            outcome: DialogOutcome::Open,
            requests: vec![(target, request)],
        });
    }

    fn picked(name: &str) -> PickedFile {
        PickedFile {
            name: name.to_string(),
            size: Some(2048),
        }
    }

    fn submit(app: &mut MediChatApp) {
        let outcome = {
            let dialog = app.new_workspace.as_mut().expect("dialog should be open");
            DialogOutcome::Submitted(dialog.submit())
        };
        app.handle_dialog_response(DialogResponse {
            outcome,
            requests: Vec::new(),
        });
    }

    #[tokio::test]
    async fn empty_name_raises_alert_and_keeps_dialog_open() {
        let mut app = app();
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        submit(&mut app);

        assert_eq!(
            app.alert.as_deref(),
            Some("Please enter a name for the workspace.")
        );
        assert!(app.new_workspace.is_some());
        assert_eq!(app.state.sessions().len(), 1);
    }

    #[tokio::test]
    async fn created_workspace_keeps_receiving_upload_progress() {
        let mut app = app();
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        app.apply_event(AppEvent::FilesPicked {
            dialog: 1,
            target: SectionTarget::Medical,
            files: vec![picked("mri.pdf"), picked("ct.pdf")],
        });
        assert_eq!(app.timers.active(), 2);

        if let Some(dialog) = app.new_workspace.as_mut() {
            dialog.name = "Alice".to_string();
        }
        submit(&mut app);
        assert!(app.new_workspace.is_none());
        assert!(app.alert.is_none());

        let session = app
            .state
            .sessions()
            .last()
            .cloned()
            .expect("new session should be listed");
        assert_eq!(session.title, "Alice");
        assert_eq!(app.state.active_session(), Some(&session.id));

        for _ in 0..500 {
            time::sleep(Duration::from_millis(2)).await;
            app.drain_events();
            if app.timers.active() == 0 {
                break;
            }
        }

        let details = app
            .state
            .workspace(&session.id)
            .expect("details should exist");
        assert_eq!(details.medical_files.len(), 2);
        assert!(details.medical_files.iter().all(|file| file.progress == 100));
    }

    #[tokio::test]
    async fn cancelling_dialog_stops_its_uploads() {
        let mut app = app();
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        app.apply_event(AppEvent::FilesPicked {
            dialog: 1,
            target: SectionTarget::Patient,
            files: vec![picked("notes.pdf")],
        });
        assert_eq!(app.timers.active(), 1);

        app.handle_dialog_response(DialogResponse {
            outcome: DialogOutcome::Cancelled,
            requests: Vec::new(),
        });
        assert!(app.new_workspace.is_none());
        assert_eq!(app.timers.active(), 0);
        assert_eq!(app.state.sessions().len(), 1);
    }

    #[tokio::test]
    async fn picker_result_after_close_is_dropped() {
        let mut app = app();
        app.apply_event(AppEvent::FilesPicked {
            dialog: 1,
            target: SectionTarget::Medical,
            files: vec![picked("late.pdf")],
        });
        assert_eq!(app.timers.active(), 0);
    }

    #[tokio::test]
    async fn switching_sessions_mounts_fresh_transcript() {
        let mut app = app();
        app.sync_chat_mount();
        if let Some(chat) = app.chat.as_mut() {
            chat.input = "hello".to_string();
            chat.send(&CannedReply::default());
        }
        assert_eq!(app.chat.as_ref().map(|chat| chat.messages().len()), Some(3));

        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        if let Some(dialog) = app.new_workspace.as_mut() {
            dialog.name = "Bob".to_string();
        }
        submit(&mut app);
        app.sync_chat_mount();
        assert_eq!(app.chat.as_ref().map(|chat| chat.messages().len()), Some(1));

        app.dispatch(Action::SelectSession(SessionId::default_session()));
        app.sync_chat_mount();
        assert_eq!(app.chat.as_ref().map(|chat| chat.messages().len()), Some(1));
    }

    #[tokio::test]
    async fn deleting_active_session_unmounts_chat() {
        let mut app = app();
        app.sync_chat_mount();
        app.handle_sidebar_request(SidebarRequest::Dispatch(Action::DeleteSession(
            SessionId::default_session(),
        )));
        app.sync_chat_mount();
        assert!(app.chat.is_none());
        assert_eq!(app.state.right_pane(), RightPane::Chat);
    }

    #[tokio::test]
    async fn removing_a_dialog_file_stops_only_its_upload() {
        let mut app = app_with_tick(5);
        open_with_files(&mut app, SectionTarget::Medical, &["mri.pdf", "ct.pdf"]);
        time::sleep(Duration::from_millis(12)).await;
        app.drain_events();

        let (removed, request) = {
            let dialog = app.new_workspace.as_mut().expect("dialog should be open");
            let removed = dialog.medical.files[0].id;
            (removed, upload_section::remove_file(&mut dialog.medical, removed))
        };
        section_request(&mut app, SectionTarget::Medical, request);
        assert_eq!(app.timers.active(), 1);

        time::sleep(Duration::from_millis(20)).await;
        assert!(!reported(&app).contains(&removed));
    }

    #[tokio::test]
    async fn resetting_a_section_stops_its_uploads() {
        let mut app = app_with_tick(5);
        open_with_files(&mut app, SectionTarget::Patient, &["notes.pdf", "labs.pdf"]);
        time::sleep(Duration::from_millis(12)).await;
        app.drain_events();

        let request = {
            let dialog = app.new_workspace.as_mut().expect("dialog should be open");
            upload_section::reset_section(&mut dialog.patient)
        };
        section_request(&mut app, SectionTarget::Patient, request);
        assert_eq!(app.timers.active(), 0);

        time::sleep(Duration::from_millis(20)).await;
        assert!(reported(&app).is_empty());
    }

    #[tokio::test]
    async fn deleting_a_session_stops_its_uploads() {
        let mut app = app_with_tick(5);
        open_with_files(&mut app, SectionTarget::Medical, &["mri.pdf", "ct.pdf"]);
        if let Some(dialog) = app.new_workspace.as_mut() {
            dialog.name = "Carol".to_string();
        }
        submit(&mut app);
        let session_id = app
            .state
            .active_session()
            .cloned()
            .expect("new workspace should be active");
        time::sleep(Duration::from_millis(12)).await;
        app.drain_events();

        app.dispatch(Action::DeleteSession(session_id.clone()));
        assert_eq!(app.timers.active(), 0);
        assert!(app.state.workspace(&session_id).is_none());

        time::sleep(Duration::from_millis(20)).await;
        assert!(reported(&app).is_empty());
    }

    #[tokio::test]
    async fn picker_result_from_an_earlier_dialog_is_dropped() {
        let mut app = app();
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        let first = app.dialogs_opened;
        app.handle_dialog_response(DialogResponse {
            outcome: DialogOutcome::Cancelled,
            requests: Vec::new(),
        });
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);

        app.apply_event(AppEvent::FilesPicked {
            dialog: first,
            target: SectionTarget::Medical,
            files: vec![picked("stale.pdf")],
        });
        assert_eq!(app.timers.active(), 0);
        assert!(app
            .new_workspace
            .as_ref()
            .is_some_and(|dialog| dialog.file_ids().is_empty()));

        app.apply_event(AppEvent::FilesPicked {
            dialog: app.dialogs_opened,
            target: SectionTarget::Medical,
            files: vec![picked("fresh.pdf")],
        });
        assert_eq!(app.timers.active(), 1);
    }

    #[tokio::test]
    async fn dismissed_picker_frees_the_slot() {
        let mut app = app();
        app.handle_sidebar_request(SidebarRequest::OpenNewWorkspace);
        let generation = app.dialogs_opened;
        if let Some(dialog) = app.new_workspace.as_mut() {
            assert!(dialog.begin_pick());
        }

        app.apply_event(AppEvent::FilesPicked {
            dialog: generation,
            target: SectionTarget::Patient,
            files: Vec::new(),
        });
        let dialog = app.new_workspace.as_mut().expect("dialog should be open");
        assert!(dialog.file_ids().is_empty());
        assert!(dialog.begin_pick());
    }
}
