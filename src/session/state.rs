use crate::error::AppError;
use crate::session::files;
use crate::session::{
    ChatSession, FileData, FileId, LlmPreference, SessionId, WorkspaceDetails,
    DEFAULT_SESSION_TITLE,
};
use std::collections::BTreeMap;
use tracing::{debug, info};

const FALLBACK_TITLE: &str = "Chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RightPane {
    #[default]
    Chat,
    Settings,
}

/// What the new-workspace dialog hands over once its name is validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceDraft {
    pub name: String,
    pub medical_files: Vec<FileData>,
    pub patient_files: Vec<FileData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SelectSession(SessionId),
    DeleteSession(SessionId),
    OpenSettings(SessionId),
    CloseSettings,
    OpenDashboard,
    CreateWorkspace {
        draft: WorkspaceDraft,
        created_at_ms: i64,
    },
    SetPreference(LlmPreference),
    UploadProgress {
        file_id: FileId,
        progress: u8,
    },
}

impl Action {
    fn name(&self) -> &'static str {
        match self {
            Self::SelectSession(_) => "select_session",
            Self::DeleteSession(_) => "delete_session",
            Self::OpenSettings(_) => "open_settings",
            Self::CloseSettings => "close_settings",
            Self::OpenDashboard => "open_dashboard",
            Self::CreateWorkspace { .. } => "create_workspace",
            Self::SetPreference(_) => "set_preference",
            Self::UploadProgress { .. } => "upload_progress",
        }
    }
}

/// Follow-up work the caller owes after a transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Effect {
    #[default]
    None,
    SessionCreated(SessionId),
    CancelUploads(Vec<FileId>),
}

/// Sessions, their workspace details and the pane selection.
///
/// Every session id has exactly one details entry and vice versa; all
/// mutation goes through [`AppState::apply`].
#[derive(Debug, Clone)]
pub struct AppState {
    sessions: Vec<ChatSession>,
    active_session: Option<SessionId>,
    workspaces: BTreeMap<SessionId, WorkspaceDetails>,
    right_pane: RightPane,
}

impl Default for AppState {
    fn default() -> Self {
        let default_id = SessionId::default_session();
        Self {
            sessions: vec![ChatSession {
                id: default_id.clone(),
                title: DEFAULT_SESSION_TITLE.to_string(),
            }],
            active_session: Some(default_id.clone()),
            workspaces: BTreeMap::from([(default_id, WorkspaceDetails::default())]),
            right_pane: RightPane::Chat,
        }
    }
}

impl AppState {
    pub fn sessions(&self) -> &[ChatSession] {
        &self.sessions
    }

    pub fn active_session(&self) -> Option<&SessionId> {
        self.active_session.as_ref()
    }

    pub fn is_active(&self, id: &SessionId) -> bool {
        self.active_session.as_ref() == Some(id)
    }

    #[cfg(test)]
    pub fn right_pane(&self) -> RightPane {
        self.right_pane
    }

    pub fn workspace(&self, id: &SessionId) -> Option<&WorkspaceDetails> {
        self.workspaces.get(id)
    }

    /// Title for the chat header; falls back when the active id has no session.
    pub fn active_title(&self) -> &str {
        self.active_session
            .as_ref()
            .and_then(|active| self.sessions.iter().find(|session| &session.id == active))
            .map(|session| session.title.as_str())
            .unwrap_or(FALLBACK_TITLE)
    }

    /// The session whose settings should be on screen, if any.
    pub fn settings_target(&self) -> Option<&SessionId> {
        match self.right_pane {
            RightPane::Settings => self.active_session.as_ref(),
            RightPane::Chat => None,
        }
    }

    pub fn apply(&mut self, action: Action) -> Result<Effect, AppError> {
        debug!(action = action.name(), "applying action");
        match action {
            Action::SelectSession(id) => {
                self.ensure_session(&id)?;
                self.active_session = Some(id);
                self.right_pane = RightPane::Chat;
                Ok(Effect::None)
            }
            Action::DeleteSession(id) => Ok(self.delete_session(&id)),
            Action::OpenSettings(id) => {
                self.ensure_session(&id)?;
                self.active_session = Some(id);
                self.right_pane = RightPane::Settings;
                Ok(Effect::None)
            }
            Action::CloseSettings => {
                self.right_pane = RightPane::Chat;
                Ok(Effect::None)
            }
            Action::OpenDashboard => {
                self.active_session = Some(SessionId::default_session());
                Ok(Effect::None)
            }
            Action::CreateWorkspace {
                draft,
                created_at_ms,
            } => self.create_workspace(draft, created_at_ms),
            Action::SetPreference(preference) => self.set_preference(preference),
            Action::UploadProgress { file_id, progress } => {
                let updated = self.workspaces.values_mut().any(|details| {
                    files::set_progress(&mut details.medical_files, file_id, progress)
                        || files::set_progress(&mut details.patient_files, file_id, progress)
                });
                if updated {
                    Ok(Effect::None)
                } else {
                    Ok(Effect::CancelUploads(vec![file_id]))
                }
            }
        }
    }

    fn ensure_session(&self, id: &SessionId) -> Result<(), AppError> {
        if self.sessions.iter().any(|session| &session.id == id) {
            Ok(())
        } else {
            Err(AppError::UnknownSession(id.to_string()))
        }
    }

    fn create_workspace(
        &mut self,
        draft: WorkspaceDraft,
        created_at_ms: i64,
    ) -> Result<Effect, AppError> {
        if draft.name.is_empty() {
            return Err(AppError::EmptyWorkspaceName);
        }

        let id = self.next_session_id(created_at_ms);
        info!(
            session_id = %id,
            title = %draft.name,
            medical_files = draft.medical_files.len(),
            patient_files = draft.patient_files.len(),
            "workspace created"
        );

        self.sessions.push(ChatSession {
            id: id.clone(),
            title: draft.name,
        });
        self.workspaces.insert(
            id.clone(),
            WorkspaceDetails {
                llm_preference: LlmPreference::Offline,
                medical_files: draft.medical_files,
                patient_files: draft.patient_files,
            },
        );
        self.active_session = Some(id.clone());
        Ok(Effect::SessionCreated(id))
    }

    fn delete_session(&mut self, id: &SessionId) -> Effect {
        let before = self.sessions.len();
        self.sessions.retain(|session| &session.id != id);
        if self.sessions.len() == before {
            return Effect::None;
        }

        if self.is_active(id) {
            self.active_session = None;
        }

        let removed = self.workspaces.remove(id).unwrap_or_default();
        info!(session_id = %id, "session deleted");
        let file_ids = removed.file_ids();
        if file_ids.is_empty() {
            Effect::None
        } else {
            Effect::CancelUploads(file_ids)
        }
    }

    fn set_preference(&mut self, preference: LlmPreference) -> Result<Effect, AppError> {
        let Some(active) = self.active_session.as_ref() else {
            return Ok(Effect::None);
        };
        let details = self
            .workspaces
            .get_mut(active)
            .ok_or_else(|| AppError::UnknownSession(active.to_string()))?;
        details.llm_preference = preference;
        info!(session_id = %active, preference = preference.label(), "llm preference changed");
        Ok(Effect::None)
    }

    fn next_session_id(&self, created_at_ms: i64) -> SessionId {
        let mut stamp = created_at_ms;
        loop {
            let candidate = SessionId::new(stamp.to_string());
            let taken = self.workspaces.contains_key(&candidate)
                || self.sessions.iter().any(|session| session.id == candidate);
            if !taken {
                return candidate;
            }
            stamp += 1;
        }
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use crate::session::files::{PickedFile, UploadSectionState};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone)]
    enum Op {
        Create { name: String, files: usize, created_at_ms: i64 },
        Delete(usize),
        DeleteUnknown,
        Select(usize),
        OpenSettings(usize),
        UploadProgress { file: usize, progress: u8 },
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            ("[A-Za-z ]{0,8}", 0usize..3, 0i64..4).prop_map(|(name, files, created_at_ms)| {
                Op::Create { name, files, created_at_ms }
            }),
            (0usize..8).prop_map(Op::Delete),
            Just(Op::DeleteUnknown),
            (0usize..8).prop_map(Op::Select),
            (0usize..8).prop_map(Op::OpenSettings),
            (0usize..8, any::<u8>()).prop_map(|(file, progress)| Op::UploadProgress { file, progress }),
        ]
    }

    fn session_at(state: &AppState, index: usize) -> Option<SessionId> {
        let sessions = state.sessions();
        sessions.get(index % sessions.len().max(1)).map(|session| session.id.clone())
    }

    fn all_file_ids(state: &AppState) -> Vec<FileId> {
        state.workspaces.values().flat_map(WorkspaceDetails::file_ids).collect()
    }

    fn action_for(state: &AppState, op: &Op) -> Option<Action> {
        match op {
            Op::Create { name, files, created_at_ms } => {
                let mut section = UploadSectionState::default();
                section.add_files(
                    (0..*files)
                        .map(|index| PickedFile { name: format!("doc-{index}.pdf"), size: None })
                        .collect(),
                );
                Some(Action::CreateWorkspace {
                    draft: WorkspaceDraft {
                        name: name.clone(),
                        medical_files: section.files,
                        patient_files: Vec::new(),
                    },
                    created_at_ms: *created_at_ms,
                })
            }
            Op::Delete(index) => session_at(state, *index).map(Action::DeleteSession),
            Op::DeleteUnknown => Some(Action::DeleteSession(SessionId::new("missing"))),
            Op::Select(index) => session_at(state, *index).map(Action::SelectSession),
            Op::OpenSettings(index) => session_at(state, *index).map(Action::OpenSettings),
            Op::UploadProgress { file, progress } => {
                let ids = all_file_ids(state);
                ids.get(file % ids.len().max(1)).map(|file_id| Action::UploadProgress {
                    file_id: *file_id,
                    progress: *progress,
                })
            }
        }
    }

    proptest! {
        /// Sessions and workspace details keep exactly the same keys.
        #[test]
        fn prop_sessions_and_workspaces_share_keys(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut state = AppState::default();
            for op in &ops {
                let Some(action) = action_for(&state, op) else {
                    continue;
                };
                let _ = state.apply(action);

                let session_ids: BTreeSet<_> =
                    state.sessions().iter().map(|session| session.id.clone()).collect();
                let detail_ids: BTreeSet<_> = state.workspaces.keys().cloned().collect();
                prop_assert_eq!(&session_ids, &detail_ids);
                prop_assert_eq!(session_ids.len(), state.sessions().len());
                if let Some(active) = state.active_session() {
                    prop_assert!(session_ids.contains(active));
                }
            }
        }

        /// Only an empty name is refused, and a refused create changes nothing.
        #[test]
        fn prop_create_rejects_only_empty_names(name in "[A-Za-z ]{0,6}", created_at_ms in 0i64..1000) {
            let mut state = AppState::default();
            let before = state.sessions().len();
            let result = state.apply(Action::CreateWorkspace {
                draft: WorkspaceDraft {
                    name: name.clone(),
                    medical_files: Vec::new(),
                    patient_files: Vec::new(),
                },
                created_at_ms,
            });

            if name.is_empty() {
                prop_assert!(matches!(result, Err(AppError::EmptyWorkspaceName)));
                prop_assert_eq!(state.sessions().len(), before);
            } else {
                prop_assert!(matches!(result, Ok(Effect::SessionCreated(_))));
                prop_assert_eq!(state.sessions().len(), before + 1);
                prop_assert_eq!(state.active_title(), name.as_str());
            }
        }
    }
}
