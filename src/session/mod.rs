use std::fmt;
use uuid::Uuid;

pub mod chat;
pub mod files;
pub mod state;

pub const DEFAULT_SESSION_ID: &str = "default";
pub const DEFAULT_SESSION_TITLE: &str = "Default Chat";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(Uuid);

impl FileId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FileId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn default_session() -> Self {
        Self::new(DEFAULT_SESSION_ID)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    File,
    Url,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileData {
    pub id: FileId,
    pub name: String,
    pub progress: u8,
    pub size: Option<u64>,
    pub kind: FileKind,
}

impl FileData {
    pub fn is_complete(&self) -> bool {
        self.progress >= 100
    }

    /// Size in megabytes with two decimals, the way the file rows display it.
    pub fn size_label(&self) -> Option<String> {
        self.size
            .filter(|size| *size > 0)
            .map(|size| format!("{:.2} MB", size as f64 / 1024.0 / 1024.0))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    pub id: SessionId,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LlmPreference {
    #[default]
    Offline,
    Online,
}

impl LlmPreference {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Offline => "Offline",
            Self::Online => "Online",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkspaceDetails {
    pub llm_preference: LlmPreference,
    pub medical_files: Vec<FileData>,
    pub patient_files: Vec<FileData>,
}

impl WorkspaceDetails {
    pub fn file_ids(&self) -> Vec<FileId> {
        self.medical_files
            .iter()
            .chain(self.patient_files.iter())
            .map(|file| file.id)
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
        }
    }
}
