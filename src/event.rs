use crate::session::files::PickedFile;
use crate::session::FileId;

/// Which upload section of the new-workspace dialog a picker result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTarget {
    Medical,
    Patient,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    UploadProgress { file_id: FileId, progress: u8 },
    /// Picker result for the dialog that opened it; `files` is empty when the
    /// picker was dismissed.
    FilesPicked {
        dialog: u64,
        target: SectionTarget,
        files: Vec<PickedFile>,
    },
}
