use crate::session::{FileData, FileId, FileKind};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMethod {
    #[default]
    Upload,
    Url,
}

/// A file handed over by the picker or a drop, before it gets an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub size: Option<u64>,
}

impl PickedFile {
    pub fn from_path(path: &Path) -> Self {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());
        let size = std::fs::metadata(path).ok().map(|meta| meta.len());
        Self { name, size }
    }
}

/// Raises progress for `id`, never lowering it and never going past 100.
pub fn set_progress(files: &mut [FileData], id: FileId, progress: u8) -> bool {
    let Some(file) = files.iter_mut().find(|file| file.id == id) else {
        return false;
    };
    file.progress = file.progress.max(progress.min(100));
    true
}

pub fn remove_file(files: &mut Vec<FileData>, id: FileId) -> bool {
    let before = files.len();
    files.retain(|file| file.id != id);
    files.len() != before
}

#[derive(Debug, Clone, Default)]
pub struct UploadSectionState {
    pub files: Vec<FileData>,
    pub input_method: InputMethod,
    pub url: String,
    pub drag_active: bool,
}

impl UploadSectionState {
    /// Appends picked files at zero progress and returns their fresh ids.
    pub fn add_files(&mut self, picked: Vec<PickedFile>) -> Vec<FileId> {
        let mut added = Vec::with_capacity(picked.len());
        for file in picked {
            let id = FileId::new();
            self.files.push(FileData {
                id,
                name: file.name,
                progress: 0,
                size: file.size,
                kind: FileKind::File,
            });
            added.push(id);
        }
        added
    }

    pub fn add_url(&mut self) -> Option<FileId> {
        if self.url.is_empty() {
            return None;
        }

        let id = FileId::new();
        self.files.push(FileData {
            id,
            name: std::mem::take(&mut self.url),
            progress: 100,
            size: None,
            kind: FileKind::Url,
        });
        Some(id)
    }

    pub fn remove(&mut self, id: FileId) -> bool {
        remove_file(&mut self.files, id)
    }

    /// Clears the section and returns the ids that were dropped.
    pub fn reset(&mut self) -> Vec<FileId> {
        let removed = self.files.drain(..).map(|file| file.id).collect();
        self.input_method = InputMethod::Upload;
        self.url.clear();
        self.drag_active = false;
        removed
    }

    pub fn set_progress(&mut self, id: FileId, progress: u8) -> bool {
        set_progress(&mut self.files, id, progress)
    }

    pub fn file_ids(&self) -> Vec<FileId> {
        self.files.iter().map(|file| file.id).collect()
    }
}


#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    #[derive(Debug, Clone)]
    enum Op {
        AddFiles(usize),
        AddUrl(String),
        Remove(usize),
        RemoveAbsent,
        Reset,
    }

    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0usize..4).prop_map(Op::AddFiles),
            "[a-z:/.]{0,12}".prop_map(Op::AddUrl),
            (0usize..16).prop_map(Op::Remove),
            Just(Op::RemoveAbsent),
            Just(Op::Reset),
        ]
    }

    fn arb_input_method() -> impl Strategy<Value = InputMethod> {
        prop_oneof![Just(InputMethod::Upload), Just(InputMethod::Url)]
    }

    fn apply(section: &mut UploadSectionState, op: &Op, expected: &mut usize) {
        match op {
            Op::AddFiles(count) => {
                let picked = (0..*count)
                    .map(|index| PickedFile {
                        name: format!("file-{index}.pdf"),
                        size: Some(index as u64),
                    })
                    .collect();
                *expected += section.add_files(picked).len();
            }
            Op::AddUrl(url) => {
                section.url = url.clone();
                if section.add_url().is_some() {
                    *expected += 1;
                }
            }
            Op::Remove(index) => {
                if let Some(file) = section.files.get(index % section.files.len().max(1)) {
                    let id = file.id;
                    assert!(section.remove(id));
                    *expected -= 1;
                }
            }
            Op::RemoveAbsent => {
                assert!(!section.remove(FileId::new()));
            }
            Op::Reset => {
                section.reset();
                *expected = 0;
            }
        }
    }

    proptest! {
        /// Ids stay pairwise unique and the length tracks adds minus removes.
        #[test]
        fn prop_ids_unique_and_length_consistent(ops in prop::collection::vec(arb_op(), 0..40)) {
            let mut section = UploadSectionState::default();
            let mut expected = 0usize;
            for op in &ops {
                apply(&mut section, op, &mut expected);

                let ids: BTreeSet<_> = section.files.iter().map(|file| file.id).collect();
                prop_assert_eq!(ids.len(), section.files.len());
                prop_assert_eq!(section.files.len(), expected);
                prop_assert!(section.files.iter().all(|file| file.progress <= 100));
            }
        }

        /// Reset always lands on the defaults, whatever came before.
        #[test]
        fn prop_reset_restores_defaults(
            ops in prop::collection::vec(arb_op(), 0..20),
            input_method in arb_input_method(),
            url in "[ -~]{0,16}",
            drag_active in any::<bool>(),
        ) {
            let mut section = UploadSectionState::default();
            let mut expected = 0usize;
            for op in &ops {
                apply(&mut section, op, &mut expected);
            }
            section.input_method = input_method;
            section.url = url;
            section.drag_active = drag_active;

            let removed = section.reset();
            prop_assert_eq!(removed.len(), expected);
            prop_assert!(section.files.is_empty());
            prop_assert_eq!(section.input_method, InputMethod::Upload);
            prop_assert_eq!(section.url.as_str(), "");
            prop_assert!(!section.drag_active);
        }

        /// Progress only moves up and never passes 100.
        #[test]
        fn prop_progress_monotonic(updates in prop::collection::vec(any::<u8>(), 1..30)) {
            let mut section = UploadSectionState::default();
            let id = section.add_files(vec![PickedFile { name: "a.pdf".to_string(), size: None }])[0];
            let mut previous = 0u8;
            for progress in updates {
                section.set_progress(id, progress);
                let current = section.files[0].progress;
                prop_assert!(current >= previous);
                prop_assert!(current <= 100);
                previous = current;
            }
        }
    }
}
