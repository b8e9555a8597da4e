use crate::event::{AppEvent, SectionTarget};
use crate::session::files::PickedFile;
use crate::session::FileId;
use eframe::egui;
use std::collections::HashMap;
use std::sync::mpsc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::{debug, warn};

/// One progress task per uploading file, aborted when the file goes away.
pub struct UploadTimers {
    runtime: Handle,
    tx: mpsc::Sender<AppEvent>,
    repaint: egui::Context,
    step: u8,
    tick: Duration,
    tasks: HashMap<FileId, JoinHandle<()>>,
}

impl UploadTimers {
    pub fn new(
        runtime: Handle,
        tx: mpsc::Sender<AppEvent>,
        repaint: egui::Context,
        step: u8,
        tick: Duration,
    ) -> Self {
        Self {
            runtime,
            tx,
            repaint,
            step: step.max(1),
            tick,
            tasks: HashMap::new(),
        }
    }

    pub fn start(&mut self, file_id: FileId) {
        if self.tasks.contains_key(&file_id) {
            return;
        }

        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let step = self.step;
        let tick = self.tick;
        let handle = self.runtime.spawn(async move {
            let mut ticker = time::interval(tick);
            ticker.tick().await;
            let mut progress: u8 = 0;
            while progress < 100 {
                ticker.tick().await;
                progress = progress.saturating_add(step).min(100);
                if tx
                    .send(AppEvent::UploadProgress { file_id, progress })
                    .is_err()
                {
                    break;
                }
                repaint.request_repaint();
            }
        });
        debug!(%file_id, "upload simulation started");
        self.tasks.insert(file_id, handle);
    }

    pub fn cancel<I>(&mut self, file_ids: I)
    where
        I: IntoIterator<Item = FileId>,
    {
        for file_id in file_ids {
            if let Some(handle) = self.tasks.remove(&file_id) {
                handle.abort();
                debug!(%file_id, "upload simulation cancelled");
            }
        }
    }

    /// Drops bookkeeping for a task that ran to completion.
    pub fn finish(&mut self, file_id: FileId) {
        self.tasks.remove(&file_id);
    }

    #[cfg(test)]
    pub fn active(&self) -> usize {
        self.tasks.len()
    }

    /// Opens the native PDF picker for one section of dialog `dialog`. The
    /// result always comes back as `FilesPicked`, empty if dismissed.
    pub fn spawn_picker(&self, dialog: u64, target: SectionTarget) {
        let tx = self.tx.clone();
        let repaint = self.repaint.clone();
        let title = match target {
            SectionTarget::Medical => "Upload Medical Documents",
            SectionTarget::Patient => "Upload Patient Documents",
        };
        self.runtime.spawn(async move {
            let files: Vec<PickedFile> = rfd::AsyncFileDialog::new()
                .set_title(title)
                .add_filter("PDF", &["pdf"])
                .pick_files()
                .await
                .unwrap_or_default()
                .iter()
                .map(|handle| PickedFile::from_path(handle.path()))
                .collect();
            debug!(dialog, count = files.len(), "file picker closed");
            let event = AppEvent::FilesPicked {
                dialog,
                target,
                files,
            };
            if tx.send(event).is_err() {
                warn!("event channel closed before picked files were delivered");
                return;
            }
            repaint.request_repaint();
        });
    }
}

impl Drop for UploadTimers {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}
