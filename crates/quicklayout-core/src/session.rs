//! Playground session: the state behind one open page.
//!
//! Holds the editor content, the preview, the active view tab, and the
//! save picker selection, and turns each user action into a [`Notice`].
//! Confirmation prompts are passed in as closures so the session never
//! blocks on UI.

use crate::capture::{CaptureError, CaptureFragment, CaptureHost, CaptureOptions, ScreenshotJob, screenshot_filename};
use crate::clock::SharedClock;
use crate::config::PlaygroundConfig;
use crate::content::EditorContent;
use crate::draft::DraftStore;
use crate::notice::Notice;
use crate::preview::{PreviewController, PreviewSurface};
use crate::saves::{SaveEntry, SaveRepository};
use crate::storage::KeyValueStore;
use crate::view::ViewMode;
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

pub struct PlaygroundSession<S: KeyValueStore + ?Sized, R: PreviewSurface> {
    config: PlaygroundConfig,
    clock: SharedClock,
    content: EditorContent,
    preview: PreviewController<R>,
    view_mode: ViewMode,
    drafts: DraftStore<S>,
    saves: SaveRepository<S>,
    /// Text of the save-name input.
    save_name: String,
    /// Id picked in the save list.
    selected: Option<String>,
}

impl<S: KeyValueStore + ?Sized, R: PreviewSurface> PlaygroundSession<S, R> {
    /// Open a session, restoring the draft (or the sample) into the editors.
    pub fn new(store: Arc<S>, surface: R, config: PlaygroundConfig, clock: SharedClock) -> Self {
        let drafts = DraftStore::new(store.clone(), &config, clock.clone());
        let saves = SaveRepository::new(store, &config, clock.clone());
        let content = drafts.load_or_default();

        Self {
            config,
            clock,
            content,
            preview: PreviewController::new(surface),
            view_mode: ViewMode::default(),
            drafts,
            saves,
            save_name: String::new(),
            selected: None,
        }
    }

    pub fn config(&self) -> &PlaygroundConfig {
        &self.config
    }

    pub fn content(&self) -> &EditorContent {
        &self.content
    }

    pub fn preview(&self) -> &PreviewController<R> {
        &self.preview
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn save_name(&self) -> &str {
        &self.save_name
    }

    pub fn set_save_name(&mut self, name: impl Into<String>) {
        self.save_name = name.into();
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Record an editor change and queue a draft write.
    /// Returns when the draft write falls due.
    pub fn edit(&mut self, content: EditorContent, now: Instant) -> Instant {
        self.content = content;
        self.drafts.schedule(self.content.clone(), now)
    }

    /// Deadline of the queued draft write, if any.
    pub fn draft_due_at(&self) -> Option<Instant> {
        self.drafts.due_at()
    }

    /// How long a host timer should wait before [`Self::poll_draft`].
    pub fn draft_delay(&self, now: Instant) -> Option<Duration> {
        self.drafts.delay_until_due(now)
    }

    /// Write the draft if its quiet window has passed. Failures are logged;
    /// the draft is best-effort.
    pub fn poll_draft(&mut self, now: Instant) -> bool {
        self.drafts.poll(now).unwrap_or_else(|e| {
            log::warn!("Failed to save draft: {}", e);
            false
        })
    }

    /// Write any queued draft now, e.g. before the page unloads.
    pub fn flush_draft(&mut self) -> bool {
        self.drafts.flush().unwrap_or_else(|e| {
            log::warn!("Failed to save draft: {}", e);
            false
        })
    }

    /// Render the editors into the preview.
    pub fn apply(&mut self) -> Notice {
        self.preview.apply(&self.content);
        Notice::PreviewApplied
    }

    /// Saved entries for the picker, most recent first.
    pub fn saves(&self) -> Vec<SaveEntry> {
        self.saves.list()
    }

    /// Save the editors under the current save name.
    pub fn save_as<F>(&mut self, confirm_overwrite: F) -> Notice
    where
        F: FnOnce(&SaveEntry) -> bool,
    {
        match self.saves.save(&self.save_name, &self.content, confirm_overwrite) {
            Ok(outcome) => {
                // The picker is rebuilt, which drops the selection.
                self.selected = None;
                Notice::from(&outcome)
            }
            Err(e) => {
                log::debug!("Save rejected: {}", e);
                Notice::from(&e)
            }
        }
    }

    /// The entry [`Self::save_as`] would ask to overwrite, so the question
    /// can be put before the session is borrowed for the save.
    pub fn overwrite_candidate(&self) -> Option<SaveEntry> {
        self.saves.overwrite_candidate(&self.save_name, &self.content)
    }

    /// Pick an entry in the save list. Picking a known entry copies its
    /// name into the save-name input.
    pub fn select_save(&mut self, id: Option<&str>) {
        self.selected = id.filter(|id| !id.is_empty()).map(str::to_string);

        if let Some(id) = &self.selected {
            if let Ok(entry) = self.saves.get(id) {
                self.save_name = entry.name;
            }
        }
    }

    /// Replace the editors with the selected entry and queue a draft write.
    pub fn load_selected(&mut self, now: Instant) -> Notice {
        let Some(id) = self.selected.clone() else {
            return Notice::NothingSelected;
        };

        match self.saves.load(&id) {
            Ok(content) => {
                self.edit(content, now);
                Notice::Loaded
            }
            Err(e) => {
                log::debug!("Load failed: {}", e);
                Notice::from(&e)
            }
        }
    }

    /// Delete the selected entry once `confirm` agrees.
    pub fn delete_selected<F>(&mut self, confirm: F) -> Notice
    where
        F: FnOnce() -> bool,
    {
        let Some(id) = self.selected.clone() else {
            return Notice::NothingSelected;
        };

        match self.saves.delete(&id, confirm) {
            Ok(_) => {
                self.selected = None;
                Notice::Deleted
            }
            Err(e) => {
                log::debug!("Delete failed: {}", e);
                Notice::from(&e)
            }
        }
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) -> Notice {
        self.view_mode = mode;
        Notice::ViewChanged
    }

    /// Prepare a screenshot of the current editor content.
    ///
    /// Fails with `NotApplied` until the preview has been applied once.
    pub fn screenshot_job(&self) -> Result<ScreenshotJob, CaptureError> {
        if !self.preview.has_latest() {
            return Err(CaptureError::NotApplied);
        }

        let width = self.view_mode.capture_width(self.config.mobile_capture_width);
        Ok(ScreenshotJob {
            fragment: CaptureFragment::new(&self.content, width),
            options: CaptureOptions::from_config(&self.config),
            filename: screenshot_filename(self.view_mode, &self.clock.now()),
        })
    }

    /// Prepare and run a screenshot against `host`.
    pub async fn take_screenshot<H: CaptureHost + ?Sized>(&self, host: &H) -> Notice {
        let job = match self.screenshot_job() {
            Ok(job) => job,
            Err(e) => return Notice::from(&e),
        };
        screenshot_notice(job.run(host).await)
    }
}

/// Toast for a finished screenshot export.
pub fn screenshot_notice(result: Result<(), CaptureError>) -> Notice {
    match result {
        Ok(()) => Notice::ScreenshotSaved,
        Err(e) => {
            log::warn!("Screenshot failed: {}", e);
            Notice::from(&e)
        }
    }
}
