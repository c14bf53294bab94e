//! Debounced draft autosave.
//!
//! Every edit restarts a quiet window; only when the window elapses without
//! another edit is the latest content written to the single draft slot.
//! The store does not own a timer. The host arms one for [`DraftStore::due_at`]
//! and calls [`DraftStore::poll`] when it fires, so cancellation is simply
//! replacing the pending content and deadline.

use crate::clock::SharedClock;
use crate::config::PlaygroundConfig;
use crate::content::EditorContent;
use crate::storage::{KeyValueStore, StorageResult, read_json_slot, write_json_slot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::{Duration, Instant};

#[cfg(target_arch = "wasm32")]
use web_time::{Duration, Instant};

/// The persisted draft record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    #[serde(flatten)]
    pub content: EditorContent,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: i64,
}

#[derive(Debug, Clone)]
struct PendingDraft {
    content: EditorContent,
    due: Instant,
}

/// Owns the draft slot. No other component writes it.
pub struct DraftStore<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
    key: String,
    debounce: Duration,
    clock: SharedClock,
    pending: Option<PendingDraft>,
}

impl<S: KeyValueStore + ?Sized> DraftStore<S> {
    pub fn new(store: Arc<S>, config: &PlaygroundConfig, clock: SharedClock) -> Self {
        Self {
            store,
            key: config.draft_key.clone(),
            debounce: config.draft_debounce(),
            clock,
            pending: None,
        }
    }

    /// Queue `content` for writing once the quiet window passes.
    ///
    /// Any previously queued content is dropped and the window restarts
    /// from `now`. Returns the new deadline.
    pub fn schedule(&mut self, content: EditorContent, now: Instant) -> Instant {
        let due = now + self.debounce;
        if self.pending.is_some() {
            log::trace!("Draft write rescheduled");
        }
        self.pending = Some(PendingDraft { content, due });
        due
    }

    /// Deadline of the queued write, if any.
    pub fn due_at(&self) -> Option<Instant> {
        self.pending.as_ref().map(|p| p.due)
    }

    /// Time left until the queued write falls due, rounded up to a whole
    /// millisecond. A millisecond host timer armed with it fires at or after
    /// the deadline, never just short of it.
    pub fn delay_until_due(&self, now: Instant) -> Option<Duration> {
        let remaining = self.due_at()?.saturating_duration_since(now);
        let millis = remaining.as_nanos().div_ceil(1_000_000);
        Some(Duration::from_millis(u64::try_from(millis).unwrap_or(u64::MAX)))
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Write the queued draft if its deadline has passed.
    /// Returns true if a write was performed.
    pub fn poll(&mut self, now: Instant) -> StorageResult<bool> {
        match &self.pending {
            Some(pending) if now >= pending.due => self.flush(),
            _ => Ok(false),
        }
    }

    /// Write the queued draft immediately, ignoring the deadline.
    /// Returns true if a write was performed.
    pub fn flush(&mut self) -> StorageResult<bool> {
        let Some(pending) = self.pending.take() else {
            return Ok(false);
        };

        let draft = Draft {
            content: pending.content,
            updated_at: self.clock.now_millis(),
        };
        write_json_slot(self.store.as_ref(), &self.key, &draft)?;
        log::debug!("Draft saved ({} bytes)", draft.content.byte_size());
        Ok(true)
    }

    /// Drop the queued write without persisting it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Read the persisted draft. Corrupt records are cleared and read as absent.
    pub fn load(&self) -> StorageResult<Option<Draft>> {
        read_json_slot(self.store.as_ref(), &self.key)
    }

    /// Startup content: the persisted draft, or the built-in sample.
    pub fn load_or_default(&self) -> EditorContent {
        match self.load() {
            Ok(Some(draft)) => {
                log::info!("Restored draft from {}", draft.updated_at);
                draft.content
            }
            Ok(None) => EditorContent::sample(),
            Err(e) => {
                log::warn!("Failed to read draft: {}", e);
                EditorContent::sample()
            }
        }
    }
}
