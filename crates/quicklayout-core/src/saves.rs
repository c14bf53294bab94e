//! Named saves: a bounded, most-recent-first collection persisted as a unit.
//!
//! Every mutation re-reads the collection, applies one change and rewrites
//! the whole collection in a single write.

use crate::clock::{SharedClock, date_label};
use crate::config::PlaygroundConfig;
use crate::content::EditorContent;
use crate::storage::{KeyValueStore, StorageError, read_json_slot, write_json_slot};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// One named snapshot of the editors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveEntry {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub content: EditorContent,
    /// Milliseconds since the Unix epoch.
    #[serde(default)]
    pub updated_at: i64,
    #[serde(default)]
    pub updated_at_label: String,
}

impl SaveEntry {
    /// Text shown in the save picker.
    pub fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.updated_at_label)
    }
}

/// Successful save results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new entry was prepended.
    Created(SaveEntry),
    /// An existing entry with the same name was replaced in place.
    Overwritten(SaveEntry),
}

impl SaveOutcome {
    pub fn entry(&self) -> &SaveEntry {
        match self {
            SaveOutcome::Created(entry) | SaveOutcome::Overwritten(entry) => entry,
        }
    }
}

/// Save repository errors.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Entry is {size} bytes, above the {limit} byte limit")]
    SizeExceeded { size: usize, limit: usize },
    #[error("Save collection is full ({limit} entries)")]
    CollectionFull { limit: usize },
    #[error("Save not found: {0}")]
    NotFound(String),
    #[error("Declined by user")]
    UserDeclined,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Trimmed `name`, or `label` when it is blank.
fn resolve_name(name: &str, label: &str) -> String {
    match name.trim() {
        "" => label.to_string(),
        trimmed => trimmed.to_string(),
    }
}

/// Owns the saves slot. No other component writes it.
pub struct SaveRepository<S: KeyValueStore + ?Sized> {
    store: Arc<S>,
    key: String,
    max_saves: usize,
    max_entry_bytes: usize,
    clock: SharedClock,
}

impl<S: KeyValueStore + ?Sized> SaveRepository<S> {
    pub fn new(store: Arc<S>, config: &PlaygroundConfig, clock: SharedClock) -> Self {
        Self {
            store,
            key: config.saves_key.clone(),
            max_saves: config.max_saves,
            max_entry_bytes: config.max_entry_bytes,
            clock,
        }
    }

    /// All entries, most recent first. Never fails: unreadable data reads
    /// as an empty collection.
    pub fn list(&self) -> Vec<SaveEntry> {
        match self.read() {
            Ok(entries) => entries,
            Err(e) => {
                log::warn!("Failed to read saves: {}", e);
                Vec::new()
            }
        }
    }

    /// Look up an entry by id.
    pub fn get(&self, id: &str) -> Result<SaveEntry, SaveError> {
        self.read()?
            .into_iter()
            .find(|entry| entry.id == id)
            .ok_or_else(|| SaveError::NotFound(id.to_string()))
    }

    /// Save `content` under `name`.
    ///
    /// A blank `name` is replaced with the current date label. When an entry
    /// with that name already exists, `confirm_overwrite` decides whether it
    /// is replaced; it is not consulted otherwise.
    pub fn save<F>(
        &self,
        name: &str,
        content: &EditorContent,
        confirm_overwrite: F,
    ) -> Result<SaveOutcome, SaveError>
    where
        F: FnOnce(&SaveEntry) -> bool,
    {
        let size = content.byte_size();
        if size > self.max_entry_bytes {
            return Err(SaveError::SizeExceeded {
                size,
                limit: self.max_entry_bytes,
            });
        }

        let now = self.clock.now();
        let label = date_label(&now);
        let name = resolve_name(name, &label);

        let mut entries = self.read()?;

        if let Some(index) = entries.iter().position(|entry| entry.name == name) {
            let existing = &mut entries[index];
            if !confirm_overwrite(&*existing) {
                return Err(SaveError::UserDeclined);
            }
            existing.content = content.clone();
            existing.updated_at = now.timestamp_millis();
            existing.updated_at_label = label;
            let entry = existing.clone();

            self.write(&entries)?;
            log::info!("Overwrote save '{}'", entry.name);
            return Ok(SaveOutcome::Overwritten(entry));
        }

        if entries.len() >= self.max_saves {
            return Err(SaveError::CollectionFull {
                limit: self.max_saves,
            });
        }

        let entry = SaveEntry {
            id: Uuid::new_v4().to_string(),
            name,
            content: content.clone(),
            updated_at: now.timestamp_millis(),
            updated_at_label: label,
        };
        entries.insert(0, entry.clone());

        self.write(&entries)?;
        log::info!("Created save '{}' ({} bytes)", entry.name, size);
        Ok(SaveOutcome::Created(entry))
    }

    /// The entry a `save` of `content` under `name` would ask to overwrite.
    ///
    /// Lets a caller ask the question up front and pass the answer to
    /// [`Self::save`]. `None` when the save would be rejected for size first.
    pub fn overwrite_candidate(&self, name: &str, content: &EditorContent) -> Option<SaveEntry> {
        if content.byte_size() > self.max_entry_bytes {
            return None;
        }
        let name = resolve_name(name, &date_label(&self.clock.now()));
        self.list().into_iter().find(|entry| entry.name == name)
    }

    /// Content of the entry with `id`.
    pub fn load(&self, id: &str) -> Result<EditorContent, SaveError> {
        self.get(id).map(|entry| entry.content)
    }

    /// Remove the entry with `id` after `confirm` agrees.
    ///
    /// Confirmation comes first; an id that has vanished by then (deleted
    /// elsewhere) is reported as `NotFound` without writing.
    pub fn delete<F>(&self, id: &str, confirm: F) -> Result<SaveEntry, SaveError>
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return Err(SaveError::UserDeclined);
        }

        let mut entries = self.read()?;
        let index = entries
            .iter()
            .position(|entry| entry.id == id)
            .ok_or_else(|| SaveError::NotFound(id.to_string()))?;
        let removed = entries.remove(index);

        self.write(&entries)?;
        log::info!("Deleted save '{}'", removed.name);
        Ok(removed)
    }

    fn read(&self) -> Result<Vec<SaveEntry>, StorageError> {
        // Entries persisted under an older, larger size limit are kept as-is.
        Ok(read_json_slot(self.store.as_ref(), &self.key)?.unwrap_or_default())
    }

    fn write(&self, entries: &[SaveEntry]) -> Result<(), StorageError> {
        write_json_slot(self.store.as_ref(), &self.key, entries)
    }
}
