//! QuickLayout Core Library
//!
//! Platform-agnostic logic for the QuickLayout playground: combining
//! HTML/CSS/JS into a previewable document, autosaving the editor draft,
//! and managing the bounded collection of named saves.

pub mod capture;
pub mod clock;
pub mod config;
pub mod content;
pub mod document;
pub mod draft;
pub mod notice;
pub mod preview;
pub mod saves;
pub mod session;
pub mod storage;
pub mod view;

pub use capture::{CaptureError, CaptureFragment, CaptureHost, CaptureOptions, CapturedImage, ScreenshotJob};
pub use clock::{Clock, FixedClock, SharedClock, SystemClock};
pub use config::PlaygroundConfig;
pub use content::EditorContent;
pub use document::build_document;
pub use draft::{Draft, DraftStore};
pub use notice::Notice;
pub use preview::{PreviewController, PreviewSurface};
pub use saves::{SaveEntry, SaveError, SaveOutcome, SaveRepository};
pub use session::PlaygroundSession;
pub use storage::{KeyValueStore, MemoryStore, StorageError, StorageResult};
pub use view::ViewMode;
