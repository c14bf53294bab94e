//! Preview controller.

use crate::content::EditorContent;
use crate::document::build_document;

/// Sandboxed renderer the combined document is handed to.
///
/// Implementations must isolate the document's scripts from the host page.
pub trait PreviewSurface {
    fn show(&mut self, document: &str);
}

/// Tracks the last document sent to the preview.
pub struct PreviewController<R: PreviewSurface> {
    surface: R,
    latest: Option<String>,
}

impl<R: PreviewSurface> PreviewController<R> {
    pub fn new(surface: R) -> Self {
        Self {
            surface,
            latest: None,
        }
    }

    /// Build the document for `content`, remember it, and display it.
    pub fn apply(&mut self, content: &EditorContent) -> &str {
        let document = build_document(content);
        self.surface.show(&document);
        log::debug!("Preview updated ({} bytes)", document.len());
        self.latest.insert(document)
    }

    /// Whether anything has been applied yet.
    pub fn has_latest(&self) -> bool {
        self.latest.is_some()
    }

    pub fn latest(&self) -> Option<&str> {
        self.latest.as_deref()
    }

    pub fn surface(&self) -> &R {
        &self.surface
    }
}
