//! Toast notices reported back from user actions.

use crate::capture::CaptureError;
use crate::saves::{SaveError, SaveOutcome};
use std::fmt;

/// Outcome of a user action, shown as a transient toast.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    PreviewApplied,
    Saved,
    Overwritten,
    SizeExceeded { limit_kib: usize },
    CollectionFull { limit: usize },
    /// The user backed out of a confirmation. Nothing is shown.
    Cancelled,
    NothingSelected,
    SaveNotFound,
    Loaded,
    Deleted,
    ViewChanged,
    ApplyFirst,
    CaptureUnavailable,
    ScreenshotSaved,
    ScreenshotFailed,
    StorageFailed,
}

impl Notice {
    /// Whether the toast should be shown at all.
    pub fn is_visible(&self) -> bool {
        !matches!(self, Notice::Cancelled | Notice::ViewChanged)
    }

    /// Whether this reports a problem rather than a success.
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Notice::SizeExceeded { .. }
                | Notice::CollectionFull { .. }
                | Notice::NothingSelected
                | Notice::SaveNotFound
                | Notice::ApplyFirst
                | Notice::CaptureUnavailable
                | Notice::ScreenshotFailed
                | Notice::StorageFailed
        )
    }

    /// Whether the stored saves changed, or turned out to differ from what
    /// the picker shows, so the picker must be rebuilt.
    pub fn refreshes_save_list(&self) -> bool {
        matches!(
            self,
            Notice::Saved | Notice::Overwritten | Notice::Deleted | Notice::SaveNotFound
        )
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::PreviewApplied => write!(f, "Preview updated"),
            Notice::Saved => write!(f, "Saved"),
            Notice::Overwritten => write!(f, "Save overwritten"),
            Notice::SizeExceeded { limit_kib } => {
                write!(f, "Exceeds the per-save size limit ({}KB)", limit_kib)
            }
            Notice::CollectionFull { limit } => write!(
                f,
                "All {} save slots are full. Overwrite or delete one first",
                limit
            ),
            Notice::Cancelled | Notice::ViewChanged => Ok(()),
            Notice::NothingSelected => write!(f, "Choose a save first"),
            Notice::SaveNotFound => write!(f, "Save not found"),
            Notice::Loaded => write!(f, "Loaded into the editors. Press Apply to preview"),
            Notice::Deleted => write!(f, "Deleted"),
            Notice::ApplyFirst => write!(f, "Press Apply first"),
            Notice::CaptureUnavailable => write!(f, "Screenshot support failed to load"),
            Notice::ScreenshotSaved => write!(f, "Screenshot saved"),
            Notice::ScreenshotFailed => {
                write!(f, "Screenshot failed (possibly due to external resources)")
            }
            Notice::StorageFailed => write!(f, "Could not access browser storage"),
        }
    }
}

impl From<&SaveOutcome> for Notice {
    fn from(outcome: &SaveOutcome) -> Self {
        match outcome {
            SaveOutcome::Created(_) => Notice::Saved,
            SaveOutcome::Overwritten(_) => Notice::Overwritten,
        }
    }
}

impl From<&SaveError> for Notice {
    fn from(error: &SaveError) -> Self {
        match error {
            SaveError::SizeExceeded { limit, .. } => Notice::SizeExceeded {
                limit_kib: limit / 1024,
            },
            SaveError::CollectionFull { limit } => Notice::CollectionFull { limit: *limit },
            SaveError::NotFound(_) => Notice::SaveNotFound,
            SaveError::UserDeclined => Notice::Cancelled,
            SaveError::Storage(_) => Notice::StorageFailed,
        }
    }
}

impl From<&CaptureError> for Notice {
    fn from(error: &CaptureError) -> Self {
        match error {
            CaptureError::NotApplied => Notice::ApplyFirst,
            CaptureError::Unavailable => Notice::CaptureUnavailable,
            CaptureError::Mount(_) | CaptureError::Capture(_) | CaptureError::Deliver(_) => {
                Notice::ScreenshotFailed
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_error_mapping() {
        let notice = Notice::from(&SaveError::SizeExceeded {
            size: 400_000,
            limit: 300 * 1024,
        });
        assert_eq!(notice, Notice::SizeExceeded { limit_kib: 300 });
        assert_eq!(notice.to_string(), "Exceeds the per-save size limit (300KB)");
        assert!(notice.is_error());

        assert_eq!(Notice::from(&SaveError::UserDeclined), Notice::Cancelled);
        assert!(!Notice::Cancelled.is_visible());
    }

    #[test]
    fn test_capture_error_mapping() {
        assert_eq!(Notice::from(&CaptureError::NotApplied), Notice::ApplyFirst);
        assert_eq!(
            Notice::from(&CaptureError::Capture("tainted canvas".to_string())),
            Notice::ScreenshotFailed
        );
    }

    #[test]
    fn test_save_list_refresh() {
        assert!(Notice::Saved.refreshes_save_list());
        assert!(Notice::Deleted.refreshes_save_list());
        // Removed in another tab
        assert!(Notice::from(&SaveError::NotFound("gone".to_string())).refreshes_save_list());

        assert!(!Notice::Cancelled.refreshes_save_list());
        assert!(!Notice::Loaded.refreshes_save_list());
        assert!(!Notice::NothingSelected.refreshes_save_list());
    }

    #[test]
    fn test_success_is_not_error() {
        assert!(!Notice::Saved.is_error());
        assert!(Notice::Saved.is_visible());
    }
}
