//! Playground configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Storage key of the autosaved draft.
pub const DRAFT_KEY: &str = "quicklayout_draft";

/// Storage key of the named save collection.
pub const SAVES_KEY: &str = "quicklayout_saves";

/// Maximum number of named saves.
pub const MAX_SAVES: usize = 10;

/// Maximum combined UTF-8 size of one save's html, css and js.
pub const MAX_ENTRY_BYTES: usize = 300 * 1024;

/// Quiet window before a draft edit is written.
pub const DRAFT_DEBOUNCE_MS: u64 = 1200;

/// How long a toast stays visible.
pub const TOAST_DURATION_MS: u64 = 2500;

/// Capture width used in mobile view mode.
pub const MOBILE_CAPTURE_WIDTH: u32 = 375;

/// Tunables shared by every playground component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaygroundConfig {
    pub draft_key: String,
    pub saves_key: String,
    pub max_saves: usize,
    pub max_entry_bytes: usize,
    /// Debounce window for draft autosave, in milliseconds.
    pub draft_debounce_ms: u64,
    /// Toast visibility, in milliseconds.
    pub toast_duration_ms: u64,
    pub mobile_capture_width: u32,
    pub capture_scale: f64,
    pub capture_background: String,
    /// Let the capture utility fetch cross-origin images.
    pub capture_use_cors: bool,
}

impl Default for PlaygroundConfig {
    fn default() -> Self {
        Self {
            draft_key: DRAFT_KEY.to_string(),
            saves_key: SAVES_KEY.to_string(),
            max_saves: MAX_SAVES,
            max_entry_bytes: MAX_ENTRY_BYTES,
            draft_debounce_ms: DRAFT_DEBOUNCE_MS,
            toast_duration_ms: TOAST_DURATION_MS,
            mobile_capture_width: MOBILE_CAPTURE_WIDTH,
            capture_scale: 2.0,
            capture_background: "#ffffff".to_string(),
            capture_use_cors: true,
        }
    }
}

impl PlaygroundConfig {
    pub fn draft_debounce(&self) -> Duration {
        Duration::from_millis(self.draft_debounce_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_duration_ms)
    }

    /// Parse a JSON override. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PlaygroundConfig::default();
        assert_eq!(config.max_saves, 10);
        assert_eq!(config.max_entry_bytes, 307_200);
        assert_eq!(config.draft_debounce(), Duration::from_millis(1200));
        assert_eq!(config.toast_duration(), Duration::from_millis(2500));
        assert_eq!(config.draft_key, "quicklayout_draft");
        assert_eq!(config.saves_key, "quicklayout_saves");
    }

    #[test]
    fn test_partial_override() {
        let config = PlaygroundConfig::from_json(r#"{"max_saves": 3}"#).unwrap();
        assert_eq!(config.max_saves, 3);
        assert_eq!(config.max_entry_bytes, MAX_ENTRY_BYTES);
        assert_eq!(config.capture_background, "#ffffff");
    }
}
