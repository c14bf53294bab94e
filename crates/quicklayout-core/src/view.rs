//! Preview view mode (desktop / mobile tabs).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which preview tab is active. Only affects layout width and the active tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    #[serde(rename = "pc")]
    Desktop,
    #[serde(rename = "sp")]
    Mobile,
}

impl ViewMode {
    pub const ALL: [ViewMode; 2] = [ViewMode::Desktop, ViewMode::Mobile];

    /// Tag used in `data-tab` / `data-view` attributes and file names.
    pub fn tag(self) -> &'static str {
        match self {
            ViewMode::Desktop => "pc",
            ViewMode::Mobile => "sp",
        }
    }

    /// Fixed capture width in CSS pixels, or `None` for natural width.
    pub fn capture_width(self, mobile_width: u32) -> Option<u32> {
        match self {
            ViewMode::Desktop => None,
            ViewMode::Mobile => Some(mobile_width),
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pc" => Ok(ViewMode::Desktop),
            "sp" => Ok(ViewMode::Mobile),
            other => Err(format!("Unknown view mode: {}", other)),
        }
    }
}
