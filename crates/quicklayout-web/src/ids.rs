//! Element ids and selectors the shell expects in `web/index.html`.

pub const HTML_EDITOR: &str = "htmlEditor";
pub const CSS_EDITOR: &str = "cssEditor";
pub const JS_EDITOR: &str = "jsEditor";
pub const PREVIEW_FRAME: &str = "previewFrame";
pub const APPLY_BUTTON: &str = "applyButton";
pub const SCREENSHOT_BUTTON: &str = "screenshotButton";
pub const TOAST: &str = "toast";
pub const CAPTURE_ROOT: &str = "captureRoot";
pub const SAVE_NAME: &str = "saveName";
pub const SAVE_BUTTON: &str = "saveButton";
pub const LOAD_BUTTON: &str = "loadButton";
pub const DELETE_BUTTON: &str = "deleteButton";
pub const SAVE_SELECT: &str = "saveSelect";
/// `application/json` script block holding `PlaygroundConfig` overrides.
pub const CONFIG: &str = "playgroundConfig";

/// Every id above.
pub const ALL: [&str; 14] = [
    HTML_EDITOR,
    CSS_EDITOR,
    JS_EDITOR,
    PREVIEW_FRAME,
    APPLY_BUTTON,
    SCREENSHOT_BUTTON,
    TOAST,
    CAPTURE_ROOT,
    SAVE_NAME,
    SAVE_BUTTON,
    LOAD_BUTTON,
    DELETE_BUTTON,
    SAVE_SELECT,
    CONFIG,
];

/// View tab buttons; each carries its mode in `data-tab`.
pub const TAB_BUTTONS: &str = ".tab-button";

/// Wrapper around the preview frame; receives the mode in `data-view`.
pub const PREVIEW_WRAPPER: &str = ".preview-frame";

/// Sandbox flags for the preview frame. Scripts and dialogs run, but
/// without `allow-same-origin` the document cannot reach the host page.
pub const PREVIEW_SANDBOX: &str = "allow-scripts allow-modals";

/// Placeholder row at the top of the save picker.
pub const SAVE_PLACEHOLDER: &str = "-- Select a save --";
