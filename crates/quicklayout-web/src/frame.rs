//! Sandboxed iframe preview.

use crate::ids::PREVIEW_SANDBOX;
use quicklayout_core::PreviewSurface;
use wasm_bindgen::JsValue;
use web_sys::HtmlIFrameElement;

/// Shows documents through `srcdoc` on a sandboxed iframe.
pub struct FrameSurface {
    frame: HtmlIFrameElement,
}

impl FrameSurface {
    /// Wrap `frame`, enforcing the sandbox flags whatever the markup says.
    pub fn new(frame: HtmlIFrameElement) -> Result<Self, JsValue> {
        frame.set_attribute("sandbox", PREVIEW_SANDBOX)?;
        Ok(Self { frame })
    }
}

impl PreviewSurface for FrameSurface {
    fn show(&mut self, document: &str) {
        self.frame.set_srcdoc(document);
    }
}
