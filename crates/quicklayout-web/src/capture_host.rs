//! Capture host backed by the page's `html2canvas` global.

use quicklayout_core::capture::BoxFuture;
use quicklayout_core::{CaptureError, CaptureFragment, CaptureHost, CaptureOptions, CapturedImage};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Document, HtmlAnchorElement, HtmlCanvasElement, HtmlElement};

#[wasm_bindgen]
extern "C" {
    /// `html2canvas(element, options) -> Promise<HTMLCanvasElement>`
    #[wasm_bindgen(js_name = html2canvas, catch)]
    fn html2canvas(element: &HtmlElement, options: &JsValue) -> Result<js_sys::Promise, JsValue>;
}

/// Off-screen `#captureRoot` plus the capture utility.
pub struct DomCaptureHost {
    document: Document,
    root: HtmlElement,
}

impl DomCaptureHost {
    pub fn new(document: Document, root: HtmlElement) -> Self {
        Self { document, root }
    }

    fn mounted(&self) -> Result<HtmlElement, CaptureError> {
        self.root
            .first_element_child()
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            .ok_or_else(|| CaptureError::Capture("Nothing mounted".to_string()))
    }
}

fn js_error(e: JsValue) -> String {
    e.as_string()
        .or_else(|| {
            js_sys::Reflect::get(&e, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", e))
}

fn options_object(options: &CaptureOptions) -> Result<JsValue, JsValue> {
    let object = js_sys::Object::new();
    js_sys::Reflect::set(&object, &"scale".into(), &JsValue::from_f64(options.scale))?;
    js_sys::Reflect::set(&object, &"useCORS".into(), &JsValue::from_bool(options.use_cors))?;
    js_sys::Reflect::set(
        &object,
        &"backgroundColor".into(),
        &JsValue::from_str(&options.background),
    )?;
    Ok(object.into())
}

impl CaptureHost for DomCaptureHost {
    fn is_available(&self) -> bool {
        web_sys::window()
            .and_then(|w| js_sys::Reflect::get(&w, &JsValue::from_str("html2canvas")).ok())
            .map(|f| f.is_function())
            .unwrap_or(false)
    }

    fn mount(&self, fragment: &CaptureFragment) -> Result<(), CaptureError> {
        let mount_error = |e: JsValue| CaptureError::Mount(js_error(e));

        self.root.set_inner_html("");

        let container: HtmlElement = self
            .document
            .create_element("div")
            .map_err(mount_error)?
            .unchecked_into();
        let style = container.style();
        if let Some(width) = fragment.width {
            style.set_property("width", &format!("{}px", width)).map_err(mount_error)?;
        }
        style.set_property("min-height", "1px").map_err(mount_error)?;
        container.set_inner_html(&fragment.markup);
        self.root.append_child(&container).map_err(mount_error)?;

        // Scripts set through innerHTML never run; append a real element.
        let script = self.document.create_element("script").map_err(mount_error)?;
        script.set_text_content(Some(&fragment.script));
        container.append_child(&script).map_err(mount_error)?;
        Ok(())
    }

    fn rasterize(&self, options: &CaptureOptions) -> BoxFuture<'_, Result<CapturedImage, CaptureError>> {
        let options = options.clone();
        Box::pin(async move {
            let capture_error = |e: JsValue| CaptureError::Capture(js_error(e));

            let target = self.mounted()?;
            let config = options_object(&options).map_err(capture_error)?;
            let promise = html2canvas(&target, &config).map_err(capture_error)?;
            let canvas: HtmlCanvasElement = JsFuture::from(promise)
                .await
                .map_err(capture_error)?
                .dyn_into()
                .map_err(|_| CaptureError::Capture("Capture did not return a canvas".to_string()))?;

            // Throws a SecurityError when a cross-origin image tainted the canvas.
            let data_url = canvas.to_data_url_with_type("image/png").map_err(capture_error)?;
            Ok(CapturedImage { data_url })
        })
    }

    fn download(&self, image: &CapturedImage, filename: &str) -> Result<(), CaptureError> {
        let anchor = self
            .document
            .create_element("a")
            .map_err(|e| CaptureError::Deliver(js_error(e)))?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| CaptureError::Deliver("Failed to create anchor".to_string()))?;

        anchor.set_href(&image.data_url);
        anchor.set_download(filename);
        anchor.click();
        Ok(())
    }

    fn clear(&self) {
        self.root.set_inner_html("");
    }
}
