//! Typed handles to the page's elements.

use crate::ids;
use quicklayout_core::{EditorContent, SaveEntry, ViewMode};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, HtmlElement, HtmlIFrameElement, HtmlInputElement, HtmlOptionElement,
    HtmlSelectElement, HtmlTextAreaElement,
};

pub struct Page {
    pub document: Document,
    pub html_editor: HtmlTextAreaElement,
    pub css_editor: HtmlTextAreaElement,
    pub js_editor: HtmlTextAreaElement,
    pub preview_frame: HtmlIFrameElement,
    pub preview_wrapper: Option<Element>,
    pub apply_button: HtmlElement,
    pub screenshot_button: HtmlElement,
    pub toast: HtmlElement,
    pub capture_root: HtmlElement,
    pub save_name: HtmlInputElement,
    pub save_button: HtmlElement,
    pub load_button: HtmlElement,
    pub delete_button: HtmlElement,
    pub save_select: HtmlSelectElement,
    pub tab_buttons: Vec<HtmlElement>,
}

fn by_id<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element #{}", id)))?
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Element #{} has the wrong type", id)))
}

impl Page {
    pub fn bind(document: Document) -> Result<Self, JsValue> {
        let nodes = document.query_selector_all(ids::TAB_BUTTONS)?;
        let tab_buttons = (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .collect();

        Ok(Self {
            html_editor: by_id(&document, ids::HTML_EDITOR)?,
            css_editor: by_id(&document, ids::CSS_EDITOR)?,
            js_editor: by_id(&document, ids::JS_EDITOR)?,
            preview_frame: by_id(&document, ids::PREVIEW_FRAME)?,
            preview_wrapper: document.query_selector(ids::PREVIEW_WRAPPER)?,
            apply_button: by_id(&document, ids::APPLY_BUTTON)?,
            screenshot_button: by_id(&document, ids::SCREENSHOT_BUTTON)?,
            toast: by_id(&document, ids::TOAST)?,
            capture_root: by_id(&document, ids::CAPTURE_ROOT)?,
            save_name: by_id(&document, ids::SAVE_NAME)?,
            save_button: by_id(&document, ids::SAVE_BUTTON)?,
            load_button: by_id(&document, ids::LOAD_BUTTON)?,
            delete_button: by_id(&document, ids::DELETE_BUTTON)?,
            save_select: by_id(&document, ids::SAVE_SELECT)?,
            tab_buttons,
            document,
        })
    }

    /// Current text of the three editors.
    pub fn read_editors(&self) -> EditorContent {
        EditorContent::new(
            self.html_editor.value(),
            self.css_editor.value(),
            self.js_editor.value(),
        )
    }

    pub fn write_editors(&self, content: &EditorContent) {
        self.html_editor.set_value(&content.html);
        self.css_editor.set_value(&content.css);
        self.js_editor.set_value(&content.js);
    }

    /// Rebuild the save picker. The selection resets to the placeholder.
    pub fn render_save_list(&self, saves: &[SaveEntry]) -> Result<(), JsValue> {
        self.save_select.set_inner_html("");

        let placeholder = HtmlOptionElement::new_with_text_and_value(ids::SAVE_PLACEHOLDER, "")?;
        self.save_select.append_child(&placeholder)?;

        for entry in saves {
            let option = HtmlOptionElement::new_with_text_and_value(&entry.display_label(), &entry.id)?;
            self.save_select.append_child(&option)?;
        }
        Ok(())
    }

    /// Mark the active tab and tag the preview wrapper with the mode.
    pub fn render_view_mode(&self, mode: ViewMode) {
        for button in &self.tab_buttons {
            let active = button.get_attribute("data-tab").as_deref() == Some(mode.tag());
            let _ = button.class_list().toggle_with_force("active", active);
        }
        if let Some(wrapper) = &self.preview_wrapper {
            let _ = wrapper.set_attribute("data-view", mode.tag());
        }
    }
}
