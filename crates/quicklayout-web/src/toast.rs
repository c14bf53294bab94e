//! Transient status message.

use crate::timer::Timeout;
use quicklayout_core::Notice;
use std::time::Duration;
use web_sys::HtmlElement;

pub struct Toast {
    element: HtmlElement,
    hide: Timeout,
    duration: Duration,
}

impl Toast {
    pub fn new(element: HtmlElement, hide: Timeout, duration: Duration) -> Self {
        Self {
            element,
            hide,
            duration,
        }
    }

    /// Show `notice`, restarting the hide timer. Silent notices are skipped.
    pub fn show(&self, notice: &Notice) {
        if !notice.is_visible() {
            return;
        }

        self.element.set_text_content(Some(&notice.to_string()));
        let classes = self.element.class_list();
        let _ = classes.toggle_with_force("error", notice.is_error());
        let _ = classes.add_1("show");

        let element = self.element.clone();
        let armed = self.hide.arm(self.duration, move || {
            let _ = element.class_list().remove_1("show");
        });
        if let Err(e) = armed {
            log::warn!("Failed to arm toast timer: {:?}", e);
        }
    }
}
