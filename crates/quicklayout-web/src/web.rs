//! WebAssembly entry point and event wiring.

use crate::capture_host::DomCaptureHost;
use crate::frame::FrameSurface;
use crate::ids;
use crate::page::Page;
use crate::timer::Timeout;
use crate::toast::Toast;
use quicklayout_core::session::screenshot_notice;
use quicklayout_core::storage::{PlatformStore, create_default_store};
use quicklayout_core::{Notice, PlaygroundConfig, PlaygroundSession, SystemClock, ViewMode};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, EventTarget, Window};
use web_time::Instant;

type Session = PlaygroundSession<PlatformStore, FrameSurface>;

/// Everything the event handlers share.
struct App {
    window: Window,
    page: Page,
    session: RefCell<Session>,
    draft_timer: Timeout,
    toast: Toast,
    capture: DomCaptureHost,
}

impl App {
    fn notify(&self, notice: Notice) {
        self.toast.show(&notice);
    }

    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }

    fn refresh_save_list(&self) {
        let saves = self.session.borrow().saves();
        if let Err(e) = self.page.render_save_list(&saves) {
            log::error!("Failed to render save list: {:?}", e);
        }
    }

    /// Arm the draft timer for the session's pending write.
    fn arm_draft_timer(self: &Rc<Self>) {
        let Some(delay) = self.session.borrow().draft_delay(Instant::now()) else {
            return;
        };

        let app = Rc::clone(self);
        let armed = self.draft_timer.arm(delay, move || {
            app.session.borrow_mut().poll_draft(Instant::now());
            // Still queued if the timer fired early
            app.arm_draft_timer();
        });
        if let Err(e) = armed {
            log::warn!("Failed to arm draft timer: {:?}", e);
        }
    }

    fn on_edit(self: &Rc<Self>) {
        let content = self.page.read_editors();
        self.session.borrow_mut().edit(content, Instant::now());
        self.arm_draft_timer();
    }

    fn on_apply(&self) {
        let notice = self.session.borrow_mut().apply();
        self.notify(notice);
    }

    fn on_save(&self) {
        self.session.borrow_mut().set_save_name(self.page.save_name.value());

        // Timers can run while the dialog is open; ask with the session unborrowed.
        let candidate = self.session.borrow().overwrite_candidate();
        let overwrite =
            candidate.is_some() && self.confirm("A save with this name exists. Overwrite it?");
        let notice = self.session.borrow_mut().save_as(|_| overwrite);

        if notice.refreshes_save_list() {
            self.refresh_save_list();
        }
        self.notify(notice);
    }

    fn on_select(&self) {
        let mut session = self.session.borrow_mut();
        session.select_save(Some(self.page.save_select.value().as_str()));
        if session.selected().is_some() {
            self.page.save_name.set_value(session.save_name());
        }
    }

    fn on_load(self: &Rc<Self>) {
        let notice = self.session.borrow_mut().load_selected(Instant::now());
        if notice == Notice::Loaded {
            self.page.write_editors(self.session.borrow().content());
            self.arm_draft_timer();
        }
        if notice.refreshes_save_list() {
            self.refresh_save_list();
        }
        self.notify(notice);
    }

    fn on_delete(&self) {
        let selected = self.session.borrow().selected().is_some();
        let confirmed = selected && self.confirm("Delete this save?");
        let notice = self.session.borrow_mut().delete_selected(|| confirmed);

        if notice.refreshes_save_list() {
            self.refresh_save_list();
        }
        self.notify(notice);
    }

    fn on_tab(&self, tab: Option<String>) {
        let Some(mode) = tab.and_then(|t| t.parse::<ViewMode>().ok()) else {
            return;
        };
        let notice = self.session.borrow_mut().set_view_mode(mode);
        self.page.render_view_mode(mode);
        self.notify(notice);
    }

    fn on_screenshot(self: &Rc<Self>) {
        let job = match self.session.borrow().screenshot_job() {
            Ok(job) => job,
            Err(e) => return self.notify(Notice::from(&e)),
        };

        let app = Rc::clone(self);
        wasm_bindgen_futures::spawn_local(async move {
            let result = job.run(&app.capture).await;
            app.notify(screenshot_notice(result));
        });
    }
}

/// Attach `handler` to `event` on `target` for the page's lifetime.
fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget(); // Lives as long as the page
    Ok(())
}

/// Attach an `App` method to `event` on `target`.
fn on(app: &Rc<App>, target: &EventTarget, event: &str, handler: fn(&Rc<App>)) -> Result<(), JsValue> {
    let app = Rc::clone(app);
    listen(target, event, move |_| handler(&app))
}

fn wire(app: &Rc<App>) -> Result<(), JsValue> {
    let page = &app.page;

    for editor in [&page.html_editor, &page.css_editor, &page.js_editor] {
        on(app, editor, "input", |app| app.on_edit())?;
    }

    on(app, &page.apply_button, "click", |app| app.on_apply())?;
    on(app, &page.save_button, "click", |app| app.on_save())?;
    on(app, &page.load_button, "click", |app| app.on_load())?;
    on(app, &page.delete_button, "click", |app| app.on_delete())?;
    on(app, &page.screenshot_button, "click", |app| app.on_screenshot())?;
    on(app, &page.save_select, "change", |app| app.on_select())?;
    on(app, &app.window, "beforeunload", |app| {
        app.session.borrow_mut().flush_draft();
    })?;

    for button in &page.tab_buttons {
        let app = Rc::clone(app);
        let tab_button = button.clone();
        listen(button, "click", move |_| app.on_tab(tab_button.get_attribute("data-tab")))?;
    }

    Ok(())
}

/// Defaults, overridden by the page's config block when it has one.
fn load_config(document: &Document) -> PlaygroundConfig {
    let Some(json) = document
        .get_element_by_id(ids::CONFIG)
        .and_then(|block| block.text_content())
    else {
        return PlaygroundConfig::default();
    };

    PlaygroundConfig::from_json(&json).unwrap_or_else(|e| {
        log::warn!("Ignoring invalid page config: {}", e);
        PlaygroundConfig::default()
    })
}

fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("No document"))?;
    let page = Page::bind(document.clone())?;

    let config = load_config(&document);
    let store = create_default_store().map_err(|e| JsValue::from_str(&e.to_string()))?;
    let surface = FrameSurface::new(page.preview_frame.clone())?;
    let session = PlaygroundSession::new(store, surface, config.clone(), Arc::new(SystemClock));

    let toast = Toast::new(page.toast.clone(), Timeout::new(window.clone()), config.toast_duration());
    let capture = DomCaptureHost::new(document, page.capture_root.clone());

    let app = Rc::new(App {
        draft_timer: Timeout::new(window.clone()),
        window,
        page,
        session: RefCell::new(session),
        toast,
        capture,
    });

    app.page.write_editors(app.session.borrow().content());
    app.refresh_save_list();
    app.page.render_view_mode(app.session.borrow().view_mode());
    wire(&app)?;

    log::info!("QuickLayout ready");
    Ok(())
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    log::info!("Starting QuickLayout (WASM)");

    if let Err(e) = start() {
        log::error!("Failed to start QuickLayout: {:?}", e);
    }
}
