use quicklayout_core::capture::BoxFuture;
use quicklayout_core::{
    CaptureError, CaptureFragment, CaptureHost, CaptureOptions, CapturedImage, EditorContent,
    FixedClock, KeyValueStore, MemoryStore, Notice, PlaygroundConfig, PlaygroundSession,
    PreviewSurface, SharedClock, ViewMode,
};
use std::cell::RefCell;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Default)]
struct FrameSurface {
    srcdoc: Option<String>,
}

impl PreviewSurface for FrameSurface {
    fn show(&mut self, document: &str) {
        self.srcdoc = Some(document.to_string());
    }
}

#[derive(Default)]
struct RecordingHost {
    fail: bool,
    mounted: RefCell<Option<CaptureFragment>>,
    seen_fragment: RefCell<Option<CaptureFragment>>,
    downloads: RefCell<Vec<String>>,
}

impl CaptureHost for RecordingHost {
    fn is_available(&self) -> bool {
        true
    }

    fn mount(&self, fragment: &CaptureFragment) -> Result<(), CaptureError> {
        *self.mounted.borrow_mut() = Some(fragment.clone());
        *self.seen_fragment.borrow_mut() = Some(fragment.clone());
        Ok(())
    }

    fn rasterize(&self, _options: &CaptureOptions) -> BoxFuture<'_, Result<CapturedImage, CaptureError>> {
        Box::pin(async move {
            if self.fail {
                Err(CaptureError::Capture("cross-origin image".to_string()))
            } else {
                Ok(CapturedImage {
                    data_url: "data:image/png;base64,AAAA".to_string(),
                })
            }
        })
    }

    fn download(&self, _image: &CapturedImage, filename: &str) -> Result<(), CaptureError> {
        self.downloads.borrow_mut().push(filename.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.mounted.borrow_mut() = None;
    }
}

fn clock() -> SharedClock {
    Arc::new(FixedClock::at(2024, 7, 20, 10, 11, 12))
}

fn session(store: Arc<MemoryStore>) -> PlaygroundSession<MemoryStore, FrameSurface> {
    let _ = env_logger::builder().is_test(true).try_init();
    PlaygroundSession::new(store, FrameSurface::default(), PlaygroundConfig::default(), clock())
}

#[test]
fn test_starts_with_sample_and_desktop() {
    let session = session(Arc::new(MemoryStore::new()));

    assert_eq!(session.content(), &EditorContent::sample());
    assert_eq!(session.view_mode(), ViewMode::Desktop);
    assert!(!session.preview().has_latest());
}

#[test]
fn test_draft_survives_reopen() {
    let store = Arc::new(MemoryStore::new());
    let mut first = session(store.clone());
    let t0 = Instant::now();

    let edited = EditorContent::new("<h1>draft</h1>", "h1{}", "");
    let due = first.edit(edited.clone(), t0);
    assert!(!first.poll_draft(due - Duration::from_millis(1)));
    assert!(first.poll_draft(due));

    let second = session(store);
    assert_eq!(second.content(), &edited);
}

#[test]
fn test_unflushed_draft_is_not_persisted() {
    let store = Arc::new(MemoryStore::new());
    let mut first = session(store.clone());
    first.edit(EditorContent::new("<p>lost</p>", "", ""), Instant::now());

    let second = session(store);
    assert_eq!(second.content(), &EditorContent::sample());
}

#[test]
fn test_apply_renders_current_content() {
    let mut session = session(Arc::new(MemoryStore::new()));
    session.edit(EditorContent::new("<p>hi</p>", "p{color:red}", "x('</script>')"), Instant::now());

    assert_eq!(session.apply(), Notice::PreviewApplied);

    let srcdoc = session.preview().surface().srcdoc.clone().unwrap();
    assert!(srcdoc.contains("<p>hi</p>"));
    assert!(srcdoc.contains("<style>p{color:red}</style>"));
    assert_eq!(srcdoc.to_lowercase().matches("</script").count(), 1);
}

#[test]
fn test_save_select_load_cycle() {
    let mut session = session(Arc::new(MemoryStore::new()));
    let t0 = Instant::now();
    let original = EditorContent::new("<p>v1</p>", "p{}", "1");

    session.edit(original.clone(), t0);
    session.set_save_name("card");
    assert_eq!(session.save_as(|_| panic!("no overwrite expected")), Notice::Saved);

    let saves = session.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].display_label(), "card (2024-07-20 10:11:12)");

    session.edit(EditorContent::new("<p>v2</p>", "", ""), t0);
    session.set_save_name("");
    session.select_save(Some(saves[0].id.as_str()));
    assert_eq!(session.save_name(), "card");

    assert_eq!(session.load_selected(t0), Notice::Loaded);
    assert_eq!(session.content(), &original);
    // Loading queues a draft write
    assert!(session.draft_due_at().is_some());
}

#[test]
fn test_overwrite_declined_and_accepted() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session(store.clone());
    let t0 = Instant::now();

    session.edit(EditorContent::new("<p>a</p>", "", ""), t0);
    session.set_save_name("same");
    session.save_as(|_| true);
    let before = store.get("quicklayout_saves").unwrap();

    session.edit(EditorContent::new("<p>b</p>", "", ""), t0);
    assert_eq!(session.save_as(|_| false), Notice::Cancelled);
    assert_eq!(store.get("quicklayout_saves").unwrap(), before);

    assert_eq!(session.save_as(|_| true), Notice::Overwritten);
    let saves = session.saves();
    assert_eq!(saves.len(), 1);
    assert_eq!(saves[0].content.html, "<p>b</p>");
}

#[test]
fn test_overwrite_answer_asked_up_front() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session(store.clone());
    session.set_save_name("card");
    assert!(session.overwrite_candidate().is_none());
    session.save_as(|_| panic!("no overwrite expected"));

    session.edit(EditorContent::new("<p>next</p>", "", ""), Instant::now());
    let candidate = session.overwrite_candidate().unwrap();
    assert_eq!(candidate.name, "card");

    // Answer resolved before the save runs
    let overwrite = false;
    assert_eq!(session.save_as(|_| overwrite), Notice::Cancelled);
    let overwrite = true;
    assert_eq!(session.save_as(|_| overwrite), Notice::Overwritten);
    assert_eq!(session.saves()[0].content.html, "<p>next</p>");
}

#[test]
fn test_draft_delay_reaches_deadline() {
    let mut session = session(Arc::new(MemoryStore::new()));
    let t0 = Instant::now();
    assert!(session.draft_delay(t0).is_none());

    session.edit(EditorContent::new("<p>d</p>", "", ""), t0);
    let armed_at = t0 + Duration::from_micros(40);
    let delay = session.draft_delay(armed_at).unwrap();

    assert!(session.poll_draft(armed_at + delay));
    assert!(session.draft_due_at().is_none());
}

#[test]
fn test_full_collection_notice() {
    let mut session = session(Arc::new(MemoryStore::new()));
    for i in 0..10 {
        session.set_save_name(format!("slot {}", i));
        assert_eq!(session.save_as(|_| true), Notice::Saved);
    }

    session.set_save_name("one more");
    assert_eq!(session.save_as(|_| true), Notice::CollectionFull { limit: 10 });
    assert_eq!(session.saves().len(), 10);
}

#[test]
fn test_oversized_save_notice() {
    let mut session = session(Arc::new(MemoryStore::new()));
    session.edit(EditorContent::new("", "", "/".repeat(301 * 1024)), Instant::now());
    session.set_save_name("huge");

    assert_eq!(session.save_as(|_| true), Notice::SizeExceeded { limit_kib: 300 });
    assert!(session.saves().is_empty());
}

#[test]
fn test_load_and_delete_need_selection() {
    let mut session = session(Arc::new(MemoryStore::new()));

    assert_eq!(session.load_selected(Instant::now()), Notice::NothingSelected);
    assert_eq!(session.delete_selected(|| true), Notice::NothingSelected);

    session.select_save(Some(""));
    assert!(session.selected().is_none());
}

#[test]
fn test_delete_selected() {
    let mut session = session(Arc::new(MemoryStore::new()));
    session.set_save_name("gone");
    session.save_as(|_| true);
    let id = session.saves()[0].id.clone();

    session.select_save(Some(id.as_str()));
    assert_eq!(session.delete_selected(|| false), Notice::Cancelled);
    assert_eq!(session.saves().len(), 1);

    assert_eq!(session.delete_selected(|| true), Notice::Deleted);
    assert!(session.saves().is_empty());
    assert!(session.selected().is_none());
}

#[test]
fn test_load_after_external_delete() {
    let store = Arc::new(MemoryStore::new());
    let mut session = session(store.clone());
    session.set_save_name("raced");
    session.save_as(|_| true);
    let id = session.saves()[0].id.clone();
    session.select_save(Some(id.as_str()));

    // Another tab cleared the collection
    store.set("quicklayout_saves", "[]").unwrap();

    let notice = session.load_selected(Instant::now());
    assert_eq!(notice, Notice::SaveNotFound);
    assert!(notice.refreshes_save_list());
    assert_eq!(session.delete_selected(|| true), Notice::SaveNotFound);
}

#[test]
fn test_corrupt_saves_recover() {
    let store = Arc::new(MemoryStore::new());
    store.set("quicklayout_saves", "not json at all").unwrap();
    let mut session = session(store);

    assert!(session.saves().is_empty());
    session.set_save_name("after");
    assert_eq!(session.save_as(|_| true), Notice::Saved);
    assert_eq!(session.saves().len(), 1);
}

#[test]
fn test_screenshot_requires_apply() {
    let session = session(Arc::new(MemoryStore::new()));
    let host = RecordingHost::default();

    let notice = pollster::block_on(session.take_screenshot(&host));

    assert_eq!(notice, Notice::ApplyFirst);
    assert!(host.seen_fragment.borrow().is_none());
}

#[test]
fn test_mobile_screenshot() {
    let mut session = session(Arc::new(MemoryStore::new()));
    let host = RecordingHost::default();
    session.apply();
    session.set_view_mode(ViewMode::Mobile);

    let notice = pollster::block_on(session.take_screenshot(&host));

    assert_eq!(notice, Notice::ScreenshotSaved);
    assert_eq!(
        *host.downloads.borrow(),
        vec!["quicklayout_sp_2024-07-20_101112.png".to_string()]
    );
    let fragment = host.seen_fragment.borrow().clone().unwrap();
    assert_eq!(fragment.width, Some(375));
    assert!(host.mounted.borrow().is_none());
}

#[test]
fn test_desktop_screenshot_uses_editor_content() {
    let mut session = session(Arc::new(MemoryStore::new()));
    let host = RecordingHost::default();
    session.apply();
    // Edited after apply: capture follows the editors
    session.edit(EditorContent::new("<p>new</p>", "", ""), Instant::now());

    let job = session.screenshot_job().unwrap();
    assert_eq!(job.filename, "quicklayout_pc_2024-07-20_101112.png");
    assert_eq!(job.fragment.width, None);
    assert!(job.fragment.markup.ends_with("<p>new</p>"));

    assert_eq!(pollster::block_on(session.take_screenshot(&host)), Notice::ScreenshotSaved);
}

#[test]
fn test_failed_screenshot_cleans_up() {
    let mut session = session(Arc::new(MemoryStore::new()));
    let host = RecordingHost {
        fail: true,
        ..Default::default()
    };
    session.apply();

    let notice = pollster::block_on(session.take_screenshot(&host));

    assert_eq!(notice, Notice::ScreenshotFailed);
    assert!(host.mounted.borrow().is_none());
    assert!(host.downloads.borrow().is_empty());
}
