//! Screenshot export through an external DOM-to-image utility.
//!
//! The host owns an off-screen capture root. Export mounts a fragment built
//! from the editor content there, rasterizes it, hands the image to the
//! host for download, and clears the root again whatever the outcome.

use crate::clock::file_stamp;
use crate::config::PlaygroundConfig;
use crate::content::EditorContent;
use crate::view::ViewMode;
use chrono::{DateTime, Local};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Boxed future for async operations (compatible with WASM).
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Screenshot export errors.
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Nothing has been applied to the preview yet")]
    NotApplied,
    #[error("Capture utility is not available")]
    Unavailable,
    #[error("Failed to mount capture fragment: {0}")]
    Mount(String),
    #[error("Capture failed: {0}")]
    Capture(String),
    #[error("Failed to deliver image: {0}")]
    Deliver(String),
}

/// Settings passed through to the capture utility.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOptions {
    /// Device pixel scale of the output image.
    pub scale: f64,
    /// Allow cross-origin images to be fetched with CORS.
    pub use_cors: bool,
    /// Fill color behind transparent content.
    pub background: String,
}

impl CaptureOptions {
    pub fn from_config(config: &PlaygroundConfig) -> Self {
        Self {
            scale: config.capture_scale,
            use_cors: config.capture_use_cors,
            background: config.capture_background.clone(),
        }
    }
}

impl Default for CaptureOptions {
    fn default() -> Self {
        Self::from_config(&PlaygroundConfig::default())
    }
}

/// Markup rendered off-screen for capture.
///
/// Unlike the preview document this is a fragment inserted into the host
/// page, so the script runs as a separate element appended after `markup`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureFragment {
    /// `<style>` block followed by the HTML.
    pub markup: String,
    pub script: String,
    /// Fixed container width in CSS pixels; `None` keeps the natural width.
    pub width: Option<u32>,
}

impl CaptureFragment {
    pub fn new(content: &EditorContent, width: Option<u32>) -> Self {
        Self {
            markup: format!("<style>{}</style>{}", content.css, content.html),
            script: content.js.clone(),
            width,
        }
    }
}

/// A rasterized capture, encoded as a `data:image/png` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedImage {
    pub data_url: String,
}

/// Host side of the capture: the off-screen root and the capture utility.
pub trait CaptureHost {
    /// Whether the capture utility was loaded.
    fn is_available(&self) -> bool;

    /// Render `fragment` into the capture root, replacing anything there.
    fn mount(&self, fragment: &CaptureFragment) -> Result<(), CaptureError>;

    /// Rasterize the mounted fragment.
    fn rasterize(&self, options: &CaptureOptions) -> BoxFuture<'_, Result<CapturedImage, CaptureError>>;

    /// Offer the image to the user as a file download.
    fn download(&self, image: &CapturedImage, filename: &str) -> Result<(), CaptureError>;

    /// Empty the capture root.
    fn clear(&self);
}

/// `quicklayout_<pc|sp>_<stamp>.png`
pub fn screenshot_filename(mode: ViewMode, time: &DateTime<Local>) -> String {
    format!("quicklayout_{}_{}.png", mode.tag(), file_stamp(time))
}

/// Clears the capture root when dropped.
struct MountGuard<'a, H: CaptureHost + ?Sized> {
    host: &'a H,
}

impl<H: CaptureHost + ?Sized> Drop for MountGuard<'_, H> {
    fn drop(&mut self) {
        self.host.clear();
    }
}

/// Everything needed to run one export, detached from the session so the
/// caller holds no borrow across the await.
#[derive(Debug, Clone, PartialEq)]
pub struct ScreenshotJob {
    pub fragment: CaptureFragment,
    pub options: CaptureOptions,
    pub filename: String,
}

impl ScreenshotJob {
    pub async fn run<H: CaptureHost + ?Sized>(&self, host: &H) -> Result<(), CaptureError> {
        export(host, &self.fragment, &self.options, &self.filename).await
    }
}

/// Mount, rasterize and download `fragment` as `filename`.
///
/// The capture root is cleared on every path out of this function,
/// including a dropped future.
pub async fn export<H: CaptureHost + ?Sized>(
    host: &H,
    fragment: &CaptureFragment,
    options: &CaptureOptions,
    filename: &str,
) -> Result<(), CaptureError> {
    if !host.is_available() {
        return Err(CaptureError::Unavailable);
    }

    let _guard = MountGuard { host };
    host.mount(fragment)?;
    let image = host.rasterize(options).await?;
    host.download(&image, filename)?;
    log::info!("Exported screenshot {}", filename);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeHost {
        unavailable: bool,
        fail_capture: bool,
        mounted: RefCell<Option<CaptureFragment>>,
        downloads: RefCell<Vec<String>>,
        clears: RefCell<usize>,
    }

    impl CaptureHost for FakeHost {
        fn is_available(&self) -> bool {
            !self.unavailable
        }

        fn mount(&self, fragment: &CaptureFragment) -> Result<(), CaptureError> {
            *self.mounted.borrow_mut() = Some(fragment.clone());
            Ok(())
        }

        fn rasterize(&self, options: &CaptureOptions) -> BoxFuture<'_, Result<CapturedImage, CaptureError>> {
            let scale = options.scale;
            Box::pin(async move {
                if self.fail_capture {
                    return Err(CaptureError::Capture("tainted canvas".to_string()));
                }
                assert!(self.mounted.borrow().is_some());
                Ok(CapturedImage {
                    data_url: format!("data:image/png;base64,scale{}", scale),
                })
            })
        }

        fn download(&self, _image: &CapturedImage, filename: &str) -> Result<(), CaptureError> {
            self.downloads.borrow_mut().push(filename.to_string());
            Ok(())
        }

        fn clear(&self) {
            *self.mounted.borrow_mut() = None;
            *self.clears.borrow_mut() += 1;
        }
    }

    fn fragment() -> CaptureFragment {
        CaptureFragment::new(&EditorContent::new("<p>x</p>", "p{}", "go()"), None)
    }

    #[test]
    fn test_fragment_markup() {
        let fragment = CaptureFragment::new(&EditorContent::new("<p>x</p>", "p{}", "go()"), Some(375));
        assert_eq!(fragment.markup, "<style>p{}</style><p>x</p>");
        assert_eq!(fragment.script, "go()");
        assert_eq!(fragment.width, Some(375));
    }

    #[test]
    fn test_filename() {
        let time = FixedClock::at(2024, 6, 9, 8, 7, 6).now();
        assert_eq!(screenshot_filename(ViewMode::Desktop, &time), "quicklayout_pc_2024-06-09_080706.png");
        assert_eq!(screenshot_filename(ViewMode::Mobile, &time), "quicklayout_sp_2024-06-09_080706.png");
    }

    #[test]
    fn test_default_options() {
        let options = CaptureOptions::default();
        assert_eq!(options.scale, 2.0);
        assert!(options.use_cors);
        assert_eq!(options.background, "#ffffff");
    }

    #[test]
    fn test_export_success_clears_root() {
        let host = FakeHost::default();
        pollster::block_on(export(&host, &fragment(), &CaptureOptions::default(), "shot.png")).unwrap();

        assert_eq!(*host.downloads.borrow(), vec!["shot.png".to_string()]);
        assert!(host.mounted.borrow().is_none());
        assert_eq!(*host.clears.borrow(), 1);
    }

    #[test]
    fn test_export_failure_clears_root() {
        let host = FakeHost {
            fail_capture: true,
            ..Default::default()
        };
        let result = pollster::block_on(export(&host, &fragment(), &CaptureOptions::default(), "shot.png"));

        assert!(matches!(result, Err(CaptureError::Capture(_))));
        assert!(host.downloads.borrow().is_empty());
        assert!(host.mounted.borrow().is_none());
        assert_eq!(*host.clears.borrow(), 1);
    }

    #[test]
    fn test_export_unavailable_mounts_nothing() {
        let host = FakeHost {
            unavailable: true,
            ..Default::default()
        };
        let result = pollster::block_on(export(&host, &fragment(), &CaptureOptions::default(), "shot.png"));

        assert!(matches!(result, Err(CaptureError::Unavailable)));
        assert_eq!(*host.clears.borrow(), 0);
    }
}
