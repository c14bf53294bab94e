//! Wall-clock access and the label formats built from it.

use chrono::{DateTime, Local, TimeZone, Utc};
use std::sync::Arc;

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;

    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Clock handle shared between components.
pub type SharedClock = Arc<dyn Clock>;

/// The system clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// A clock frozen at one instant, for tests and replays.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl FixedClock {
    /// Clock at the given local date and time. Ambiguous times resolve to
    /// the earlier reading; invalid ones fall back to the epoch.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Self {
        let time = Local
            .with_ymd_and_hms(year, month, day, hour, min, sec)
            .earliest()
            .unwrap_or_else(|| DateTime::<Utc>::UNIX_EPOCH.with_timezone(&Local));
        Self(time)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

/// `YYYY-MM-DD HH:MM:SS`, used for save labels and default save names.
pub fn date_label(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// `YYYY-MM-DD_HHMMSS`, safe for file names.
pub fn file_stamp(time: &DateTime<Local>) -> String {
    time.format("%Y-%m-%d_%H%M%S").to_string()
}
