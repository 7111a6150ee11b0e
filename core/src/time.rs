//! Injectable wall-clock source.
//!
//! Transitions never read the platform clock directly: `last_worked_at`
//! and scene-visit timestamps come from the engine's `TimeSource`, so
//! tests can pin time and replays stay reproducible.

use chrono::{DateTime, TimeZone, Utc};

pub trait TimeSource: Send {
    fn now(&mut self) -> DateTime<Utc>;
}

/// Production source: the real wall clock.
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&mut self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Test source: a pinned instant, advanced explicitly.
pub struct FixedTime {
    current: DateTime<Utc>,
}

impl FixedTime {
    pub fn at_epoch() -> Self {
        Self {
            current: Utc.timestamp_opt(0, 0).unwrap(),
        }
    }

    pub fn advance_secs(&mut self, secs: i64) {
        self.current += chrono::Duration::seconds(secs);
    }
}

impl TimeSource for FixedTime {
    fn now(&mut self) -> DateTime<Utc> {
        self.current
    }
}
