//! Poll cursor and wall-clock source.

/// Lower-bound timestamp (Unix seconds) for the next fetch.
///
/// Lives only in memory; a restart begins again from "now".
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PollCursor(pub f64);

impl PollCursor {
    /// Value sent as the `from_date` query parameter.
    pub fn from_date(&self) -> i64 {
        self.0.round() as i64
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

impl std::fmt::Display for PollCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.from_date())
    }
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> PollCursor;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> PollCursor {
        PollCursor(chrono::Utc::now().timestamp_micros() as f64 / 1_000_000.0)
    }
}
