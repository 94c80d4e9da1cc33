//! In-memory fakes for the collaborator traits (testing and local runs).
//!
//! Provides `ScriptedStatusSource`, `RecordingChatSender` and `ManualClock`
//! that satisfy the trait contracts without any network access.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::cursor::{Clock, PollCursor};
use crate::error::{DeliveryError, FetchError};
use crate::notifier::ChatSender;
use crate::source::StatusSource;

// ---------------------------------------------------------------------------
// ScriptedStatusSource
// ---------------------------------------------------------------------------

/// Replays a fixed script of fetch results, then repeats a fallback.
#[derive(Debug)]
pub struct ScriptedStatusSource {
    script: Mutex<VecDeque<Result<Value, FetchError>>>,
    fallback: Result<Value, FetchError>,
    requests: Mutex<Vec<i64>>,
}

impl ScriptedStatusSource {
    /// Script followed by an empty snapshot forever.
    pub fn new(script: Vec<Result<Value, FetchError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: Ok(json!({"homeworks": [], "current_date": 0})),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Same result on every call.
    pub fn always(result: Result<Value, FetchError>) -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            fallback: result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// `from_date` values seen so far, in call order.
    pub fn requests(&self) -> Vec<i64> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StatusSource for ScriptedStatusSource {
    async fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        self.requests.lock().unwrap().push(from_date);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

// ---------------------------------------------------------------------------
// RecordingChatSender
// ---------------------------------------------------------------------------

/// Records delivered messages; optionally fails every delivery.
#[derive(Debug, Default)]
pub struct RecordingChatSender {
    delivered: Mutex<Vec<(String, String)>>,
    attempts: Mutex<usize>,
    failure: Option<String>,
}

impl RecordingChatSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every send fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        Self {
            failure: Some(reason.to_string()),
            ..Self::default()
        }
    }

    /// Successfully delivered `(chat_id, text)` pairs.
    pub fn messages(&self) -> Vec<(String, String)> {
        self.delivered.lock().unwrap().clone()
    }

    /// Texts only, in delivery order.
    pub fn texts(&self) -> Vec<String> {
        self.messages().into_iter().map(|(_, text)| text).collect()
    }

    /// Number of send calls, successful or not.
    pub fn attempts(&self) -> usize {
        *self.attempts.lock().unwrap()
    }
}

#[async_trait]
impl ChatSender for RecordingChatSender {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        *self.attempts.lock().unwrap() += 1;
        if let Some(reason) = &self.failure {
            return Err(DeliveryError(reason.clone()));
        }
        self.delivered
            .lock()
            .unwrap()
            .push((chat_id.to_string(), text.to_string()));
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ManualClock
// ---------------------------------------------------------------------------

/// Deterministic clock: returns the current reading, then moves by `step`.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<f64>,
    step: f64,
}

impl ManualClock {
    pub fn fixed(now: f64) -> Self {
        Self::stepping(now, 0.0)
    }

    pub fn stepping(start: f64, step: f64) -> Self {
        Self {
            now: Mutex::new(start),
            step,
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> PollCursor {
        let mut now = self.now.lock().unwrap();
        let reading = *now;
        *now += self.step;
        PollCursor(reading)
    }
}
