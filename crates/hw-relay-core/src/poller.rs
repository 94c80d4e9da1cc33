//! One poll iteration: fetch -> validate -> extract.

use crate::cursor::{Clock, PollCursor};
use crate::error::PollError;
use crate::response::validate;
use crate::source::StatusSource;
use crate::verdict::extract;

/// Message destined for the chat.
pub type Notification = String;

/// Result of one tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Cursor for the next tick: the clock reading taken when this tick
    /// began. Advances on failed ticks too.
    pub next_cursor: PollCursor,
    /// `Ok(None)` when nothing changed since the cursor.
    pub result: Result<Option<Notification>, PollError>,
}

/// Stateless orchestrator over a status source and a clock.
pub struct StatusPoller<S, C> {
    source: S,
    clock: C,
}

impl<S: StatusSource, C: Clock> StatusPoller<S, C> {
    pub fn new(source: S, clock: C) -> Self {
        StatusPoller { source, clock }
    }

    /// Run one iteration against `cursor`.
    pub async fn tick(&self, cursor: PollCursor) -> TickOutcome {
        let started = self.clock.now();
        let result = self.poll(cursor).await;
        TickOutcome {
            next_cursor: started,
            result,
        }
    }

    async fn poll(&self, cursor: PollCursor) -> Result<Option<Notification>, PollError> {
        let raw = self.source.fetch(cursor.from_date()).await?;
        let response = validate(raw)?;

        // Only the most recent submission is reported.
        match response.latest() {
            None => Ok(None),
            Some(record) => Ok(Some(extract(record)?)),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FetchError, FieldError, ShapeError};
    use crate::fakes::{ManualClock, ScriptedStatusSource};
    use serde_json::json;

    fn poller(
        script: Vec<Result<serde_json::Value, FetchError>>,
        clock: ManualClock,
    ) -> StatusPoller<ScriptedStatusSource, ManualClock> {
        StatusPoller::new(ScriptedStatusSource::new(script), clock)
    }

    #[tokio::test]
    async fn test_empty_homeworks_yields_no_notification() {
        let poller = poller(
            vec![Ok(json!({"homeworks": [], "current_date": 1010}))],
            ManualClock::fixed(2000.0),
        );

        let outcome = poller.tick(PollCursor(1000.0)).await;

        assert_eq!(outcome.result, Ok(None));
        assert_eq!(outcome.next_cursor, PollCursor(2000.0));
        assert_eq!(poller.source().requests(), vec![1000]);
    }

    #[tokio::test]
    async fn test_first_record_becomes_notification() {
        let poller = poller(
            vec![Ok(json!({
                "homeworks": [
                    {"homework_name": "new.zip", "status": "reviewing"},
                    {"homework_name": "old.zip", "status": "bogus"}
                ],
                "current_date": 1
            }))],
            ManualClock::fixed(2000.0),
        );

        let outcome = poller.tick(PollCursor(1000.0)).await;

        assert_eq!(
            outcome.result,
            Ok(Some(
                "Изменился статус проверки работы \"new.zip\". Работа взята на проверку ревьюером."
                    .to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_fetch_error_propagates_and_cursor_still_advances() {
        let poller = poller(
            vec![Err(FetchError::status(500))],
            ManualClock::fixed(2000.0),
        );

        let outcome = poller.tick(PollCursor(1000.0)).await;

        assert_eq!(outcome.result, Err(PollError::Fetch(FetchError::status(500))));
        assert_eq!(outcome.next_cursor, PollCursor(2000.0));
    }

    #[tokio::test]
    async fn test_shape_error_propagates() {
        let poller = poller(vec![Ok(json!({"homeworks": []}))], ManualClock::fixed(1.0));
        let outcome = poller.tick(PollCursor(0.0)).await;
        assert_eq!(
            outcome.result,
            Err(PollError::Shape(ShapeError::MissingCurrentDate))
        );
    }

    #[tokio::test]
    async fn test_field_error_propagates() {
        let poller = poller(
            vec![Ok(json!({
                "homeworks": [{"homework_name": "x", "status": "pending"}],
                "current_date": 1
            }))],
            ManualClock::fixed(1.0),
        );
        let outcome = poller.tick(PollCursor(0.0)).await;
        assert_eq!(
            outcome.result,
            Err(PollError::Field(FieldError::UnknownStatus {
                status: "pending".to_string()
            }))
        );
    }

    #[tokio::test]
    async fn test_cursor_is_taken_before_fetch() {
        // The clock moves on every reading; the tick must report the first.
        let poller = poller(
            vec![Ok(json!({"homeworks": [], "current_date": 1}))],
            ManualClock::stepping(5000.0, 30.0),
        );
        let outcome = poller.tick(PollCursor(1000.0)).await;
        assert_eq!(outcome.next_cursor, PollCursor(5000.0));
    }
}
