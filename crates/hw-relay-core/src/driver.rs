//! Runtime driver: the infinite poll / notify / sleep loop.
//!
//! Single-threaded and sequential. The cursor is owned here and handed to
//! each tick by value; the next tick starts only after the sleep ends.

use std::time::Duration;

use crate::cursor::{Clock, PollCursor};
use crate::error::PollError;
use crate::notifier::{ChatSender, Notifier};
use crate::obs;
use crate::poller::StatusPoller;
use crate::source::StatusSource;

/// Sent once before the first poll.
pub const STARTED_MESSAGE: &str = "Telegram бот запущен.";

/// Prefix of every failure report sent to the chat.
pub const FAILURE_PREFIX: &str = "Сбой в работе программы: ";

/// Chat text for a failed tick.
pub fn failure_report(error: &PollError) -> String {
    format!("{FAILURE_PREFIX}{error}")
}

pub struct Driver<S, C, T> {
    poller: StatusPoller<S, C>,
    notifier: Notifier<T>,
    retry_period: Duration,
}

impl<S, C, T> Driver<S, C, T>
where
    S: StatusSource,
    C: Clock,
    T: ChatSender,
{
    pub fn new(poller: StatusPoller<S, C>, notifier: Notifier<T>, retry_period: Duration) -> Self {
        Driver {
            poller,
            notifier,
            retry_period,
        }
    }

    /// Announce startup in the chat and return the initial cursor ("now").
    pub async fn start(&self) -> PollCursor {
        self.notifier.notify(STARTED_MESSAGE).await;
        self.poller.clock().now()
    }

    /// One iteration without the sleep. Returns the cursor for the next one.
    pub async fn step(&self, cursor: PollCursor) -> PollCursor {
        let outcome = self.poller.tick(cursor).await;

        match outcome.result {
            Ok(Some(message)) => {
                obs::emit_status_changed(&message);
                self.notifier.notify(&message).await;
            }
            Ok(None) => obs::emit_status_unchanged(cursor.from_date()),
            Err(err) => {
                let report = failure_report(&err);
                obs::emit_poll_failed(err.kind(), &report);
                self.notifier.notify(&report).await;
            }
        }

        outcome.next_cursor
    }

    /// Poll forever starting from `cursor`. Never returns.
    pub async fn run(&self, mut cursor: PollCursor) {
        obs::emit_relay_started(self.notifier.chat_id(), self.retry_period.as_secs());
        loop {
            cursor = self.step(cursor).await;
            tokio::time::sleep(self.retry_period).await;
        }
    }

    pub fn poller(&self) -> &StatusPoller<S, C> {
        &self.poller
    }

    pub fn notifier(&self) -> &Notifier<T> {
        &self.notifier
    }
}
