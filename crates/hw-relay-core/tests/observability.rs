//! Observability tests: every iteration outcome and every caught fault
//! leaves a log line.

use std::time::Duration;

use hw_relay_core::fakes::{ManualClock, RecordingChatSender, ScriptedStatusSource};
use hw_relay_core::{Driver, FetchError, Notifier, PollCursor, StatusPoller};
use serde_json::json;
use tracing_test::traced_test;

fn driver(
    source: ScriptedStatusSource,
    sender: RecordingChatSender,
) -> Driver<ScriptedStatusSource, ManualClock, RecordingChatSender> {
    Driver::new(
        StatusPoller::new(source, ManualClock::fixed(2000.0)),
        Notifier::new(sender, "42"),
        Duration::from_secs(600),
    )
}

#[tokio::test]
#[traced_test]
async fn test_unchanged_tick_is_logged() {
    let driver = driver(ScriptedStatusSource::new(vec![]), RecordingChatSender::new());
    driver.step(PollCursor(1000.0)).await;

    assert!(logs_contain("poll.unchanged"));
    assert!(logs_contain("Статус проверки работы не изменён."));
}

#[tokio::test]
#[traced_test]
async fn test_status_change_is_logged() {
    let driver = driver(
        ScriptedStatusSource::new(vec![Ok(json!({
            "homeworks": [{"homework_name": "X", "status": "rejected"}],
            "current_date": 1
        }))]),
        RecordingChatSender::new(),
    );
    driver.step(PollCursor(1000.0)).await;

    assert!(logs_contain("poll.status_changed"));
    assert!(logs_contain("chat.sent"));
}

#[tokio::test]
#[traced_test]
async fn test_fetch_failure_is_logged_with_kind() {
    let driver = driver(
        ScriptedStatusSource::new(vec![Err(FetchError::status(500))]),
        RecordingChatSender::new(),
    );
    driver.step(PollCursor(1000.0)).await;

    assert!(logs_contain("poll.failed"));
    assert!(logs_contain("kind=fetch"));
    assert!(logs_contain("Сбой в работе программы: Ошибка 500"));
}

#[tokio::test]
#[traced_test]
async fn test_delivery_failure_is_logged_not_raised() {
    let driver = driver(
        ScriptedStatusSource::new(vec![]),
        RecordingChatSender::failing("Forbidden: bot was blocked by the user"),
    );
    driver.start().await;

    assert!(logs_contain("chat.delivery_failed"));
    assert!(logs_contain("bot was blocked by the user"));
}
