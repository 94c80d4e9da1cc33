//! Structured observability hooks for the relay lifecycle.
//!
//! Each function emits one event with a stable `event` field so log
//! pipelines can filter on it regardless of the message text. Events carry
//! the target of the component they describe, not this module.

use tracing::{debug, error, info};

const DRIVER: &str = "hw_relay_core::driver";
const NOTIFIER: &str = "hw_relay_core::notifier";
const CONFIG: &str = "hw_relay_core::config";

/// Emit event: relay started polling.
pub fn emit_relay_started(chat_id: &str, retry_secs: u64) {
    info!(target: DRIVER, event = "relay.started", chat_id = %chat_id, retry_secs = retry_secs, "Бот запущен.");
}

/// Emit event: the latest homework changed status.
pub fn emit_status_changed(message: &str) {
    info!(target: DRIVER, event = "poll.status_changed", "{}", message);
}

/// Emit event: nothing new since the cursor.
pub fn emit_status_unchanged(from_date: i64) {
    debug!(target: DRIVER, event = "poll.unchanged", from_date = from_date, "Статус проверки работы не изменён.");
}

/// Emit event: a tick failed; `report` is what goes to the chat.
pub fn emit_poll_failed(kind: &str, report: &str) {
    error!(target: DRIVER, event = "poll.failed", kind = %kind, "{}", report);
}

/// Emit event: message delivered.
pub fn emit_message_sent(chat_id: &str, text: &str) {
    debug!(target: NOTIFIER, event = "chat.sent", chat_id = %chat_id, chars = text.chars().count(), "Сообщение отправлено в чат.");
}

/// Emit event: delivery failed (error level; never escalated).
pub fn emit_delivery_failed(chat_id: &str, error: &dyn std::fmt::Display) {
    error!(target: NOTIFIER, event = "chat.delivery_failed", chat_id = %chat_id, "{}", error);
}

/// Emit event: required configuration missing; the process is about to exit.
pub fn emit_config_missing(error: &dyn std::fmt::Display) {
    error!(target: CONFIG, event = "config.missing", "{}", error);
}
