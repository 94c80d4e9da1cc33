//! Homework review relay core.
//!
//! Polls the homework status API, turns a status change of the latest
//! submission into a chat message, and delivers it through the Bot API.
//!
//! Pipeline per tick: fetch ([`source`]) -> shape check ([`response`]) ->
//! verdict ([`verdict`]) -> delivery ([`notifier`]), orchestrated by
//! [`poller`] and looped by [`driver`].

pub mod config;
pub mod cursor;
pub mod driver;
pub mod error;
pub mod fakes;
pub mod notifier;
pub mod obs;
pub mod poller;
pub mod response;
pub mod source;
pub mod telemetry;
pub mod verdict;

pub use config::Config;
pub use cursor::{Clock, PollCursor, SystemClock};
pub use driver::{failure_report, Driver, FAILURE_PREFIX, STARTED_MESSAGE};
pub use error::{ConfigError, DeliveryError, FetchError, FieldError, PollError, ShapeError};
pub use notifier::{ChatSender, Notifier, TelegramClient};
pub use poller::{Notification, StatusPoller, TickOutcome};
pub use response::{validate, ApiResponse, HomeworkRecord};
pub use source::{PracticumClient, StatusSource};
pub use telemetry::{init_tracing, LineFormat};
pub use verdict::{extract, HomeworkStatus};
