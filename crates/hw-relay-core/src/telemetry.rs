//! Centralised tracing initialisation for the relay daemon.
//!
//! Call [`init_tracing`] once at program start to configure the global
//! subscriber with an `EnvFilter`, the human line format (or JSON), and an
//! optional log file that mirrors the console.
//!
//! Safe to call more than once; only the first call takes effect.

use std::fs::File;
use std::sync::Mutex;

use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::{FormatEvent, FormatFields, Writer};
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// `timestamp, level, message, source` lines.
///
/// `source` is the event target, i.e. the emitting module path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{}, {}, ",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer, ", {}", meta.target())
    }
}

fn file_layer<S>(log_file: Option<File>) -> Option<impl Layer<S>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    log_file.map(|file| {
        fmt::layer()
            .event_format(LineFormat)
            .with_writer(Mutex::new(file))
            .with_ansi(false)
    })
}

/// Initialise the global tracing subscriber.
///
/// * `json` — emit newline-delimited JSON on stderr instead of lines.
/// * `level` — default verbosity when `RUST_LOG` is not set.
/// * `log_file` — when given, every event is also appended there in the
///   line format.
pub fn init_tracing(json: bool, level: Level, log_file: Option<File>) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_str()));

    if json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr).json())
            .with(file_layer(log_file))
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                fmt::layer()
                    .event_format(LineFormat)
                    .with_writer(std::io::stderr),
            )
            .with(file_layer(log_file))
            .try_init()
            .ok();
    }
}
