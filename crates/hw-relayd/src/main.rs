//! hw-relayd - homework review relay daemon
//!
//! Polls the homework status API every retry period and posts verdict
//! changes, and any polling failure, to one Telegram chat.
//!
//! Secrets are read from the environment (`API_TOKEN`, `BOT_TOKEN`,
//! `CHAT_ID`), optionally via a `.env` file in the working directory.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use hw_relay_core::config::{DEFAULT_ENDPOINT, DEFAULT_TELEGRAM_API_URL};
use hw_relay_core::{
    init_tracing, obs, Config, Driver, Notifier, PracticumClient, StatusPoller, SystemClock,
    TelegramClient,
};
use tracing::Level;

/// `EX_CONFIG` from sysexits(3).
const EXIT_CONFIG_MISSING: u8 = 78;

#[derive(Parser, Debug)]
#[command(name = "hw-relayd")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Relay homework review status changes to Telegram", long_about = None)]
struct Cli {
    /// Enable debug output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines on stderr
    #[arg(long)]
    json: bool,

    /// Homework status API endpoint
    #[arg(long, env = "HOMEWORK_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Telegram Bot API base URL
    #[arg(long, env = "TELEGRAM_API_URL", default_value = DEFAULT_TELEGRAM_API_URL)]
    telegram_api_url: String,

    /// Seconds to sleep between polls
    #[arg(long, env = "RETRY_PERIOD_SECS", default_value_t = 600)]
    retry_secs: u64,

    /// Also append log lines to this file
    #[arg(long, env = "LOG_FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        }
    }

    /// Layer the non-secret CLI settings over the environment config.
    fn apply(&self, config: Config) -> Config {
        config
            .with_endpoint(&self.endpoint)
            .with_telegram_api_url(&self.telegram_api_url)
            .with_retry_period(Duration::from_secs(self.retry_secs))
    }
}

/// Read and layer the configuration; map missing values to the exit code.
///
/// Nothing is sent and no client is built when this fails.
fn startup<F>(cli: &Cli, lookup: F) -> Result<Config, ExitCode>
where
    F: Fn(&str) -> Option<String>,
{
    match Config::from_lookup(lookup) {
        Ok(config) => Ok(cli.apply(config)),
        Err(err) => {
            obs::emit_config_missing(&err);
            Err(ExitCode::from(EXIT_CONFIG_MISSING))
        }
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // A missing .env is fine; the variables may come from the real environment.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_file = cli.log_file.as_deref().map(open_log_file).transpose()?;
    init_tracing(cli.json, cli.level(), log_file);

    let config = match startup(&cli, |name| std::env::var(name).ok()) {
        Ok(config) => config,
        Err(code) => return Ok(code),
    };

    let source = PracticumClient::new(&config.endpoint, &config.api_token)
        .context("Failed to create status API client")?;
    let sender = TelegramClient::new(&config.telegram_api_url, &config.bot_token)
        .context("Failed to create Telegram client")?;

    let driver = Driver::new(
        StatusPoller::new(source, SystemClock),
        Notifier::new(sender, &config.chat_id),
        config.retry_period,
    );

    let cursor = driver.start().await;
    driver.run(cursor).await;

    Ok(ExitCode::SUCCESS)
}
