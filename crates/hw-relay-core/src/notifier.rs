//! Chat delivery.
//!
//! [`Notifier`] is the only component that talks to the chat. Delivery
//! failures stop here: they are logged and the caller carries on.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::obs;

/// Something that can deliver a plain-text message to a chat.
#[async_trait]
pub trait ChatSender: Send + Sync {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

/// Subset of the Bot API reply envelope.
#[derive(Debug, Deserialize)]
struct BotApiReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Telegram Bot API client (`sendMessage` only).
pub struct TelegramClient {
    api_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> reqwest::Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("hw-relay/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(TelegramClient {
            api_url: api_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
            http_client,
        })
    }

    pub fn build_request(&self, chat_id: &str, text: &str) -> reqwest::Result<reqwest::Request> {
        self.http_client
            .post(format!("{}/bot{}/sendMessage", self.api_url, self.token))
            .json(&SendMessage { chat_id, text })
            .build()
    }
}

#[async_trait]
impl ChatSender for TelegramClient {
    async fn send(&self, chat_id: &str, text: &str) -> Result<(), DeliveryError> {
        let request = self.build_request(chat_id, text)?;
        let response = self.http_client.execute(request).await?;
        let status = response.status();
        let body = response.bytes().await?;

        // Error replies usually carry a description; fall back to the status.
        match serde_json::from_slice::<BotApiReply>(&body) {
            Ok(reply) if reply.ok && status.is_success() => Ok(()),
            Ok(reply) => Err(DeliveryError(
                reply
                    .description
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
            )),
            Err(_) if status.is_success() => Ok(()),
            Err(_) => Err(DeliveryError(format!("HTTP {}", status.as_u16()))),
        }
    }
}

/// Delivers messages to the single configured chat.
pub struct Notifier<T> {
    sender: T,
    chat_id: String,
}

impl<T: ChatSender> Notifier<T> {
    pub fn new(sender: T, chat_id: &str) -> Self {
        Notifier {
            sender,
            chat_id: chat_id.to_string(),
        }
    }

    /// Send `message`; a failed delivery is logged, never returned.
    pub async fn notify(&self, message: &str) {
        match self.sender.send(&self.chat_id, message).await {
            Ok(()) => obs::emit_message_sent(&self.chat_id, message),
            Err(err) => obs::emit_delivery_failed(&self.chat_id, &err),
        }
    }

    pub fn chat_id(&self) -> &str {
        &self.chat_id
    }

    pub fn sender(&self) -> &T {
        &self.sender
    }
}
