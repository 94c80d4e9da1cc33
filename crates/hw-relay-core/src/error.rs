//! Error taxonomy for the relay.
//!
//! The Display texts of the poll errors are relayed verbatim into the chat
//! (after the failure prefix), so they are written for the chat reader.

use thiserror::Error;

/// Failure while fetching from the status API.
///
/// Transport faults, non-200 responses and undecodable bodies all collapse
/// into this one kind; only the message tells them apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct FetchError {
    message: String,
}

impl FetchError {
    /// Connection-level failure (DNS, refused connection, TLS, ...).
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Ошибка направления запроса к API проверки домашних работ: {err}."),
        }
    }

    /// The API answered with something other than 200 OK.
    pub fn status(code: u16) -> Self {
        Self {
            message: format!("Ошибка {code} при направлении запроса к API проверки домашних работ."),
        }
    }

    /// The body was not valid JSON.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self {
            message: format!("Ошибка при получении ответа: {err}"),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The decoded API response does not have the expected shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Полученный ответ не является словарем.")]
    NotAnObject,

    #[error("В ответе отсутствует информация о домашних заданиях.")]
    MissingHomeworks,

    #[error("В ответе отсутствует информация о текущей дате.")]
    MissingCurrentDate,

    #[error("Значение ключа homeworks не является списком.")]
    HomeworksNotAList,
}

/// A homework record is missing a field or carries an unknown status.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Ключ \"status\" отсутствует.")]
    MissingStatus,

    #[error("Ключ \"homework_name\" отсутствует.")]
    MissingHomeworkName,

    #[error("Неизвестный статус: {status}")]
    UnknownStatus { status: String },
}

/// Everything that can make a single tick fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PollError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Field(#[from] FieldError),
}

impl PollError {
    /// Stable label used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            PollError::Fetch(_) => "fetch",
            PollError::Shape(_) => "shape",
            PollError::Field(_) => "field",
        }
    }
}

/// Chat delivery failed. Never escapes the notifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Ошибка отправки сообщения в чат: {0}")]
pub struct DeliveryError(pub String);

// The Bot API URL embeds the bot token, so it is stripped before rendering.
impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        DeliveryError(err.without_url().to_string())
    }
}

/// Startup configuration problems.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .names.join(", "))]
    Missing { names: Vec<&'static str> },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_kinds_share_one_type() {
        let transport = FetchError::transport("connection refused");
        let status = FetchError::status(503);
        let decode = FetchError::decode("expected value at line 1 column 1");

        assert!(transport.message().contains("connection refused"));
        assert!(status.to_string().contains("503"));
        assert!(decode.to_string().starts_with("Ошибка при получении ответа"));
    }

    #[test]
    fn test_poll_error_is_transparent() {
        let err: PollError = ShapeError::MissingCurrentDate.into();
        assert_eq!(err.to_string(), ShapeError::MissingCurrentDate.to_string());
        assert_eq!(err.kind(), "shape");
    }

    #[test]
    fn test_poll_error_kinds() {
        assert_eq!(PollError::from(FetchError::status(500)).kind(), "fetch");
        assert_eq!(PollError::from(FieldError::MissingStatus).kind(), "field");
    }

    #[test]
    fn test_unknown_status_names_the_status() {
        let err = FieldError::UnknownStatus {
            status: "pending".to_string(),
        };
        assert!(err.to_string().contains("pending"));
    }

    #[test]
    fn test_config_error_lists_all_names() {
        let err = ConfigError::Missing {
            names: vec!["API_TOKEN", "CHAT_ID"],
        };
        assert_eq!(
            err.to_string(),
            "missing required environment variables: API_TOKEN, CHAT_ID"
        );
    }
}
