//! Verdict extraction: homework record -> chat message.

use serde_json::Value;

use crate::error::FieldError;
use crate::response::HomeworkRecord;

/// Review status reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    pub const ALL: [HomeworkStatus; 3] = [
        HomeworkStatus::Approved,
        HomeworkStatus::Reviewing,
        HomeworkStatus::Rejected,
    ];

    /// Parse the API status code.
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(HomeworkStatus::Approved),
            "reviewing" => Some(HomeworkStatus::Reviewing),
            "rejected" => Some(HomeworkStatus::Rejected),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "approved",
            HomeworkStatus::Reviewing => "reviewing",
            HomeworkStatus::Rejected => "rejected",
        }
    }

    /// Human-readable verdict text.
    pub fn verdict(&self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for HomeworkStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Build the status-change message for one record.
///
/// Checks run in a fixed order: the `status` key must exist, then both
/// `homework_name` and `status` must be non-null, then the status must be
/// one of the known codes.
pub fn extract(record: &HomeworkRecord) -> Result<String, FieldError> {
    let status = record.get("status").ok_or(FieldError::MissingStatus)?;

    let name = match record.get("homework_name") {
        None | Some(Value::Null) => return Err(FieldError::MissingHomeworkName),
        Some(Value::String(name)) => name.clone(),
        Some(other) => other.to_string(),
    };

    let status = match status {
        Value::Null => return Err(FieldError::MissingStatus),
        Value::String(code) => HomeworkStatus::parse(code).ok_or_else(|| {
            FieldError::UnknownStatus {
                status: code.clone(),
            }
        })?,
        other => {
            return Err(FieldError::UnknownStatus {
                status: other.to_string(),
            })
        }
    };

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {}",
        status.verdict()
    ))
}
