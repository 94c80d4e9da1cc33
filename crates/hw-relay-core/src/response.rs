//! Shape validation of raw status API responses.

use serde_json::Value;

use crate::error::ShapeError;

/// One homework entry as returned by the API.
///
/// Kept as raw JSON: which fields are present and well-formed is decided by
/// [`crate::verdict::extract`], not at decode time.
#[derive(Debug, Clone, PartialEq)]
pub struct HomeworkRecord(pub Value);

impl HomeworkRecord {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// A response that passed shape validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// Most recent submission first.
    pub homeworks: Vec<HomeworkRecord>,
    /// Server time of the snapshot. Required, otherwise unused.
    pub current_date: Value,
}

impl ApiResponse {
    /// The record the relay reports on. Later records are ignored.
    pub fn latest(&self) -> Option<&HomeworkRecord> {
        self.homeworks.first()
    }
}

/// Check that a decoded response is an object with `homeworks` (a list) and
/// `current_date`.
///
/// An empty `homeworks` list is valid: nothing new since the cursor.
pub fn validate(response: Value) -> Result<ApiResponse, ShapeError> {
    let Value::Object(mut map) = response else {
        return Err(ShapeError::NotAnObject);
    };

    let homeworks = map.remove("homeworks").ok_or(ShapeError::MissingHomeworks)?;
    let current_date = map
        .remove("current_date")
        .ok_or(ShapeError::MissingCurrentDate)?;

    let Value::Array(items) = homeworks else {
        return Err(ShapeError::HomeworksNotAList);
    };

    Ok(ApiResponse {
        homeworks: items.into_iter().map(HomeworkRecord).collect(),
        current_date,
    })
}
