use crate::ScoreInputError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const MAX_PLAYER_NAME_LENGTH: usize = 12;

/// Category name to entered score. `None` means not played yet, which is not
/// the same as a crossed-out `Some(0)`.
pub type ScoreMap = BTreeMap<String, Option<i64>>;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scores: ScoreMap,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: clamp_player_name(&name.into()),
            scores: ScoreMap::new(),
        }
    }

    /// The entered value for `category`, if any.
    pub fn entry(&self, category: &str) -> Option<i64> {
        self.scores.get(category).copied().flatten()
    }

    /// The value used in totals: unset and absent both count as zero.
    pub fn points(&self, category: &str) -> i64 {
        self.entry(category).unwrap_or(0)
    }

    pub fn with_score(&self, category: &str, value: Option<i64>) -> Self {
        let mut next = self.clone();
        next.scores.insert(category.to_string(), value);
        next
    }

    pub fn with_name(&self, name: &str) -> Self {
        Self {
            name: clamp_player_name(name),
            ..self.clone()
        }
    }
}

pub fn clamp_player_name(name: &str) -> String {
    name.chars().take(MAX_PLAYER_NAME_LENGTH).collect()
}

/// Parse a raw cell value. Empty input clears the cell.
pub fn parse_score_input(raw: &str) -> Result<Option<i64>, ScoreInputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        if !rest.is_empty() && rest.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(ScoreInputError::Negative(trimmed.to_string()));
        }
    }
    if !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ScoreInputError::NotANumber(trimmed.to_string()));
    }
    trimmed
        .parse::<i64>()
        .map(Some)
        .map_err(|_| ScoreInputError::TooLarge(trimmed.to_string()))
}
