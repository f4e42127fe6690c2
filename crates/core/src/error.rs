use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ScoreInputError {
    #[error("score must be a whole number, got {0:?}")]
    NotANumber(String),
    #[error("score must not be negative, got {0:?}")]
    Negative(String),
    #[error("score is too large: {0:?}")]
    TooLarge(String),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown player {0}")]
    UnknownPlayer(String),
    #[error("{0} is not an editable row of the current sheet")]
    UnknownCategory(String),
    #[error("invalid score: {0}")]
    InvalidScore(#[from] ScoreInputError),
}
