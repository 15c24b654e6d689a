use thiserror::Error;
use weft_types::SeqNum;

/// Errors produced when constructing messages or entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("unsupported action: {action:?}")]
    UnsupportedAction { action: String },

    #[error("create and update messages must carry at least one field")]
    EmptyFields,

    #[error("delete messages must not carry fields")]
    UnexpectedFields,
}

/// Errors produced by log store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    #[error("integrity violation at seq {seq}: {reason}")]
    IntegrityViolation { seq: SeqNum, reason: String },

    #[error("entry hash collision detected")]
    HashCollision,

    #[error("serialization error: {0}")]
    Serialization(String),
}
