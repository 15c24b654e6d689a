use thiserror::Error;
use weft_log::Action;
use weft_types::{EntryHash, SeqNum};

/// Errors produced while materializing log entries.
///
/// Any of these aborts the whole materialization call: returning a
/// partial instance mapping would hand the caller an internally
/// inconsistent document set. Callers needing partial-result tolerance
/// must filter entries before invocation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    #[error("{action} at seq {seq} references unknown instance {}", .id.short_hex())]
    UnknownInstance {
        id: EntryHash,
        seq: SeqNum,
        action: Action,
    },

    #[error("malformed {action} message at seq {seq}: {reason}")]
    MalformedMessage {
        seq: SeqNum,
        action: Action,
        reason: String,
    },
}

/// Convenience alias for materialization results.
pub type MaterializeResult<T> = Result<T, MaterializeError>;
