use serde::{Deserialize, Serialize};
use weft_types::{Author, EntryHash, SeqNum};

use crate::action::Action;
use crate::message::Message;

/// One immutable, sequence-numbered unit of an author's append-only log.
///
/// Entries arrive here already decoded and already verified against
/// the author's signature. An entry without a message is log-level
/// bookkeeping (for example a skiplink-only entry) and carries no
/// application mutation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Position within the author's log, strictly increasing.
    pub seq_num: SeqNum,

    /// Identity of the entry's signer.
    pub author: Author,

    /// Content-derived identifier of this specific entry.
    pub hash: EntryHash,

    /// Optional mutation payload.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Message>,
}

impl Entry {
    /// Assemble an entry from its decoded parts.
    pub fn new(
        seq_num: SeqNum,
        author: Author,
        hash: EntryHash,
        message: Option<Message>,
    ) -> Self {
        Self {
            seq_num,
            author,
            hash,
            message,
        }
    }

    /// Returns `true` if this entry carries a mutation payload.
    pub fn has_message(&self) -> bool {
        self.message.is_some()
    }

    /// The mutation payload, if any.
    pub fn message(&self) -> Option<&Message> {
        self.message.as_ref()
    }

    /// The mutation kind, if this entry carries a payload.
    pub fn action(&self) -> Option<Action> {
        self.message.as_ref().map(Message::action)
    }
}
