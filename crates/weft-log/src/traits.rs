use weft_types::{Author, EntryHash};

use crate::entry::Entry;
use crate::error::LogError;
use crate::message::Message;

/// Write boundary for append-only author logs.
pub trait LogWriter: Send + Sync {
    /// Publish a new entry at the tail of `author`'s log, assigning
    /// the next sequence number and deriving the entry hash.
    fn publish(&self, author: &Author, message: Option<Message>) -> Result<Entry, LogError>;

    /// Append an already-built entry (e.g. received from a peer).
    /// Fails unless it carries the expected next sequence number.
    fn append(&self, entry: Entry) -> Result<(), LogError>;
}

/// Read boundary for log query and materialization input.
pub trait LogReader: Send + Sync {
    fn head(&self, author: &Author) -> Result<Option<Entry>, LogError>;

    fn read_all(&self, author: &Author) -> Result<Vec<Entry>, LogError>;

    fn get_by_hash(&self, hash: EntryHash) -> Result<Option<Entry>, LogError>;

    fn authors(&self) -> Result<Vec<Author>, LogError>;

    fn entry_count(&self, author: &Author) -> Result<u64, LogError>;
}
