use std::collections::HashMap;
use std::sync::RwLock;

use tracing::debug;
use weft_types::{Author, EntryHash, SeqNum};

use crate::entry::Entry;
use crate::error::LogError;
use crate::message::Message;
use crate::traits::{LogReader, LogWriter};

/// In-memory log store for tests, local demos, and embedding.
///
/// Keeps one append-only entry stream per author plus a hash index for
/// direct lookup. Sequence monotonicity is enforced on every append,
/// so readers can rely on streams being gap-free and in order.
#[derive(Default)]
pub struct InMemoryLog {
    inner: RwLock<LogState>,
}

#[derive(Default)]
struct LogState {
    logs: HashMap<Author, Vec<Entry>>,
    hash_index: HashMap<EntryHash, (Author, usize)>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    fn push_entry(state: &mut LogState, entry: Entry) -> Result<(), LogError> {
        let log = state.logs.entry(entry.author).or_default();
        let expected = log
            .last()
            .map(|last| last.seq_num.next())
            .unwrap_or_else(SeqNum::first);
        if entry.seq_num != expected {
            return Err(LogError::IntegrityViolation {
                seq: entry.seq_num,
                reason: format!("append attempted out of order; expected seq {expected}"),
            });
        }

        if state.hash_index.contains_key(&entry.hash) {
            return Err(LogError::HashCollision);
        }

        debug!(
            author = %entry.author,
            seq = %entry.seq_num,
            hash = %entry.hash.short_hex(),
            "entry appended"
        );

        state
            .hash_index
            .insert(entry.hash, (entry.author, log.len()));
        log.push(entry);
        Ok(())
    }
}

impl LogWriter for InMemoryLog {
    fn publish(&self, author: &Author, message: Option<Message>) -> Result<Entry, LogError> {
        let mut state = self.inner.write().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log write lock poisoned".into(),
        })?;

        let seq_num = state
            .logs
            .get(author)
            .and_then(|log| log.last())
            .map(|last| last.seq_num.next())
            .unwrap_or_else(SeqNum::first);

        let hash = derive_entry_hash(author, seq_num, message.as_ref())?;
        let entry = Entry::new(seq_num, *author, hash, message);
        Self::push_entry(&mut state, entry.clone())?;
        Ok(entry)
    }

    fn append(&self, entry: Entry) -> Result<(), LogError> {
        let mut state = self.inner.write().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log write lock poisoned".into(),
        })?;

        Self::push_entry(&mut state, entry)
    }
}

impl LogReader for InMemoryLog {
    fn head(&self, author: &Author) -> Result<Option<Entry>, LogError> {
        let state = self.inner.read().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log read lock poisoned".into(),
        })?;

        Ok(state.logs.get(author).and_then(|log| log.last()).cloned())
    }

    fn read_all(&self, author: &Author) -> Result<Vec<Entry>, LogError> {
        let state = self.inner.read().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log read lock poisoned".into(),
        })?;

        Ok(state.logs.get(author).cloned().unwrap_or_default())
    }

    fn get_by_hash(&self, hash: EntryHash) -> Result<Option<Entry>, LogError> {
        let state = self.inner.read().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log read lock poisoned".into(),
        })?;

        let Some((author, index)) = state.hash_index.get(&hash) else {
            return Ok(None);
        };

        Ok(state
            .logs
            .get(author)
            .and_then(|log| log.get(*index))
            .cloned())
    }

    fn authors(&self) -> Result<Vec<Author>, LogError> {
        let state = self.inner.read().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log read lock poisoned".into(),
        })?;

        let mut authors: Vec<_> = state.logs.keys().copied().collect();
        authors.sort();
        Ok(authors)
    }

    fn entry_count(&self, author: &Author) -> Result<u64, LogError> {
        let state = self.inner.read().map_err(|_| LogError::IntegrityViolation {
            seq: SeqNum::new(0),
            reason: "log read lock poisoned".into(),
        })?;

        Ok(state
            .logs
            .get(author)
            .map(|log| log.len() as u64)
            .unwrap_or(0))
    }
}

fn derive_entry_hash(
    author: &Author,
    seq_num: SeqNum,
    message: Option<&Message>,
) -> Result<EntryHash, LogError> {
    let encoded = serde_json::to_vec(&(author, seq_num, message))
        .map_err(|e| LogError::Serialization(e.to_string()))?;

    let mut hasher = blake3::Hasher::new();
    hasher.update(b"weft-entry-v1:");
    hasher.update(&encoded);
    Ok(EntryHash::from_hash(*hasher.finalize().as_bytes()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use weft_types::SchemaId;

    use crate::message::FieldMap;

    use super::*;

    fn create_message(name: &str) -> Message {
        let fields: FieldMap = [("name".to_string(), json!(name))].into_iter().collect();
        Message::new_create(SchemaId::derive("venue"), fields).unwrap()
    }

    #[test]
    fn publish_assigns_monotonic_seq_nums() {
        let log = InMemoryLog::new();
        let author = Author::ephemeral();

        let first = log.publish(&author, Some(create_message("a"))).unwrap();
        let second = log.publish(&author, None).unwrap();

        assert_eq!(first.seq_num, SeqNum::first());
        assert_eq!(second.seq_num, SeqNum::new(2));
        assert_ne!(first.hash, second.hash);
        assert_eq!(log.entry_count(&author).unwrap(), 2);
    }

    #[test]
    fn append_out_of_order_is_rejected() {
        let log = InMemoryLog::new();
        let author = Author::ephemeral();

        let entry = Entry::new(
            SeqNum::new(3),
            author,
            EntryHash::from_bytes(b"later"),
            None,
        );
        let error = log.append(entry).unwrap_err();
        assert!(matches!(
            error,
            LogError::IntegrityViolation { seq, .. } if seq == SeqNum::new(3)
        ));
    }

    #[test]
    fn append_duplicate_hash_is_rejected() {
        let log = InMemoryLog::new();
        let author = Author::ephemeral();
        let hash = EntryHash::from_bytes(b"same");

        log.append(Entry::new(SeqNum::first(), author, hash, None))
            .unwrap();
        let error = log
            .append(Entry::new(SeqNum::new(2), author, hash, None))
            .unwrap_err();
        assert_eq!(error, LogError::HashCollision);
    }

    #[test]
    fn get_by_hash_finds_entry() {
        let log = InMemoryLog::new();
        let author = Author::ephemeral();

        let published = log.publish(&author, Some(create_message("a"))).unwrap();
        let found = log.get_by_hash(published.hash).unwrap();
        assert_eq!(found, Some(published));

        let missing = log.get_by_hash(EntryHash::from_bytes(b"missing")).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn head_and_read_all_track_the_stream() {
        let log = InMemoryLog::new();
        let author = Author::ephemeral();

        assert!(log.head(&author).unwrap().is_none());
        assert!(log.read_all(&author).unwrap().is_empty());

        log.publish(&author, Some(create_message("a"))).unwrap();
        let second = log.publish(&author, Some(create_message("b"))).unwrap();

        assert_eq!(log.head(&author).unwrap(), Some(second));
        assert_eq!(log.read_all(&author).unwrap().len(), 2);
    }

    #[test]
    fn authors_lists_all_logs() {
        let log = InMemoryLog::new();
        let a = Author::ephemeral();
        let b = Author::ephemeral();

        log.publish(&a, None).unwrap();
        log.publish(&b, None).unwrap();

        let authors = log.authors().unwrap();
        assert_eq!(authors.len(), 2);
        assert!(authors.contains(&a) && authors.contains(&b));
    }
}
