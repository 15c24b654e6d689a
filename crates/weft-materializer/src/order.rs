//! Relevance filter and ordering stage.
//!
//! Entries may arrive in any network or storage order; the reducer
//! requires a deterministic global order to produce the same
//! projection for every retrieval order.

use weft_log::Entry;

/// Drop entries without a mutation payload and order the rest by
/// ascending sequence number.
///
/// Payload-less entries are log-level bookkeeping; they must never
/// reach the reducer or appear in any instance's entry history. The
/// sort is stable, so entries with equal sequence numbers (not
/// expected in a well-formed log) keep their input order instead of
/// being reordered arbitrarily.
pub fn ordered_mutations(entries: &[Entry]) -> Vec<&Entry> {
    let mut mutations: Vec<&Entry> = entries.iter().filter(|e| e.has_message()).collect();
    mutations.sort_by_key(|e| e.seq_num);
    mutations
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use weft_log::{FieldMap, Message};
    use weft_types::{Author, EntryHash, SchemaId, SeqNum};

    use super::*;

    fn mutation_entry(seq: u64, tag: &[u8]) -> Entry {
        let fields: FieldMap = [("n".to_string(), json!(seq))].into_iter().collect();
        Entry::new(
            SeqNum::new(seq),
            Author::from_public_key([1; 32]),
            EntryHash::from_bytes(tag),
            Some(Message::new_create(SchemaId::derive("venue"), fields).unwrap()),
        )
    }

    fn bare_entry(seq: u64, tag: &[u8]) -> Entry {
        Entry::new(
            SeqNum::new(seq),
            Author::from_public_key([1; 32]),
            EntryHash::from_bytes(tag),
            None,
        )
    }

    #[test]
    fn sorts_by_seq_num_ascending() {
        let entries = vec![
            mutation_entry(3, b"c"),
            mutation_entry(1, b"a"),
            mutation_entry(2, b"b"),
        ];
        let ordered = ordered_mutations(&entries);
        let seqs: Vec<u64> = ordered.iter().map(|e| e.seq_num.as_u64()).collect();
        assert_eq!(seqs, vec![1, 2, 3]);
    }

    #[test]
    fn drops_entries_without_payload() {
        let entries = vec![
            bare_entry(1, b"a"),
            mutation_entry(2, b"b"),
            bare_entry(3, b"c"),
        ];
        let ordered = ordered_mutations(&entries);
        assert_eq!(ordered.len(), 1);
        assert_eq!(ordered[0].seq_num, SeqNum::new(2));
    }

    #[test]
    fn equal_seq_nums_keep_input_order() {
        let first = mutation_entry(5, b"first");
        let second = mutation_entry(5, b"second");
        let entries = vec![first.clone(), second.clone()];

        let ordered = ordered_mutations(&entries);
        assert_eq!(ordered[0].hash, first.hash);
        assert_eq!(ordered[1].hash, second.hash);
    }
}
