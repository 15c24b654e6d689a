use std::collections::HashSet;

use weft_types::{Author, SeqNum};

use crate::action::Action;
use crate::entry::Entry;
use crate::error::LogError;
use crate::traits::LogReader;

/// Result of validating one author's stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationReport {
    pub author: Author,
    pub entry_count: u64,
    pub sequence_monotonic: bool,
    pub hashes_unique: bool,
    pub payloads_well_formed: bool,
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Returns `true` if all checks passed.
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// A specific integrity violation detected during validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub seq: SeqNum,
    pub kind: ViolationKind,
    pub description: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    SequenceGap,
    DuplicateHash,
    MalformedPayload,
}

/// Stream integrity validator.
///
/// Materialization assumes gap-free, well-formed input; this is the
/// upstream check that guarantees it before entries are handed over.
pub struct LogValidator;

impl LogValidator {
    /// Validate a single author's stream for all invariants.
    pub fn validate_log<R: LogReader>(
        reader: &R,
        author: &Author,
    ) -> Result<ValidationReport, LogError> {
        let entries = reader.read_all(author)?;
        let mut violations = Vec::new();
        let mut sequence_monotonic = true;
        let mut hashes_unique = true;
        let mut payloads_well_formed = true;
        let mut seen_hashes = HashSet::new();

        for (index, entry) in entries.iter().enumerate() {
            let expected_seq = SeqNum::new((index + 1) as u64);
            if entry.seq_num != expected_seq {
                sequence_monotonic = false;
                violations.push(Violation {
                    seq: entry.seq_num,
                    kind: ViolationKind::SequenceGap,
                    description: format!("expected seq {expected_seq}, got {}", entry.seq_num),
                });
            }

            if !seen_hashes.insert(entry.hash) {
                hashes_unique = false;
                violations.push(Violation {
                    seq: entry.seq_num,
                    kind: ViolationKind::DuplicateHash,
                    description: format!("entry hash {} already seen", entry.hash.short_hex()),
                });
            }

            if let Some(violation) = check_payload(entry) {
                payloads_well_formed = false;
                violations.push(violation);
            }
        }

        Ok(ValidationReport {
            author: *author,
            entry_count: entries.len() as u64,
            sequence_monotonic,
            hashes_unique,
            payloads_well_formed,
            violations,
        })
    }

    /// Validate every author's stream in the store.
    pub fn validate_all<R: LogReader>(reader: &R) -> Result<Vec<ValidationReport>, LogError> {
        let authors = reader.authors()?;
        let mut reports = Vec::new();
        for author in &authors {
            reports.push(Self::validate_log(reader, author)?);
        }
        Ok(reports)
    }
}

fn check_payload(entry: &Entry) -> Option<Violation> {
    let message = entry.message()?;
    let empty = message.fields().map(|f| f.is_empty()).unwrap_or(true);

    match message.action() {
        Action::Create | Action::Update if empty => Some(Violation {
            seq: entry.seq_num,
            kind: ViolationKind::MalformedPayload,
            description: format!("{} message without fields", message.action()),
        }),
        Action::Delete if message.has_fields() => Some(Violation {
            seq: entry.seq_num,
            kind: ViolationKind::MalformedPayload,
            description: "delete message carries fields".into(),
        }),
        _ => None,
    }
}
