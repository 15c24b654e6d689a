use std::collections::btree_map::Iter;
use std::collections::BTreeMap;

use tracing::debug;
use weft_log::{Action, Entry};
use weft_types::EntryHash;

use crate::error::{MaterializeError, MaterializeResult};
use crate::instance::Instance;
use crate::order::ordered_mutations;

/// Result of materializing a collection of log entries.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Materialization {
    instances: BTreeMap<EntryHash, Instance>,
    evaluated_entries: u64,
    applied_mutations: u64,
    ignored_mutations: u64,
}

impl Materialization {
    /// The instance for an object id, if one was materialized.
    pub fn get(&self, id: &EntryHash) -> Option<&Instance> {
        self.instances.get(id)
    }

    /// The full object-id to instance mapping.
    pub fn instances(&self) -> &BTreeMap<EntryHash, Instance> {
        &self.instances
    }

    /// Iterate over all materialized instances in id order.
    pub fn iter(&self) -> Iter<'_, EntryHash, Instance> {
        self.instances.iter()
    }

    /// Number of materialized instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Total entries handed to the call, including payload-less ones.
    pub fn evaluated_entries(&self) -> u64 {
        self.evaluated_entries
    }

    /// Mutations that changed an instance (create, update, delete).
    pub fn applied_mutations(&self) -> u64 {
        self.applied_mutations
    }

    /// Mutations dropped because their instance was already tombstoned.
    pub fn ignored_mutations(&self) -> u64 {
        self.ignored_mutations
    }
}

/// The materialization engine.
///
/// A pure, synchronous, single-pass fold: entries are filtered for
/// relevance, ordered by sequence number, and reduced into per-object
/// instances. Nothing is persisted between calls; every invocation
/// recomputes the full projection from its input.
pub struct Materializer;

impl Materializer {
    /// Fold `entries` into a mapping of object id to instance.
    ///
    /// The object id is the hash carried on the entry being folded, so
    /// an update or delete reaches an instance only if it carries the
    /// same hash value as the entry that created it (see DESIGN.md).
    ///
    /// Fails on the first update or delete addressing an id with no
    /// live instance, or on a create/update message without fields; no
    /// partial mapping is returned in either case.
    pub fn materialize(entries: &[Entry]) -> MaterializeResult<Materialization> {
        let mut instances: BTreeMap<EntryHash, Instance> = BTreeMap::new();
        let mut applied_mutations = 0u64;
        let mut ignored_mutations = 0u64;

        for entry in ordered_mutations(entries) {
            let Some(message) = entry.message() else {
                continue;
            };

            match message.action() {
                Action::Create => {
                    if instances.get(&entry.hash).is_some_and(|i| i.is_deleted()) {
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "create ignored, instance is tombstoned"
                        );
                        ignored_mutations += 1;
                        continue;
                    }

                    // A second create at a live id starts the instance
                    // over; prior fields and entry history are dropped.
                    let instance = Instance::created(entry, message)?;
                    if instances.insert(entry.hash, instance).is_some() {
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "instance re-created, prior state discarded"
                        );
                    } else {
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "instance created"
                        );
                    }
                    applied_mutations += 1;
                }
                Action::Update => match instances.get_mut(&entry.hash) {
                    Some(instance) if instance.is_deleted() => {
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "update ignored, instance is tombstoned"
                        );
                        ignored_mutations += 1;
                    }
                    Some(instance) => {
                        instance.apply_update(entry, message)?;
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "instance updated"
                        );
                        applied_mutations += 1;
                    }
                    None => {
                        return Err(MaterializeError::UnknownInstance {
                            id: entry.hash,
                            seq: entry.seq_num,
                            action: Action::Update,
                        });
                    }
                },
                Action::Delete => match instances.get_mut(&entry.hash) {
                    Some(instance) if instance.is_deleted() => {
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "delete ignored, instance is tombstoned"
                        );
                        ignored_mutations += 1;
                    }
                    Some(instance) => {
                        instance.apply_delete(entry);
                        debug!(
                            id = %entry.hash.short_hex(),
                            seq = %entry.seq_num,
                            "instance tombstoned"
                        );
                        applied_mutations += 1;
                    }
                    None => {
                        return Err(MaterializeError::UnknownInstance {
                            id: entry.hash,
                            seq: entry.seq_num,
                            action: Action::Delete,
                        });
                    }
                },
            }
        }

        Ok(Materialization {
            instances,
            evaluated_entries: entries.len() as u64,
            applied_mutations,
            ignored_mutations,
        })
    }
}
