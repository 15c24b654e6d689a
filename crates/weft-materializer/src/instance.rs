use serde::{Deserialize, Serialize};
use serde_json::Value;
use weft_log::{Entry, FieldMap, Message};
use weft_types::{Author, EntryHash, SchemaId};

use crate::error::MaterializeError;
use crate::merge::shallow_merge;

/// The projected current state of one logical object.
///
/// An instance is created by exactly one create entry, carried forward
/// by updates, and tombstoned by at most one delete. Its identity is
/// fixed at creation and never changes. Instances are only built by
/// the materializer; callers get read access through the getters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    fields: FieldMap,
    meta: InstanceMeta,
}

/// Metadata carried alongside an instance's current field values.
/// Everything here is surfaced through the [`Instance`] getters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub(crate) struct InstanceMeta {
    author: Author,
    schema: SchemaId,
    hash: EntryHash,
    deleted: bool,
    edited: bool,
    entries: Vec<Entry>,
}

impl Instance {
    /// Build a fresh instance from a create entry.
    pub(crate) fn created(entry: &Entry, message: &Message) -> Result<Self, MaterializeError> {
        let fields = required_fields(entry, message)?;
        Ok(Self {
            fields,
            meta: InstanceMeta {
                author: entry.author,
                schema: message.schema(),
                hash: entry.hash,
                deleted: false,
                edited: false,
                entries: vec![entry.clone()],
            },
        })
    }

    /// Shallow-merge an update's fields and record the entry.
    pub(crate) fn apply_update(
        &mut self,
        entry: &Entry,
        message: &Message,
    ) -> Result<(), MaterializeError> {
        let incoming = required_fields(entry, message)?;
        shallow_merge(&mut self.fields, &incoming);
        self.meta.edited = true;
        self.meta.entries.push(entry.clone());
        Ok(())
    }

    /// Tombstone: clear the fields, keep the metadata.
    pub(crate) fn apply_delete(&mut self, entry: &Entry) {
        self.fields.clear();
        self.meta.deleted = true;
        self.meta.entries.push(entry.clone());
    }

    /// Current field values.
    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// A single field value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    /// The identity of this object, fixed at creation.
    pub fn id(&self) -> EntryHash {
        self.meta.hash
    }

    /// The author who created this instance.
    pub fn author(&self) -> Author {
        self.meta.author
    }

    /// The schema this instance claims to follow.
    pub fn schema(&self) -> SchemaId {
        self.meta.schema
    }

    /// Returns `true` once a delete entry has tombstoned the instance.
    pub fn is_deleted(&self) -> bool {
        self.meta.deleted
    }

    /// Returns `true` once any update entry has been applied.
    pub fn is_edited(&self) -> bool {
        self.meta.edited
    }

    /// The entries that contributed to this instance, in seq order.
    pub fn entries(&self) -> &[Entry] {
        &self.meta.entries
    }
}

fn required_fields(entry: &Entry, message: &Message) -> Result<FieldMap, MaterializeError> {
    match message.fields() {
        Some(fields) if !fields.is_empty() => Ok(fields.clone()),
        _ => Err(MaterializeError::MalformedMessage {
            seq: entry.seq_num,
            action: message.action(),
            reason: "message carries no fields".into(),
        }),
    }
}
