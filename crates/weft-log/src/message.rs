use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use weft_types::SchemaId;

use crate::action::Action;
use crate::error::EntryError;

/// Field name to value mapping carried by create and update messages.
///
/// A `BTreeMap` keeps field order deterministic, so encoding the same
/// message twice yields identical bytes and identical hashes.
pub type FieldMap = BTreeMap<String, Value>;

/// The mutation payload optionally carried by an entry.
///
/// Messages are constructed through the checked `new_*` constructors
/// or [`Message::from_parts`] for already-decoded wire records. Create
/// and update messages carry at least one field; delete messages carry
/// none.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    action: Action,
    schema: SchemaId,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<FieldMap>,
}

impl Message {
    /// A create message instantiating a new instance.
    pub fn new_create(schema: SchemaId, fields: FieldMap) -> Result<Self, EntryError> {
        if fields.is_empty() {
            return Err(EntryError::EmptyFields);
        }
        Ok(Self {
            action: Action::Create,
            schema,
            fields: Some(fields),
        })
    }

    /// An update message mutating an existing instance.
    pub fn new_update(schema: SchemaId, fields: FieldMap) -> Result<Self, EntryError> {
        if fields.is_empty() {
            return Err(EntryError::EmptyFields);
        }
        Ok(Self {
            action: Action::Update,
            schema,
            fields: Some(fields),
        })
    }

    /// A delete message tombstoning an existing instance.
    pub fn new_delete(schema: SchemaId) -> Self {
        Self {
            action: Action::Delete,
            schema,
            fields: None,
        }
    }

    /// Assemble a message from decoded wire parts.
    ///
    /// This is the boundary where raw action strings are checked: an
    /// unknown action fails with [`EntryError::UnsupportedAction`] and
    /// the field shape is validated against the action.
    pub fn from_parts(
        action: &str,
        schema: SchemaId,
        fields: Option<FieldMap>,
    ) -> Result<Self, EntryError> {
        let action = Action::parse(action)?;
        match action {
            Action::Create | Action::Update => {
                let fields = fields.filter(|f| !f.is_empty()).ok_or(EntryError::EmptyFields)?;
                Ok(Self {
                    action,
                    schema,
                    fields: Some(fields),
                })
            }
            Action::Delete => {
                if fields.is_some() {
                    return Err(EntryError::UnexpectedFields);
                }
                Ok(Self {
                    action,
                    schema,
                    fields: None,
                })
            }
        }
    }

    /// The mutation kind of this message.
    pub fn action(&self) -> Action {
        self.action
    }

    /// The schema the mutated instance claims to follow.
    pub fn schema(&self) -> SchemaId {
        self.schema
    }

    /// The field payload, if the action carries one.
    pub fn fields(&self) -> Option<&FieldMap> {
        self.fields.as_ref()
    }

    /// Returns `true` if this message carries a field payload.
    pub fn has_fields(&self) -> bool {
        self.fields.is_some()
    }

    pub fn is_create(&self) -> bool {
        self.action == Action::Create
    }

    pub fn is_update(&self) -> bool {
        self.action == Action::Update
    }

    pub fn is_delete(&self) -> bool {
        self.action == Action::Delete
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn schema() -> SchemaId {
        SchemaId::derive("venue")
    }

    fn fields(pairs: Vec<(&str, Value)>) -> FieldMap {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect()
    }

    #[test]
    fn create_requires_fields() {
        let error = Message::new_create(schema(), FieldMap::new()).unwrap_err();
        assert_eq!(error, EntryError::EmptyFields);

        let message =
            Message::new_create(schema(), fields(vec![("name", json!("Panda Cafe"))])).unwrap();
        assert!(message.is_create());
        assert!(message.has_fields());
    }

    #[test]
    fn update_requires_fields() {
        let error = Message::new_update(schema(), FieldMap::new()).unwrap_err();
        assert_eq!(error, EntryError::EmptyFields);
    }

    #[test]
    fn delete_carries_no_fields() {
        let message = Message::new_delete(schema());
        assert!(message.is_delete());
        assert!(!message.has_fields());
    }

    #[test]
    fn from_parts_rejects_unsupported_action() {
        let error = Message::from_parts(
            "rename",
            schema(),
            Some(fields(vec![("name", json!("x"))])),
        )
        .unwrap_err();
        assert_eq!(
            error,
            EntryError::UnsupportedAction {
                action: "rename".to_string()
            }
        );
    }

    #[test]
    fn from_parts_rejects_fields_on_delete() {
        let error = Message::from_parts(
            "delete",
            schema(),
            Some(fields(vec![("name", json!("x"))])),
        )
        .unwrap_err();
        assert_eq!(error, EntryError::UnexpectedFields);
    }

    #[test]
    fn from_parts_rejects_missing_fields_on_create() {
        assert_eq!(
            Message::from_parts("create", schema(), None).unwrap_err(),
            EntryError::EmptyFields
        );
        assert_eq!(
            Message::from_parts("create", schema(), Some(FieldMap::new())).unwrap_err(),
            EntryError::EmptyFields
        );
    }

    #[test]
    fn serde_roundtrip() {
        let message =
            Message::new_update(schema(), fields(vec![("owner", json!("しろくま"))])).unwrap();
        let json = serde_json::to_string(&message).unwrap();
        let parsed: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(message, parsed);
    }
}
