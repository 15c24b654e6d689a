use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::EntryError;

/// The mutation kind carried by a message.
///
/// The set is closed: anything other than `create`, `update` or
/// `delete` is rejected with [`EntryError::UnsupportedAction`] at the
/// point where a message is constructed or decoded. The materializer
/// therefore never sees an unknown action and can match exhaustively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Action {
    /// Creates a new instance.
    Create,

    /// Updates an existing instance.
    Update,

    /// Tombstones an existing instance.
    Delete,
}

impl Action {
    /// Parse an action from its wire string.
    pub fn parse(s: &str) -> Result<Self, EntryError> {
        match s {
            "create" => Ok(Action::Create),
            "update" => Ok(Action::Update),
            "delete" => Ok(Action::Delete),
            other => Err(EntryError::UnsupportedAction {
                action: other.to_string(),
            }),
        }
    }

    /// The wire string for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

impl FromStr for Action {
    type Err = EntryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Action::parse(s)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Action::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_actions() {
        assert_eq!(Action::parse("create").unwrap(), Action::Create);
        assert_eq!(Action::parse("update").unwrap(), Action::Update);
        assert_eq!(Action::parse("delete").unwrap(), Action::Delete);
    }

    #[test]
    fn unknown_action_is_rejected_on_parse() {
        let error = Action::parse("rename").unwrap_err();
        assert_eq!(
            error,
            EntryError::UnsupportedAction {
                action: "rename".to_string()
            }
        );
    }

    #[test]
    fn unknown_action_is_rejected_on_decode() {
        let result: Result<Action, _> = serde_json::from_str("\"rename\"");
        let message = result.unwrap_err().to_string();
        assert!(message.contains("unsupported action"));
    }

    #[test]
    fn serde_roundtrip_uses_wire_strings() {
        for action in [Action::Create, Action::Update, Action::Delete] {
            let json = serde_json::to_string(&action).unwrap();
            assert_eq!(json, format!("\"{action}\""));
            let parsed: Action = serde_json::from_str(&json).unwrap();
            assert_eq!(parsed, action);
        }
    }
}
