//! Interaction data models.
//!
//! - `Interaction`: one stored ledger row
//! - `InteractionInput`, `InteractionPatch`: request bodies for create and edit

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionKind {
    Conversation,
    Call,
    Removal,
}

impl InteractionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionKind::Conversation => "CONVERSATION",
            InteractionKind::Call => "CALL",
            InteractionKind::Removal => "REMOVAL",
        }
    }
}

/// A logged interaction. `crumbs` is derived once at creation and never recomputed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Interaction {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Messages, minutes or crumbs to remove, depending on `kind`.
    pub magnitude: i64,
    pub crumbs: i64,
    pub created_at: DateTime<Utc>,
}

/// Body for creating an interaction. Any `crumbs` sent by the client is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InteractionInput {
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    #[serde(alias = "count_or_duration")]
    pub magnitude: i64,
}

/// Partial edit of an existing interaction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InteractionPatch {
    #[serde(rename = "type", default)]
    pub kind: Option<InteractionKind>,
    #[serde(alias = "count_or_duration", default)]
    pub magnitude: Option<i64>,
}

impl From<InteractionInput> for InteractionPatch {
    fn from(input: InteractionInput) -> Self {
        Self {
            kind: Some(input.kind),
            magnitude: Some(input.magnitude),
        }
    }
}

impl InteractionPatch {
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.magnitude.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_accepts_legacy_field_name() {
        let input: InteractionInput =
            serde_json::from_str(r#"{"type":"CALL","count_or_duration":12}"#).unwrap();
        assert_eq!(input.kind, InteractionKind::Call);
        assert_eq!(input.magnitude, 12);
    }

    #[test]
    fn input_ignores_client_crumbs() {
        let input: InteractionInput =
            serde_json::from_str(r#"{"type":"REMOVAL","magnitude":3,"crumbs":999}"#).unwrap();
        assert_eq!(input.kind, InteractionKind::Removal);
        assert_eq!(input.magnitude, 3);
    }

    #[test]
    fn input_rejects_unknown_kind() {
        assert!(serde_json::from_str::<InteractionInput>(r#"{"type":"HUG","magnitude":1}"#).is_err());
    }

    #[test]
    fn input_rejects_non_integer_magnitude() {
        assert!(
            serde_json::from_str::<InteractionInput>(r#"{"type":"CALL","magnitude":"ten"}"#).is_err()
        );
        assert!(
            serde_json::from_str::<InteractionInput>(r#"{"type":"CALL","magnitude":2.5}"#).is_err()
        );
        assert!(serde_json::from_str::<InteractionInput>(r#"{"type":"CALL"}"#).is_err());
    }

    #[test]
    fn interaction_serializes_type_field() {
        let interaction = Interaction {
            id: 7,
            kind: InteractionKind::Conversation,
            magnitude: 9,
            crumbs: 1,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let value = serde_json::to_value(&interaction).unwrap();
        assert_eq!(value["type"], "CONVERSATION");
        assert_eq!(value["crumbs"], 1);
    }

    #[test]
    fn empty_patch_is_detected() {
        let patch: InteractionPatch = serde_json::from_str("{}").unwrap();
        assert!(patch.is_empty());
    }
}
