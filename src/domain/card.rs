use crate::domain::column::ColumnId;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Stable identifier of a card, assigned by the external system
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for CardId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A draggable record belonging to exactly one column.
///
/// Everything besides `id`, `column` and `label` is carried in `attributes`
/// and never interpreted by the board engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub column: ColumnId,
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Card {
    /// Creates a card with no attributes
    pub fn new(id: impl Into<CardId>, column: impl Into<ColumnId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            column: column.into(),
            label: label.into(),
            attributes: Map::new(),
        }
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Display name used in drag narration, falling back to the id
    pub fn display_label(&self) -> &str {
        if self.label.is_empty() {
            self.id.as_str()
        } else {
            &self.label
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_creation() {
        let card = Card::new("1", "todo", "Fix login");
        assert_eq!(card.id.as_str(), "1");
        assert_eq!(card.column.as_str(), "todo");
        assert!(card.attributes.is_empty());
    }

    #[test]
    fn test_display_label_falls_back_to_id() {
        let card = Card::new("Q-17", "todo", "");
        assert_eq!(card.display_label(), "Q-17");

        let card = Card::new("Q-17", "todo", "Quote for Acme");
        assert_eq!(card.display_label(), "Quote for Acme");
    }

    #[test]
    fn test_attributes_round_trip_untouched() {
        let json = r#"{"id":"7","column":"review","label":"Drawing","customer":"Acme","value":1200}"#;
        let card: Card = serde_json::from_str(json).unwrap();

        assert_eq!(card.id.as_str(), "7");
        assert_eq!(card.attributes.get("customer"), Some(&Value::from("Acme")));
        assert_eq!(card.attributes.get("value"), Some(&Value::from(1200)));

        let back: Value = serde_json::to_value(&card).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_missing_label_defaults_to_empty() {
        let card: Card = serde_json::from_str(r#"{"id":"1","column":"a"}"#).unwrap();
        assert_eq!(card.label, "");
    }
}
