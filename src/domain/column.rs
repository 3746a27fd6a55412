use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a board column
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColumnId(String);

impl ColumnId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ColumnId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ColumnId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named, ordered bucket of cards
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub label: String,
}

impl Column {
    pub fn new(id: impl Into<ColumnId>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// Caller-supplied board layout: the columns in display order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardLayout {
    pub name: String,
    pub columns: Vec<Column>,
}

impl BoardLayout {
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Gets a column by id
    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|col| &col.id == id)
    }

    /// Checks if the layout knows a column id
    pub fn contains(&self, id: &str) -> bool {
        self.columns.iter().any(|col| col.id.as_str() == id)
    }

    /// Label of a column, falling back to its id for unknown columns
    pub fn label_of<'a>(&'a self, id: &'a ColumnId) -> &'a str {
        self.column(id)
            .map(|col| col.label.as_str())
            .unwrap_or_else(|| id.as_str())
    }
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            name: "Default Board".to_string(),
            columns: vec![
                Column::new("new", "New"),
                Column::new("open", "Open"),
                Column::new("in_progress", "In Progress"),
                Column::new("review", "Review"),
                Column::new("done", "Done"),
            ],
        }
    }
}
