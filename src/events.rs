use crate::domain::{
    card::CardId,
    column::{BoardLayout, ColumnId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of drag transition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DragEventKind {
    Start,
    Over,
    End,
    Cancel,
}

impl fmt::Display for DragEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => write!(f, "start"),
            Self::Over => write!(f, "over"),
            Self::End => write!(f, "end"),
            Self::Cancel => write!(f, "cancel"),
        }
    }
}

/// Structured record of a drag transition.
///
/// `from_column` is where the card sat when the gesture started,
/// `to_column` where it sits after this transition (`None` when an over
/// event left every droppable area).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragEvent {
    pub kind: DragEventKind,
    pub card_id: CardId,
    pub card_label: String,
    pub from_column: ColumnId,
    pub to_column: Option<ColumnId>,
    pub at: DateTime<Utc>,
}

impl DragEvent {
    /// Screen reader announcement for this transition
    pub fn narrate(&self, layout: &BoardLayout) -> String {
        let from = layout.label_of(&self.from_column);
        let to = self.to_column.as_ref().map(|col| layout.label_of(col));

        match (self.kind, to) {
            (DragEventKind::Start, _) => {
                format!("Picked up card {} from column {}.", self.card_label, from)
            }
            (DragEventKind::Over, Some(to)) => {
                format!("Card {} was moved over column {}.", self.card_label, to)
            }
            (DragEventKind::Over, None) => {
                format!("Card {} is no longer over a droppable area.", self.card_label)
            }
            (DragEventKind::End, Some(to)) => {
                format!("Card {} was dropped in column {}.", self.card_label, to)
            }
            (DragEventKind::End, None) | (DragEventKind::Cancel, None) => {
                format!("Dragging was cancelled. Card {} was dropped.", self.card_label)
            }
            (DragEventKind::Cancel, Some(to)) => format!(
                "Dragging was cancelled. Card {} was returned to column {}.",
                self.card_label, to
            ),
        }
    }
}

/// Receives every drag transition, for logging, telemetry or narration
pub trait DragObserver: Send {
    fn on_event(&mut self, event: &DragEvent);
}

impl<F> DragObserver for F
where
    F: FnMut(&DragEvent) + Send,
{
    fn on_event(&mut self, event: &DragEvent) {
        self(event)
    }
}

/// Forwards drag events to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DragObserver for TracingObserver {
    fn on_event(&mut self, event: &DragEvent) {
        tracing::info!(
            kind = %event.kind,
            card_id = %event.card_id,
            card_label = %event.card_label,
            from_column = %event.from_column,
            to_column = event.to_column.as_ref().map(|col| col.as_str()),
            "Drag event"
        );
    }
}
