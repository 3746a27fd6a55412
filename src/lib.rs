//! # Hlavi Board
//!
//! Board reconciliation engine for Hlavi kanban views.
//!
//! A [`BoardController`] lets a user drag cards between ordered columns
//! while the authoritative collection keeps refreshing in the background.
//! Moves are applied optimistically to a working set, the final arrangement
//! is handed to a [`CommitAdapter`], and a failed commit rolls the board
//! back to the last synced snapshot. No UI or network code lives here.

pub mod commit;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod events;
pub mod logging;
pub mod storage;
pub mod sync;

// Re-export commonly used types
pub use commit::{BoardHandle, CommitAdapter, CommitId, FnCommit, PendingCommit};
pub use config::{CancelPolicy, ControllerConfig};
pub use controller::{BoardController, DragState, GestureEvent};
pub use domain::{
    card::{Card, CardId},
    column::{BoardLayout, Column, ColumnId},
    working_set::{DropTarget, WorkingSet},
};
pub use error::{BoardError, Result};
pub use events::{DragEvent, DragEventKind, DragObserver, TracingObserver};
pub use storage::Storage;
pub use sync::{SyncOutcome, SyncState};
