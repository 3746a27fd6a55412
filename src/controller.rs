//! Drag session controller.
//!
//! A two-state machine (`Idle`, `Dragging`) driven by gesture events. Over
//! events mutate the working set in place for live feedback; a completed
//! drop returns to `Idle` first and then hands the final collection out as a
//! [`PendingCommit`]. Target resolution never fails loudly: unknown ids are
//! ignored so rapid pointer movement cannot break the session.

use crate::{
    commit::{CommitId, PendingCommit},
    config::{CancelPolicy, ControllerConfig},
    domain::{
        card::{Card, CardId},
        column::{BoardLayout, Column, ColumnId},
        working_set::WorkingSet,
    },
    error::{BoardError, Result},
    events::{DragEvent, DragEventKind, DragObserver},
    sync::{SyncOutcome, SyncState},
};
use chrono::Utc;
use std::collections::BTreeSet;

/// Input from the gesture source (pointer, touch or keyboard)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureEvent {
    Start {
        active_id: CardId,
    },
    Over {
        active_id: CardId,
        over_id: Option<String>,
    },
    End {
        active_id: CardId,
        over_id: Option<String>,
    },
    Cancel {
        active_id: CardId,
    },
}

impl GestureEvent {
    pub fn active_id(&self) -> &CardId {
        match self {
            Self::Start { active_id }
            | Self::Over { active_id, .. }
            | Self::End { active_id, .. }
            | Self::Cancel { active_id } => active_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging {
        active: CardId,
        /// Column the card sat in when the gesture started
        origin: ColumnId,
    },
}

pub struct BoardController {
    layout: BoardLayout,
    config: ControllerConfig,
    working: WorkingSet,
    sync: SyncState,
    state: DragState,
    pre_drag: Option<WorkingSet>,
    last_target: Option<String>,
    next_commit: CommitId,
    in_flight: BTreeSet<CommitId>,
    staged_rollback: bool,
    observers: Vec<Box<dyn DragObserver>>,
    announcements: Vec<String>,
}

impl BoardController {
    /// Creates an idle controller; `cards` becomes the first synced snapshot
    pub fn new(layout: BoardLayout, cards: Vec<Card>) -> Self {
        Self {
            layout,
            config: ControllerConfig::default(),
            working: WorkingSet::new(cards.clone()),
            sync: SyncState::new(cards),
            state: DragState::Idle,
            pre_drag: None,
            last_target: None,
            next_commit: 1,
            in_flight: BTreeSet::new(),
            staged_rollback: false,
            observers: Vec::new(),
            announcements: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ControllerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: impl DragObserver + 'static) -> Self {
        self.add_observer(observer);
        self
    }

    pub fn add_observer(&mut self, observer: impl DragObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    /// The card an overlay should project, if any
    pub fn active_card(&self) -> Option<&Card> {
        match &self.state {
            DragState::Dragging { active, .. } => self.working.get(active.as_str()),
            DragState::Idle => None,
        }
    }

    pub fn working_set(&self) -> &WorkingSet {
        &self.working
    }

    pub fn cards(&self) -> &[Card] {
        self.working.cards()
    }

    /// The last collection accepted from the external source
    pub fn synced(&self) -> &[Card] {
        self.sync.synced()
    }

    pub fn sync_state(&self) -> &SyncState {
        &self.sync
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Per-column view of the working set in layout order
    pub fn grouped(&self) -> Vec<(&Column, Vec<&Card>)> {
        self.working.grouped(&self.layout)
    }

    /// Commits handed out but not yet resolved
    pub fn pending_commits(&self) -> usize {
        self.in_flight.len()
    }

    /// Drains queued screen reader announcements
    pub fn take_announcements(&mut self) -> Vec<String> {
        std::mem::take(&mut self.announcements)
    }

    /// Replaces the column layout. Cards are not touched.
    pub fn set_layout(&mut self, layout: BoardLayout) {
        self.layout = layout;
    }

    /// Offers a refreshed external collection
    pub fn refresh(&mut self, cards: Vec<Card>) -> SyncOutcome {
        self.sync.offer(cards, self.is_dragging(), &mut self.working)
    }

    /// Dispatches a gesture event.
    ///
    /// Over, end and cancel events for a card other than the active one are
    /// ignored.
    pub fn handle(&mut self, event: GestureEvent) -> Option<PendingCommit> {
        if !matches!(event, GestureEvent::Start { .. }) && !self.is_active(event.active_id()) {
            tracing::trace!(card_id = %event.active_id(), "Gesture event for inactive card ignored");
            return None;
        }

        match event {
            GestureEvent::Start { active_id } => {
                self.start(&active_id);
                None
            }
            GestureEvent::Over { over_id, .. } => {
                self.over(over_id.as_deref());
                None
            }
            GestureEvent::End { over_id, .. } => self.end(over_id.as_deref()),
            GestureEvent::Cancel { .. } => {
                self.cancel();
                None
            }
        }
    }

    /// Begins a drag. Returns false when the card is unknown or another
    /// drag is already active.
    pub fn start(&mut self, card_id: &CardId) -> bool {
        if let DragState::Dragging { active, .. } = &self.state {
            tracing::debug!(card_id = %card_id, active = %active, "Drag already active, start ignored");
            return false;
        }

        let Some(card) = self.working.get(card_id.as_str()) else {
            tracing::debug!(card_id = %card_id, "Drag start for unknown card ignored");
            return false;
        };

        let origin = card.column.clone();
        self.pre_drag = Some(self.working.clone());
        self.last_target = None;
        self.state = DragState::Dragging {
            active: card_id.clone(),
            origin: origin.clone(),
        };

        tracing::debug!(card_id = %card_id, column = %origin, "Drag started");
        self.emit(DragEventKind::Start, card_id, &origin);
        true
    }

    /// Moves the dragged card toward the hovered target.
    ///
    /// Hovering the same target again is a no-op until the pointer leaves
    /// it. `None` and ids that resolve to nothing both count as leaving the
    /// hovered target, reported once as an over event without destination.
    /// Returns whether the working set changed.
    pub fn over(&mut self, over_id: Option<&str>) -> bool {
        let DragState::Dragging { active, origin } = &self.state else {
            return false;
        };
        let (active, origin) = (active.clone(), origin.clone());

        if self.last_target.as_deref() == over_id {
            return false;
        }

        let resolved = over_id.and_then(|id| {
            self.working
                .resolve_target(&active, id, &self.layout)
                .map(|target| (id, target))
        });
        let Some((over_id, target)) = resolved else {
            tracing::trace!(card_id = %active, over_id, "Drag target left or unresolved");
            if self.last_target.take().is_some() {
                self.emit_event(DragEventKind::Over, &active, &origin, None);
            }
            return false;
        };

        self.last_target = Some(over_id.to_string());
        let moved = self.working.move_card(&active, &target);
        self.emit(DragEventKind::Over, &active, &origin);
        moved
    }

    /// Finishes the drag.
    ///
    /// Dropping over nothing, or over an id that no longer resolves, aborts
    /// like [`cancel`](Self::cancel). Otherwise the session returns to
    /// `Idle`, any refresh held back during the drag is re-evaluated, and
    /// the final collection is returned for the commit adapter. A drop on
    /// the target last hovered keeps the arrangement the over event made.
    pub fn end(&mut self, over_id: Option<&str>) -> Option<PendingCommit> {
        let DragState::Dragging { active, origin } = &self.state else {
            return None;
        };
        let (active, origin) = (active.clone(), origin.clone());

        let target = over_id.and_then(|id| self.working.resolve_target(&active, id, &self.layout));
        let Some(target) = target else {
            tracing::debug!(card_id = %active, over_id, "Drop without target, aborting");
            self.abort(&active, &origin);
            return None;
        };

        if self.staged_rollback {
            // Drop the rejected arrangement, keep only this gesture's move
            tracing::debug!(card_id = %active, "Applying staged rollback before drop");
            self.sync.restore(&mut self.working);
            let replayed =
                over_id.and_then(|id| self.working.resolve_target(&active, id, &self.layout));
            if let Some(target) = replayed {
                self.working.move_card(&active, &target);
            }
        } else if self.last_target.as_deref() != over_id {
            self.working.move_card(&active, &target);
        }
        let cards = self.working.cards().to_vec();

        self.state = DragState::Idle;
        self.pre_drag = None;
        self.last_target = None;
        self.staged_rollback = false;
        self.emit(DragEventKind::End, &active, &origin);
        self.sync.settle(&mut self.working);

        let id = self.next_commit;
        self.next_commit += 1;
        self.in_flight.insert(id);

        tracing::debug!(card_id = %active, commit = id, "Drag ended, commit issued");
        Some(PendingCommit { id, cards })
    }

    /// Aborts the drag without a commit. Returns false when idle.
    pub fn cancel(&mut self) -> bool {
        let DragState::Dragging { active, origin } = &self.state else {
            return false;
        };
        let (active, origin) = (active.clone(), origin.clone());

        self.abort(&active, &origin);
        true
    }

    /// Records the adapter's outcome for a commit.
    ///
    /// A failure restores the synced snapshot and is returned to the caller.
    /// No rollback happens when a newer commit has been issued since, as
    /// that commit carries the whole collection. A failure that lands
    /// mid-drag is held until the drag resolves: an abort rolls back fully,
    /// a completed drop rolls back and then applies only its own move.
    pub fn resolve_commit(&mut self, id: CommitId, result: Result<()>) -> Result<()> {
        if !self.in_flight.remove(&id) {
            return Err(BoardError::UnknownCommit(id));
        }

        let err = match result {
            Ok(()) => {
                tracing::debug!(commit = id, "Commit succeeded");
                return Ok(());
            }
            Err(err) => err,
        };

        if id + 1 != self.next_commit {
            tracing::warn!(commit = id, error = %err, "Superseded commit failed, keeping newer arrangement");
        } else if self.is_dragging() {
            tracing::warn!(commit = id, error = %err, "Commit failed during drag, rollback staged");
            self.staged_rollback = true;
        } else {
            tracing::warn!(commit = id, error = %err, "Commit failed, rolling back to synced snapshot");
            self.sync.restore(&mut self.working);
        }

        Err(BoardError::CommitFailed {
            commit: id,
            reason: err.to_string(),
        })
    }

    fn is_active(&self, card_id: &CardId) -> bool {
        matches!(&self.state, DragState::Dragging { active, .. } if active == card_id)
    }

    fn abort(&mut self, active: &CardId, origin: &ColumnId) {
        let pre_drag = self.pre_drag.take();
        self.last_target = None;
        if self.config.cancel_policy == CancelPolicy::Restore {
            if let Some(pre_drag) = pre_drag {
                self.working = pre_drag;
            }
        }

        if self.staged_rollback {
            self.staged_rollback = false;
            self.sync.restore(&mut self.working);
        }

        self.state = DragState::Idle;
        self.emit(DragEventKind::Cancel, active, origin);
        self.sync.settle(&mut self.working);
    }

    /// Emits an event whose destination is the card's current column
    fn emit(&mut self, kind: DragEventKind, active: &CardId, origin: &ColumnId) {
        let to = self.working.get(active.as_str()).map(|card| card.column.clone());
        self.emit_event(kind, active, origin, to);
    }

    fn emit_event(
        &mut self,
        kind: DragEventKind,
        active: &CardId,
        origin: &ColumnId,
        to_column: Option<ColumnId>,
    ) {
        let card_label = self
            .working
            .get(active.as_str())
            .map(|card| card.display_label())
            .unwrap_or(active.as_str())
            .to_string();

        let event = DragEvent {
            kind,
            card_id: active.clone(),
            card_label,
            from_column: origin.clone(),
            to_column,
            at: Utc::now(),
        };

        if self.config.narrate {
            self.announcements.push(event.narrate(&self.layout));
        }
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
