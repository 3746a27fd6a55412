//! External sync: keeps the working set aligned with the authoritative
//! collection without disturbing an in-progress drag.
//!
//! Refreshes are compared by value against the last applied collection.
//! While a drag is active the refresh is held back and re-evaluated once the
//! session settles.

use crate::domain::{card::Card, working_set::WorkingSet};
use chrono::{DateTime, Utc};

/// Result of offering an external collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The working set was replaced
    Applied { revision: u64 },
    /// Equal to the last applied collection, nothing to do
    Unchanged,
    /// A drag is active; held until the session settles
    Deferred,
}

#[derive(Debug, Clone)]
pub struct SyncState {
    synced: Vec<Card>,
    deferred: Option<Vec<Card>>,
    revision: u64,
    synced_at: DateTime<Utc>,
}

impl SyncState {
    /// Starts from an initial snapshot, which counts as the first revision
    pub fn new(initial: Vec<Card>) -> Self {
        Self {
            synced: initial,
            deferred: None,
            revision: 1,
            synced_at: Utc::now(),
        }
    }

    /// The most recent collection accepted from the external source
    pub fn synced(&self) -> &[Card] {
        &self.synced
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn synced_at(&self) -> DateTime<Utc> {
        self.synced_at
    }

    pub fn has_deferred(&self) -> bool {
        self.deferred.is_some()
    }

    /// Offers a refreshed collection.
    ///
    /// Only the latest refresh received during a drag is kept.
    pub fn offer(
        &mut self,
        incoming: Vec<Card>,
        dragging: bool,
        working: &mut WorkingSet,
    ) -> SyncOutcome {
        if dragging {
            tracing::debug!(cards = incoming.len(), "External refresh deferred during drag");
            self.deferred = Some(incoming);
            return SyncOutcome::Deferred;
        }
        self.apply(incoming, working)
    }

    /// Re-evaluates the refresh held back during a drag
    pub fn settle(&mut self, working: &mut WorkingSet) -> SyncOutcome {
        match self.deferred.take() {
            Some(incoming) => self.apply(incoming, working),
            None => SyncOutcome::Unchanged,
        }
    }

    /// Replaces the working set with the synced snapshot
    pub fn restore(&self, working: &mut WorkingSet) {
        *working = WorkingSet::new(self.synced.clone());
    }

    fn apply(&mut self, incoming: Vec<Card>, working: &mut WorkingSet) -> SyncOutcome {
        if incoming == self.synced {
            return SyncOutcome::Unchanged;
        }

        *working = WorkingSet::new(incoming.clone());
        self.synced = incoming;
        self.revision += 1;
        self.synced_at = Utc::now();

        tracing::debug!(revision = self.revision, cards = self.synced.len(), "External refresh applied");
        SyncOutcome::Applied {
            revision: self.revision,
        }
    }
}
