//! Commit protocol: hands the final arrangement of a completed drag to an
//! external persistence adapter and feeds the outcome back to the board.
//!
//! The controller never awaits the adapter. [`BoardController::end`] returns
//! a [`PendingCommit`]; whoever runs the adapter reports the result through
//! [`BoardController::resolve_commit`]. [`BoardHandle`] wires both halves
//! together on a tokio runtime.

use crate::{
    controller::{BoardController, GestureEvent},
    domain::card::Card,
    error::{BoardError, Result},
    sync::SyncOutcome,
};
use async_trait::async_trait;
use std::{
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
};
use tokio::task::JoinHandle;

pub type CommitId = u64;

/// Final collection of a completed drag, waiting for the adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCommit {
    pub id: CommitId,
    pub cards: Vec<Card>,
}

/// External persistence call for a finished drag.
///
/// Retry and timeout policy belong to the implementation; the board treats
/// every error as final and rolls back.
#[async_trait]
pub trait CommitAdapter: Send + Sync {
    async fn commit(&self, cards: Vec<Card>) -> Result<()>;
}

#[async_trait]
impl<T: CommitAdapter + ?Sized> CommitAdapter for Arc<T> {
    async fn commit(&self, cards: Vec<Card>) -> Result<()> {
        (**self).commit(cards).await
    }
}

/// Adapts a closure returning a future into a [`CommitAdapter`]
pub struct FnCommit<F>(pub F);

#[async_trait]
impl<F, Fut> CommitAdapter for FnCommit<F>
where
    F: Fn(Vec<Card>) -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn commit(&self, cards: Vec<Card>) -> Result<()> {
        (self.0)(cards).await
    }
}

/// Shared board controller bound to a commit adapter
#[derive(Clone)]
pub struct BoardHandle {
    inner: Arc<Mutex<BoardController>>,
    adapter: Arc<dyn CommitAdapter>,
}

impl BoardHandle {
    pub fn new(controller: BoardController, adapter: impl CommitAdapter + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
            adapter: Arc::new(adapter),
        }
    }

    /// Runs a closure against the controller
    pub fn with<R>(&self, f: impl FnOnce(&mut BoardController) -> R) -> Result<R> {
        let mut controller = self.lock()?;
        Ok(f(&mut controller))
    }

    /// Feeds a gesture event and dispatches the commit of a completed drag
    pub fn handle_gesture(&self, event: GestureEvent) -> Result<Option<JoinHandle<Result<()>>>> {
        let pending = self.lock()?.handle(event);
        Ok(pending.map(|pending| self.dispatch(pending)))
    }

    /// Offers a refreshed external collection
    pub fn refresh(&self, cards: Vec<Card>) -> Result<SyncOutcome> {
        Ok(self.lock()?.refresh(cards))
    }

    /// Spawns the adapter call; the task resolves the commit on the board
    /// once the adapter returns.
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&self, pending: PendingCommit) -> JoinHandle<Result<()>> {
        let inner = Arc::clone(&self.inner);
        let adapter = Arc::clone(&self.adapter);

        tokio::spawn(async move {
            tracing::debug!(commit = pending.id, cards = pending.cards.len(), "Dispatching commit");
            let result = adapter.commit(pending.cards).await;
            resolve(&inner, pending.id, result)
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, BoardController>> {
        self.inner.lock().map_err(|_| BoardError::LockPoisoned)
    }
}

fn resolve(inner: &Mutex<BoardController>, id: CommitId, result: Result<()>) -> Result<()> {
    let mut controller = inner.lock().map_err(|_| BoardError::LockPoisoned)?;
    controller.resolve_commit(id, result)
}
