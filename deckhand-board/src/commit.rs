//! Atomic commit of a reconciled move with rollback on failure.
//!
//! The patch is applied to the in-memory task first (so the UI reflects the
//! drop immediately), then handed to the store as one logical write. If the
//! store rejects it, the in-memory task is restored to its exact pre-move
//! values before the error propagates - the UI and the source of truth
//! never diverge.
//!
//! The engine does not serialize overlapping moves on one task; rejecting
//! or queueing a second move while one is in flight is the caller's
//! discipline.

use crate::error::Result;
use crate::store::TaskStore;
use crate::types::{Task, TaskPatch};
use crate::undo::UndoHandle;
use tracing::warn;

/// Commit one reconciled move and arm its undo handle.
///
/// On success the returned [`UndoHandle`] replays the pre-move field values
/// through this same commit path when invoked within its window.
pub async fn commit_move<S: TaskStore + ?Sized>(
    store: &S,
    task: &mut Task,
    patch: TaskPatch,
) -> Result<UndoHandle> {
    let prior = patch.snapshot_of(task);
    apply_committed(store, task, &patch).await?;
    Ok(UndoHandle::arm(task.id.clone(), prior))
}

/// The shared commit path for moves, undo replays, and rollbacks.
///
/// Applies the patch in memory, then persists it; a failed persist restores
/// the snapshot so the task is bit-for-bit its pre-patch self.
pub(crate) async fn apply_committed<S: TaskStore + ?Sized>(
    store: &S,
    task: &mut Task,
    patch: &TaskPatch,
) -> Result<()> {
    let snapshot = patch.snapshot_of(task);
    patch.apply_to(task);

    if let Err(err) = store.apply(&task.id, patch).await {
        snapshot.apply_to(task);
        warn!(task = %task.id, error = %err, "commit failed, rolled back in-memory state");
        return Err(err);
    }
    Ok(())
}
