//! Time-boxed, one-shot reversal of a committed move.
//!
//! A handle captures the pre-move values of exactly the fields the move
//! touched. Reverting replays them through the normal commit path, so an
//! undo is itself an ordinary, auditable update - no special code path in
//! persistence. Handles are independent: there is no coalescing of pending
//! undos, and each becomes inert on its own terms.
//!
//! The notification surface that displays "task moved - undo" owns its own
//! timing; this module only guarantees the handle's semantics.

use crate::commit::apply_committed;
use crate::error::{BoardError, Result};
use crate::store::TaskStore;
use crate::types::{Task, TaskId, TaskPatch};
use std::time::{Duration, Instant};
use tracing::debug;

/// How long a move stays reversible by default
pub const UNDO_WINDOW: Duration = Duration::from_secs(3);

/// Lifecycle of a handle. Every non-`Armed` state is equally terminal:
/// a spent, dismissed, or expired handle is inert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandleState {
    Armed,
    Spent,
    Dismissed,
    Expired,
}

/// A one-shot reversal of a single committed move
#[derive(Debug)]
pub struct UndoHandle {
    task: TaskId,
    prior: TaskPatch,
    deadline: Instant,
    state: HandleState,
}

impl UndoHandle {
    /// Arm a handle with the default window
    pub fn arm(task: TaskId, prior: TaskPatch) -> Self {
        Self::arm_for(task, prior, UNDO_WINDOW)
    }

    /// Arm a handle with an explicit window
    pub fn arm_for(task: TaskId, prior: TaskPatch, window: Duration) -> Self {
        Self {
            task,
            prior,
            deadline: Instant::now() + window,
            state: HandleState::Armed,
        }
    }

    /// The task this handle reverts
    pub fn task(&self) -> &TaskId {
        &self.task
    }

    /// The captured pre-move field values
    pub fn prior(&self) -> &TaskPatch {
        &self.prior
    }

    /// Check whether the handle can still revert
    pub fn is_armed(&self) -> bool {
        self.state == HandleState::Armed && Instant::now() <= self.deadline
    }

    /// Check whether the handle reached a terminal state
    pub fn is_inert(&self) -> bool {
        !self.is_armed()
    }

    /// Dismiss the handle without reverting. Equivalent to letting the
    /// window expire.
    pub fn dismiss(&mut self) {
        if self.state == HandleState::Armed {
            self.state = HandleState::Dismissed;
        }
    }

    /// Re-apply the captured prior values through the normal commit path.
    ///
    /// Succeeds at most once. An expired or already-terminal handle fails
    /// with [`BoardError::UndoExpired`] / [`BoardError::UndoSpent`] and
    /// mutates nothing. A store failure during the replay leaves the handle
    /// armed so the caller may retry within the window.
    pub async fn revert<S: TaskStore + ?Sized>(
        &mut self,
        store: &S,
        task: &mut Task,
    ) -> Result<()> {
        match self.state {
            HandleState::Armed => {}
            HandleState::Expired => return Err(BoardError::UndoExpired),
            HandleState::Spent | HandleState::Dismissed => return Err(BoardError::UndoSpent),
        }
        if Instant::now() > self.deadline {
            self.state = HandleState::Expired;
            debug!(task = %self.task, "undo window expired");
            return Err(BoardError::UndoExpired);
        }
        if task.id != self.task {
            return Err(BoardError::TaskNotFound {
                id: self.task.to_string(),
            });
        }

        apply_committed(store, task, &self.prior).await?;
        self.state = HandleState::Spent;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::commit_move;
    use crate::reconcile::{reconcile_move, MoveRequest};
    use crate::store::MemoryStore;
    use crate::types::{Partition, Status};

    async fn moved_task(store: &MemoryStore) -> (Task, Task, UndoHandle) {
        let queued = Partition::new(Status::Queued, None);
        let task = Task::at_partition_tail(&[], "undoable", queued).unwrap();
        store.insert(task.clone());

        let request = MoveRequest::new(task.id.clone(), Partition::new(Status::Done, None));
        let patch = reconcile_move(std::slice::from_ref(&task), &request).unwrap();

        let before = task.clone();
        let mut moved = task;
        let handle = commit_move(store, &mut moved, patch).await.unwrap();
        (before, moved, handle)
    }

    #[tokio::test]
    async fn test_revert_restores_prior_fields() {
        let store = MemoryStore::new();
        let (before, mut task, mut handle) = moved_task(&store).await;
        assert_ne!(task, before);

        handle.revert(&store, &mut task).await.unwrap();
        assert_eq!(task, before);
        assert_eq!(store.get(&task.id).unwrap(), before);

        // The replay went through the normal commit path: two journal
        // entries, the second being the prior-fields patch
        let journal = store.journal();
        assert_eq!(journal.len(), 2);
        assert_eq!(&journal[1].patch, handle.prior());
    }

    #[tokio::test]
    async fn test_revert_is_one_shot() {
        let store = MemoryStore::new();
        let (_, mut task, mut handle) = moved_task(&store).await;

        handle.revert(&store, &mut task).await.unwrap();
        assert!(handle.is_inert());

        let err = handle.revert(&store, &mut task).await.unwrap_err();
        assert!(matches!(err, BoardError::UndoSpent));
    }

    #[tokio::test]
    async fn test_expired_handle_is_inert() {
        let store = MemoryStore::new();
        let (_, mut task, _) = moved_task(&store).await;
        let after_move = task.clone();

        let mut handle = UndoHandle::arm_for(
            task.id.clone(),
            TaskPatch {
                completed: Some(false),
                ..Default::default()
            },
            Duration::ZERO,
        );
        // The zero window has elapsed by the time we look
        std::thread::sleep(Duration::from_millis(5));
        assert!(handle.is_inert());

        let err = handle.revert(&store, &mut task).await.unwrap_err();
        assert!(matches!(err, BoardError::UndoExpired));
        assert_eq!(task, after_move);
    }

    #[tokio::test]
    async fn test_dismissal_equals_expiry() {
        let store = MemoryStore::new();
        let (_, mut task, mut handle) = moved_task(&store).await;

        handle.dismiss();
        assert!(handle.is_inert());

        let err = handle.revert(&store, &mut task).await.unwrap_err();
        assert!(matches!(err, BoardError::UndoSpent));
    }

    #[tokio::test]
    async fn test_failed_replay_keeps_handle_armed() {
        let store = MemoryStore::new();
        let (before, mut task, mut handle) = moved_task(&store).await;

        store.fail_next_apply();
        let err = handle.revert(&store, &mut task).await.unwrap_err();
        assert!(matches!(err, BoardError::Storage { .. }));
        assert!(handle.is_armed());

        // Retry within the window succeeds
        handle.revert(&store, &mut task).await.unwrap();
        assert_eq!(task, before);
    }

    #[tokio::test]
    async fn test_handles_are_independent() {
        let store = MemoryStore::new();
        let (before_a, mut task_a, mut handle_a) = moved_task(&store).await;
        let (_, mut task_b, mut handle_b) = moved_task(&store).await;

        handle_b.dismiss();
        // Dismissing one handle has no effect on another
        handle_a.revert(&store, &mut task_a).await.unwrap();
        assert_eq!(task_a, before_a);
        assert!(handle_b.revert(&store, &mut task_b).await.is_err());
    }
}
