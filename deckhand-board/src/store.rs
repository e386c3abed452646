//! Persistence boundary - the single suspending step of a move.
//!
//! The engine computes diffs synchronously and hands each one to a
//! [`TaskStore`] as one logical write. The store contract is all-or-nothing:
//! a partially-applied diff is an invariant violation. [`MemoryStore`] is
//! the reference implementation used by tests and examples; real
//! applications put their sync layer behind the same trait.

use crate::error::{BoardError, Result};
use crate::types::{Task, TaskId, TaskPatch};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

/// Commit function for reconciled moves.
///
/// Invoked once per move (and once per undo, which is an ordinary update
/// through the same path). Failure means nothing was applied; the caller
/// rolls in-memory state back so the UI and the source of truth never
/// diverge.
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Apply one diff to one task as an atomic write
    async fn apply(&self, id: &TaskId, patch: &TaskPatch) -> Result<()>;
}

/// One committed diff, newest last
#[derive(Debug, Clone, Serialize)]
pub struct JournalEntry {
    pub task: TaskId,
    pub patch: TaskPatch,
    pub applied_at: DateTime<Utc>,
}

/// In-memory [`TaskStore`] keeping a journal of every applied diff.
///
/// Supports injected failure so callers can exercise the rollback path.
#[derive(Default)]
pub struct MemoryStore {
    tasks: Mutex<HashMap<TaskId, Task>>,
    journal: Mutex<Vec<JournalEntry>>,
    fail_next: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a task
    pub fn insert(&self, task: Task) {
        lock(&self.tasks).insert(task.id.clone(), task);
    }

    /// Read a task back
    pub fn get(&self, id: &TaskId) -> Option<Task> {
        lock(&self.tasks).get(id).cloned()
    }

    /// Every diff applied so far, oldest first
    pub fn journal(&self) -> Vec<JournalEntry> {
        lock(&self.journal).clone()
    }

    /// Make the next `apply` call fail without touching state
    pub fn fail_next_apply(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl TaskStore for MemoryStore {
    async fn apply(&self, id: &TaskId, patch: &TaskPatch) -> Result<()> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(BoardError::storage("injected apply failure"));
        }

        let mut tasks = lock(&self.tasks);
        let task = tasks.get_mut(id).ok_or_else(|| BoardError::TaskNotFound {
            id: id.to_string(),
        })?;
        patch.apply_to(task);

        lock(&self.journal).push(JournalEntry {
            task: id.clone(),
            patch: patch.clone(),
            applied_at: Utc::now(),
        });
        Ok(())
    }
}

/// Lock a mutex, recovering the data from a poisoned guard
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
