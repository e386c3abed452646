//! Board ordering engine: fractional position keys, move reconciliation,
//! and undo.
//!
//! Tasks live on a board grouped along two independent dimensions - a
//! workflow [`Status`](types::Status) and an optional project. Each
//! `(status, project)` pair is a [`Partition`](types::Partition) with its
//! own total order, encoded as one compact string key per task. Moving a
//! task - reordering, changing status, changing project, or all at once -
//! mints exactly one new key and touches no other task.
//!
//! ## Pipeline
//!
//! A drop gesture, normalized by the caller into a [`MoveRequest`], flows
//! one way:
//!
//! 1. [`reconcile_move`] reads the destination partition (via [`index`])
//!    and mints a key strictly between the drop point's neighbors
//!    ([`types::PositionKey::generate`]), producing a minimal
//!    [`TaskPatch`](types::TaskPatch) - position always, status/project
//!    only when they actually change, plus forced side effects of a status
//!    change (entering done completes the task, entering active un-hides
//!    it).
//! 2. [`commit_move`] applies the patch in memory, hands it to the
//!    [`TaskStore`] as one atomic write, and rolls back on failure.
//! 3. The returned [`UndoHandle`] replays the pre-move values through the
//!    same commit path for a few seconds, then goes inert.
//!
//! Reconciliation and key generation are pure and synchronous; the store
//! write is the only suspending step.
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use deckhand_board::{commit_move, reconcile_move, MemoryStore, MoveRequest};
//! use deckhand_board::types::{Partition, Status, Task};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//! let queued = Partition::new(Status::Queued, None);
//!
//! let mut task = Task::at_partition_tail(&[], "Ship the release", queued)?;
//! store.insert(task.clone());
//!
//! // Drag the task into the done column
//! let request = MoveRequest::new(task.id.clone(), Partition::new(Status::Done, None));
//! let patch = reconcile_move(std::slice::from_ref(&task), &request)?;
//! let undo = commit_move(&store, &mut task, patch).await?;
//!
//! println!("moved; reversible for a moment: {}", undo.is_armed());
//! # Ok(())
//! # }
//! ```

pub mod auto_color;
mod commit;
mod error;
pub mod index;
mod reconcile;
mod store;
mod undo;
pub mod types;

pub use commit::commit_move;
pub use error::{BoardError, Result};
pub use reconcile::{reconcile_move, MoveRequest};
pub use store::{JournalEntry, MemoryStore, TaskStore};
pub use undo::{UndoHandle, UNDO_WINDOW};

// Re-export commonly used types
pub use types::{Partition, PositionKey, Project, ProjectId, Status, Task, TaskId, TaskPatch};
