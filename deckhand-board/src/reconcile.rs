//! Move reconciliation - from a drag gesture to a minimal field diff.
//!
//! One algorithm handles pure reorders, cross-status moves, cross-project
//! moves, and combined moves; the only variable is which partition's task
//! list is consulted. Reconciliation is pure and synchronous - safe to run
//! on the calling thread at the moment of the drop gesture.

use crate::error::{BoardError, Result};
use crate::index::{key_of, ordered_within_partition};
use crate::types::{Partition, PositionKey, Status, Task, TaskId, TaskPatch};
use tracing::debug;

/// A normalized drop gesture.
///
/// This is an explicit, caller-owned value: there is no module-level
/// "currently dragged" state, so overlapping gestures cannot observe each
/// other. The gesture-normalization layer (pointer events, drop indicators)
/// lives outside this crate and produces one of these per drop.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveRequest {
    /// The task being dragged
    pub task: TaskId,
    /// Where it is being dropped
    pub destination: Partition,
    /// The task next to the drop point; `None` appends to the partition tail
    pub neighbor: Option<TaskId>,
    /// Drop lands after the neighbor instead of before it
    pub insert_after: bool,
}

impl MoveRequest {
    /// Drop a task at the tail of a partition
    pub fn new(task: impl Into<TaskId>, destination: Partition) -> Self {
        Self {
            task: task.into(),
            destination,
            neighbor: None,
            insert_after: false,
        }
    }

    /// Drop immediately before the given neighbor
    pub fn dropped_before(mut self, neighbor: impl Into<TaskId>) -> Self {
        self.neighbor = Some(neighbor.into());
        self.insert_after = false;
        self
    }

    /// Drop immediately after the given neighbor
    pub fn dropped_after(mut self, neighbor: impl Into<TaskId>) -> Self {
        self.neighbor = Some(neighbor.into());
        self.insert_after = true;
        self
    }
}

/// Compute the minimal field diff realizing a move.
///
/// Always contains the freshly minted `position`; `status` and `project`
/// are present only when they actually change, and a status change carries
/// its forced side effects (`completed`, `excluded_from_active`) in the
/// same patch so the whole move commits as one atomic write.
///
/// Rejected gestures (self-drop, unknown task, neighbor missing from the
/// destination partition) return errors classified by
/// [`BoardError::is_invalid_move`]: the caller logs and drops them, no
/// state changes. A neighbor that cannot be resolved is never silently
/// treated as append-to-tail - ambiguous resolution is worse than a clear
/// failure.
pub fn reconcile_move(tasks: &[Task], request: &MoveRequest) -> Result<TaskPatch> {
    if request.neighbor.as_ref() == Some(&request.task) {
        debug!(task = %request.task, "move rejected: task dropped onto itself");
        return Err(BoardError::SelfMove {
            id: request.task.to_string(),
        });
    }

    let dragged = tasks
        .iter()
        .find(|t| t.id == request.task)
        .ok_or_else(|| {
            debug!(task = %request.task, "move rejected: dragged task not found");
            BoardError::TaskNotFound {
                id: request.task.to_string(),
            }
        })?;

    // The destination partition as it will look without the dragged task,
    // so a reorder within the same partition doesn't see itself as a
    // neighbor
    let ordered: Vec<&Task> = ordered_within_partition(tasks, &request.destination)
        .into_iter()
        .filter(|t| t.id != request.task)
        .collect();

    let index = match &request.neighbor {
        Some(neighbor) => {
            let at = ordered
                .iter()
                .position(|t| &t.id == neighbor)
                .ok_or_else(|| {
                    debug!(
                        task = %request.task,
                        neighbor = %neighbor,
                        "move rejected: neighbor not in destination partition"
                    );
                    BoardError::NeighborNotFound {
                        id: neighbor.to_string(),
                    }
                })?;
            at + usize::from(request.insert_after)
        }
        None => ordered.len(),
    };
    let index = index.min(ordered.len());

    let before = if index == 0 {
        None
    } else {
        Some(key_of(ordered[index - 1])?)
    };
    let after = ordered.get(index).map(|t| key_of(t)).transpose()?;

    let mut patch = TaskPatch {
        position: Some(PositionKey::generate(before, after)?),
        ..Default::default()
    };

    if dragged.status != request.destination.status {
        patch.status = Some(request.destination.status);
        if request.destination.status.is_done() {
            patch.completed = Some(true);
        } else if dragged.status.is_done() {
            patch.completed = Some(false);
        }
        if request.destination.status == Status::Active {
            patch.excluded_from_active = Some(false);
        }
    }
    if dragged.project != request.destination.project {
        patch.project = Some(request.destination.project.clone());
    }

    Ok(patch)
}
