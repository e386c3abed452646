//! Partition-scoped ordering of tasks and projects.
//!
//! Sorting is a pure read: it never assigns or repairs keys. A task observed
//! without a usable key is a data-integrity defect surfaced by [`key_of`],
//! not silently defaulted (see [`crate::types::migrate_legacy_order`] for
//! the explicit repair path).

use crate::error::{BoardError, Result};
use crate::types::{Partition, PositionKey, Project, Task};
use tracing::warn;

/// The ordering key of a task.
///
/// Fails with [`BoardError::MissingPositionKey`] when the task carries no
/// usable key - callers must migrate such tasks, not guess an order.
pub fn key_of(task: &Task) -> Result<&PositionKey> {
    if task.position.is_usable() {
        Ok(&task.position)
    } else {
        Err(BoardError::MissingPositionKey {
            id: task.id.to_string(),
        })
    }
}

/// Tasks of one partition in visual order.
///
/// Filters to the partition and stable-sorts ascending by key. Duplicate
/// keys are impossible by invariant; if one ever appears the stable sort
/// keeps arrival order rather than flickering, and the duplicate is caught
/// loudly the next time a key is minted against it.
///
/// A member with an unusable key sorts to the head and is reported at warn
/// level - sorting stays a pure read, but the data-integrity defect is
/// visible before a boundary mint trips over it.
pub fn ordered_within_partition<'a>(tasks: &'a [Task], partition: &Partition) -> Vec<&'a Task> {
    let mut members: Vec<&Task> = tasks.iter().filter(|t| partition.contains(t)).collect();
    for member in members.iter().filter(|t| !t.position.is_usable()) {
        warn!(task = %member.id, "task has no usable position key, sorting it first");
    }
    members.sort_by(|a, b| a.position.cmp(&b.position));
    members
}

/// Projects in column display order - a separate key space from task keys
pub fn ordered_projects(projects: &[Project]) -> Vec<&Project> {
    let mut ordered: Vec<&Project> = projects.iter().collect();
    ordered.sort_by(|a, b| a.display_order.cmp(&b.display_order));
    ordered
}
