//! Partition - the (status, project) pair that scopes an ordered sub-list

use super::ids::ProjectId;
use super::status::Status;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// The grouping key that defines an independently-ordered sub-list of tasks.
///
/// Within a partition all position keys are pairwise distinct and their
/// lexicographic order is the visual order. Keys from different partitions
/// are incomparable. Partitions are always explicit values - the reconciler
/// never widens one implicitly (e.g. "all tasks in a project" and "tasks in
/// a project with one status" are different partitions).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Partition {
    /// Workflow stage
    pub status: Status,
    /// Project bucket; `None` is the implicit "no project" bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
}

impl Partition {
    /// Create a partition
    pub fn new(status: Status, project: Option<ProjectId>) -> Self {
        Self { status, project }
    }

    /// The partition a task currently belongs to
    pub fn of(task: &Task) -> Self {
        Self {
            status: task.status,
            project: task.project.clone(),
        }
    }

    /// Check whether a task is a member of this partition
    pub fn contains(&self, task: &Task) -> bool {
        task.status == self.status && task.project == self.project
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PositionKey;

    #[test]
    fn test_membership() {
        let p1 = ProjectId::from_string("P1");
        let task = Task::new(
            "Write docs",
            Status::Active,
            Some(p1.clone()),
            PositionKey::initial(),
        );

        assert!(Partition::new(Status::Active, Some(p1.clone())).contains(&task));
        assert!(!Partition::new(Status::Done, Some(p1)).contains(&task));
        assert!(!Partition::new(Status::Active, None).contains(&task));
        assert_eq!(Partition::of(&task), task.partition());
    }
}
