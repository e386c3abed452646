//! Minimal field diffs produced by move reconciliation

use super::ids::ProjectId;
use super::position::PositionKey;
use super::status::Status;
use super::task::Task;
use serde::{Deserialize, Serialize};

/// The minimal set of field changes realizing one move.
///
/// Only fields that actually change are present; a same-partition reorder
/// carries nothing but `position`. The whole patch is committed as one
/// atomic write - a partially-applied patch is an invariant violation.
///
/// `project` is doubly optional: absent means "unchanged", `Some(None)`
/// means "move to the no-project bucket".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PositionKey>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<Option<ProjectId>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excluded_from_active: Option<bool>,
}

impl TaskPatch {
    /// Check whether the patch changes anything at all
    pub fn is_empty(&self) -> bool {
        self.position.is_none()
            && self.status.is_none()
            && self.project.is_none()
            && self.completed.is_none()
            && self.excluded_from_active.is_none()
    }

    /// Apply every present field to the task
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(position) = &self.position {
            task.position = position.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(project) = &self.project {
            task.project = project.clone();
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
        if let Some(excluded) = self.excluded_from_active {
            task.excluded_from_active = excluded;
        }
    }

    /// Capture the task's current values for exactly the fields this patch
    /// touches. Applying the snapshot restores the pre-patch state; it is
    /// the prior-fields payload armed for undo and used for rollback.
    pub fn snapshot_of(&self, task: &Task) -> TaskPatch {
        TaskPatch {
            position: self.position.as_ref().map(|_| task.position.clone()),
            status: self.status.map(|_| task.status),
            project: self.project.as_ref().map(|_| task.project.clone()),
            completed: self.completed.map(|_| task.completed),
            excluded_from_active: self.excluded_from_active.map(|_| task.excluded_from_active),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_task() -> Task {
        Task::new("sample", Status::Queued, None, PositionKey::initial())
    }

    #[test]
    fn test_apply_and_snapshot_round_trip() {
        let mut task = sample_task();
        let original = task.clone();

        let patch = TaskPatch {
            position: Some(PositionKey::after_tail(&task.position).unwrap()),
            status: Some(Status::Done),
            completed: Some(true),
            ..Default::default()
        };

        let snapshot = patch.snapshot_of(&task);
        patch.apply_to(&mut task);
        assert_eq!(task.status, Status::Done);
        assert!(task.completed);

        snapshot.apply_to(&mut task);
        assert_eq!(task, original);
    }

    #[test]
    fn test_untouched_fields_absent_from_snapshot() {
        let task = sample_task();
        let patch = TaskPatch {
            position: Some(PositionKey::initial()),
            ..Default::default()
        };
        let snapshot = patch.snapshot_of(&task);
        assert!(snapshot.status.is_none());
        assert!(snapshot.project.is_none());
        assert!(snapshot.completed.is_none());
    }

    #[test]
    fn test_minimal_wire_form() {
        let patch = TaskPatch {
            position: Some(PositionKey::initial()),
            project: Some(Some(ProjectId::from_string("P2"))),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "position": "i", "project": "P2" })
        );
    }

    #[test]
    fn test_clearing_project_serializes_null() {
        let patch = TaskPatch {
            project: Some(None),
            ..Default::default()
        };
        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "project": null }));
    }

    #[test]
    fn test_is_empty() {
        assert!(TaskPatch::default().is_empty());
        let patch = TaskPatch {
            completed: Some(true),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
