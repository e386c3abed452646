//! Task and project types

use super::ids::{ProjectId, TaskId};
use super::partition::Partition;
use super::position::PositionKey;
use super::status::Status;
use crate::auto_color::project_color;
use crate::error::Result;
use crate::index;
use serde::{Deserialize, Serialize};
use tracing::info;

/// A work item on the board.
///
/// `position` is assigned once at creation (tail of the initial partition)
/// and recomputed exactly once per successful move. No other mutation
/// touches it. `status` and `project` change only through an explicit move
/// or an explicit independent mutation, never as a side effect of
/// reordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: Status,
    /// Project bucket; `None` means the implicit "no project" bucket
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectId>,
    /// Fractional order key - the canonical ordering source of truth
    #[serde(default = "PositionKey::missing")]
    pub position: PositionKey,
    /// Forced by status transitions: entering Done sets it, leaving clears it
    #[serde(default)]
    pub completed: bool,
    /// Hides an archived task from the active view without deleting it;
    /// cleared when the task re-enters the active stage
    #[serde(default)]
    pub excluded_from_active: bool,

    /// Legacy integer order - accepted on read for backward compat and
    /// written back only until [`migrate_legacy_order`] has replaced it
    /// with a canonical fractional key. Dropping it earlier would destroy
    /// an unmigrated task's only ordering information on save.
    #[serde(default, skip_serializing_if = "Option::is_none", rename = "order")]
    _legacy_order: Option<i64>,
}

impl Task {
    /// Create a task with an explicit position key
    pub fn new(
        title: impl Into<String>,
        status: Status,
        project: Option<ProjectId>,
        position: PositionKey,
    ) -> Self {
        Self {
            id: TaskId::new(),
            title: title.into(),
            status,
            project,
            position,
            completed: status.is_done(),
            excluded_from_active: false,
            _legacy_order: None,
        }
    }

    /// Create a task placed at the tail of its partition.
    ///
    /// This is the creation-time position assignment: the new task sorts
    /// after every current member of the partition.
    pub fn at_partition_tail(
        tasks: &[Task],
        title: impl Into<String>,
        partition: Partition,
    ) -> Result<Self> {
        let ordered = index::ordered_within_partition(tasks, &partition);
        let last = ordered.last().map(|t| index::key_of(t)).transpose()?;
        let position = PositionKey::generate(last, None)?;
        Ok(Self::new(title, partition.status, partition.project, position))
    }

    /// The partition this task currently belongs to
    pub fn partition(&self) -> Partition {
        Partition::of(self)
    }

    /// Check whether this task still carries a legacy integer order
    pub fn has_legacy_order(&self) -> bool {
        self._legacy_order.is_some()
    }
}

/// Assign fresh fractional keys to partition members that only carry the
/// legacy integer `order` field.
///
/// Migrated tasks are appended after the partition's current tail in legacy
/// order (ties and missing values keep arrival order). Returns the number of
/// tasks migrated. After migration the string key is the only ordering
/// source of truth and the integer is no longer serialized; run this on
/// load, before any write-back of legacy data.
pub fn migrate_legacy_order(tasks: &mut [Task], partition: &Partition) -> Result<usize> {
    let mut tail: Option<PositionKey> = tasks
        .iter()
        .filter(|t| partition.contains(t) && t.position.is_usable())
        .map(|t| t.position.clone())
        .max();

    let mut pending: Vec<usize> = (0..tasks.len())
        .filter(|&i| partition.contains(&tasks[i]) && !tasks[i].position.is_usable())
        .collect();
    pending.sort_by_key(|&i| tasks[i]._legacy_order.unwrap_or(i64::MAX));

    let migrated = pending.len();
    for i in pending {
        let key = PositionKey::generate(tail.as_ref(), None)?;
        tasks[i].position = key.clone();
        tasks[i]._legacy_order = None;
        tail = Some(key);
    }

    if migrated > 0 {
        info!(count = migrated, "migrated legacy integer order to fractional keys");
    }
    Ok(migrated)
}

/// A project - the second, optional grouping dimension.
///
/// `display_order` orders project columns themselves and lives in its own
/// key space, never compared with task keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    /// 6-char hex without `#`
    pub color: String,
    pub display_order: PositionKey,
}

impl Project {
    /// Create a project with an auto-assigned color
    pub fn new(name: impl Into<String>, display_order: PositionKey) -> Self {
        let name = name.into();
        let color = project_color(&name).to_string();
        Self {
            id: ProjectId::new(),
            name,
            color,
            display_order,
        }
    }

    /// Override the auto-assigned color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_task_completed_tracks_status() {
        let t = Task::new("a", Status::Queued, None, PositionKey::initial());
        assert!(!t.completed);

        let t = Task::new("b", Status::Done, None, PositionKey::initial());
        assert!(t.completed);
    }

    #[test]
    fn test_creation_places_at_tail() {
        let partition = Partition::new(Status::Queued, None);
        let first = Task::at_partition_tail(&[], "first", partition.clone()).unwrap();
        let tasks = vec![first.clone()];
        let second = Task::at_partition_tail(&tasks, "second", partition.clone()).unwrap();

        assert!(second.position > first.position);
        assert_eq!(second.partition(), partition);
    }

    #[test]
    fn test_tail_placement_ignores_other_partitions() {
        let queued = Partition::new(Status::Queued, None);
        let done = Partition::new(Status::Done, None);

        let mut tasks = Vec::new();
        for i in 0..3 {
            tasks.push(Task::at_partition_tail(&tasks, format!("q{}", i), queued.clone()).unwrap());
        }
        let in_done = Task::at_partition_tail(&tasks, "d0", done).unwrap();

        // First member of an empty partition gets the mid-range default
        assert_eq!(in_done.position, PositionKey::initial());
    }

    #[test]
    fn test_legacy_order_survives_round_trip_until_migrated() {
        let json = r#"{
            "id": "t1",
            "title": "Old task",
            "status": "queued",
            "order": 3
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.has_legacy_order());
        assert!(!task.position.is_usable());

        // Saving an unmigrated task must not destroy its only ordering
        // information
        let out = serde_json::to_string(&task).unwrap();
        assert!(out.contains("\"order\":3"));
        let back: Task = serde_json::from_str(&out).unwrap();
        assert!(back.has_legacy_order());

        // Once migrated, the fractional key is canonical and the integer
        // is gone from the wire form
        let mut tasks = vec![task];
        migrate_legacy_order(&mut tasks, &Partition::new(Status::Queued, None)).unwrap();
        let out = serde_json::to_string(&tasks[0]).unwrap();
        assert!(!out.contains("\"order\""));
        assert!(tasks[0].position.is_usable());
    }

    #[test]
    fn test_migrate_legacy_order() {
        let partition = Partition::new(Status::Queued, None);
        let keyed = Task::at_partition_tail(&[], "keyed", partition.clone()).unwrap();

        let legacy = |id: &str, order: i64| -> Task {
            serde_json::from_str(&format!(
                r#"{{"id": "{}", "title": "{}", "status": "queued", "order": {}}}"#,
                id, id, order
            ))
            .unwrap()
        };

        // Out of arrival order on purpose
        let mut tasks = vec![legacy("b", 2), keyed.clone(), legacy("a", 1)];
        let migrated = migrate_legacy_order(&mut tasks, &partition).unwrap();
        assert_eq!(migrated, 2);

        let ordered = index::ordered_within_partition(&tasks, &partition);
        let titles: Vec<&str> = ordered.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["keyed", "a", "b"]);
        assert!(tasks.iter().all(|t| !t.has_legacy_order()));
        assert!(tasks.iter().all(|t| t.position.is_usable()));
    }

    #[test]
    fn test_project_auto_color() {
        let p = Project::new("Infra", PositionKey::initial());
        assert_eq!(p.color.len(), 6);
        assert!(p.color.chars().all(|c| c.is_ascii_hexdigit()));

        let p = p.with_color("1d76db");
        assert_eq!(p.color, "1d76db");
    }

    #[test]
    fn test_task_serialization_skips_empty_project() {
        let t = Task::new("a", Status::Queued, None, PositionKey::initial());
        let json = serde_json::to_string(&t).unwrap();
        assert!(!json.contains("\"project\""));
    }
}
