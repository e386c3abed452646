//! Workflow status - the three-state column dimension

use serde::{Deserialize, Serialize};

/// Workflow stage of a task.
///
/// The transition graph is complete: every status is reachable from every
/// other status in a single move. No transition is forbidden; the only
/// coupling is the forced side effects applied during reconciliation
/// (entering [`Status::Done`] sets `completed`, leaving it clears
/// `completed`, entering [`Status::Active`] un-hides archived tasks).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Waiting to be picked up
    Queued,
    /// In progress
    Active,
    /// Finished - the terminal column
    Done,
}

impl Status {
    /// Check whether this is the terminal "done" stage
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    /// All statuses in display order
    pub fn all() -> [Status; 3] {
        [Self::Queued, Self::Active, Self::Done]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_done_is_terminal() {
        assert!(Status::Done.is_done());
        assert!(!Status::Queued.is_done());
        assert!(!Status::Active.is_done());
    }

    #[test]
    fn test_status_serde_snake_case() {
        assert_eq!(serde_json::to_string(&Status::Active).unwrap(), "\"active\"");
        let s: Status = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(s, Status::Done);
    }
}
