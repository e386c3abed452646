//! Core types for the board engine

mod ids;
mod partition;
mod patch;
mod position;
mod status;
mod task;

// Re-export all types
pub use ids::{ProjectId, TaskId};
pub use partition::Partition;
pub use patch::TaskPatch;
pub use position::PositionKey;
pub use status::Status;
pub use task::{migrate_legacy_order, Project, Task};
