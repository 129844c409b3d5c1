//! Session errors

use goal_types::GoalId;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Goal {0} is not loaded")]
    GoalNotFound(GoalId),
}
