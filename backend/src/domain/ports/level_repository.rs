//! Driven port for level lookups and the destructive merge operation.

use async_trait::async_trait;

use crate::domain::course::Level;
use crate::domain::ids::{LevelId, SchoolId};

/// Failures raised by level operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LevelRepositoryError {
    #[error("level not found")]
    NotFound,
    #[error("level storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Read and merge access to levels.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LevelRepository: Send + Sync {
    /// Find a level whose course belongs to the given school.
    ///
    /// Levels of other schools report [`LevelRepositoryError::NotFound`],
    /// keeping denial indistinguishable from absence.
    async fn find_in_school(
        &self,
        id: &LevelId,
        school_id: &SchoolId,
    ) -> Result<Level, LevelRepositoryError>;

    /// Re-parent everything from `delete_id` onto `merge_into_id`, then
    /// delete `delete_id`.
    async fn merge(
        &self,
        delete_id: &LevelId,
        merge_into_id: &LevelId,
    ) -> Result<(), LevelRepositoryError>;
}
