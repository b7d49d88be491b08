//! Driven port for policy-scoped course lookups.

use async_trait::async_trait;

use crate::domain::course::{Course, Level};
use crate::domain::ids::CourseId;
use crate::domain::policy::CourseScope;

/// Failures raised by course lookups.
///
/// A course outside the caller's scope reports [`Self::NotFound`], the same
/// variant as a genuinely missing id, so callers cannot tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseRepositoryError {
    #[error("course not found")]
    NotFound,
    #[error("course storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Read access to courses and their curricula.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Find one course visible under the given scope.
    ///
    /// The scope is applied inside the lookup, never after it.
    async fn find_scoped(
        &self,
        id: &CourseId,
        scope: &CourseScope,
    ) -> Result<Course, CourseRepositoryError>;

    /// Levels of a course, ordered by number.
    async fn levels(&self, course_id: &CourseId) -> Result<Vec<Level>, CourseRepositoryError>;
}
