//! Driven port for user accounts, course authors, and login tokens.

use async_trait::async_trait;

use crate::domain::ids::{CourseId, UserId};
use crate::domain::user::{EmailAddress, FullName, LoginToken, User};

/// Failures raised by user operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("user not found")]
    NotFound,
    #[error("user storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Persistence for users and their course-author assignments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id.
    async fn find(&self, id: &UserId) -> Result<Option<User>, UserRepositoryError>;

    /// Whether this email already belongs to an author of the course.
    async fn is_course_author(
        &self,
        course_id: &CourseId,
        email: &EmailAddress,
    ) -> Result<bool, UserRepositoryError>;

    /// Create (or promote) a user as an author of the course.
    async fn create_course_author(
        &self,
        course_id: &CourseId,
        name: FullName,
        email: EmailAddress,
    ) -> Result<User, UserRepositoryError>;

    /// Replace the user's one-time login token and return the new value.
    ///
    /// Must be called immediately before composing any mail that embeds the
    /// token; the previous token is invalidated by this call.
    async fn regenerate_login_token(&self, id: &UserId)
    -> Result<LoginToken, UserRepositoryError>;
}
