//! Driven port for applicants captured by the public enrollment form.

use async_trait::async_trait;

use crate::domain::ids::CourseId;
use crate::domain::user::{Applicant, EmailAddress};

/// Failures raised by applicant writes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplicantRepositoryError {
    #[error("applicant storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Persistence for course applications.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ApplicantRepository: Send + Sync {
    /// Whether this email has already applied to the course.
    async fn email_applied(
        &self,
        course_id: &CourseId,
        email: &EmailAddress,
    ) -> Result<bool, ApplicantRepositoryError>;

    /// Persist a validated application.
    async fn create(&self, applicant: Applicant) -> Result<Applicant, ApplicantRepositoryError>;
}
