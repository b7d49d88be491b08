//! Driven port resolving the current tenant school.

use async_trait::async_trait;

use crate::domain::school::School;

/// Failures raised by school lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchoolRepositoryError {
    #[error("school storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Resolve the school this deployment serves.
///
/// The source system resolved the tenant from the request host; this surface
/// serves a single school, so the port returns it directly.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolRepository: Send + Sync {
    /// The current school, including its applicant tag allow-list.
    async fn current(&self) -> Result<School, SchoolRepositoryError>;
}
