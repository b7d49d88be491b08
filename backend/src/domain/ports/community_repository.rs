//! Driven port for policy-scoped community lookups.

use async_trait::async_trait;

use crate::domain::community::{Community, TopicTarget};
use crate::domain::ids::{CommunityId, TargetId};
use crate::domain::policy::CommunityScope;

/// Failures raised by community lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommunityRepositoryError {
    #[error("community not found")]
    NotFound,
    #[error("community storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Read access to communities and new-topic targets.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityRepository: Send + Sync {
    /// Find one community visible under the given scope.
    async fn find_scoped(
        &self,
        id: &CommunityId,
        scope: &CommunityScope,
    ) -> Result<Community, CommunityRepositoryError>;

    /// Resolve the record a new topic links back to, if it exists.
    async fn find_target(
        &self,
        id: &TargetId,
    ) -> Result<Option<TopicTarget>, CommunityRepositoryError>;
}
