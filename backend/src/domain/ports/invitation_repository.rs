//! Driven port for invitation lookup and acceptance.

use async_trait::async_trait;

use crate::domain::invitation::{Invitation, InvitationToken};
use crate::domain::user::{FullName, User};

/// Failures raised by invitation operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvitationRepositoryError {
    #[error("invitation not found")]
    NotFound,
    #[error("invitation has already been accepted")]
    AlreadyAccepted,
    #[error("invitation storage unavailable: {message}")]
    Unavailable { message: String },
}

/// Persistence for the invitation lifecycle.
///
/// `accept` owns the `Invited -> Accepted` transition so a second acceptance
/// can never create a duplicate account, however the requests race.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    /// Resolve an invitation by its link token.
    async fn find_by_token(
        &self,
        token: &InvitationToken,
    ) -> Result<Invitation, InvitationRepositoryError>;

    /// Accept the invitation exactly once and return the registered user.
    ///
    /// `clear_startup` drops the startup association when the invitee
    /// explicitly declined it.
    async fn accept(
        &self,
        token: &InvitationToken,
        name: FullName,
        clear_startup: bool,
    ) -> Result<User, InvitationRepositoryError>;
}
