//! Actor resolution for HTTP handlers.
//!
//! Each handler resolves the [`Actor`] exactly once, up front. Conditional
//! authentication (the preview-or-authenticate pattern) is expressed by
//! choosing between [`resolve_actor`] and [`require_actor`].

use std::sync::Arc;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{Actor, AuthenticatedUser, Error};
use crate::inbound::http::session::SessionContext;

/// Resolve the actor, treating a missing or stale session as anonymous.
pub async fn resolve_actor(
    session: &SessionContext,
    users: &Arc<dyn UserRepository>,
) -> Result<Actor, Error> {
    let Some(user_id) = session.user_id()? else {
        return Ok(Actor::Anonymous);
    };
    match users.find(&user_id).await.map_err(map_user_error)? {
        Some(user) => Ok(Actor::User(AuthenticatedUser::from(&user))),
        None => {
            // A session pointing at a deleted account is anonymous, not an error.
            tracing::warn!(user_id = %user_id, "session references unknown user");
            Ok(Actor::Anonymous)
        }
    }
}

/// Resolve the actor and insist on an authenticated user.
pub async fn require_actor(
    session: &SessionContext,
    users: &Arc<dyn UserRepository>,
) -> Result<Actor, Error> {
    session.require_user_id()?;
    match resolve_actor(session, users).await? {
        Actor::Anonymous => Err(Error::unauthorized("login required")),
        actor => Ok(actor),
    }
}

fn map_user_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::NotFound => Error::unauthorized("login required"),
        UserRepositoryError::Unavailable { message } => {
            Error::internal(format!("user storage failed: {message}"))
        }
    }
}
