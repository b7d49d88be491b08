//! The requesting actor.
//!
//! Handlers resolve an [`Actor`] once per request (from the session) and pass
//! it into policy scopes and forms. Anonymous requests are first-class: the
//! public apply and preview pages accept them.

use std::collections::BTreeSet;

use crate::domain::ids::{SchoolId, UserId};
use crate::domain::user::{Role, User};

/// The authenticated or anonymous party making a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Actor {
    /// No session, or a session that did not resolve to a user.
    Anonymous,
    /// A signed-in user.
    User(AuthenticatedUser),
}

/// Identity and permissions of a signed-in actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    id: UserId,
    school_id: SchoolId,
    roles: BTreeSet<Role>,
}

impl AuthenticatedUser {
    /// Construct from resolved identity parts.
    pub fn new(id: UserId, school_id: SchoolId, roles: BTreeSet<Role>) -> Self {
        Self {
            id,
            school_id,
            roles,
        }
    }

    /// Stable user identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// School the user belongs to.
    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    /// Whether the user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().clone(),
            school_id: user.school_id().clone(),
            roles: user.roles().clone(),
        }
    }
}

impl Actor {
    /// The signed-in identity, if any.
    pub fn authenticated(&self) -> Option<&AuthenticatedUser> {
        match self {
            Self::Anonymous => None,
            Self::User(user) => Some(user),
        }
    }

    /// Whether the actor is a school admin of the given school.
    pub fn is_school_admin_of(&self, school_id: &SchoolId) -> bool {
        self.authenticated()
            .is_some_and(|user| user.school_id() == school_id && user.has_role(Role::SchoolAdmin))
    }
}
