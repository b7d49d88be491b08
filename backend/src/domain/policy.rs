//! Policy scopes: the subset of records an actor may see.
//!
//! Scopes are explicit values composed once per entity type and handed to the
//! repository *with* the lookup, so a denied record is indistinguishable from
//! a missing one. Handlers never fetch-then-check.

use crate::domain::actor::Actor;
use crate::domain::community::Community;
use crate::domain::course::Course;
use crate::domain::ids::SchoolId;

/// Visibility scope for courses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CourseScope {
    /// Anonymous actors: only public-preview courses of the current school.
    PreviewOnly { school_id: SchoolId },
    /// Signed-in actors: every course of their own school.
    Member { school_id: SchoolId },
}

impl CourseScope {
    /// Compose the scope for an actor against the current school.
    pub fn for_actor(actor: &Actor, current_school: &SchoolId) -> Self {
        match actor.authenticated() {
            None => Self::PreviewOnly {
                school_id: current_school.clone(),
            },
            Some(user) => Self::Member {
                school_id: user.school_id().clone(),
            },
        }
    }

    /// Whether the scope permits seeing the given course.
    pub fn permits(&self, course: &Course) -> bool {
        match self {
            Self::PreviewOnly { school_id } => {
                course.school_id() == school_id && course.public_preview()
            }
            Self::Member { school_id } => course.school_id() == school_id,
        }
    }
}

/// Visibility scope for communities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommunityScope {
    /// Anonymous actors see no communities.
    Nothing,
    /// Signed-in actors: every community of their own school.
    Member { school_id: SchoolId },
}

impl CommunityScope {
    /// Compose the scope for an actor.
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.authenticated() {
            None => Self::Nothing,
            Some(user) => Self::Member {
                school_id: user.school_id().clone(),
            },
        }
    }

    /// Whether the scope permits seeing the given community.
    pub fn permits(&self, community: &Community) -> bool {
        match self {
            Self::Nothing => false,
            Self::Member { school_id } => community.school_id() == school_id,
        }
    }
}
