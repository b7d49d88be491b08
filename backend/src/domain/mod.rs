//! Domain primitives, aggregates, and use-case objects.
//!
//! Everything here is transport agnostic: inbound adapters translate HTTP
//! requests into these types, and driven adapters implement the traits under
//! [`ports`]. Keep types immutable and document invariants and serialisation
//! contracts (serde) in each type's Rustdoc.

pub mod actor;
pub mod community;
pub mod course;
pub mod error;
pub mod forms;
pub mod ids;
pub mod invitation;
pub mod mailers;
pub mod messages;
pub mod notification;
pub mod policy;
pub mod ports;
pub mod presenters;
pub mod school;
pub mod user;

pub use self::actor::{Actor, AuthenticatedUser};
pub use self::community::{Community, TopicCategory, TopicTarget};
pub use self::course::{Course, Level};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::ids::{
    CommunityId, CourseId, IdValidationError, LevelId, SchoolId, StartupId, TargetId,
    TopicCategoryId, UserId,
};
pub use self::invitation::{Invitation, InvitationState, InvitationStateError, InvitationToken};
pub use self::notification::{Notification, NotificationKind};
pub use self::policy::{CommunityScope, CourseScope};
pub use self::school::School;
pub use self::user::{
    Applicant, EmailAddress, FullName, LoginToken, Role, User, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
