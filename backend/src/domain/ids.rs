//! Validated identifier newtypes shared across the domain.
//!
//! Every identifier is a UUID kept alongside its canonical string form so
//! handlers can borrow the text without re-formatting on every use.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors returned by the id constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdValidationError {
    EmptyId,
    InvalidId,
}

impl fmt::Display for IdValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "identifier must not be empty"),
            Self::InvalidId => write!(f, "identifier must be a valid UUID"),
        }
    }
}

impl std::error::Error for IdValidationError {}

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Uuid, String);

        impl $name {
            /// Validate and construct an id from borrowed input.
            pub fn new(id: impl AsRef<str>) -> Result<Self, IdValidationError> {
                let id = id.as_ref();
                if id.is_empty() {
                    return Err(IdValidationError::EmptyId);
                }
                if id.trim() != id {
                    return Err(IdValidationError::InvalidId);
                }
                let parsed = Uuid::parse_str(id).map_err(|_| IdValidationError::InvalidId)?;
                Ok(Self(parsed, id.to_owned()))
            }

            /// Generate a new random id.
            pub fn random() -> Self {
                let uuid = Uuid::new_v4();
                Self(uuid, uuid.to_string())
            }

            /// Access the underlying UUID.
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.1.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_ref())
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.1
            }
        }
    };
}

define_id!(
    /// Stable school identifier.
    SchoolId
);
define_id!(
    /// Stable course identifier.
    CourseId
);
define_id!(
    /// Stable level identifier.
    LevelId
);
define_id!(
    /// Stable community identifier.
    CommunityId
);
define_id!(
    /// Stable topic-category identifier.
    TopicCategoryId
);
define_id!(
    /// Stable identifier for a record a new topic may link back to.
    TargetId
);
define_id!(
    /// Stable user identifier.
    UserId
);
define_id!(
    /// Stable startup (team) identifier.
    StartupId
);
