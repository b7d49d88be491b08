//! User data model.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{CourseId, SchoolId, UserId};

/// Validation errors returned by the user value-object constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    EmptyEmail,
    InvalidEmail,
    EmptyName,
    NameTooLong { max: usize },
    EmptyToken,
}

impl fmt::Display for UserValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyEmail => write!(f, "email address must not be empty"),
            Self::InvalidEmail => write!(f, "email address does not look valid"),
            Self::EmptyName => write!(f, "name must not be empty"),
            Self::NameTooLong { max } => write!(f, "name must be at most {max} characters"),
            Self::EmptyToken => write!(f, "login token must not be empty"),
        }
    }
}

impl std::error::Error for UserValidationError {}

/// Validated email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an email address.
    ///
    /// The check is deliberately shallow (one `@` with non-empty sides and a
    /// dotted domain); real deliverability is the mail transport's problem.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        let Some((local, domain)) = raw.split_once('@') else {
            return Err(UserValidationError::InvalidEmail);
        };
        if local.is_empty()
            || domain.is_empty()
            || !domain.contains('.')
            || domain.starts_with('.')
            || domain.ends_with('.')
            || raw.chars().any(char::is_whitespace)
            || raw.matches('@').count() != 1
        {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validated full name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    const MAX_LEN: usize = 120;

    /// Validate and construct a full name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyName);
        }
        if raw.chars().count() > Self::MAX_LEN {
            return Err(UserValidationError::NameTooLong { max: Self::MAX_LEN });
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for FullName {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

/// Roles a user may hold within their school.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages the school: content, levels, authors.
    SchoolAdmin,
    /// Reviews student submissions.
    Coach,
    /// Writes course content.
    Author,
    /// An enrolled student.
    Founder,
}

/// A registered user of a school.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    id: UserId,
    school_id: SchoolId,
    email: EmailAddress,
    name: FullName,
    roles: BTreeSet<Role>,
}

impl User {
    /// Construct a user.
    pub fn new(
        id: UserId,
        school_id: SchoolId,
        email: EmailAddress,
        name: FullName,
        roles: BTreeSet<Role>,
    ) -> Self {
        Self {
            id,
            school_id,
            email,
            name,
            roles,
        }
    }

    /// Stable identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// School the user belongs to.
    pub fn school_id(&self) -> &SchoolId {
        &self.school_id
    }

    /// Email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Full name.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Roles held within the school.
    pub fn roles(&self) -> &BTreeSet<Role> {
        &self.roles
    }

    /// Whether the user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }
}

/// One-time login token embedded in transactional mail.
///
/// Regenerated immediately before every send; the previous value stops
/// working as soon as a new one is issued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoginToken(String);

impl LoginToken {
    /// Construct from an already-generated token value.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(UserValidationError::EmptyToken);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for LoginToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for LoginToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// An application captured by the public enrollment form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Applicant {
    course_id: CourseId,
    email: EmailAddress,
    name: FullName,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

impl Applicant {
    /// Construct an applicant record.
    pub fn new(
        course_id: CourseId,
        email: EmailAddress,
        name: FullName,
        tag: Option<String>,
    ) -> Self {
        Self {
            course_id,
            email,
            name,
            tag,
        }
    }

    /// Course applied to.
    pub fn course_id(&self) -> &CourseId {
        &self.course_id
    }

    /// Email address supplied on the form.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Name supplied on the form.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Allow-listed tag carried over from the apply link, if any.
    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}
