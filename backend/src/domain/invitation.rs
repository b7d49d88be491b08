//! Invitation data model.
//!
//! An invitation is a pending account. It moves from `Invited` to `Accepted`
//! exactly once; a second acceptance attempt is a conflict, never a second
//! account.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ids::{StartupId, UserId};
use crate::domain::user::{EmailAddress, FullName};

/// Opaque single-use token identifying an invitation link.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InvitationToken(String);

/// Validation errors for [`InvitationToken`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationTokenValidationError {
    EmptyToken,
}

impl fmt::Display for InvitationTokenValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyToken => write!(f, "invitation token must not be empty"),
        }
    }
}

impl std::error::Error for InvitationTokenValidationError {}

impl InvitationToken {
    /// Validate and construct a token.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, InvitationTokenValidationError> {
        let raw = raw.as_ref().trim();
        if raw.is_empty() {
            return Err(InvitationTokenValidationError::EmptyToken);
        }
        Ok(Self(raw.to_owned()))
    }
}

impl AsRef<str> for InvitationToken {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for InvitationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl TryFrom<String> for InvitationToken {
    type Error = InvitationTokenValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<InvitationToken> for String {
    fn from(value: InvitationToken) -> Self {
        value.0
    }
}

/// Lifecycle state of an invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvitationState {
    /// Sent out, not yet acted on.
    Invited,
    /// The invitee completed registration through this invitation.
    Accepted,
}

/// Error raised when the one-way accept transition is repeated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvitationStateError {
    #[error("invitation has already been accepted")]
    AlreadyAccepted,
}

/// A pending (or consumed) account registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    token: InvitationToken,
    user_id: UserId,
    email: EmailAddress,
    name: FullName,
    state: InvitationState,
    already_registered: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    startup_id: Option<StartupId>,
}

impl Invitation {
    /// Construct a fresh invitation for a provisional account.
    pub fn new(
        token: InvitationToken,
        user_id: UserId,
        email: EmailAddress,
        name: FullName,
        startup_id: Option<StartupId>,
    ) -> Self {
        Self {
            token,
            user_id,
            email,
            name,
            state: InvitationState::Invited,
            already_registered: false,
            startup_id,
        }
    }

    /// Single-use link token.
    pub fn token(&self) -> &InvitationToken {
        &self.token
    }

    /// Provisional account the invitation was issued for.
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Invitee email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Invitee name as captured at invite time.
    pub fn name(&self) -> &FullName {
        &self.name
    }

    /// Current lifecycle state.
    pub fn state(&self) -> InvitationState {
        self.state
    }

    /// Whether the invitee already completed registration elsewhere.
    pub fn already_registered(&self) -> bool {
        self.already_registered
    }

    /// Startup (team) the invitee would join, if any.
    pub fn startup_id(&self) -> Option<&StartupId> {
        self.startup_id.as_ref()
    }

    /// Mark the invitee as having completed registration already.
    ///
    /// Edit attempts against such invitations sign the user in and route to
    /// phone verification instead of re-showing the registration form.
    pub fn with_already_registered(mut self) -> Self {
        self.already_registered = true;
        self
    }

    /// Perform the one-way `Invited -> Accepted` transition.
    ///
    /// `clear_startup` drops the startup association, honoured only when the
    /// caller explicitly declined it.
    pub fn accept(
        mut self,
        name: FullName,
        clear_startup: bool,
    ) -> Result<Self, InvitationStateError> {
        if self.state == InvitationState::Accepted {
            return Err(InvitationStateError::AlreadyAccepted);
        }
        self.state = InvitationState::Accepted;
        self.name = name;
        if clear_startup {
            self.startup_id = None;
        }
        Ok(self)
    }
}
