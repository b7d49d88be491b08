//! Transactional mail composition.
//!
//! Builders here assemble recipients, subject, and body; delivery guarantees
//! belong to the [`MailTransport`] adapter behind the port. Any mail that
//! embeds a one-time login token must receive a token regenerated immediately
//! before composition.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::course::Course;
use crate::domain::messages;
use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::user::{Applicant, EmailAddress, FullName, LoginToken, User};

/// A display-name/address pair rendered as `"Full Name <address>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mailbox {
    name: String,
    address: EmailAddress,
}

impl Mailbox {
    /// Construct a mailbox.
    pub fn new(name: impl Into<String>, address: EmailAddress) -> Self {
        Self {
            name: name.into(),
            address,
        }
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Bare address.
    pub fn address(&self) -> &EmailAddress {
        &self.address
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.name, self.address)
    }
}

impl From<&User> for Mailbox {
    fn from(user: &User) -> Self {
        Self::new(user.name().as_ref(), user.email().clone())
    }
}

/// A composed message handed to the delivery transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    recipients: Vec<Mailbox>,
    subject: String,
    body: String,
}

impl Message {
    /// Assemble a message.
    pub fn new(recipients: Vec<Mailbox>, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            recipients,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Recipient list.
    pub fn recipients(&self) -> &[Mailbox] {
        &self.recipients
    }

    /// Subject line.
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Plain-text body.
    pub fn body(&self) -> &str {
        &self.body
    }
}

/// Regenerate the user's one-time login token and compose their
/// course-enrollment mail around it.
///
/// The previous token is invalidated by the regeneration, so the embedded
/// sign-in link is always the only working one.
pub async fn compose_course_enrollment(
    users: &dyn UserRepository,
    user: &User,
    course: &Course,
) -> Result<Message, UserRepositoryError> {
    let login_token = users.regenerate_login_token(user.id()).await?;
    Ok(course_enrollment(user, course, &login_token))
}

/// Mail for a user newly added to a course's staff.
///
/// Callers outside tests go through [`compose_course_enrollment`] so the
/// embedded token is never stale.
fn course_enrollment(user: &User, course: &Course, login_token: &LoginToken) -> Message {
    let body = format!(
        "Hi {name},\n\nYou now have access to {course}. \
         Sign in with this one-time link: /users/token?token={token}\n",
        name = user.name(),
        course = course.name(),
        token = login_token,
    );
    Message::new(
        vec![Mailbox::from(user)],
        messages::coach_added_subject(course.name()),
        body,
    )
}

/// Mail telling an applicant how to continue their application.
pub fn applicant_verification(applicant: &Applicant, course: &Course) -> Message {
    let body = format!(
        "Hi {name},\n\nThank you for applying to {course}. \
         Follow the link in this mail to verify your address and continue.\n",
        name = applicant.name(),
        course = course.name(),
    );
    Message::new(
        vec![Mailbox::new(
            applicant.name().as_ref(),
            applicant.email().clone(),
        )],
        messages::ENROLLMENT_MAIL_SENT,
        body,
    )
}

/// Feedback mail addressed to every founder of a team.
pub fn team_feedback(founders: &[User], coach_name: &FullName, feedback: &str) -> Message {
    let recipients = founders.iter().map(Mailbox::from).collect();
    let body = format!("Feedback from {coach_name}:\n\n{feedback}\n");
    Message::new(
        recipients,
        messages::new_feedback_subject(coach_name.as_ref()),
        body,
    )
}
