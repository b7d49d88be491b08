//! Public course enrollment form.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::course::Course;
use crate::domain::error::Error;
use crate::domain::forms::FormState;
use crate::domain::mailers;
use crate::domain::ports::{
    ApplicantRepository, ApplicantRepositoryError, MailTransport, MailTransportError,
};
use crate::domain::school::School;
use crate::domain::user::{Applicant, EmailAddress, FullName};

/// Request payload for the apply action.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentPayload {
    pub name: String,
    pub email: String,
    /// Tag carried over from the session; only allow-listed values survive.
    #[serde(default)]
    pub tag: Option<String>,
}

/// Validates and records one public course application.
///
/// CAPTCHA verification is the caller's job and happens before this form is
/// constructed; a failed verification never reaches `validate`.
pub struct EnrollmentForm {
    course: Course,
    school: School,
    applicants: Arc<dyn ApplicantRepository>,
    mail: Arc<dyn MailTransport>,
    state: FormState,
    errors: Vec<String>,
    validated: Option<Applicant>,
}

impl EnrollmentForm {
    /// Bind the form to its target course and collaborators.
    pub fn new(
        course: Course,
        school: School,
        applicants: Arc<dyn ApplicantRepository>,
        mail: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            course,
            school,
            applicants,
            mail,
            state: FormState::Unvalidated,
            errors: Vec::new(),
            validated: None,
        }
    }

    /// Validate the payload without performing any write.
    ///
    /// Returns `Ok(true)` when the application may proceed; on `Ok(false)`
    /// the ordered error messages are available via [`Self::errors`].
    pub async fn validate(&mut self, payload: &EnrollmentPayload) -> Result<bool, Error> {
        let mut errors = Vec::new();

        let name = FullName::new(&payload.name)
            .map_err(|err| errors.push(err.to_string()))
            .ok();
        let email = EmailAddress::new(&payload.email)
            .map_err(|err| errors.push(err.to_string()))
            .ok();

        if let Some(email) = &email {
            let applied = self
                .applicants
                .email_applied(self.course.id(), email)
                .await
                .map_err(map_applicant_error)?;
            if applied {
                errors.push("email address has already been used to apply".to_owned());
            }
        }

        if let (Some(name), Some(email), true) = (name, email, errors.is_empty()) {
            let tag = payload
                .tag
                .as_deref()
                .filter(|tag| self.school.allows_founder_tag(tag))
                .map(str::to_owned);
            self.validated = Some(Applicant::new(self.course.id().clone(), email, name, tag));
            self.state = FormState::Valid;
            Ok(true)
        } else {
            self.errors = errors;
            self.state = FormState::Invalid;
            Ok(false)
        }
    }

    /// Ordered validation messages collected by [`Self::validate`].
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Persist the application and send the verification mail.
    ///
    /// Fails fast unless [`Self::validate`] has returned true for this
    /// instance; callable at most once.
    pub async fn create_applicant(&mut self) -> Result<Applicant, Error> {
        self.state.require_valid()?;
        let Some(applicant) = self.validated.take() else {
            return Err(Error::internal("validated payload missing"));
        };
        self.state = FormState::Actioned;

        let created = self
            .applicants
            .create(applicant)
            .await
            .map_err(map_applicant_error)?;

        let message = mailers::applicant_verification(&created, &self.course);
        self.mail
            .deliver(&message)
            .await
            .map_err(map_mail_error)?;

        info!(
            course_id = %self.course.id(),
            applicant = %created.email(),
            "applicant created"
        );
        Ok(created)
    }
}

fn map_applicant_error(err: ApplicantRepositoryError) -> Error {
    match err {
        ApplicantRepositoryError::Unavailable { message } => {
            Error::internal(format!("applicant storage failed: {message}"))
        }
    }
}

fn map_mail_error(err: MailTransportError) -> Error {
    match err {
        MailTransportError::Unavailable { message } => {
            Error::internal(format!("mail delivery failed: {message}"))
        }
    }
}
