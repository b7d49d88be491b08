//! Course-author creation mutator.

use std::sync::Arc;

use serde::Deserialize;
use tracing::info;

use crate::domain::actor::Actor;
use crate::domain::course::Course;
use crate::domain::error::Error;
use crate::domain::forms::FormState;
use crate::domain::ids::{CourseId, SchoolId};
use crate::domain::mailers;
use crate::domain::policy::CourseScope;
use crate::domain::ports::{
    CourseRepository, CourseRepositoryError, MailTransport, MailTransportError, UserRepository,
    UserRepositoryError,
};
use crate::domain::user::{EmailAddress, FullName, User};

/// Request payload for the create-course-author mutation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseAuthorPayload {
    pub course_id: String,
    pub name: String,
    pub email: String,
}

/// Validates and performs the creation of a course author.
pub struct CreateCourseAuthorForm {
    actor: Actor,
    current_school: SchoolId,
    courses: Arc<dyn CourseRepository>,
    users: Arc<dyn UserRepository>,
    mail: Arc<dyn MailTransport>,
    state: FormState,
    errors: Vec<String>,
    validated: Option<(Course, FullName, EmailAddress)>,
}

impl CreateCourseAuthorForm {
    /// Bind the mutator to the requesting actor and its collaborators.
    pub fn new(
        actor: Actor,
        current_school: SchoolId,
        courses: Arc<dyn CourseRepository>,
        users: Arc<dyn UserRepository>,
        mail: Arc<dyn MailTransport>,
    ) -> Self {
        Self {
            actor,
            current_school,
            courses,
            users,
            mail,
            state: FormState::Unvalidated,
            errors: Vec::new(),
            validated: None,
        }
    }

    /// Validate the payload without performing any write.
    pub async fn validate(&mut self, payload: &CreateCourseAuthorPayload) -> Result<bool, Error> {
        let mut errors = Vec::new();

        if !self.actor.is_school_admin_of(&self.current_school) {
            errors.push("you are not allowed to create authors in this school".to_owned());
        }

        let course = match CourseId::new(&payload.course_id) {
            Err(_) => {
                errors.push("course not found".to_owned());
                None
            }
            Ok(course_id) => {
                let scope = CourseScope::for_actor(&self.actor, &self.current_school);
                match self.courses.find_scoped(&course_id, &scope).await {
                    Ok(course) => Some(course),
                    Err(CourseRepositoryError::NotFound) => {
                        errors.push("course not found".to_owned());
                        None
                    }
                    Err(err) => return Err(map_course_error(err)),
                }
            }
        };

        let name = FullName::new(&payload.name)
            .map_err(|err| errors.push(err.to_string()))
            .ok();
        let email = EmailAddress::new(&payload.email)
            .map_err(|err| errors.push(err.to_string()))
            .ok();

        if let (Some(course), Some(email)) = (&course, &email) {
            let taken = self
                .users
                .is_course_author(course.id(), email)
                .await
                .map_err(map_user_error)?;
            if taken {
                errors.push("email address already belongs to an author of this course".to_owned());
            }
        }

        if let (Some(course), Some(name), Some(email), true) =
            (course, name, email, errors.is_empty())
        {
            self.validated = Some((course, name, email));
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

    /// Create the author and send them their sign-in mail.
    ///
    /// Fails fast unless [`Self::validate`] has returned true; callable at
    /// most once.
    pub async fn create_author(&mut self) -> Result<User, Error> {
        self.state.require_valid()?;
        let Some((course, name, email)) = self.validated.take() else {
            return Err(Error::internal("validated payload missing"));
        };
        self.state = FormState::Actioned;

        let author = self
            .users
            .create_course_author(course.id(), name, email)
            .await
            .map_err(map_user_error)?;

        let message = mailers::compose_course_enrollment(self.users.as_ref(), &author, &course)
            .await
            .map_err(map_user_error)?;
        self.mail.deliver(&message).await.map_err(map_mail_error)?;

        info!(course_id = %course.id(), author_id = %author.id(), "course author created");
        Ok(author)
    }
}

fn map_course_error(err: CourseRepositoryError) -> Error {
    match err {
        CourseRepositoryError::NotFound => Error::not_found("course not found"),
        CourseRepositoryError::Unavailable { message } => {
            Error::internal(format!("course storage failed: {message}"))
        }
    }
}

fn map_user_error(err: UserRepositoryError) -> Error {
    match err {
        UserRepositoryError::NotFound => Error::not_found("user not found"),
        UserRepositoryError::Unavailable { message } => {
            Error::internal(format!("user storage failed: {message}"))
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
