//! Single-use forms and mutators.
//!
//! Each form encapsulates validation and the side-effecting write for one
//! use case. All of them share the same request-scoped state machine:
//!
//! ```text
//! Unvalidated --validate--> Valid --action--> Actioned (terminal)
//!                       \-> Invalid (terminal; caller re-renders with errors)
//! ```
//!
//! `validate` never performs the action, even when the payload is
//! well-formed; only the caller decides to proceed. Invoking the action
//! while the form is not `Valid` is a programming error and fails fast with
//! an internal error instead of touching storage.

mod course_author;
mod enrollment;
mod merge_levels;

pub use course_author::{CreateCourseAuthorForm, CreateCourseAuthorPayload};
pub use enrollment::{EnrollmentForm, EnrollmentPayload};
pub use merge_levels::{MergeLevelsForm, MergeLevelsPayload};

use crate::domain::error::Error;

/// Request-scoped lifecycle of a form instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormState {
    /// Constructed; `validate` has not run.
    Unvalidated,
    /// `validate` returned true; the action may run exactly once.
    Valid,
    /// `validate` returned false; terminal for this request.
    Invalid,
    /// The action ran; terminal.
    Actioned,
}

impl FormState {
    /// Guard shared by every action method.
    pub(crate) fn require_valid(self) -> Result<(), Error> {
        match self {
            Self::Valid => Ok(()),
            Self::Unvalidated => Err(Error::internal("form action invoked before validation")),
            Self::Invalid => Err(Error::internal("form action invoked on an invalid form")),
            Self::Actioned => Err(Error::internal("form action invoked twice")),
        }
    }
}
