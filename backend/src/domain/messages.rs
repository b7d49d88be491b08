//! User-facing copy.
//!
//! The source system pulled these strings from a translation catalogue; a
//! single module keeps them out of handler bodies and gives tests one place
//! to reference exact wording.

/// Default title for error notifications.
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong!";

/// Flash shown after a successful course application.
pub const ENROLLMENT_MAIL_SENT: &str =
    "Thank you for applying. We have sent you an email with the next steps.";

/// Flash shown when the enrollment form rejects the submission.
pub fn enrollment_errors(joined: &str) -> String {
    format!("Your application could not be submitted: {joined}")
}

/// Title of the author-created success notification.
pub const AUTHOR_CREATED_TITLE: &str = "Author created";

/// Body of the author-created success notification.
pub const AUTHOR_CREATED_MESSAGE: &str = "A new author has been added to the course.";

/// Title of the merge-complete success notification.
pub const DONE_TITLE: &str = "Done!";

/// Body of the merge-complete success notification.
pub const MERGE_COMPLETE_MESSAGE: &str = "Levels merged successfully.";

/// Flash shown when an already-registered invitee follows an edit link.
pub const ALREADY_REGISTERED: &str = "You have already completed your user registration!";

/// Conflict message for a second acceptance of the same invitation.
pub const INVITATION_ALREADY_ACCEPTED: &str = "invitation has already been accepted";

/// Page-title fragment for the new-topic page.
pub const NEW_TOPIC: &str = "Create a new topic";

/// Page-title suffix for community pages.
pub const COMMUNITY: &str = "Community";

/// Subject for the coach course-enrollment mail.
pub fn coach_added_subject(course_name: &str) -> String {
    format!("You have been added as a coach in {course_name}")
}

/// Subject for the team feedback mail.
pub fn new_feedback_subject(coach_name: &str) -> String {
    format!("{coach_name} has feedback for your team")
}
