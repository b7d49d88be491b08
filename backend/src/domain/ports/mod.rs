//! Domain ports and supporting types for the hexagonal boundary.

mod applicant_repository;
mod captcha_verifier;
mod community_repository;
mod course_repository;
mod invitation_repository;
mod level_repository;
mod mail_transport;
mod school_repository;
mod user_repository;

#[cfg(test)]
pub use applicant_repository::MockApplicantRepository;
pub use applicant_repository::{ApplicantRepository, ApplicantRepositoryError};
pub use captcha_verifier::{
    AlwaysPassCaptchaVerifier, CaptchaVerifier, CaptchaVerifierError, StaticCaptchaVerifier,
};
#[cfg(test)]
pub use community_repository::MockCommunityRepository;
pub use community_repository::{CommunityRepository, CommunityRepositoryError};
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CourseRepository, CourseRepositoryError};
#[cfg(test)]
pub use invitation_repository::MockInvitationRepository;
pub use invitation_repository::{InvitationRepository, InvitationRepositoryError};
#[cfg(test)]
pub use level_repository::MockLevelRepository;
pub use level_repository::{LevelRepository, LevelRepositoryError};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{MailTransport, MailTransportError};
#[cfg(test)]
pub use school_repository::MockSchoolRepository;
pub use school_repository::{SchoolRepository, SchoolRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
