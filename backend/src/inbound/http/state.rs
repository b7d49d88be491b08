//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    ApplicantRepository, CaptchaVerifier, CommunityRepository, CourseRepository,
    InvitationRepository, LevelRepository, MailTransport, SchoolRepository, UserRepository,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub school: Arc<dyn SchoolRepository>,
    pub courses: Arc<dyn CourseRepository>,
    pub levels: Arc<dyn LevelRepository>,
    pub applicants: Arc<dyn ApplicantRepository>,
    pub users: Arc<dyn UserRepository>,
    pub communities: Arc<dyn CommunityRepository>,
    pub invitations: Arc<dyn InvitationRepository>,
    pub captcha: Arc<dyn CaptchaVerifier>,
    pub mail: Arc<dyn MailTransport>,
}
