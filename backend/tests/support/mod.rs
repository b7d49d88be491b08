//! Shared fixtures for HTTP integration tests.

use std::collections::BTreeSet;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Cookie, Key};
use actix_web::{App, HttpResponse, post, test as actix_test, web};

use backend::domain::ports::{
    AlwaysPassCaptchaVerifier, ApplicantRepository, CaptchaVerifier, CommunityRepository,
    CourseRepository, InvitationRepository, LevelRepository, MailTransport, SchoolRepository,
    UserRepository,
};
use backend::domain::{
    Course, CourseId, EmailAddress, FullName, Role, School, SchoolId, User, UserId,
};
use backend::inbound::http::session::SessionContext;
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{communities, courses, invitations, mutations};
use backend::outbound::mail::RecordingMailTransport;
use backend::outbound::memory::InMemoryStore;

/// Store, mail recorder, and tenancy seeds shared by a test.
pub struct TestWorld {
    pub store: Arc<InMemoryStore>,
    pub mail: Arc<RecordingMailTransport>,
    pub school_id: SchoolId,
}

impl TestWorld {
    /// A world whose school allows the given applicant tags.
    pub fn with_tags(tags: &[&str]) -> Self {
        let school_id = SchoolId::random();
        let school = School::new(
            school_id.clone(),
            "Test School",
            tags.iter().map(|tag| (*tag).to_owned()).collect(),
        );
        Self {
            store: Arc::new(InMemoryStore::new(school)),
            mail: Arc::new(RecordingMailTransport::new()),
            school_id,
        }
    }

    /// A world with an empty tag allow-list.
    pub fn new() -> Self {
        Self::with_tags(&[])
    }

    /// Seed a course and return it.
    pub fn seed_course(&self, name: &str, public_preview: bool) -> Course {
        let course = Course::new(
            CourseId::random(),
            self.school_id.clone(),
            name,
            "A seeded course",
            public_preview,
        );
        self.store.insert_course(course.clone());
        course
    }

    /// Seed a user with the given roles and return it.
    pub fn seed_user(&self, email: &str, roles: &[Role]) -> User {
        let user = User::new(
            UserId::random(),
            self.school_id.clone(),
            EmailAddress::new(email).expect("valid email"),
            FullName::new("Seeded User").expect("valid name"),
            roles.iter().copied().collect::<BTreeSet<_>>(),
        );
        self.store.insert_user(user.clone());
        user
    }

    /// Bundle the world's adapters behind an always-passing verifier.
    pub fn state(&self) -> HttpState {
        self.state_with_captcha(Arc::new(AlwaysPassCaptchaVerifier))
    }

    /// Bundle the world's adapters with an explicit verifier.
    pub fn state_with_captcha(&self, captcha: Arc<dyn CaptchaVerifier>) -> HttpState {
        HttpState {
            school: Arc::clone(&self.store) as Arc<dyn SchoolRepository>,
            courses: Arc::clone(&self.store) as Arc<dyn CourseRepository>,
            levels: Arc::clone(&self.store) as Arc<dyn LevelRepository>,
            applicants: Arc::clone(&self.store) as Arc<dyn ApplicantRepository>,
            users: Arc::clone(&self.store) as Arc<dyn UserRepository>,
            communities: Arc::clone(&self.store) as Arc<dyn CommunityRepository>,
            invitations: Arc::clone(&self.store) as Arc<dyn InvitationRepository>,
            captcha,
            mail: Arc::clone(&self.mail) as Arc<dyn MailTransport>,
        }
    }
}

/// Test-only endpoint that signs the given user in.
#[post("/test/login/{user_id}")]
async fn login_as(session: SessionContext, path: web::Path<String>) -> HttpResponse {
    match UserId::new(path.as_str()) {
        Ok(user_id) => match session.persist_user(&user_id) {
            Ok(()) => HttpResponse::Ok().finish(),
            Err(_) => HttpResponse::InternalServerError().finish(),
        },
        Err(_) => HttpResponse::BadRequest().finish(),
    }
}

/// Build the application under test with every page and mutation route.
pub fn test_app(
    state: HttpState,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let session = SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build();

    App::new()
        .app_data(web::Data::new(state))
        .wrap(session)
        .service(
            web::scope("/api/v1")
                .service(mutations::create_course_author)
                .service(mutations::merge_levels),
        )
        .service(login_as)
        .service(courses::curriculum)
        .service(courses::leaderboard)
        .service(courses::apply)
        .service(courses::process_application)
        .service(courses::review)
        .service(courses::students)
        .service(courses::report)
        .service(courses::show)
        .service(communities::new_topic)
        .service(invitations::edit)
        .service(invitations::accept)
        .service(courses::show_with_slug)
}

/// Sign the user in and return the session cookie to replay.
pub async fn sign_in<S>(app: &S, user_id: &UserId) -> Cookie<'static>
where
    S: actix_web::dev::Service<
            actix_http::Request,
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
        >,
{
    let request = actix_test::TestRequest::post()
        .uri(&format!("/test/login/{user_id}"))
        .to_request();
    let response = actix_test::call_service(app, request).await;
    assert!(response.status().is_success(), "login fixture failed");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}
