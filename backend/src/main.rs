//! Backend entry-point: wires page endpoints, mutations, and OpenAPI docs.

use std::env;
use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::cookie::{Key, SameSite};
use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use backend::ApiDoc;
use backend::domain::SchoolId;
use backend::domain::ports::{
    ApplicantRepository, CaptchaVerifier, CommunityRepository, CourseRepository,
    InvitationRepository, LevelRepository, MailTransport, SchoolRepository, UserRepository,
};
use backend::domain::school::School;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
use backend::inbound::http::{communities, courses, invitations, mutations};
use backend::outbound::captcha::HttpCaptchaVerifier;
use backend::outbound::mail::TracingMailTransport;
use backend::outbound::memory::InMemoryStore;

const DEFAULT_CAPTCHA_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let key_path =
        env::var("SESSION_KEY_FILE").unwrap_or_else(|_| "/var/run/secrets/session_key".into());
    let key = match std::fs::read(&key_path) {
        Ok(bytes) => Key::derive_from(&bytes),
        Err(e) => {
            let allow_dev = env::var("SESSION_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
            if cfg!(debug_assertions) || allow_dev {
                warn!(path = %key_path, error = %e, "using temporary session key (dev only)");
                Key::generate()
            } else {
                return Err(std::io::Error::other(format!(
                    "failed to read session key at {key_path}: {e}"
                )));
            }
        }
    };

    let cookie_secure = env::var("SESSION_COOKIE_SECURE")
        .map(|v| v != "0")
        .unwrap_or(true);

    let state = web::Data::new(build_state()?);
    let health_state = web::Data::new(HealthState::new());
    // Clone for server factory so readiness probe remains accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let session = SessionMiddleware::builder(CookieSessionStore::default(), key.clone())
            .cookie_name("session".into())
            .cookie_path("/".into())
            .cookie_secure(cookie_secure)
            .cookie_http_only(true)
            .cookie_same_site(SameSite::Lax)
            .build();

        let api = web::scope("/api/v1")
            .service(mutations::create_course_author)
            .service(mutations::merge_levels);

        #[cfg_attr(not(debug_assertions), allow(unused_mut))]
        let mut app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(session)
            .service(api)
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
            .service(ready)
            .service(live)
            // The slug route must stay last or it would shadow the named
            // course routes.
            .service(courses::show_with_slug);

        #[cfg(debug_assertions)]
        {
            app = app
                .service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
        }

        app
    })
    .bind(("0.0.0.0", 8080))?;

    health_state.mark_ready();
    server.run().await
}

/// Assemble the adapter bundle from the environment.
fn build_state() -> std::io::Result<HttpState> {
    let school_id = match env::var("SCHOOL_ID") {
        Ok(raw) => SchoolId::new(&raw)
            .map_err(|e| std::io::Error::other(format!("invalid SCHOOL_ID {raw:?}: {e}")))?,
        Err(_) => SchoolId::random(),
    };
    let school_name = env::var("SCHOOL_NAME").unwrap_or_else(|_| "Demo School".into());
    let founder_tags: Vec<String> = env::var("FOUNDER_TAGS")
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default();

    let store = Arc::new(InMemoryStore::new(School::new(
        school_id,
        school_name,
        founder_tags,
    )));

    let verify_url = env::var("CAPTCHA_VERIFY_URL")
        .unwrap_or_else(|_| DEFAULT_CAPTCHA_VERIFY_URL.into())
        .parse()
        .map_err(|e| std::io::Error::other(format!("invalid CAPTCHA_VERIFY_URL: {e}")))?;
    let secret = env::var("CAPTCHA_SECRET").ok();
    if secret.is_none() {
        warn!("CAPTCHA_SECRET not set; all applications will fail human verification");
    }
    let captcha = HttpCaptchaVerifier::new(verify_url, secret)
        .map_err(|e| std::io::Error::other(format!("captcha client: {e}")))?;

    Ok(HttpState {
        school: Arc::clone(&store) as Arc<dyn SchoolRepository>,
        courses: Arc::clone(&store) as Arc<dyn CourseRepository>,
        levels: Arc::clone(&store) as Arc<dyn LevelRepository>,
        applicants: Arc::clone(&store) as Arc<dyn ApplicantRepository>,
        users: Arc::clone(&store) as Arc<dyn UserRepository>,
        communities: Arc::clone(&store) as Arc<dyn CommunityRepository>,
        invitations: Arc::clone(&store) as Arc<dyn InvitationRepository>,
        captcha: Arc::new(captcha) as Arc<dyn CaptchaVerifier>,
        mail: Arc::new(TracingMailTransport) as Arc<dyn MailTransport>,
    })
}
