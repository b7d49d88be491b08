//! Course page handlers.
//!
//! ```text
//! GET  /courses/{id}/curriculum       public-preview courses skip auth
//! GET  /courses/{id}/leaderboard      authenticated
//! GET  /courses/{id}/apply            public; may stash an applicant tag
//! POST /courses/{id}/apply            public; CAPTCHA before the form
//! GET  /courses/{id}/review           authenticated
//! GET  /courses/{id}/students         authenticated
//! GET  /courses/{id}/report           authenticated
//! GET  /courses/{id}[/{slug}]         authenticated
//! ```
//!
//! Every action follows the same shape: resolve the actor, find the record
//! through its policy scope, optionally drive a form, then pick exactly one
//! terminal response (page or redirect).

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::forms::{EnrollmentForm, EnrollmentPayload};
use crate::domain::ports::{
    CaptchaVerifierError, CourseRepositoryError, SchoolRepositoryError,
};
use crate::domain::presenters::CurriculumPresenter;
use crate::domain::{Actor, Course, CourseId, CourseScope, Error, Notification, School, messages};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{require_actor, resolve_actor};
use crate::inbound::http::pages::{Page, redirect, redirect_with_flash};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// CAPTCHA action name reported to the verification service.
const ENROLLMENT_CAPTCHA_ACTION: &str = "public_course_enrollment";

/// Query parameters accepted by the apply page.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct ApplyQuery {
    /// Force the visible-checkbox CAPTCHA variant after a failed attempt.
    #[serde(default)]
    pub visible_recaptcha: Option<String>,
    /// Applicant tag carried in from a campaign link.
    #[serde(default)]
    pub tag: Option<String>,
}

/// Query parameters accepted by the leaderboard page.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct LeaderboardQuery {
    /// Anchor date for the leaderboard window.
    #[serde(default)]
    pub on: Option<String>,
    /// How many weeks back from the anchor to report.
    #[serde(default)]
    pub weeks_before: Option<u32>,
}

/// Request body for the apply action.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    pub name: String,
    pub email: String,
    /// Client-side CAPTCHA response token.
    #[serde(default)]
    pub captcha_response: Option<String>,
}

pub(crate) fn map_school_error(err: SchoolRepositoryError) -> Error {
    match err {
        SchoolRepositoryError::Unavailable { message } => {
            Error::internal(format!("school storage failed: {message}"))
        }
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

fn map_captcha_error(err: CaptchaVerifierError) -> Error {
    match err {
        CaptchaVerifierError::Unavailable { message } => {
            Error::internal(format!("captcha verification failed: {message}"))
        }
    }
}

async fn current_school(state: &HttpState) -> Result<School, Error> {
    state.school.current().await.map_err(map_school_error)
}

fn parse_course_id(raw: &str) -> Result<CourseId, Error> {
    CourseId::new(raw).map_err(|_| Error::not_found("course not found"))
}

async fn find_course(
    state: &HttpState,
    actor: &Actor,
    school: &School,
    raw_id: &str,
) -> Result<Course, Error> {
    let id = parse_course_id(raw_id)?;
    let scope = CourseScope::for_actor(actor, school.id());
    state
        .courses
        .find_scoped(&id, &scope)
        .await
        .map_err(map_course_error)
}

fn apply_path(course_id: &str) -> String {
    format!("/courses/{course_id}/apply?visible_recaptcha=1")
}

/// Course curriculum page.
///
/// Conditional authentication: the course is resolved first, and only
/// non-preview courses require a signed-in actor. Anonymous visitors are
/// asked to log in rather than told whether the course exists.
#[utoipa::path(
    get,
    path = "/courses/{id}/curriculum",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Curriculum page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseCurriculum",
    security([])
)]
#[get("/courses/{id}/curriculum")]
pub async fn curriculum(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let school = current_school(&state).await?;
    let actor = resolve_actor(&session, &state.users).await?;

    let course = match find_course(&state, &actor, &school, &path).await {
        Ok(course) => course,
        // An anonymous miss may be a real course without public preview;
        // require login instead of leaking which it was.
        Err(err) if actor.authenticated().is_none() => {
            return Err(if err.code() == crate::domain::ErrorCode::NotFound {
                Error::unauthorized("login required")
            } else {
                err
            });
        }
        Err(err) => return Err(err),
    };

    let levels = state
        .courses
        .levels(course.id())
        .await
        .map_err(map_course_error)?;
    let (props, title) = CurriculumPresenter::build(&course, &levels).into_parts();
    let page = Page::new("student_course", title, props).with_flash_from(&session)?;
    Ok(page.respond())
}

/// Course leaderboard page.
#[utoipa::path(
    get,
    path = "/courses/{id}/leaderboard",
    params(
        ("id" = String, Path, description = "Course id"),
        LeaderboardQuery
    ),
    responses(
        (status = 200, description = "Leaderboard page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseLeaderboard"
)]
#[get("/courses/{id}/leaderboard")]
pub async fn leaderboard(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<LeaderboardQuery>,
) -> ApiResult<HttpResponse> {
    let school = current_school(&state).await?;
    let actor = require_actor(&session, &state.users).await?;
    let course = find_course(&state, &actor, &school, &path).await?;

    let mut props = json!({
        "courseId": course.id().as_ref(),
        "courseName": course.name(),
    });
    if let Some(map) = props.as_object_mut() {
        if let Some(on) = &query.on {
            map.insert("on".to_owned(), json!(on));
        }
        if let Some(weeks_before) = query.weeks_before {
            map.insert("weeksBefore".to_owned(), json!(weeks_before));
        }
    }

    let page = Page::new(
        "student_course",
        format!("{} | Leaderboard", course.name()),
        props,
    )
    .with_flash_from(&session)?;
    Ok(page.respond())
}

/// Public apply page.
///
/// Stores the `tag` query parameter in the session only when the school's
/// allow-list contains it; blank or unknown tags leave the session untouched.
#[utoipa::path(
    get,
    path = "/courses/{id}/apply",
    params(
        ("id" = String, Path, description = "Course id"),
        ApplyQuery
    ),
    responses(
        (status = 200, description = "Apply page", body = Page),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseApply",
    security([])
)]
#[get("/courses/{id}/apply")]
pub async fn apply(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<ApplyQuery>,
) -> ApiResult<HttpResponse> {
    let school = current_school(&state).await?;
    let actor = resolve_actor(&session, &state.users).await?;
    let course = find_course(&state, &actor, &school, &path).await?;

    if let Some(tag) = query.tag.as_deref()
        && school.allows_founder_tag(tag)
    {
        session.store_applicant_tag(tag)?;
    }

    let show_checkbox_recaptcha = query
        .visible_recaptcha
        .as_deref()
        .is_some_and(|flag| !flag.is_empty());
    let props = json!({
        "courseId": course.id().as_ref(),
        "courseName": course.name(),
        "courseDescription": course.description(),
        "showCheckboxRecaptcha": show_checkbox_recaptcha,
    });

    let page = Page::new("tailwind", format!("Apply | {}", course.name()), props)
        .with_flash_from(&session)?;
    Ok(page.respond())
}

/// Process a course application.
///
/// Human verification runs before the form; when it fails the form is never
/// constructed and the caller is bounced back with the visible CAPTCHA hint.
#[utoipa::path(
    post,
    path = "/courses/{id}/apply",
    params(("id" = String, Path, description = "Course id")),
    request_body = ApplyRequest,
    responses(
        (status = 303, description = "Redirect to / on success, back to the apply page on failure"),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseProcessApplication",
    security([])
)]
#[post("/courses/{id}/apply")]
pub async fn process_application(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<ApplyRequest>,
) -> ApiResult<HttpResponse> {
    let school = current_school(&state).await?;
    let actor = resolve_actor(&session, &state.users).await?;
    let course = find_course(&state, &actor, &school, &path).await?;

    let human = state
        .captcha
        .verify(payload.captcha_response.as_deref(), ENROLLMENT_CAPTCHA_ACTION)
        .await
        .map_err(map_captcha_error)?;
    if !human {
        return Ok(redirect(&apply_path(path.as_str())));
    }

    let mut form = EnrollmentForm::new(
        course,
        school,
        state.applicants.clone(),
        state.mail.clone(),
    );
    let enrollment = EnrollmentPayload {
        name: payload.name.clone(),
        email: payload.email.clone(),
        tag: session.applicant_tag()?,
    };

    if form.validate(&enrollment).await? {
        form.create_applicant().await?;
        redirect_with_flash(
            &session,
            "/",
            &Notification::success(messages::DONE_TITLE, messages::ENROLLMENT_MAIL_SENT),
        )
    } else {
        let joined = form.errors().join(", ");
        redirect_with_flash(
            &session,
            &apply_path(path.as_str()),
            &Notification::error(messages::enrollment_errors(&joined)),
        )
    }
}

/// Course review page for coaches.
#[utoipa::path(
    get,
    path = "/courses/{id}/review",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Review page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseReview"
)]
#[get("/courses/{id}/review")]
pub async fn review(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let school = current_school(&state).await?;
    let actor = require_actor(&session, &state.users).await?;
    let course = find_course(&state, &actor, &school, &path).await?;

    // The client router owns this page; the envelope ships no props.
    let page = Page::new("app_router", format!("{} | Review", course.name()), json!({}))
        .with_flash_from(&session)?;
    Ok(page.respond())
}

/// Course students page.
#[utoipa::path(
    get,
    path = "/courses/{id}/students",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Students page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseStudents"
)]
#[get("/courses/{id}/students")]
pub async fn students(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    course_shell_page(&state, &session, &path, "Students").await
}

/// Course report page.
#[utoipa::path(
    get,
    path = "/courses/{id}/report",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Report page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseReport"
)]
#[get("/courses/{id}/report")]
pub async fn report(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    course_shell_page(&state, &session, &path, "Report").await
}

async fn course_shell_page(
    state: &HttpState,
    session: &SessionContext,
    raw_id: &str,
    title_suffix: &str,
) -> ApiResult<HttpResponse> {
    let school = current_school(state).await?;
    let actor = require_actor(session, &state.users).await?;
    let course = find_course(state, &actor, &school, raw_id).await?;

    let props = json!({
        "courseId": course.id().as_ref(),
        "courseName": course.name(),
    });
    let page = Page::new(
        "student_course",
        format!("{} | {title_suffix}", course.name()),
        props,
    )
    .with_flash_from(session)?;
    Ok(page.respond())
}

/// Course landing page, with or without a trailing slug.
#[utoipa::path(
    get,
    path = "/courses/{id}",
    params(("id" = String, Path, description = "Course id")),
    responses(
        (status = 200, description = "Course page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseShow"
)]
#[get("/courses/{id}")]
pub async fn show(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    show_course_page(&state, &session, &path).await
}

/// Course landing page addressed with a friendly slug.
///
/// The slug is cosmetic; only the id selects the course. Registered after
/// the named course routes so `curriculum`, `review`, and friends win.
#[utoipa::path(
    get,
    path = "/courses/{id}/{slug}",
    params(
        ("id" = String, Path, description = "Course id"),
        ("slug" = String, Path, description = "Ignored; for readable URLs")
    ),
    responses(
        (status = 200, description = "Course page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "courseShowWithSlug"
)]
#[get("/courses/{id}/{slug}")]
pub async fn show_with_slug(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (id, _slug) = path.into_inner();
    show_course_page(&state, &session, &id).await
}

async fn show_course_page(
    state: &HttpState,
    session: &SessionContext,
    raw_id: &str,
) -> ApiResult<HttpResponse> {
    let school = current_school(state).await?;
    let actor = require_actor(session, &state.users).await?;
    let course = find_course(state, &actor, &school, raw_id).await?;

    let props = json!({
        "courseId": course.id().as_ref(),
        "courseName": course.name(),
        "courseDescription": course.description(),
    });
    let page = Page::new("student", course.name(), props).with_flash_from(session)?;
    Ok(page.respond())
}
