//! End-to-end coverage for course pages and the public application flow.

mod support;

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use serde_json::{Value, json};

use backend::domain::Role;
use backend::domain::ports::StaticCaptchaVerifier;
use support::{TestWorld, sign_in, test_app};

fn location(response: &actix_web::dev::ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_owned()
}

#[actix_web::test]
async fn public_preview_curriculum_renders_for_anonymous_visitors() {
    let world = TestWorld::new();
    let course = world.seed_course("Open Course", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/curriculum", course.id()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["layout"], "student_course");
    assert_eq!(body["title"], "Open Course | Curriculum");
    assert_eq!(body["props"]["courseName"], "Open Course");
}

#[actix_web::test]
async fn hidden_curriculum_requires_authentication() {
    let world = TestWorld::new();
    let course = world.seed_course("Hidden Course", false);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/curriculum", course.id()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn hidden_curriculum_renders_for_a_signed_in_member() {
    let world = TestWorld::new();
    let course = world.seed_course("Hidden Course", false);
    let user = world.seed_user("member@example.com", &[Role::Founder]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, user.id()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/curriculum", course.id()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[actix_web::test]
async fn applying_with_an_allow_listed_tag_records_it_on_the_applicant() {
    let world = TestWorld::with_tags(&["cohort-1"]);
    let course = world.seed_course("Open Course", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    let visit = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/apply?tag=cohort-1", course.id()))
        .to_request();
    let visit_response = actix_test::call_service(&app, visit).await;
    assert_eq!(visit_response.status(), StatusCode::OK);
    let cookie = visit_response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("tag stored in session")
        .into_owned();

    let submit = actix_test::TestRequest::post()
        .uri(&format!("/courses/{}/apply", course.id()))
        .cookie(cookie)
        .set_json(json!({"name": "New Applicant", "email": "new@example.com"}))
        .to_request();
    let submit_response = actix_test::call_service(&app, submit).await;
    assert_eq!(submit_response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&submit_response), "/");

    let applicants = world.store.applicants();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].tag(), Some("cohort-1"));
    assert_eq!(world.mail.delivered().len(), 1);
}

#[actix_web::test]
async fn an_unknown_tag_leaves_the_session_untouched() {
    let world = TestWorld::with_tags(&["cohort-1"]);
    let course = world.seed_course("Open Course", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    let visit = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/apply?tag=not-a-cohort", course.id()))
        .to_request();
    let visit_response = actix_test::call_service(&app, visit).await;
    assert_eq!(visit_response.status(), StatusCode::OK);

    let submit = actix_test::TestRequest::post()
        .uri(&format!("/courses/{}/apply", course.id()))
        .set_json(json!({"name": "New Applicant", "email": "new@example.com"}))
        .to_request();
    let submit_response = actix_test::call_service(&app, submit).await;
    assert_eq!(submit_response.status(), StatusCode::SEE_OTHER);

    let applicants = world.store.applicants();
    assert_eq!(applicants.len(), 1);
    assert_eq!(applicants[0].tag(), None);
}

#[actix_web::test]
async fn a_duplicate_application_bounces_back_without_a_second_record() {
    let world = TestWorld::new();
    let course = world.seed_course("Open Course", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    for expected in [
        ("/".to_owned(), 1),
        (
            format!("/courses/{}/apply?visible_recaptcha=1", course.id()),
            1,
        ),
    ] {
        let submit = actix_test::TestRequest::post()
            .uri(&format!("/courses/{}/apply", course.id()))
            .set_json(json!({"name": "Applicant", "email": "again@example.com"}))
            .to_request();
        let response = actix_test::call_service(&app, submit).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), expected.0);
        assert_eq!(world.store.applicants().len(), expected.1);
    }
}

#[actix_web::test]
async fn a_failed_captcha_redirects_without_touching_the_form() {
    let world = TestWorld::new();
    let course = world.seed_course("Open Course", true);
    let state = world.state_with_captcha(Arc::new(StaticCaptchaVerifier(false)));
    let app = actix_test::init_service(test_app(state)).await;

    let submit = actix_test::TestRequest::post()
        .uri(&format!("/courses/{}/apply", course.id()))
        .set_json(json!({"name": "Applicant", "email": "human@example.com"}))
        .to_request();
    let response = actix_test::call_service(&app, submit).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        location(&response),
        format!("/courses/{}/apply?visible_recaptcha=1", course.id())
    );
    assert!(world.store.applicants().is_empty());
    assert!(world.mail.delivered().is_empty());
}

#[actix_web::test]
async fn the_flash_queued_by_a_redirect_is_delivered_once() {
    let world = TestWorld::new();
    let course = world.seed_course("Open Course", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    let submit = actix_test::TestRequest::post()
        .uri(&format!("/courses/{}/apply", course.id()))
        .set_json(json!({"name": "Applicant", "email": "flash@example.com"}))
        .to_request();
    let submit_response = actix_test::call_service(&app, submit).await;
    let cookie = submit_response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("flash stored in session")
        .into_owned();

    let first = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/apply", course.id()))
        .cookie(cookie.clone())
        .to_request();
    let first_response = actix_test::call_service(&app, first).await;
    let next_cookie = first_response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(|cookie| cookie.into_owned());
    let first_body: Value = actix_test::read_body_json(first_response).await;
    assert_eq!(first_body["flash"]["kind"], "success");

    let second = actix_test::TestRequest::get()
        .uri(&format!("/courses/{}/apply", course.id()))
        .cookie(next_cookie.unwrap_or(cookie))
        .to_request();
    let second_response = actix_test::call_service(&app, second).await;
    let second_body: Value = actix_test::read_body_json(second_response).await;
    assert!(second_body.get("flash").is_none());
}
