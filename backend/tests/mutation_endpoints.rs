//! Coverage for the typed mutation endpoints.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::{Value, json};

use backend::domain::{Course, CourseId, Level, LevelId, Role};
use support::{TestWorld, sign_in, test_app};

fn seed_level(world: &TestWorld, course: &Course, number: u32) -> Level {
    let level = Level::new(
        LevelId::random(),
        course.id().clone(),
        number,
        format!("Level {number}"),
    );
    world.store.insert_level(level.clone());
    level
}

#[actix_web::test]
async fn mutations_require_a_session() {
    let world = TestWorld::new();
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/merge_levels")
        .set_json(json!({
            "deleteLevelId": LevelId::random().as_ref(),
            "mergeIntoLevelId": LevelId::random().as_ref(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn create_course_author_succeeds_for_a_school_admin() {
    let world = TestWorld::new();
    let course = world.seed_course("Authored Course", true);
    let admin = world.seed_user("admin@example.com", &[Role::SchoolAdmin]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, admin.id()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/create_course_author")
        .cookie(cookie)
        .set_json(json!({
            "courseId": course.id().as_ref(),
            "name": "New Author",
            "email": "author@example.com",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["courseAuthor"]["email"], "author@example.com");
    let notifications = body["notifications"].as_array().expect("notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["kind"], "success");

    // The new author gets a sign-in mail carrying their one-time token.
    let delivered = world.mail.delivered();
    assert_eq!(delivered.len(), 1);
    assert_eq!(
        delivered[0].recipients()[0].address().as_ref(),
        "author@example.com"
    );
    assert!(delivered[0].body().contains("token="));
}

#[actix_web::test]
async fn create_course_author_nulls_the_author_field_for_non_admins() {
    let world = TestWorld::new();
    let course = world.seed_course("Authored Course", true);
    let outsider = world.seed_user("founder@example.com", &[Role::Founder]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, outsider.id()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/create_course_author")
        .cookie(cookie)
        .set_json(json!({
            "courseId": course.id().as_ref(),
            "name": "New Author",
            "email": "author@example.com",
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["courseAuthor"].is_null());
    let notifications = body["notifications"].as_array().expect("notifications");
    assert!(!notifications.is_empty());
    assert!(notifications.iter().all(|n| n["kind"] == "error"));
    assert!(world.mail.delivered().is_empty());
}

#[actix_web::test]
async fn create_course_author_rejects_a_duplicate_author_email() {
    let world = TestWorld::new();
    let course = world.seed_course("Authored Course", true);
    let admin = world.seed_user("admin@example.com", &[Role::SchoolAdmin]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, admin.id()).await;

    for expect_author in [true, false] {
        let request = actix_test::TestRequest::post()
            .uri("/api/v1/mutations/create_course_author")
            .cookie(cookie.clone())
            .set_json(json!({
                "courseId": course.id().as_ref(),
                "name": "New Author",
                "email": "author@example.com",
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        let body: Value = actix_test::read_body_json(response).await;
        assert_eq!(body["courseAuthor"].is_null(), !expect_author);
    }
}

#[actix_web::test]
async fn merge_levels_merges_and_reports_one_success_notification() {
    let world = TestWorld::new();
    let course = world.seed_course("Levelled Course", true);
    let delete = seed_level(&world, &course, 1);
    let keep = seed_level(&world, &course, 2);
    let admin = world.seed_user("admin@example.com", &[Role::SchoolAdmin]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, admin.id()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/merge_levels")
        .cookie(cookie)
        .set_json(json!({
            "deleteLevelId": delete.id().as_ref(),
            "mergeIntoLevelId": keep.id().as_ref(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], true);
    let notifications = body["notifications"].as_array().expect("notifications");
    assert_eq!(notifications.len(), 1);
    assert_eq!(notifications[0]["kind"], "success");

    assert_eq!(world.store.levels_of(course.id()), vec![keep]);
}

#[actix_web::test]
async fn merging_a_level_into_itself_is_rejected_without_deleting_anything() {
    let world = TestWorld::new();
    let course = world.seed_course("Levelled Course", true);
    let level = seed_level(&world, &course, 1);
    let admin = world.seed_user("admin@example.com", &[Role::SchoolAdmin]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, admin.id()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/merge_levels")
        .cookie(cookie)
        .set_json(json!({
            "deleteLevelId": level.id().as_ref(),
            "mergeIntoLevelId": level.id().as_ref(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    let notifications = body["notifications"].as_array().expect("notifications");
    assert!(!notifications.is_empty());
    assert!(notifications.iter().all(|n| n["kind"] == "error"));

    assert_eq!(world.store.levels_of(course.id()), vec![level]);
}

#[actix_web::test]
async fn merge_levels_refuses_levels_from_another_school() {
    let world = TestWorld::new();
    let course = world.seed_course("Levelled Course", true);
    let keep = seed_level(&world, &course, 1);
    // A level whose course lives in a different school.
    let foreign_course = Course::new(
        CourseId::random(),
        backend::domain::SchoolId::random(),
        "Elsewhere",
        "Another tenant",
        true,
    );
    world.store.insert_course(foreign_course.clone());
    let foreign = seed_level(&world, &foreign_course, 1);
    let admin = world.seed_user("admin@example.com", &[Role::SchoolAdmin]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, admin.id()).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/v1/mutations/merge_levels")
        .cookie(cookie)
        .set_json(json!({
            "deleteLevelId": foreign.id().as_ref(),
            "mergeIntoLevelId": keep.id().as_ref(),
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(world.store.levels_of(foreign_course.id()), vec![foreign]);
}
