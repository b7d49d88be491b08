//! Coverage for community pages.

mod support;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use serde_json::Value;

use backend::domain::{
    Community, CommunityId, Role, TargetId, TopicCategory, TopicCategoryId, TopicTarget,
};
use support::{TestWorld, sign_in, test_app};

fn seed_community(world: &TestWorld) -> Community {
    let community = Community::new(
        CommunityId::random(),
        world.school_id.clone(),
        "General",
        vec![
            TopicCategory::new(TopicCategoryId::random(), "Questions"),
            TopicCategory::new(TopicCategoryId::random(), "Announcements"),
        ],
    );
    world.store.insert_community(community.clone());
    community
}

#[actix_web::test]
async fn the_new_topic_page_requires_authentication() {
    let world = TestWorld::new();
    let community = seed_community(&world);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/communities/{}/new_topic", community.id()))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn the_new_topic_page_lists_topic_categories() {
    let world = TestWorld::new();
    let community = seed_community(&world);
    let member = world.seed_user("member@example.com", &[Role::Founder]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, member.id()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!("/communities/{}/new_topic", community.id()))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["title"], "Create a new topic | General Community");
    let categories = body["props"]["topicCategories"]
        .as_array()
        .expect("categories");
    assert_eq!(categories.len(), 2);
    assert!(body["props"].get("target").is_none());
}

#[actix_web::test]
async fn a_known_target_appears_in_the_props() {
    let world = TestWorld::new();
    let community = seed_community(&world);
    let target = TopicTarget::new(TargetId::random(), "Assignment 3");
    world.store.insert_target(target.clone());
    let member = world.seed_user("member@example.com", &[Role::Founder]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, member.id()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!(
            "/communities/{}/new_topic?target_id={}",
            community.id(),
            target.id()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["props"]["target"]["title"], "Assignment 3");
}

#[actix_web::test]
async fn an_unknown_target_is_silently_omitted() {
    let world = TestWorld::new();
    let community = seed_community(&world);
    let member = world.seed_user("member@example.com", &[Role::Founder]);
    let app = actix_test::init_service(test_app(world.state())).await;
    let cookie = sign_in(&app, member.id()).await;

    let request = actix_test::TestRequest::get()
        .uri(&format!(
            "/communities/{}/new_topic?target_id={}",
            community.id(),
            TargetId::random()
        ))
        .cookie(cookie)
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert!(body["props"].get("target").is_none());
}
