//! Coverage for the invitation registration flow.

mod support;

use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use serde_json::{Value, json};

use backend::domain::ports::{InvitationRepository, UserRepository};
use backend::domain::{
    EmailAddress, FullName, Invitation, InvitationToken, StartupId, UserId,
};
use support::{TestWorld, test_app};

const PHONE_VERIFICATION_PATH: &str = "/founders/phone_verification";

fn seed_invitation(world: &TestWorld, token: &str, already_registered: bool) -> Invitation {
    let invitation = Invitation::new(
        InvitationToken::new(token).expect("token"),
        UserId::random(),
        EmailAddress::new("invitee@example.com").expect("email"),
        FullName::new("Invited Person").expect("name"),
        Some(StartupId::random()),
    );
    let invitation = if already_registered {
        invitation.with_already_registered()
    } else {
        invitation
    };
    world.store.insert_invitation(invitation.clone());
    invitation
}

fn location(response: &actix_web::dev::ServiceResponse) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
        .expect("redirect location")
        .to_owned()
}

#[actix_web::test]
async fn an_unknown_token_is_not_found() {
    let world = TestWorld::new();
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri("/invitations/no-such-token/edit")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn a_fresh_invitation_renders_the_registration_form() {
    let world = TestWorld::new();
    seed_invitation(&world, "fresh-token", false);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri("/invitations/fresh-token/edit")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["layout"], "tailwind");
    assert_eq!(body["props"]["email"], "invitee@example.com");
    assert_eq!(body["props"]["hasStartup"], true);
}

#[actix_web::test]
async fn an_already_registered_invitee_is_signed_in_and_sent_to_verification() {
    let world = TestWorld::new();
    seed_invitation(&world, "resumed-token", true);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::get()
        .uri("/invitations/resumed-token/edit")
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), PHONE_VERIFICATION_PATH);
    assert!(
        response
            .response()
            .cookies()
            .any(|cookie| cookie.name() == "session"),
        "the session should be established"
    );
}

#[actix_web::test]
async fn acceptance_establishes_a_session_and_redirects_to_verification() {
    let world = TestWorld::new();
    let invitation = seed_invitation(&world, "accept-token", false);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/invitations/accept-token/accept")
        .set_json(json!({"name": "Invited Person"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), PHONE_VERIFICATION_PATH);

    let user = world
        .store
        .find(invitation.user_id())
        .await
        .expect("lookup")
        .expect("registered user");
    assert_eq!(user.email().as_ref(), "invitee@example.com");
}

#[actix_web::test]
async fn a_second_acceptance_is_a_conflict() {
    let world = TestWorld::new();
    seed_invitation(&world, "twice-token", false);
    let app = actix_test::init_service(test_app(world.state())).await;

    let first = actix_test::TestRequest::post()
        .uri("/invitations/twice-token/accept")
        .set_json(json!({"name": "Invited Person"}))
        .to_request();
    let first_response = actix_test::call_service(&app, first).await;
    assert_eq!(first_response.status(), StatusCode::SEE_OTHER);

    let second = actix_test::TestRequest::post()
        .uri("/invitations/twice-token/accept")
        .set_json(json!({"name": "Invited Person"}))
        .to_request();
    let second_response = actix_test::call_service(&app, second).await;
    assert_eq!(second_response.status(), StatusCode::CONFLICT);

    let body: Value = actix_test::read_body_json(second_response).await;
    assert_eq!(body["code"], "conflict");
    assert_eq!(body["message"], "invitation has already been accepted");
}

#[actix_web::test]
async fn declining_the_startup_clears_the_association() {
    let world = TestWorld::new();
    seed_invitation(&world, "solo-token", false);
    let app = actix_test::init_service(test_app(world.state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/invitations/solo-token/accept")
        .set_json(json!({"name": "Invited Person", "acceptStartup": "0"}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let token = InvitationToken::new("solo-token").expect("token");
    let accepted = world
        .store
        .find_by_token(&token)
        .await
        .expect("invitation still addressable");
    assert!(accepted.startup_id().is_none());
}
