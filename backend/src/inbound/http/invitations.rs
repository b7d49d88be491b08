//! Invitation acceptance handlers.
//!
//! The registration lifecycle is a one-way `Invited -> Accepted` transition
//! owned by the invitation repository. These handlers pick the flow branch:
//! a fresh invitation renders the registration form, an invitee who already
//! completed registration is signed in and routed straight to phone
//! verification, and a second acceptance ends in a conflict rather than a
//! duplicate account.

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;
use serde_json::json;

use crate::domain::ports::InvitationRepositoryError;
use crate::domain::{
    Error, FullName, Invitation, InvitationToken, Notification, messages,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{Page, redirect, redirect_with_flash};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Where an invitee continues after their session is established.
const PHONE_VERIFICATION_PATH: &str = "/founders/phone_verification";

/// Request body for accepting an invitation.
#[derive(Debug, Clone, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AcceptRequest {
    pub name: String,
    /// `"0"` declines the startup association; anything else keeps it.
    #[serde(default)]
    pub accept_startup: Option<String>,
}

fn map_invitation_error(err: InvitationRepositoryError) -> Error {
    match err {
        InvitationRepositoryError::NotFound => Error::not_found("invitation not found"),
        InvitationRepositoryError::AlreadyAccepted => {
            Error::conflict(messages::INVITATION_ALREADY_ACCEPTED)
        }
        InvitationRepositoryError::Unavailable { message } => {
            Error::internal(format!("invitation storage failed: {message}"))
        }
    }
}

fn parse_token(raw: &str) -> Result<InvitationToken, Error> {
    InvitationToken::new(raw).map_err(|_| Error::not_found("invitation not found"))
}

async fn find_invitation(state: &HttpState, raw_token: &str) -> Result<Invitation, Error> {
    let token = parse_token(raw_token)?;
    state
        .invitations
        .find_by_token(&token)
        .await
        .map_err(map_invitation_error)
}

/// Sign the invitee in and route them to phone verification.
fn resume_registration(
    session: &SessionContext,
    invitation: &Invitation,
) -> Result<HttpResponse, Error> {
    session.persist_user(invitation.user_id())?;
    session.mark_registration_ongoing()?;
    redirect_with_flash(
        session,
        PHONE_VERIFICATION_PATH,
        &Notification::error(messages::ALREADY_REGISTERED),
    )
}

/// Registration form for an invited user.
#[utoipa::path(
    get,
    path = "/invitations/{token}/edit",
    params(("token" = String, Path, description = "Single-use invitation token")),
    responses(
        (status = 200, description = "Registration form page", body = Page),
        (status = 303, description = "Already-registered invitee signed in and redirected"),
        (status = 404, description = "Unknown token", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "invitationEdit",
    security([])
)]
#[get("/invitations/{token}/edit")]
pub async fn edit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let invitation = find_invitation(&state, &path).await?;

    if invitation.already_registered() {
        return resume_registration(&session, &invitation);
    }

    let props = json!({
        "token": invitation.token().as_ref(),
        "name": invitation.name().as_ref(),
        "email": invitation.email().as_ref(),
        "hasStartup": invitation.startup_id().is_some(),
    });
    let page = Page::new("tailwind", "Complete your registration", props)
        .with_flash_from(&session)?;
    Ok(page.respond())
}

/// Accept an invitation.
///
/// The startup association is cleared only when the caller explicitly sent
/// `acceptStartup: "0"`. A repeat acceptance is a conflict, never a second
/// account.
#[utoipa::path(
    post,
    path = "/invitations/{token}/accept",
    params(("token" = String, Path, description = "Single-use invitation token")),
    request_body = AcceptRequest,
    responses(
        (status = 303, description = "Session established; redirect to phone verification"),
        (status = 404, description = "Unknown token", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 409, description = "Invitation already accepted", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["invitations"],
    operation_id = "invitationAccept",
    security([])
)]
#[post("/invitations/{token}/accept")]
pub async fn accept(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    payload: web::Json<AcceptRequest>,
) -> ApiResult<HttpResponse> {
    let token = parse_token(&path)?;
    let name = FullName::new(&payload.name)
        .map_err(|err| Error::invalid_request(err.to_string()))?;
    let clear_startup = payload.accept_startup.as_deref() == Some("0");

    let user = state
        .invitations
        .accept(&token, name, clear_startup)
        .await
        .map_err(map_invitation_error)?;

    session.persist_user(user.id())?;
    session.mark_registration_ongoing()?;
    Ok(redirect(PHONE_VERIFICATION_PATH))
}
