//! Community page handlers.

use actix_web::{HttpResponse, get, web};
use serde::Deserialize;

use crate::domain::ports::CommunityRepositoryError;
use crate::domain::presenters::NewTopicPresenter;
use crate::domain::{CommunityId, CommunityScope, Error, TargetId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::require_actor;
use crate::inbound::http::courses::map_school_error;
use crate::inbound::http::pages::Page;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Query parameters accepted by the new-topic page.
#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "snake_case")]
pub struct NewTopicQuery {
    /// Record the new topic should link back to.
    #[serde(default)]
    pub target_id: Option<String>,
}

fn map_community_error(err: CommunityRepositoryError) -> Error {
    match err {
        CommunityRepositoryError::NotFound => Error::not_found("community not found"),
        CommunityRepositoryError::Unavailable { message } => {
            Error::internal(format!("community storage failed: {message}"))
        }
    }
}

/// New-topic composer page.
///
/// A `target_id` that is absent, malformed, or unknown simply yields a page
/// without target props; it never fails the request.
#[utoipa::path(
    get,
    path = "/communities/{id}/new_topic",
    params(
        ("id" = String, Path, description = "Community id"),
        NewTopicQuery
    ),
    responses(
        (status = 200, description = "New topic page", body = Page),
        (status = 401, description = "Login required", body = crate::inbound::http::schemas::ErrorSchema),
        (status = 404, description = "Not found", body = crate::inbound::http::schemas::ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "communityNewTopic"
)]
#[get("/communities/{id}/new_topic")]
pub async fn new_topic(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    query: web::Query<NewTopicQuery>,
) -> ApiResult<HttpResponse> {
    let _school = state.school.current().await.map_err(map_school_error)?;
    let actor = require_actor(&session, &state.users).await?;

    let id =
        CommunityId::new(path.as_str()).map_err(|_| Error::not_found("community not found"))?;
    let scope = CommunityScope::for_actor(&actor);
    let community = state
        .communities
        .find_scoped(&id, &scope)
        .await
        .map_err(map_community_error)?;

    let target = match query.target_id.as_deref().map(TargetId::new) {
        Some(Ok(target_id)) => state
            .communities
            .find_target(&target_id)
            .await
            .map_err(map_community_error)?,
        _ => None,
    };

    let (props, title) = NewTopicPresenter::build(&community, target.as_ref()).into_parts();
    let page = Page::new("student", title, props).with_flash_from(&session)?;
    Ok(page.respond())
}
