//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the HTTP surface. It registers:
//!
//! - **Paths**: course pages, community pages, invitation flow, typed
//!   mutations, and health probes
//! - **Schemas**: domain type wrappers from the inbound layer that provide
//!   OpenAPI definitions without coupling domain types to utoipa
//! - **Security**: session cookie authentication scheme
//!
//! The generated specification backs Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::mutations::{
    CourseAuthor, CreateCourseAuthorRequest, CreateCourseAuthorResponse, MergeLevelsRequest,
    MergeLevelsResponse,
};
use crate::inbound::http::pages::Page;
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, NotificationSchema};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie established by the invitation acceptance flow.",
            ))),
        );
    }
}

/// OpenAPI document for the HTTP surface.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "School backend API",
        description = "Course pages, community pages, invitation registration, and typed mutations.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::courses::curriculum,
        crate::inbound::http::courses::leaderboard,
        crate::inbound::http::courses::apply,
        crate::inbound::http::courses::process_application,
        crate::inbound::http::courses::review,
        crate::inbound::http::courses::students,
        crate::inbound::http::courses::report,
        crate::inbound::http::courses::show,
        crate::inbound::http::courses::show_with_slug,
        crate::inbound::http::communities::new_topic,
        crate::inbound::http::invitations::edit,
        crate::inbound::http::invitations::accept,
        crate::inbound::http::mutations::create_course_author,
        crate::inbound::http::mutations::merge_levels,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Page,
        ErrorSchema,
        ErrorCodeSchema,
        NotificationSchema,
        CourseAuthor,
        CreateCourseAuthorRequest,
        CreateCourseAuthorResponse,
        MergeLevelsRequest,
        MergeLevelsResponse,
    )),
    tags(
        (name = "courses", description = "Course pages and the public application flow"),
        (name = "communities", description = "Community pages"),
        (name = "invitations", description = "Invitation registration flow"),
        (name = "mutations", description = "Typed mutation endpoints"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
