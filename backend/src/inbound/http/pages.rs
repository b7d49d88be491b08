//! Rendered-page and redirect envelopes.
//!
//! The template layer is owned elsewhere; a "rendered page" here is a typed
//! JSON envelope naming the layout, carrying the presenter props, and
//! attaching at most one pending flash notification. Redirects are
//! `303 See Other` so a POST can bounce back to a GET.

use actix_web::{HttpResponse, http::header};
use serde::Serialize;
use serde_json::Value;

use crate::domain::{Error, Notification};
use crate::inbound::http::session::SessionContext;

/// A page ready for the rendering layer.
#[derive(Debug, Clone, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Layout the rendering layer should wrap the page in.
    pub layout: String,
    /// Page title.
    pub title: String,
    /// Presenter props; plain serialisable data only.
    pub props: Value,
    /// Flash notification queued by the previous request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<crate::inbound::http::schemas::NotificationSchema>)]
    pub flash: Option<Notification>,
}

impl Page {
    /// Assemble a page envelope.
    pub fn new(layout: &str, title: impl Into<String>, props: Value) -> Self {
        Self {
            layout: layout.to_owned(),
            title: title.into(),
            props,
            flash: None,
        }
    }

    /// Attach the session's pending flash, consuming it.
    pub fn with_flash_from(mut self, session: &SessionContext) -> Result<Self, Error> {
        self.flash = session.take_flash()?;
        Ok(self)
    }

    /// Render as a `200 OK` JSON response.
    pub fn respond(&self) -> HttpResponse {
        HttpResponse::Ok().json(self)
    }
}

/// Redirect with a flash notification queued for the next rendered page.
pub fn redirect_with_flash(
    session: &SessionContext,
    location: &str,
    notification: &Notification,
) -> Result<HttpResponse, Error> {
    session.queue_flash(notification)?;
    Ok(redirect(location))
}

/// Plain `303 See Other` redirect.
pub fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use serde_json::json;

    #[test]
    fn flash_is_omitted_from_serialised_pages_when_absent() {
        let page = Page::new("student", "A Title", json!({"k": "v"}));
        let value = serde_json::to_value(&page).expect("serialisable page");
        assert!(value.get("flash").is_none());
        assert_eq!(value["layout"], "student");
    }

    #[test]
    fn redirects_carry_the_location_header() {
        let response = redirect("/");
        assert_eq!(response.status(), actix_web::http::StatusCode::SEE_OTHER);
        assert_eq!(
            response
                .headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }
}
