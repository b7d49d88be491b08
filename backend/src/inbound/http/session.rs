//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers only deal with
//! the declared key schema. Recognised keys:
//!
//! - `user_id`: string UUID of the signed-in user
//! - `applicant_tag`: allow-listed tag captured on the apply page
//! - `registration_ongoing`: set while an invitee still owes phone
//!   verification
//! - `flash`: one pending [`Notification`], consumed by the next rendered
//!   page
//!
//! Nothing else is ever written to the session.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Notification, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const APPLICANT_TAG_KEY: &str = "applicant_tag";
pub(crate) const REGISTRATION_ONGOING_KEY: &str = "registration_ongoing";
pub(crate) const FLASH_KEY: &str = "flash";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.insert(USER_ID_KEY, user_id.as_ref())
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self.get::<String>(USER_ID_KEY)?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Store the applicant tag. Callers must have checked the allow-list;
    /// this never overwrites an existing tag with a blank value.
    pub fn store_applicant_tag(&self, tag: &str) -> Result<(), Error> {
        if tag.is_empty() {
            return Ok(());
        }
        self.insert(APPLICANT_TAG_KEY, tag)
    }

    /// The applicant tag captured earlier in this session, if any.
    pub fn applicant_tag(&self) -> Result<Option<String>, Error> {
        self.get(APPLICANT_TAG_KEY)
    }

    /// Flag that the signed-in invitee still owes phone verification. The
    /// phone-verification page itself is served elsewhere; this session only
    /// writes the flag.
    pub fn mark_registration_ongoing(&self) -> Result<(), Error> {
        self.insert(REGISTRATION_ONGOING_KEY, true)
    }

    /// Queue a notification for the next rendered page.
    pub fn queue_flash(&self, notification: &Notification) -> Result<(), Error> {
        self.insert(FLASH_KEY, notification)
    }

    /// Take the pending notification, clearing it from the session.
    pub fn take_flash(&self) -> Result<Option<Notification>, Error> {
        let flash = self.get::<Notification>(FLASH_KEY)?;
        if flash.is_some() {
            self.0.remove(FLASH_KEY);
        }
        Ok(flash)
    }

    fn insert(&self, key: &str, value: impl serde::Serialize) -> Result<(), Error> {
        self.0
            .insert(key, value)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>, Error> {
        self.0
            .get::<T>(key)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
