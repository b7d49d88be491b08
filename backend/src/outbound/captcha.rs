//! Reqwest-backed CAPTCHA verification adapter.
//!
//! This adapter owns transport details only: posting the client token to the
//! verification endpoint, decoding the JSON verdict, and mapping transport
//! failures. Which requests need verification is decided by the handlers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::warn;

use crate::domain::ports::{CaptchaVerifier, CaptchaVerifierError};

const DEFAULT_VERIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Verdict payload returned by the verification endpoint.
#[derive(Debug, Deserialize)]
struct VerifyResponseDto {
    success: bool,
    #[serde(default)]
    action: Option<String>,
}

/// Verifier that calls an external siteverify endpoint.
pub struct HttpCaptchaVerifier {
    client: Client,
    endpoint: Url,
    secret: Option<String>,
}

impl HttpCaptchaVerifier {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, secret: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(DEFAULT_VERIFY_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint,
            secret: secret.filter(|value| !value.trim().is_empty()),
        })
    }
}

#[async_trait]
impl CaptchaVerifier for HttpCaptchaVerifier {
    async fn verify(
        &self,
        response: Option<&str>,
        action: &str,
    ) -> Result<bool, CaptchaVerifierError> {
        let Some(token) = response.filter(|value| !value.is_empty()) else {
            return Ok(false);
        };
        // Without a secret no request can be proven human.
        let Some(secret) = self.secret.as_deref() else {
            warn!(action, "captcha secret not configured; rejecting verification");
            return Ok(false);
        };

        let http_response = self
            .client
            .post(self.endpoint.clone())
            .form(&[("secret", secret), ("response", token)])
            .send()
            .await
            .map_err(|err| CaptchaVerifierError::Unavailable {
                message: err.to_string(),
            })?;

        let status = http_response.status();
        if !status.is_success() {
            return Err(CaptchaVerifierError::Unavailable {
                message: format!("verification endpoint answered {status}"),
            });
        }

        let verdict: VerifyResponseDto =
            http_response
                .json()
                .await
                .map_err(|err| CaptchaVerifierError::Unavailable {
                    message: err.to_string(),
                })?;
        let action_matches = verdict
            .action
            .as_deref()
            .is_none_or(|reported| reported == action);
        Ok(verdict.success && action_matches)
    }
}
