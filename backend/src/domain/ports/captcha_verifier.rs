//! Driving port for the human-verification (CAPTCHA) step.
//!
//! Verification is orchestrated by the caller *before* a form is validated;
//! on failure the form is never constructed.

use async_trait::async_trait;

/// Failures reaching the verification service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptchaVerifierError {
    #[error("verification service unavailable: {message}")]
    Unavailable { message: String },
}

/// Verify that a request was produced by a human.
///
/// Tests double this trait with [`StaticCaptchaVerifier`] rather than a mock.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    /// Check the client-supplied response token for the named action.
    ///
    /// Returns `false` when the token is absent, expired, or rejected.
    async fn verify(
        &self,
        response: Option<&str>,
        action: &str,
    ) -> Result<bool, CaptchaVerifierError>;
}

/// Verifier that accepts everything; used in development and tests that are
/// not about the verification step.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysPassCaptchaVerifier;

#[async_trait]
impl CaptchaVerifier for AlwaysPassCaptchaVerifier {
    async fn verify(
        &self,
        _response: Option<&str>,
        _action: &str,
    ) -> Result<bool, CaptchaVerifierError> {
        Ok(true)
    }
}

/// Verifier with a fixed answer; lets tests force the failure branch.
#[derive(Debug, Clone, Copy)]
pub struct StaticCaptchaVerifier(pub bool);

#[async_trait]
impl CaptchaVerifier for StaticCaptchaVerifier {
    async fn verify(
        &self,
        _response: Option<&str>,
        _action: &str,
    ) -> Result<bool, CaptchaVerifierError> {
        Ok(self.0)
    }
}
