//! Shared-secret write guard for settings mutations.
//!
//! The entire access-control model: requests must carry the configured
//! secret in `X-Admin-Secret`. When no secret is configured the extractor
//! lets everything through, matching single-tenant MVP deployments.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use service_core::error::AppError;
use subtle::ConstantTimeEq;

use crate::startup::AppState;

#[derive(Debug, Clone, Copy)]
pub struct AdminGuard;

#[async_trait]
impl FromRequestParts<AppState> for AdminGuard {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(expected) = state.config.admin.secret.as_deref() else {
            return Ok(AdminGuard);
        };

        let provided = parts
            .headers
            .get("X-Admin-Secret")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !secrets_match(provided, expected) {
            return Err(AppError::Forbidden(anyhow::anyhow!(
                "Missing or invalid X-Admin-Secret header"
            )));
        }

        Ok(AdminGuard)
    }
}

/// Constant-time comparison so the check leaks nothing about the secret.
fn secrets_match(provided: &str, expected: &str) -> bool {
    provided.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matching_secrets_pass() {
        assert!(secrets_match("s3cret", "s3cret"));
    }

    #[test]
    fn mismatched_secrets_fail() {
        assert!(!secrets_match("s3cret", "other"));
        assert!(!secrets_match("", "s3cret"));
        assert!(!secrets_match("s3cre", "s3cret"));
    }
}
