// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication errors.

use axum::{
    http::{header::WWW_AUTHENTICATE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Reasons a request did not yield credentials.
///
/// These never leave the extractor as distinct outcomes: the authenticator
/// logs the kind and reports "no credential", and the HTTP boundary renders
/// every kind as the same 401 response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// No signing key configured
    #[error("JWT authentication is disabled (no signing key)")]
    ConfigurationDisabled,
    /// Signing key could not be decoded
    #[error("Configured signing key is invalid")]
    InvalidSigningKey,
    /// No authorization header present
    #[error("Authorization header is required")]
    MissingAuthHeader,
    /// Authorization header carries another scheme
    #[error("Invalid authorization header format (expected 'Bearer <token>')")]
    InvalidAuthHeader,
    /// Token is malformed
    #[error("Token is malformed")]
    MalformedToken,
    /// Token signature is invalid
    #[error("Token signature is invalid")]
    InvalidSignature,
    /// Token algorithm does not match the configured key
    #[error("Token algorithm is not accepted for the configured key")]
    UnsupportedAlgorithm,
    /// Token has expired
    #[error("Token has expired")]
    TokenExpired,
    /// Token is not yet valid
    #[error("Token is not yet valid")]
    TokenNotYetValid,
    /// Configured subject claim is absent
    #[error("Token has no '{0}' claim")]
    SubjectClaimMissing(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: &'static str,
}

impl AuthError {
    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::ConfigurationDisabled => "configuration_disabled",
            AuthError::InvalidSigningKey => "invalid_signing_key",
            AuthError::MissingAuthHeader => "missing_auth_header",
            AuthError::InvalidAuthHeader => "invalid_auth_header",
            AuthError::MalformedToken => "malformed_token",
            AuthError::InvalidSignature => "invalid_signature",
            AuthError::UnsupportedAlgorithm => "unsupported_algorithm",
            AuthError::TokenExpired => "token_expired",
            AuthError::TokenNotYetValid => "token_not_yet_valid",
            AuthError::SubjectClaimMissing(_) => "subject_claim_missing",
        }
    }

    /// Whether the failure comes from the extractor setup rather than the request.
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            AuthError::ConfigurationDisabled | AuthError::InvalidSigningKey
        )
    }
}

impl From<jsonwebtoken::errors::Error> for AuthError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            ErrorKind::ImmatureSignature => AuthError::TokenNotYetValid,
            ErrorKind::InvalidSignature => AuthError::InvalidSignature,
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                AuthError::UnsupportedAlgorithm
            }
            _ => AuthError::MalformedToken,
        }
    }
}

/// Rejection returned by the axum extractors.
///
/// Carries no detail on purpose: the response is identical for every
/// [`AuthError`] kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuthRejection;

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let mut response = (
            StatusCode::UNAUTHORIZED,
            Json(AuthErrorBody {
                error: "Unauthorized",
            }),
        )
            .into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn rejection_returns_uniform_401() {
        let response = AuthRejection.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(response.headers()[WWW_AUTHENTICATE], "Bearer");

        let body_bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(body_bytes.to_vec()).unwrap();
        assert_eq!(body, r#"{"error":"Unauthorized"}"#);
    }

    #[test]
    fn error_codes_are_distinct() {
        let all = [
            AuthError::ConfigurationDisabled,
            AuthError::InvalidSigningKey,
            AuthError::MissingAuthHeader,
            AuthError::InvalidAuthHeader,
            AuthError::MalformedToken,
            AuthError::InvalidSignature,
            AuthError::UnsupportedAlgorithm,
            AuthError::TokenExpired,
            AuthError::TokenNotYetValid,
            AuthError::SubjectClaimMissing("sub".to_string()),
        ];
        let codes: std::collections::HashSet<_> = all.iter().map(AuthError::error_code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn jwt_error_kinds_map_to_taxonomy() {
        use jsonwebtoken::errors::ErrorKind;

        assert_eq!(
            AuthError::from(jsonwebtoken::errors::Error::from(ErrorKind::ExpiredSignature)),
            AuthError::TokenExpired
        );
        assert_eq!(
            AuthError::from(jsonwebtoken::errors::Error::from(ErrorKind::ImmatureSignature)),
            AuthError::TokenNotYetValid
        );
        assert_eq!(
            AuthError::from(jsonwebtoken::errors::Error::from(ErrorKind::InvalidSignature)),
            AuthError::InvalidSignature
        );
        assert_eq!(
            AuthError::from(jsonwebtoken::errors::Error::from(ErrorKind::InvalidToken)),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn subject_claim_missing_names_the_claim() {
        let err = AuthError::SubjectClaimMissing("asub".to_string());
        assert_eq!(err.to_string(), "Token has no 'asub' claim");
        assert!(!err.is_configuration_error());
        assert!(AuthError::ConfigurationDisabled.is_configuration_error());
    }
}
