// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Bearer credential extraction.
//!
//! [`JwtAuthenticator`] turns the `Authorization` header of a request into
//! [`Credentials`]:
//!
//! 1. Bail out when no signing key is configured (before reading headers)
//! 2. Locate the compact token (`Bearer <token>` or a bare token)
//! 3. Verify the signature against the configured key
//! 4. Check `exp` / `nbf` with the configured clock skew tolerance
//! 5. Read the subject claim and normalize the roles claim
//!
//! Every failure is logged with its [`AuthError`] code and reported as
//! `None`. Callers cannot tell why a token was rejected.

use axum::http::HeaderMap;
use jsonwebtoken::{decode, Validation};

use super::claims::{Credentials, JwtClaims};
use super::error::AuthError;
use super::header::bearer_token;
use super::key::{decode_base64, VerificationKey};
use crate::config::AuthConfig;

/// Stateless JWT bearer credential extractor.
///
/// Immutable after construction; share it behind an `Arc` across request
/// handlers.
pub struct JwtAuthenticator {
    key: Result<VerificationKey, AuthError>,
    validation: Validation,
    subject_key: String,
    roles_key: String,
    require_bearer_scheme: bool,
    encryption_key: Option<Vec<u8>>,
}

impl std::fmt::Debug for JwtAuthenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("JwtAuthenticator")
            .field("key", &self.key)
            .field("algorithms", &self.validation.algorithms)
            .field("leeway", &self.validation.leeway)
            .field("subject_key", &self.subject_key)
            .field("roles_key", &self.roles_key)
            .field("require_bearer_scheme", &self.require_bearer_scheme)
            .field("encryption_key", &self.encryption_key.is_some())
            .finish()
    }
}

impl JwtAuthenticator {
    /// Build an authenticator from configuration.
    ///
    /// Never fails: a missing or undecodable signing key yields an
    /// authenticator that rejects every request.
    pub fn new(config: &AuthConfig) -> Self {
        let key = VerificationKey::from_config(config.signing_key.as_deref());
        match &key {
            Ok(key) => tracing::debug!(family = ?key.family(), "JWT signing key loaded"),
            Err(AuthError::ConfigurationDisabled) => {
                tracing::info!("No JWT signing key configured, bearer authentication disabled")
            }
            Err(e) => tracing::warn!(
                error_code = e.error_code(),
                "JWT signing key rejected, bearer authentication disabled"
            ),
        }

        let encryption_key = config
            .encryption_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .and_then(|k| match decode_base64(k) {
                Ok(bytes) => Some(bytes),
                Err(_) => {
                    tracing::warn!("JWT claims encryption key is not valid base64, ignoring it");
                    None
                }
            });

        let validation = build_validation(key.as_ref().ok(), config.clock_skew_tolerance_seconds);

        Self {
            key,
            validation,
            subject_key: config.subject_key.clone(),
            roles_key: config.roles_key.clone(),
            require_bearer_scheme: config.require_bearer_scheme,
            encryption_key,
        }
    }

    /// Whether a usable signing key is configured.
    pub fn is_enabled(&self) -> bool {
        self.key.is_ok()
    }

    /// Decoded claims encryption key, if one was configured.
    pub fn encryption_key(&self) -> Option<&[u8]> {
        self.encryption_key.as_deref()
    }

    /// Extract credentials from request headers.
    ///
    /// Returns `None` for every failure: disabled extractor, missing or
    /// non-bearer header, malformed token, bad signature, expired or not yet
    /// valid token, missing subject claim.
    pub fn extract_credentials(&self, headers: &HeaderMap) -> Option<Credentials> {
        match self.authenticate(headers) {
            Ok(credentials) => {
                tracing::debug!(
                    username = %credentials.username,
                    roles = credentials.backend_roles.len(),
                    "Bearer token accepted"
                );
                Some(credentials)
            }
            Err(e) => {
                tracing::debug!(error_code = e.error_code(), error = %e, "No bearer credentials");
                None
            }
        }
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<Credentials, AuthError> {
        // Checked before the headers are touched
        let key = self.key.as_ref().map_err(|e| e.clone())?;

        let token = bearer_token(headers, self.require_bearer_scheme)?;
        let claims = self.verify(token, key)?;

        Credentials::from_claims(&claims, &self.subject_key, &self.roles_key)
    }

    fn verify(&self, token: &str, key: &VerificationKey) -> Result<JwtClaims, AuthError> {
        if token.split('.').count() != 3 {
            return Err(AuthError::MalformedToken);
        }

        let token_data = decode::<JwtClaims>(token, key.decoding_key(), &self.validation)?;
        Ok(token_data.claims)
    }
}

/// Validation settings shared by every request.
///
/// `exp` and `nbf` are checked when present but not required, and audience is
/// not validated.
fn build_validation(key: Option<&VerificationKey>, leeway: u64) -> Validation {
    let algorithms = key.map(VerificationKey::algorithms).unwrap_or_default();

    let mut validation = Validation::default();
    validation.algorithms = algorithms.to_vec();
    validation.required_spec_claims.clear();
    validation.validate_exp = true;
    validation.validate_nbf = true;
    validation.validate_aud = false;
    validation.leeway = leeway;
    validation
}
