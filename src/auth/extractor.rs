// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Axum extractors for bearer credentials.
//!
//! Use the `Auth` extractor in handlers to require authentication:
//!
//! ```rust,ignore
//! async fn my_handler(Auth(credentials): Auth) -> impl IntoResponse {
//!     // credentials.username, credentials.backend_roles
//! }
//! ```

use std::convert::Infallible;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use super::{AuthRejection, Credentials};
use crate::state::AppState;

/// Extractor for authenticated requests.
///
/// Credentials already placed in the request extensions by
/// [`auth_middleware`](super::middleware::auth_middleware) are reused;
/// otherwise the authenticator from [`AppState`] runs on the headers.
/// Rejects with a uniform 401.
pub struct Auth(pub Credentials);

impl<S> FromRequestParts<S> for Auth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // First check if middleware already set the credentials
        if let Some(credentials) = parts.extensions.get::<Credentials>().cloned() {
            return Ok(Auth(credentials));
        }

        let state = AppState::from_ref(state);
        state
            .authenticator
            .extract_credentials(&parts.headers)
            .map(Auth)
            .ok_or(AuthRejection)
    }
}

/// Optional authentication extractor.
///
/// Yields `None` instead of rejecting, leaving the decision to the handler
/// or to the next authenticator in the chain.
pub struct OptionalAuth(pub Option<Credentials>);

impl<S> FromRequestParts<S> for OptionalAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Auth::from_request_parts(parts, state).await {
            Ok(Auth(credentials)) => Ok(OptionalAuth(Some(credentials))),
            Err(_) => Ok(OptionalAuth(None)),
        }
    }
}
