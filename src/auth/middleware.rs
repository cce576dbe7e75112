// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Authentication middleware for Axum.
//!
//! Applies bearer authentication to an entire router subtree. Requests with
//! valid credentials continue with [`Credentials`] in their extensions (the
//! `Auth` extractor picks them up); all others get a 401.
//!
//! ```rust,ignore
//! let state = AppState::new(&AuthConfig::from_env()?);
//!
//! let app = Router::new()
//!     .route("/protected", get(protected_handler))
//!     .layer(axum::middleware::from_fn_with_state(
//!         state.clone(),
//!         auth_middleware,
//!     ));
//! ```

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::{AuthRejection, Credentials};
use crate::state::AppState;

/// Authentication middleware function.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match state.authenticator.extract_credentials(request.headers()) {
        Some(credentials) => {
            request.extensions_mut().insert::<Credentials>(credentials);
            next.run(request).await
        }
        None => AuthRejection.into_response(),
    }
}
