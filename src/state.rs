// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::auth::JwtAuthenticator;
use crate::config::AuthConfig;

/// State shared with the axum extractors and middleware.
///
/// Embed it in a larger application state and implement
/// `FromRef<YourState> for AppState` to use the extractors there.
#[derive(Clone, Debug)]
pub struct AppState {
    pub authenticator: Arc<JwtAuthenticator>,
}

impl AppState {
    pub fn new(config: &AuthConfig) -> Self {
        Self::from_authenticator(JwtAuthenticator::new(config))
    }

    pub fn from_authenticator(authenticator: JwtAuthenticator) -> Self {
        Self {
            authenticator: Arc::new(authenticator),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&AuthConfig::default())
    }
}
