// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! jwt-credentials - JWT Bearer Credential Extractor
//!
//! Finds a bearer token in an HTTP request, verifies its signature and
//! validity window, and turns its claims into a username, a backend role set
//! and a map of attributes.
//!
//! ## Modules
//!
//! - `auth` - Token verification, claim normalization, Axum integration
//! - `config` - Extractor configuration and environment loading
//! - `state` - Shared state for the Axum extractors and middleware

pub mod auth;
pub mod config;
pub mod state;

pub use auth::{Credentials, JwtAuthenticator};
pub use config::AuthConfig;
