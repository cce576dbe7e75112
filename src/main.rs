// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! `jwt-credentials` - inspect an `Authorization` header value.
//!
//! ```text
//! JWT_SIGNING_KEY=... jwt-credentials "Bearer eyJhbGciOi..."
//! echo "Bearer eyJhbGciOi..." | JWT_SIGNING_KEY=... jwt-credentials -
//! ```
//!
//! Prints the extracted credentials as JSON and exits 0, exits 1 when the
//! value yields no credentials, and 2 on configuration errors.

use std::io::{self, Read};
use std::process::ExitCode;

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use jwt_credentials::config::{AuthConfig, LOG_FORMAT_ENV};
use jwt_credentials::JwtAuthenticator;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    let json = std::env::var(LOG_FORMAT_ENV).is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// First argument, or stdin when it is absent or `-`.
fn read_authorization() -> io::Result<String> {
    match std::env::args().nth(1) {
        Some(value) if value != "-" => Ok(value),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let config = match AuthConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::from(2);
        }
    };

    let authorization = match read_authorization() {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read Authorization value");
            return ExitCode::from(2);
        }
    };

    let authenticator = JwtAuthenticator::new(&config);
    tracing::info!(
        enabled = authenticator.is_enabled(),
        subject_key = %config.subject_key,
        roles_key = %config.roles_key,
        encryption_key = authenticator.encryption_key().is_some(),
        "Bearer credential extractor ready"
    );

    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(authorization.trim()) {
        Ok(value) => {
            headers.insert(AUTHORIZATION, value);
        }
        Err(_) => tracing::warn!("Authorization value contains characters not allowed in a header"),
    }

    let Some(credentials) = authenticator.extract_credentials(&headers) else {
        tracing::info!("No credentials");
        return ExitCode::from(1);
    };

    match serde_json::to_string_pretty(&credentials) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize credentials");
            ExitCode::from(2)
        }
    }
}
