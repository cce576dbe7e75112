// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines the flat configuration record of the bearer
//! credential extractor, its defaults, and the environment variables it can be
//! loaded from.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `JWT_SIGNING_KEY` | Base64 HMAC secret or PEM public key | Unset (extractor disabled) |
//! | `JWT_ENCRYPTION_KEY` | Base64 claims encryption key | Unset |
//! | `JWT_SUBJECT_KEY` | Claim used as username | `sub` |
//! | `JWT_ROLES_KEY` | Claim used as backend roles | `roles` |
//! | `JWT_CLOCK_SKEW_TOLERANCE_SECONDS` | Leeway for `exp` / `nbf` | `30` |
//! | `JWT_REQUIRE_BEARER_SCHEME` | Reject bare tokens without `Bearer ` | `false` |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info` |

use std::fmt;

use serde::{Deserialize, Serialize};

/// Environment variable name for the verification key.
pub const SIGNING_KEY_ENV: &str = "JWT_SIGNING_KEY";

/// Environment variable name for the optional claims encryption key.
pub const ENCRYPTION_KEY_ENV: &str = "JWT_ENCRYPTION_KEY";

/// Environment variable name for the username claim override.
pub const SUBJECT_KEY_ENV: &str = "JWT_SUBJECT_KEY";

/// Environment variable name for the roles claim override.
pub const ROLES_KEY_ENV: &str = "JWT_ROLES_KEY";

/// Environment variable name for the clock skew tolerance.
pub const CLOCK_SKEW_TOLERANCE_ENV: &str = "JWT_CLOCK_SKEW_TOLERANCE_SECONDS";

/// Environment variable name for strict `Bearer` scheme handling.
pub const REQUIRE_BEARER_SCHEME_ENV: &str = "JWT_REQUIRE_BEARER_SCHEME";

/// Environment variable name for the log output format.
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

/// Standard JWT subject claim.
pub const DEFAULT_SUBJECT_KEY: &str = "sub";

/// Default claim carrying backend roles.
pub const DEFAULT_ROLES_KEY: &str = "roles";

/// Default leeway applied to `exp` and `nbf` (30 seconds).
pub const DEFAULT_CLOCK_SKEW_TOLERANCE_SECONDS: u64 = 30;

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An environment variable holds a value that cannot be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Configuration of the bearer credential extractor.
///
/// Missing fields take their defaults when deserialized, so a record such as
/// `{"signing_key": "..."}` is a complete configuration.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Base64 HMAC secret or PEM public key. `None` or empty disables the extractor.
    pub signing_key: Option<String>,
    /// Base64 claims encryption key of the on-behalf-of variant.
    pub encryption_key: Option<String>,
    /// Claim used as username.
    pub subject_key: String,
    /// Claim used as backend roles.
    pub roles_key: String,
    /// Leeway applied to `exp` and `nbf`.
    pub clock_skew_tolerance_seconds: u64,
    /// When set, a header without the `Bearer ` prefix is never accepted.
    pub require_bearer_scheme: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            signing_key: None,
            encryption_key: None,
            subject_key: DEFAULT_SUBJECT_KEY.to_string(),
            roles_key: DEFAULT_ROLES_KEY.to_string(),
            clock_skew_tolerance_seconds: DEFAULT_CLOCK_SKEW_TOLERANCE_SECONDS,
            require_bearer_scheme: false,
        }
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("AuthConfig")
            .field("signing_key", &self.signing_key.as_ref().map(|_| "<redacted>"))
            .field(
                "encryption_key",
                &self.encryption_key.as_ref().map(|_| "<redacted>"),
            )
            .field("subject_key", &self.subject_key)
            .field("roles_key", &self.roles_key)
            .field(
                "clock_skew_tolerance_seconds",
                &self.clock_skew_tolerance_seconds,
            )
            .field("require_bearer_scheme", &self.require_bearer_scheme)
            .finish()
    }
}

impl AuthConfig {
    /// Create a configuration with the given signing key and default claim names.
    pub fn new(signing_key: impl Into<String>) -> Self {
        Self {
            signing_key: Some(signing_key.into()),
            ..Self::default()
        }
    }

    /// Set the claims encryption key.
    pub fn with_encryption_key(mut self, encryption_key: impl Into<String>) -> Self {
        self.encryption_key = Some(encryption_key.into());
        self
    }

    /// Override the claim used as username.
    pub fn with_subject_key(mut self, subject_key: impl Into<String>) -> Self {
        self.subject_key = subject_key.into();
        self
    }

    /// Override the claim used as backend roles.
    pub fn with_roles_key(mut self, roles_key: impl Into<String>) -> Self {
        self.roles_key = roles_key.into();
        self
    }

    /// Set the leeway applied to `exp` and `nbf`.
    pub fn with_clock_skew_tolerance(mut self, seconds: u64) -> Self {
        self.clock_skew_tolerance_seconds = seconds;
        self
    }

    /// Only accept headers of the form `Bearer <token>`.
    pub fn with_required_bearer_scheme(mut self) -> Self {
        self.require_bearer_scheme = true;
        self
    }

    /// Whether a non-empty signing key is configured.
    pub fn is_enabled(&self) -> bool {
        self.signing_key
            .as_deref()
            .is_some_and(|key| !key.trim().is_empty())
    }

    /// Load the configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load the configuration through an arbitrary variable lookup.
    ///
    /// Unset or blank variables fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let clock_skew_tolerance_seconds = match get(CLOCK_SKEW_TOLERANCE_ENV) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: CLOCK_SKEW_TOLERANCE_ENV,
                    value: raw,
                })?,
            None => defaults.clock_skew_tolerance_seconds,
        };

        let require_bearer_scheme = match get(REQUIRE_BEARER_SCHEME_ENV) {
            Some(raw) => parse_bool(&raw).ok_or(ConfigError::InvalidValue {
                name: REQUIRE_BEARER_SCHEME_ENV,
                value: raw,
            })?,
            None => defaults.require_bearer_scheme,
        };

        Ok(Self {
            signing_key: get(SIGNING_KEY_ENV),
            encryption_key: get(ENCRYPTION_KEY_ENV),
            subject_key: get(SUBJECT_KEY_ENV)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.subject_key),
            roles_key: get(ROLES_KEY_ENV)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.roles_key),
            clock_skew_tolerance_seconds,
            require_bearer_scheme,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
