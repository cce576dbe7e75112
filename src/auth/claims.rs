// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Verified claims and the credential representation built from them.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::AuthError;
use super::roles::RolesClaim;

/// Prefix of attribute keys derived from token claims.
pub const ATTRIBUTE_PREFIX: &str = "attr.jwt.";

/// Payload of a verified token.
pub type JwtClaims = Map<String, Value>;

/// Identity extracted from a verified bearer token.
///
/// This is the value handed to the authentication chain. It is built fresh
/// for every request and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    /// Value of the configured subject claim
    pub username: String,

    /// Roles from the configured roles claim (empty when absent)
    pub backend_roles: BTreeSet<String>,

    /// Every claim of the token as `attr.jwt.<claim>` -> stringified value
    pub attributes: BTreeMap<String, String>,
}

impl Credentials {
    /// Build credentials from a verified payload.
    ///
    /// Fails only when the subject claim is missing, `null`, or blank.
    pub fn from_claims(
        claims: &JwtClaims,
        subject_key: &str,
        roles_key: &str,
    ) -> Result<Self, AuthError> {
        let username = subject_from_claims(claims, subject_key)
            .ok_or_else(|| AuthError::SubjectClaimMissing(subject_key.to_string()))?;

        let backend_roles = RolesClaim::from_claim(claims.get(roles_key)).into_roles();

        let attributes = claims
            .iter()
            .map(|(name, value)| (format!("{ATTRIBUTE_PREFIX}{name}"), claim_to_string(value)))
            .collect();

        Ok(Self {
            username,
            backend_roles,
            attributes,
        })
    }

    /// Check if the credentials carry the given backend role.
    pub fn has_role(&self, role: &str) -> bool {
        self.backend_roles.contains(role)
    }

    /// Look up the stringified value of a token claim.
    pub fn attribute(&self, claim: &str) -> Option<&str> {
        self.attributes
            .get(&format!("{ATTRIBUTE_PREFIX}{claim}"))
            .map(String::as_str)
    }
}

/// Read the username from the configured subject claim.
///
/// Non-string scalars are stringified; `null` and blank strings count as missing.
pub fn subject_from_claims(claims: &JwtClaims, subject_key: &str) -> Option<String> {
    match claims.get(subject_key)? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        value => Some(claim_to_string(value)),
    }
}

/// Render a claim value as an attribute string.
///
/// Strings are taken verbatim, everything else as compact JSON.
pub(crate) fn claim_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
