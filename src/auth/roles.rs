// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Backend role extraction.
//!
//! The roles claim has no fixed JSON shape. Issuers send a comma separated
//! string, an array, a lone number, or an explicit `null`. [`RolesClaim`]
//! names each shape so the mapping to a role set is exhaustive.

use std::collections::BTreeSet;

use serde_json::Value;

use super::claims::claim_to_string;

/// Shape of the roles claim in a verified payload.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RolesClaim<'a> {
    /// Claim not present
    Absent,
    /// Claim present with an explicit `null`
    Null,
    /// Comma separated role list
    Text(&'a str),
    /// Array of role values
    Sequence(&'a [Value]),
    /// Any other single value (number, boolean, object)
    Scalar(&'a Value),
}

impl<'a> RolesClaim<'a> {
    /// Classify a claim value.
    pub fn from_claim(value: Option<&'a Value>) -> Self {
        match value {
            None => RolesClaim::Absent,
            Some(Value::Null) => RolesClaim::Null,
            Some(Value::String(s)) => RolesClaim::Text(s),
            Some(Value::Array(items)) => RolesClaim::Sequence(items),
            Some(other) => RolesClaim::Scalar(other),
        }
    }

    /// Normalize into a role set.
    pub fn into_roles(self) -> BTreeSet<String> {
        match self {
            RolesClaim::Absent | RolesClaim::Null => BTreeSet::new(),
            RolesClaim::Text(s) => split_roles(s),
            RolesClaim::Sequence(items) => items
                .iter()
                .filter(|item| !item.is_null())
                .map(claim_to_string)
                .map(|role| role.trim().to_string())
                .filter(|role| !role.is_empty())
                .collect(),
            RolesClaim::Scalar(value) => BTreeSet::from([claim_to_string(value)]),
        }
    }
}

fn split_roles(s: &str) -> BTreeSet<String> {
    s.split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}
