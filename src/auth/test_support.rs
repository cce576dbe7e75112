// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token minting helpers shared by the auth unit tests.

use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use base64::{engine::general_purpose::STANDARD, Engine};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::Value;

use super::JwtAuthenticator;
use crate::config::AuthConfig;

pub const RSA_PUBLIC_PEM: &str = include_str!("testdata/rsa_public.pem");
pub const RSA_PRIVATE_PEM: &str = include_str!("testdata/rsa_private.pem");
pub const EC_PUBLIC_PEM: &str = include_str!("testdata/ec_public.pem");
pub const EC_PRIVATE_PEM: &str = include_str!("testdata/ec_private.pem");

/// HMAC secret the test tokens are signed with.
pub const SECRET: [u8; 64] = *b"jwt signing key for a bearer credential extractor under test!!!!";

/// Base64 form of [`SECRET`], as it appears in configuration.
pub fn signing_key() -> String {
    STANDARD.encode(SECRET)
}

/// Authenticator configured with [`SECRET`] and default claim names.
pub fn authenticator() -> JwtAuthenticator {
    JwtAuthenticator::new(&AuthConfig::new(signing_key()))
}

pub fn now() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Sign claims with [`SECRET`] using HS512.
pub fn sign(claims: &Value) -> String {
    sign_with(Algorithm::HS512, &SECRET, claims)
}

pub fn sign_with(alg: Algorithm, secret: &[u8], claims: &Value) -> String {
    encode(&Header::new(alg), claims, &EncodingKey::from_secret(secret))
        .expect("Failed to sign test token")
}

pub fn sign_rsa(claims: &Value) -> String {
    let key = EncodingKey::from_rsa_pem(RSA_PRIVATE_PEM.as_bytes()).expect("Invalid RSA test key");
    encode(&Header::new(Algorithm::RS256), claims, &key).expect("Failed to sign test token")
}

pub fn sign_ec(claims: &Value) -> String {
    let key = EncodingKey::from_ec_pem(EC_PRIVATE_PEM.as_bytes()).expect("Invalid EC test key");
    encode(&Header::new(Algorithm::ES256), claims, &key).expect("Failed to sign test token")
}

/// Drop the last character of the signature.
pub fn tampered(token: &str) -> String {
    let mut tampered = token.to_string();
    tampered.pop();
    tampered
}

/// Headers with a raw `Authorization` value.
pub fn headers(authorization: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(authorization).expect("Invalid header value"),
    );
    headers
}

/// Headers with `Authorization: Bearer <token>`.
pub fn bearer_headers(token: &str) -> HeaderMap {
    headers(&format!("Bearer {token}"))
}
