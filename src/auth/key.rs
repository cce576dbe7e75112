// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Signing key decoding.
//!
//! The configured signing key is either a base64 HMAC secret or a PEM public
//! key. Each key family pins the set of header algorithms it will verify.

use base64ct::{Base64, Base64Unpadded, Encoding};
use jsonwebtoken::{Algorithm, DecodingKey};

use super::error::AuthError;

const PEM_MARKER: &str = "-----BEGIN";

const HMAC_ALGORITHMS: [Algorithm; 3] = [Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];

const RSA_ALGORITHMS: [Algorithm; 6] = [
    Algorithm::RS256,
    Algorithm::RS384,
    Algorithm::RS512,
    Algorithm::PS256,
    Algorithm::PS384,
    Algorithm::PS512,
];

const EC_ALGORITHMS: [Algorithm; 2] = [Algorithm::ES256, Algorithm::ES384];

/// Key family of a configured signing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFamily {
    Hmac,
    Rsa,
    Ec,
    Ed,
}

impl KeyFamily {
    /// Header algorithms accepted for this family.
    pub fn algorithms(self) -> &'static [Algorithm] {
        match self {
            KeyFamily::Hmac => &HMAC_ALGORITHMS,
            KeyFamily::Rsa => &RSA_ALGORITHMS,
            KeyFamily::Ec => &EC_ALGORITHMS,
            KeyFamily::Ed => &[Algorithm::EdDSA],
        }
    }
}

/// Decoded verification key.
///
/// Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct VerificationKey {
    key: DecodingKey,
    family: KeyFamily,
}

impl std::fmt::Debug for VerificationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VerificationKey")
            .field("family", &self.family)
            .finish()
    }
}

impl VerificationKey {
    /// Decode the configured signing key.
    ///
    /// # Errors
    /// - `ConfigurationDisabled` if the key is absent or blank
    /// - `InvalidSigningKey` if it is neither valid base64 nor a usable PEM key
    pub fn from_config(signing_key: Option<&str>) -> Result<Self, AuthError> {
        let raw = signing_key
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(AuthError::ConfigurationDisabled)?;

        if raw.contains(PEM_MARKER) {
            return Self::from_public_key_pem(raw);
        }

        let secret = decode_base64(raw)?;
        Ok(Self {
            key: DecodingKey::from_secret(&secret),
            family: KeyFamily::Hmac,
        })
    }

    fn from_public_key_pem(pem: &str) -> Result<Self, AuthError> {
        let pem = pem.as_bytes();

        if let Ok(key) = DecodingKey::from_rsa_pem(pem) {
            return Ok(Self {
                key,
                family: KeyFamily::Rsa,
            });
        }
        if let Ok(key) = DecodingKey::from_ec_pem(pem) {
            return Ok(Self {
                key,
                family: KeyFamily::Ec,
            });
        }
        if let Ok(key) = DecodingKey::from_ed_pem(pem) {
            return Ok(Self {
                key,
                family: KeyFamily::Ed,
            });
        }

        Err(AuthError::InvalidSigningKey)
    }

    pub fn decoding_key(&self) -> &DecodingKey {
        &self.key
    }

    pub fn family(&self) -> KeyFamily {
        self.family
    }

    pub fn algorithms(&self) -> &'static [Algorithm] {
        self.family.algorithms()
    }
}

/// Decode a standard base64 string, padded or not, ignoring embedded whitespace.
pub(crate) fn decode_base64(raw: &str) -> Result<Vec<u8>, AuthError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();

    let bytes = Base64::decode_vec(&compact)
        .or_else(|_| Base64Unpadded::decode_vec(&compact))
        .map_err(|_| AuthError::InvalidSigningKey)?;

    if bytes.is_empty() {
        return Err(AuthError::InvalidSigningKey);
    }
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::test_support::{EC_PUBLIC_PEM, RSA_PUBLIC_PEM};

    #[test]
    fn absent_or_blank_key_disables() {
        assert_eq!(
            VerificationKey::from_config(None).unwrap_err(),
            AuthError::ConfigurationDisabled
        );
        assert_eq!(
            VerificationKey::from_config(Some("")).unwrap_err(),
            AuthError::ConfigurationDisabled
        );
        assert_eq!(
            VerificationKey::from_config(Some("  \n")).unwrap_err(),
            AuthError::ConfigurationDisabled
        );
    }

    #[test]
    fn base64_secret_is_hmac() {
        let key = VerificationKey::from_config(Some("c2VjcmV0LWtleQ==")).unwrap();
        assert_eq!(key.family(), KeyFamily::Hmac);
        assert_eq!(
            key.algorithms(),
            &[Algorithm::HS256, Algorithm::HS384, Algorithm::HS512]
        );
    }

    #[test]
    fn unpadded_and_wrapped_base64_is_accepted() {
        assert_eq!(decode_base64("c2VjcmV0LWtleQ").unwrap(), b"secret-key");
        assert_eq!(decode_base64("c2VjcmV0\nLWtleQ==").unwrap(), b"secret-key");
    }

    #[test]
    fn invalid_base64_is_a_configuration_error() {
        assert_eq!(
            VerificationKey::from_config(Some("not base64 !!")).unwrap_err(),
            AuthError::InvalidSigningKey
        );
    }

    #[test]
    fn pem_public_keys_select_their_family() {
        let rsa = VerificationKey::from_config(Some(RSA_PUBLIC_PEM)).unwrap();
        assert_eq!(rsa.family(), KeyFamily::Rsa);
        assert!(rsa.algorithms().contains(&Algorithm::RS256));

        let ec = VerificationKey::from_config(Some(EC_PUBLIC_PEM)).unwrap();
        assert_eq!(ec.family(), KeyFamily::Ec);
        assert_eq!(ec.algorithms(), &[Algorithm::ES256, Algorithm::ES384]);
    }

    #[test]
    fn garbage_pem_is_invalid() {
        let pem = "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----\n";
        assert_eq!(
            VerificationKey::from_config(Some(pem)).unwrap_err(),
            AuthError::InvalidSigningKey
        );
    }

    #[test]
    fn debug_hides_key_material() {
        let key = VerificationKey::from_config(Some("c2VjcmV0LWtleQ==")).unwrap();
        assert_eq!(format!("{key:?}"), "VerificationKey { family: Hmac }");
    }
}
