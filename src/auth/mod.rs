// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Authentication Module
//!
//! This module provides JWT bearer credential extraction.
//!
//! ## Auth Flow
//!
//! 1. Client sends `Authorization: Bearer <JWT>`
//! 2. The authenticator:
//!    - Verifies the signature against the configured signing key
//!      (HS256/384/512 secret, or an RSA / EC / Ed25519 public key)
//!    - Checks `exp` and `nbf` with a clock skew tolerance
//!    - Extracts:
//!      - subject claim (default `sub`) → `username`
//!      - roles claim (default `roles`) → `backend_roles`
//!      - every claim → `attr.jwt.<claim>` attributes
//!
//! ## Security
//!
//! - Fails closed: no signing key means no credentials, ever
//! - Rejections are uniform; the reason is only written to the debug log
//! - Key material is never printed via `Debug`

pub mod authenticator;
pub mod claims;
pub mod error;
pub mod extractor;
pub mod header;
pub mod key;
pub mod middleware;
pub mod roles;

#[cfg(test)]
pub(crate) mod test_support;

pub use authenticator::JwtAuthenticator;
pub use claims::{Credentials, ATTRIBUTE_PREFIX};
pub use error::{AuthError, AuthRejection};
pub use extractor::{Auth, OptionalAuth};
pub use middleware::auth_middleware;
pub use roles::RolesClaim;
