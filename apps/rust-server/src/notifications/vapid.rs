// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! VAPID key pair (RFC 8292).
//!
//! The private key is the raw 32-byte P-256 scalar and the public key the
//! 65-byte uncompressed SEC1 point, both base64url encoded. This is the format
//! `web_push::VapidSignatureBuilder::from_base64` expects.

use base64ct::{Base64UrlUnpadded, Encoding};

/// Uncompressed P-256 point length.
const PUBLIC_KEY_LEN: usize = 65;
/// Raw P-256 scalar length.
const PRIVATE_KEY_LEN: usize = 32;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum VapidKeyError {
    #[error("{0} key is not valid base64url")]
    Encoding(&'static str),

    #[error("public key must be a 65-byte uncompressed P-256 point")]
    PublicKeyFormat,

    #[error("private key must be a 32-byte P-256 scalar, got {0} bytes")]
    PrivateKeyLength(usize),
}

/// Validated VAPID credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct VapidKeyPair {
    public_key_b64: String,
    private_key_b64: String,
}

impl VapidKeyPair {
    /// Validate and wrap base64url encoded keys.
    pub fn from_base64url(public_key_b64: &str, private_key_b64: &str) -> Result<Self, VapidKeyError> {
        let public_key_b64 = public_key_b64.trim().trim_end_matches('=');
        let private_key_b64 = private_key_b64.trim().trim_end_matches('=');

        let public = Base64UrlUnpadded::decode_vec(public_key_b64)
            .map_err(|_| VapidKeyError::Encoding("public"))?;
        if public.len() != PUBLIC_KEY_LEN || public[0] != 0x04 {
            return Err(VapidKeyError::PublicKeyFormat);
        }

        let private = Base64UrlUnpadded::decode_vec(private_key_b64)
            .map_err(|_| VapidKeyError::Encoding("private"))?;
        if private.len() != PRIVATE_KEY_LEN {
            return Err(VapidKeyError::PrivateKeyLength(private.len()));
        }

        Ok(Self {
            public_key_b64: public_key_b64.to_string(),
            private_key_b64: private_key_b64.to_string(),
        })
    }

    /// The `applicationServerKey` browsers subscribe with.
    pub fn public_key_base64url(&self) -> &str {
        &self.public_key_b64
    }

    pub fn private_key_base64url(&self) -> &str {
        &self.private_key_b64
    }
}

impl std::fmt::Debug for VapidKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VapidKeyPair")
            .field("public_key", &self.public_key_b64)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}
