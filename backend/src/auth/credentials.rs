//! Credential token derivation using HMAC-SHA256
//!
//! The token is a keyed hash of the password, keyed by the normalized user
//! name. It is deterministic across restarts so that the same credentials
//! always produce the same stored token, and it doubles as the bearer token
//! returned to the client at signup.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Credential codec
pub struct CredentialCodec;

impl CredentialCodec {
    /// Derive the credential token for a password and (normalized) name
    pub fn derive(password: &str, name: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(name.as_bytes()).expect("HMAC can take key of any size");
        mac.update(password.as_bytes());
        STANDARD.encode(mac.finalize().into_bytes())
    }

    /// Compare a supplied token with a stored one in constant time
    pub fn matches(supplied: &str, stored: &str) -> bool {
        supplied.as_bytes().ct_eq(stored.as_bytes()).into()
    }
}
