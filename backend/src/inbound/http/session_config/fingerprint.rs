//! Session key fingerprinting.
//!
//! A truncated SHA-256 digest of the signing half of the cookie key lets
//! operators confirm which key a running instance uses without the key
//! material ever reaching the logs.

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};

/// Digest bytes kept before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

/// Hex-encoded prefix of the SHA-256 digest of `key`'s signing material.
///
/// # Examples
///
/// ```rust
/// use actix_web::cookie::Key;
/// use forum_backend::inbound::http::session_config::fingerprint::key_fingerprint;
///
/// let fp = key_fingerprint(&Key::generate());
/// assert_eq!(fp.len(), 16);
/// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[must_use]
pub fn key_fingerprint(key: &Key) -> String {
    let digest = Sha256::digest(key.signing());
    hex::encode(digest.get(..FINGERPRINT_BYTES).unwrap_or_default())
}
