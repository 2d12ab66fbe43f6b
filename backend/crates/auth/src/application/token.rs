//! Session Token Codec
//!
//! Wire format: `<session_id>.<base64url(HMAC-SHA256(session_id))>`.
//! The signature lets the server reject forged or truncated tokens before
//! touching the registry; the session id itself is the registry key.

use hmac::{Hmac, Mac};
use platform::crypto::{from_base64_url, to_base64_url};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Sign a session id into a bearer token
pub fn sign(secret: &[u8; 32], session_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    format!("{}.{}", session_id, to_base64_url(&signature))
}

/// Parse and verify a bearer token, returning the session id
///
/// `None` for anything that is not a well-formed, correctly signed token.
pub fn parse(secret: &[u8; 32], token: &str) -> Option<String> {
    let (session_id, signature_b64) = token.split_once('.')?;
    if session_id.is_empty() {
        return None;
    }

    let signature = from_base64_url(signature_b64).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(session_id.as_bytes());
    mac.verify_slice(&signature).ok()?;

    Some(session_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: [u8; 32] = [7u8; 32];

    #[test]
    fn test_sign_parse_roundtrip() {
        let token = sign(&SECRET, "some-session-id");
        assert_eq!(parse(&SECRET, &token).as_deref(), Some("some-session-id"));
    }

    #[test]
    fn test_rejects_wrong_secret() {
        let token = sign(&SECRET, "some-session-id");
        let other = [8u8; 32];
        assert_eq!(parse(&other, &token), None);
    }

    #[test]
    fn test_rejects_tampered_id() {
        let token = sign(&SECRET, "some-session-id");
        let tampered = token.replacen("some", "evil", 1);
        assert_eq!(parse(&SECRET, &tampered), None);
    }

    #[test]
    fn test_rejects_malformed_tokens() {
        assert_eq!(parse(&SECRET, ""), None);
        assert_eq!(parse(&SECRET, "no-dot-here"), None);
        assert_eq!(parse(&SECRET, ".signature-only"), None);
        assert_eq!(parse(&SECRET, "id.not!base64"), None);
    }
}
