//! Bearer Token Header Handling
//!
//! Extraction of `Authorization: Bearer <token>` credentials from request
//! headers. Parsing is strict: the scheme must be exactly `Bearer` and the
//! token must be non-empty, otherwise the header is treated as absent.

use http::{HeaderMap, header};

/// Extract a bearer token from the Authorization header
///
/// Returns `None` when the header is missing, not valid UTF-8, uses a
/// different scheme, or carries an empty token.
pub fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    let token = value.strip_prefix("Bearer ")?.trim();
    if token.is_empty() {
        return None;
    }

    Some(token.to_string())
}
