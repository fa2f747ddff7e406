//! Signed-request header extraction
//!
//! Authenticated requests carry two headers: `Date`, the timestamp the client
//! signed, and `Authorization`, the base64 signature itself.

use axum::http::{HeaderMap, header};

/// Raw credential headers of a request, not yet verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    /// Raw `Date` header value, exactly as signed
    pub timestamp: String,
    /// Raw `Authorization` header value
    pub signature: String,
}

/// Error when extracting credential headers
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("Missing required header: {0}")]
    MissingHeader(String),
}

/// Extract the `Date` and `Authorization` headers.
///
/// ## Returns
/// * `Ok(SignedHeaders)` - both headers present and valid visible ASCII
/// * `Err(HeaderError)` - the first header that is missing or unreadable
pub fn extract_signed_headers(headers: &HeaderMap) -> Result<SignedHeaders, HeaderError> {
    let timestamp = header_str(headers, header::DATE)
        .ok_or_else(|| HeaderError::MissingHeader("Date".to_string()))?;
    let signature = header_str(headers, header::AUTHORIZATION)
        .ok_or_else(|| HeaderError::MissingHeader("Authorization".to_string()))?;

    Ok(SignedHeaders {
        timestamp: timestamp.to_string(),
        signature: signature.to_string(),
    })
}

fn header_str(headers: &HeaderMap, name: header::HeaderName) -> Option<&str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
}
