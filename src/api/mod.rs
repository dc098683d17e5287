//! REST API module.
//!
//! Contains the `/contacts` routes and their handlers.

mod contacts;
mod photos;

pub use contacts::*;
pub use photos::*;

use axum::http::{header, HeaderMap};
use uuid::Uuid;

use crate::errors::AppError;

/// Handler result; errors render as the JSON error envelope.
pub type ApiResult<T> = Result<T, AppError>;

/// Parse a contact ID from a path or query value.
pub fn parse_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::BadRequest(format!("Invalid contact id: {}", raw)))
}

/// Base URL generated links are rooted at: the configured public URL, or the
/// request's own Host.
pub fn base_url(public_url: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(url) = public_url {
        return url.trim_end_matches('/').to_string();
    }

    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");
    format!("http://{}", host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_parse_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string()).unwrap(), id);
        assert!(matches!(parse_id("nope"), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_base_url_prefers_public_url() {
        let mut headers = HeaderMap::new();
        headers.insert(header::HOST, HeaderValue::from_static("internal:8080"));

        assert_eq!(
            base_url(Some("https://contacts.example.com/"), &headers),
            "https://contacts.example.com"
        );
        assert_eq!(base_url(None, &headers), "http://internal:8080");
        assert_eq!(base_url(None, &HeaderMap::new()), "http://localhost");
    }
}
