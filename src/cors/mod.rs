//! Cross-origin policy for the browser frontends.

use axum::http::{header, HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Headers frontends may send and read back.
const CORS_HEADERS: [HeaderName; 8] = [
    header::ORIGIN,
    header::ACCESS_CONTROL_ALLOW_ORIGIN,
    header::CONTENT_TYPE,
    header::ACCEPT,
    header::AUTHORIZATION,
    header::ACCESS_CONTROL_REQUEST_METHOD,
    header::ACCESS_CONTROL_REQUEST_HEADERS,
    header::ACCESS_CONTROL_ALLOW_CREDENTIALS,
];

const CORS_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::PATCH,
    Method::DELETE,
    Method::OPTIONS,
];

/// Build the CORS layer allowing credentialed requests from `allowed_origins`.
///
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_headers(CORS_HEADERS)
        .expose_headers(CORS_HEADERS)
        .allow_methods(CORS_METHODS)
}
