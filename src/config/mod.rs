//! Configuration module for the contacts backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Frontends allowed to call the API when no allow-list is configured.
pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:4200"];

/// Default request body limit for photo uploads (10 MiB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

impl LogFormat {
    fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Directory uploaded photos are written to and served from
    pub photo_dir: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Log output format (pretty or json)
    pub log_format: LogFormat,
    /// Origins allowed to make credentialed cross-origin requests
    pub allowed_origins: Vec<String>,
    /// Base URL used when building photo links. Falls back to the request's Host header.
    pub public_url: Option<String>,
    /// Maximum accepted request body size in bytes
    pub max_upload_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("CONTACTS_DB_PATH")
            .unwrap_or_else(|_| "./data/contacts.sqlite".to_string())
            .into();

        let photo_dir = env::var("CONTACTS_PHOTO_DIR")
            .unwrap_or_else(|_| "./data/photos".to_string())
            .into();

        let bind_addr = env::var("CONTACTS_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid CONTACTS_BIND_ADDR format");

        let log_level = env::var("CONTACTS_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_format = env::var("CONTACTS_LOG_FORMAT")
            .map(|s| LogFormat::parse(&s))
            .unwrap_or(LogFormat::Pretty);

        let allowed_origins = env::var("CONTACTS_ALLOWED_ORIGINS")
            .map(|s| parse_origins(&s))
            .unwrap_or_else(|_| {
                DEFAULT_ALLOWED_ORIGINS
                    .iter()
                    .map(|s| s.to_string())
                    .collect()
            });

        let public_url = env::var("CONTACTS_PUBLIC_URL")
            .ok()
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let max_upload_bytes = env::var("CONTACTS_MAX_UPLOAD_BYTES")
            .ok()
            .map(|s| {
                s.parse()
                    .expect("Invalid CONTACTS_MAX_UPLOAD_BYTES, expected a byte count")
            })
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            db_path,
            photo_dir,
            bind_addr,
            log_level,
            log_format,
            allowed_origins,
            public_url,
            max_upload_bytes,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks and trailing slashes.
fn parse_origins(s: &str) -> Vec<String> {
    s.split(',')
        .map(|o| o.trim().trim_end_matches('/'))
        .filter(|o| !o.is_empty())
        .map(|o| o.to_string())
        .collect()
}
