use std::env;

/// Upload ceiling applied when MAX_UPLOAD_BYTES is unset: 50 MB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Runtime configuration, resolved once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        let cors_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(value) => value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => vec![
                "http://localhost:3000".to_string(),
                "https://pptxtemplater.com".to_string(),
            ],
        };

        let max_upload_bytes = env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            bind_addr,
            cors_origins,
            max_upload_bytes,
        }
    }
}
