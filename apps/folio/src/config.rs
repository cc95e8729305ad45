use std::path::PathBuf;

use anyhow::{ensure, Result};

/// Application configuration loaded from environment variables. Everything
/// has a sensible local default — the tool must work against a dev backend
/// with no setup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the portfolio backend.
    pub api_url: String,
    /// Directory holding the persisted session.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_url = std::env::var("FOLIO_API_URL")
            .unwrap_or_else(|_| "http://localhost:5000".to_string());
        ensure!(
            api_url.starts_with("http://") || api_url.starts_with("https://"),
            "FOLIO_API_URL must be an http(s) URL, got '{api_url}'"
        );

        Ok(Config {
            api_url,
            data_dir: std::env::var("FOLIO_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".folio")),
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }
}
