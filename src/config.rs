//! Service configuration parsed from environment variables.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS: u64 = 60;
pub const DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_UPLOAD_DOCUMENT_NAME: &str = "New Technical Document.pdf";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse failed: {0}")]
    Parse(String),
    #[error("missing required env var {var}")]
    Missing { var: String },
}

/// Where chat replies and uploads come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// Canned replies and timer-driven progress.
    Simulated,
    /// A support backend reachable over HTTP at `base_url`.
    Http { base_url: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

/// The file the HTTP uploader sends on each upload run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSource {
    pub path: Option<PathBuf>,
    /// Overrides the file name taken from `path`.
    pub name: Option<String>,
}

impl UploadSource {
    /// Multipart file name: explicit name, then the path's file name, then the default.
    #[must_use]
    pub fn file_name(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        self.path
            .as_ref()
            .and_then(|p| p.file_name())
            .map_or_else(|| DEFAULT_UPLOAD_DOCUMENT_NAME.to_string(), |n| n.to_string_lossy().into_owned())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
    pub backend: BackendMode,
    pub timeouts: BackendTimeouts,
    /// Seed for reproducible canned replies. Thread RNG when absent.
    pub reply_seed: Option<u64>,
    pub upload: UploadSource,
}

impl AppConfig {
    /// Build typed config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `BACKEND_MODE`: `simulated` (default) or `http`
    /// - `BACKEND_URL`: required when `BACKEND_MODE=http`
    /// - `BACKEND_REQUEST_TIMEOUT_SECS`: default 60
    /// - `BACKEND_CONNECT_TIMEOUT_SECS`: default 10
    /// - `REPLY_SEED`: u64 seed for canned reply selection
    /// - `UPLOAD_DOCUMENT_PATH`: file sent by the HTTP uploader
    /// - `UPLOAD_DOCUMENT_NAME`: file name override for that upload
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown backend mode, a missing `BACKEND_URL`,
    /// or a malformed `PORT` / `REPLY_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_optional::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);
        let backend = parse_backend(
            std::env::var("BACKEND_MODE").ok().as_deref(),
            std::env::var("BACKEND_URL").ok().as_deref(),
        )?;
        let timeouts = BackendTimeouts {
            request_secs: env_parse("BACKEND_REQUEST_TIMEOUT_SECS", DEFAULT_BACKEND_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("BACKEND_CONNECT_TIMEOUT_SECS", DEFAULT_BACKEND_CONNECT_TIMEOUT_SECS),
        };
        let reply_seed = parse_optional::<u64>("REPLY_SEED")?;
        let upload = UploadSource {
            path: non_empty_var("UPLOAD_DOCUMENT_PATH").map(PathBuf::from),
            name: non_empty_var("UPLOAD_DOCUMENT_NAME"),
        };

        Ok(Self { port, backend, timeouts, reply_seed, upload })
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn parse_optional<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| ConfigError::Parse(format!("invalid {key}: {raw}"))),
        Err(_) => Ok(None),
    }
}

fn parse_backend(mode: Option<&str>, url: Option<&str>) -> Result<BackendMode, ConfigError> {
    match mode.unwrap_or("simulated") {
        "simulated" => Ok(BackendMode::Simulated),
        "http" => {
            let base_url = url
                .map(|u| u.trim().trim_end_matches('/'))
                .filter(|u| !u.is_empty())
                .ok_or_else(|| ConfigError::Missing { var: "BACKEND_URL".into() })?;
            Ok(BackendMode::Http { base_url: base_url.to_string() })
        }
        other => Err(ConfigError::Parse(format!(
            "unknown BACKEND_MODE '{other}' (expected 'simulated' or 'http')"
        ))),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
