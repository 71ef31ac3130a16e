//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_PROFILE: &str = "plant-village-16";
pub const DEFAULT_MODEL_PATH: &str = "model.onnx";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `LEAFSCAN_BIND`
    pub bind_addr: SocketAddr,
    /// `LEAFSCAN_PROFILE`: built-in profile name or path to a TOML profile.
    pub profile: String,
    /// `LEAFSCAN_MODEL`
    pub model_path: PathBuf,
    /// `LEAFSCAN_UPLOAD_DIR`
    pub upload_dir: PathBuf,
    /// `LEAFSCAN_MAX_UPLOAD_BYTES`
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            profile: DEFAULT_PROFILE.to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Unparsable values fall back to the
    /// default with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let bind_addr = match lookup("LEAFSCAN_BIND") {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "LEAFSCAN_BIND is not a socket address; using {DEFAULT_BIND}");
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        let max_upload_bytes = match lookup("LEAFSCAN_MAX_UPLOAD_BYTES") {
            Some(raw) => match raw.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    tracing::warn!(
                        value = %raw,
                        "LEAFSCAN_MAX_UPLOAD_BYTES must be a positive integer; using {DEFAULT_MAX_UPLOAD_BYTES}"
                    );
                    defaults.max_upload_bytes
                }
            },
            None => defaults.max_upload_bytes,
        };

        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            bind_addr,
            profile: non_empty("LEAFSCAN_PROFILE").unwrap_or(defaults.profile),
            model_path: non_empty("LEAFSCAN_MODEL")
                .map(PathBuf::from)
                .unwrap_or(defaults.model_path),
            upload_dir: non_empty("LEAFSCAN_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            max_upload_bytes,
        }
    }
}
