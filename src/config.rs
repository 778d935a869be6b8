use std::env;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::service::ServiceOptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid NOTES_BIND {value}: {source}")]
    InvalidBind {
        value: String,
        source: AddrParseError,
    },
}

pub const DEFAULT_PORT: u16 = 5000;

/// Where the server keeps its notes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Memory,
    JsonDir(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: SocketAddr,
    pub storage: StorageConfig,
    pub service: ServiceOptions,
}

fn parse_bool(value: Option<&str>, default: bool) -> bool {
    value
        .and_then(|v| match v {
            "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
            "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
            _ => None,
        })
        .unwrap_or(default)
}

fn parse_duration_ms(value: Option<&str>) -> Duration {
    value
        .and_then(|v| v.parse::<u64>().ok())
        .map(Duration::from_millis)
        .unwrap_or_default()
}

fn parse_bind(value: &str) -> Result<SocketAddr, ConfigError> {
    value.parse().map_err(|source| ConfigError::InvalidBind {
        value: value.to_string(),
        source,
    })
}

fn env_bool(name: &str, default: bool) -> bool {
    parse_bool(env::var(name).ok().as_deref(), default)
}

fn env_duration_ms(name: &str) -> Duration {
    parse_duration_ms(env::var(name).ok().as_deref())
}

/// `$HOME/.notepad`, falling back to the working directory
pub fn default_data_dir() -> PathBuf {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".notepad")
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            storage: StorageConfig::JsonDir(default_data_dir()),
            service: ServiceOptions::default(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `NOTES_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = ServerConfig::default();

        if let Ok(bind) = env::var("NOTES_BIND") {
            config.bind = parse_bind(&bind)?;
        }
        if let Ok(dir) = env::var("NOTES_DATA_DIR") {
            config.storage = StorageConfig::JsonDir(PathBuf::from(dir));
        }
        if env_bool("NOTES_IN_MEMORY", false) {
            config.storage = StorageConfig::Memory;
        }

        config.service = ServiceOptions {
            strict_not_found: env_bool("NOTES_STRICT_NOT_FOUND", false),
            list_delay: env_duration_ms("NOTES_LIST_DELAY_MS"),
            create_delay: env_duration_ms("NOTES_CREATE_DELAY_MS"),
            update_delay: env_duration_ms("NOTES_UPDATE_DELAY_MS"),
        };

        Ok(config)
    }
}
