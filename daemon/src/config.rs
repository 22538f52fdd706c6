//! Daemon configuration with TOML file support.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tipjar_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("config cannot be serialized: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Settings for `tipjar serve`.
///
/// The network, Horizon endpoint, and tip destination are fixed and do not
/// appear here.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TipJarConfig {
    /// Interface the web UI binds to.
    #[serde(default = "default_listen_addr")]
    pub listen_addr: IpAddr,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Encrypted keystore holding the signing key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keystore_path: Option<PathBuf>,

    /// Name of the environment variable that may hold an `S...` secret seed,
    /// used when no keystore is configured.
    #[serde(default = "default_secret_seed_env")]
    pub secret_seed_env: String,
}

/// Values given on the command line or through environment variables.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub listen_addr: Option<IpAddr>,
    pub port: Option<u16>,
    pub log_format: Option<LogFormat>,
    pub log_level: Option<String>,
    pub keystore_path: Option<PathBuf>,
}

fn default_listen_addr() -> IpAddr {
    IpAddr::V4(Ipv4Addr::LOCALHOST)
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_secret_seed_env() -> String {
    "TIPJAR_SECRET_SEED".to_string()
}

impl TipJarConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Apply command-line values on top of the file values.
    pub fn with_overrides(mut self, o: Overrides) -> Self {
        if let Some(addr) = o.listen_addr {
            self.listen_addr = addr;
        }
        if let Some(port) = o.port {
            self.port = port;
        }
        if let Some(format) = o.log_format {
            self.log_format = format;
        }
        if let Some(level) = o.log_level {
            self.log_level = level;
        }
        if o.keystore_path.is_some() {
            self.keystore_path = o.keystore_path;
        }
        self
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.listen_addr, self.port)
    }
}

impl Default for TipJarConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            port: default_port(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            keystore_path: None,
            secret_seed_env: default_secret_seed_env(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = TipJarConfig::default();
        let parsed = TipJarConfig::from_toml_str(&config.to_toml_string().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = TipJarConfig::from_toml_str("").unwrap();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.log_format, LogFormat::Human);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.keystore_path, None);
        assert_eq!(config.secret_seed_env, "TIPJAR_SECRET_SEED");
    }

    #[test]
    fn partial_toml_overrides() {
        let config = TipJarConfig::from_toml_str(
            r#"
            port = 9000
            log_format = "json"
            keystore_path = "/var/lib/tipjar/key.json"
            "#,
        )
        .unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.keystore_path, Some(PathBuf::from("/var/lib/tipjar/key.json")));
        assert_eq!(config.listen_addr, default_listen_addr());
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        assert!(matches!(
            TipJarConfig::from_toml_str("log_format = \"xml\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn cli_values_win_over_file() {
        let file = TipJarConfig::from_toml_str("port = 9000\nlog_level = \"debug\"").unwrap();
        let merged = file.with_overrides(Overrides {
            port: Some(3000),
            listen_addr: Some("0.0.0.0".parse().unwrap()),
            ..Overrides::default()
        });
        assert_eq!(merged.port, 3000);
        assert_eq!(merged.log_level, "debug");
        assert_eq!(merged.socket_addr().to_string(), "0.0.0.0:3000");
    }

    #[test]
    fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = TipJarConfig::from_toml_file(&dir.path().join("tipjar.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
