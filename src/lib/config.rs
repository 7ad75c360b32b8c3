//! Server configuration, layered from defaults, an optional TOML file and
//! `NOTES_` environment variables.
use std::{
    collections::HashMap,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// The environment variable naming the configuration file.
pub const CONFIG_PATH_VAR: &str = "NOTES_CONFIG";
/// The configuration file read when [`CONFIG_PATH_VAR`] is not set.
pub const DEFAULT_CONFIG_PATH: &str = "notes.toml";

const ENV_PREFIX: &str = "NOTES";

/// Settings for the server binary.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ServerConfig {
    /// The interface to listen on.
    pub host: String,
    /// The port to listen on.
    pub port: u16,
    /// An `EnvFilter` directive for the log output.
    pub log_filter: String,
    /// When set, logs are also written to a daily rolling file here.
    #[serde(default)]
    pub log_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Loads the configuration from the file named by `NOTES_CONFIG` (or
    /// `notes.toml`) and the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        Self::from_sources(&path, None)
    }

    /// Loads the configuration from `path`, which may not exist, and the
    /// environment. `env` replaces the process environment when given.
    pub fn from_sources(
        path: &Path,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("host", "0.0.0.0")?
            .set_default("port", 5000)?
            .set_default("log_filter", "server=info,notes=info")?
            .add_source(
                File::from(path.to_path_buf())
                    .required(false)
                    .format(FileFormat::Toml),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }

    /// The address the server should bind to.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|err| ConfigError::Message(format!("invalid listen address: {err}")))
    }
}
