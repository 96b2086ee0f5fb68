//! Layered service configuration
//!
//! Sources, lowest precedence first:
//! 1. built-in defaults
//! 2. `schoolfinder.toml` in the working directory (or `--config <path>`)
//! 3. `SCHOOLFINDER__SECTION__KEY` environment variables
//! 4. the flat `PORT` and `DB_PATH` variables
//! 5. command-line flags

use config::{Config, ConfigError, Environment, File};
use schoolfinder_core::errors::{ExError, ExErrorKind};
use schoolfinder_core::logging_facility::Profile;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "schoolfinder";
pub const ENV_PREFIX: &str = "SCHOOLFINDER";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl ServerSettings {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, or `:memory:`
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub profile: Profile,
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    pub port: Option<u16>,
    pub database: Option<PathBuf>,
    pub log_profile: Option<Profile>,
}

impl Settings {
    /// Load settings using the process environment
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when a source can't be read or a value has
    /// the wrong type.
    pub fn load(overrides: &Overrides) -> Result<Self, ExError> {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::from_sources(overrides, &env)
    }

    /// Load settings from an explicit environment map
    ///
    /// # Errors
    ///
    /// Same as [`Settings::load`].
    pub fn from_sources(
        overrides: &Overrides,
        env: &HashMap<String, String>,
    ) -> Result<Self, ExError> {
        let file = match &overrides.config_file {
            Some(path) => File::from(path.as_path()).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let prefixed = Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
            .source(Some(env.clone().into_iter().collect()));

        Config::builder()
            .set_default("server.host", "0.0.0.0")
            .and_then(|b| b.set_default("server.port", 3000))
            .and_then(|b| b.set_default("database.path", "school_management.db"))
            .and_then(|b| b.set_default("logging.profile", "development"))
            .map(|b| b.add_source(file).add_source(prefixed))
            .and_then(|b| b.set_override_option("server.port", env.get("PORT").cloned()))
            .and_then(|b| b.set_override_option("database.path", env.get("DB_PATH").cloned()))
            .and_then(|b| b.set_override_option("server.port", overrides.port.map(i64::from)))
            .and_then(|b| {
                b.set_override_option(
                    "database.path",
                    overrides
                        .database
                        .as_ref()
                        .map(|p| p.to_string_lossy().into_owned()),
                )
            })
            .and_then(|b| {
                b.set_override_option("logging.profile", overrides.log_profile.map(|p| p.as_str()))
            })
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize::<Settings>())
            .map_err(config_error)
    }
}

fn config_error(err: ConfigError) -> ExError {
    ExError::new(ExErrorKind::Config)
        .with_op("load_settings")
        .with_message(err.to_string())
}
