//! Configuration for the repository bootstrap host.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use repository_locator::InitParameters;
use serde::{Deserialize, Serialize};
use static_directory_plugin::{CONNECTOR_NAME, CREDENTIALS_KEY, StaticDirectoryConfig};
use tracing::Level;

/// Prefix of environment overrides, e.g. `RB__LOGGING__DEFAULT__CONSOLE_LEVEL=debug`.
pub const ENV_PREFIX: &str = "RB__";

const REDACTED: &str = "[REDACTED]";

/// Host configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default = "default_logging_config")]
    pub logging: LoggingConfig,
    /// Init parameters handed to the repository publisher.
    #[serde(default)]
    pub init_parameters: InitParameters,
    #[serde(default)]
    pub directory: DirectorySection,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: default_logging_config(),
            init_parameters: InitParameters::new(),
            directory: DirectorySection::default(),
        }
    }
}

/// Naming service used to locate the repository.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DirectorySection {
    /// Registry name of the directory connector.
    #[serde(default = "default_connector")]
    pub connector: String,
    #[serde(default)]
    pub static_directory: StaticDirectoryConfig,
}

impl Default for DirectorySection {
    fn default() -> Self {
        Self {
            connector: default_connector(),
            static_directory: StaticDirectoryConfig::default(),
        }
    }
}

fn default_connector() -> String {
    CONNECTOR_NAME.to_owned()
}

/// Logging configuration: target prefix → settings.
/// Key "default" applies to targets without their own section.
pub type LoggingConfig = HashMap<String, Section>;

/// Console level names, as written in config files.
const LEVEL_NAMES: [(&str, Level); 5] = [
    ("trace", Level::TRACE),
    ("debug", Level::DEBUG),
    ("info", Level::INFO),
    ("warn", Level::WARN),
    ("error", Level::ERROR),
];

/// `Option<Level>` as a lowercase name; `None` is written as `off`.
mod console_level {
    use serde::{Deserialize, Deserializer, Serializer};
    use tracing::Level;

    use super::LEVEL_NAMES;

    #[allow(clippy::ref_option)]
    pub fn serialize<S: Serializer>(level: &Option<Level>, serializer: S) -> Result<S::Ok, S::Error> {
        let name = level
            .and_then(|l| LEVEL_NAMES.iter().find(|(_, known)| *known == l))
            .map_or("off", |(name, _)| *name);
        serializer.serialize_str(name)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Level>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        let name = raw.to_ascii_lowercase();
        if name == "off" || name == "none" {
            return Ok(None);
        }
        LEVEL_NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, level)| Some(*level))
            .ok_or_else(|| serde::de::Error::custom(format!("invalid level: {raw}")))
    }
}

fn info_level() -> Option<Level> {
    Some(Level::INFO)
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Section {
    #[serde(default = "info_level", with = "console_level")]
    pub console_level: Option<Level>,
}

#[must_use]
pub fn default_logging_config() -> LoggingConfig {
    HashMap::from([(
        "default".to_owned(),
        Section {
            console_level: Some(Level::INFO),
        },
    )])
}

impl AppConfig {
    /// Load configuration with layered loading: defaults → YAML file → environment variables.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or the merged configuration
    /// does not match [`AppConfig`].
    pub fn load_layered(config_path: &Path) -> Result<Self> {
        use figment::{
            Figment,
            providers::{Env, Format, Serialized, Yaml},
        };

        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Yaml::file(config_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment
            .extract()
            .with_context(|| format!("Failed to load config from {}", config_path.display()))
    }

    /// Load configuration from file or fall back to defaults.
    ///
    /// # Errors
    /// Returns an error if `config_path` is given but is not a file, or if
    /// loading it fails.
    pub fn load_or_default(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            ensure!(
                path.is_file(),
                "config file does not exist: {}",
                path.to_string_lossy()
            );
            Self::load_layered(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Serialize configuration to YAML with directory secrets masked.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(&self.redacted()).context("Failed to serialize config to YAML")
    }

    fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.init_parameters.get(CREDENTIALS_KEY).is_some() {
            config.init_parameters.insert(CREDENTIALS_KEY, REDACTED);
        }

        let directory = &mut config.directory.static_directory;
        if directory.credentials.is_some() {
            directory.credentials = Some(REDACTED.to_owned());
        }
        for binding in &mut directory.bindings {
            for password in binding.users.values_mut() {
                REDACTED.clone_into(password);
            }
        }
        config
    }

    /// Raise the default console level by `verbose` steps (`-v` → debug, `-vv` → trace).
    pub fn apply_cli_overrides(&mut self, verbose: u8) {
        let section = self
            .logging
            .entry("default".to_owned())
            .or_insert(Section {
                console_level: Some(Level::INFO),
            });
        section.console_level = match verbose {
            0 => section.console_level,
            1 => Some(Level::DEBUG),
            _ => Some(Level::TRACE),
        };
    }
}
