// Required external crates for configuration management and serialization
use serde::Deserialize;
use std::path::{Path, PathBuf};
use config::{Config, ConfigError, Environment, File};

use crate::dataset::DataSource;
use crate::query::{Direction, SortKey, ViewQuery};
use crate::views::ViewDefaults;

/// Where the dataset files come from
#[derive(Debug, Deserialize, Clone, Default)]
pub struct DataConfig {
    /// Model records file, bundled copy when unset
    pub models_file: Option<PathBuf>,
    /// Provider pricing file, bundled copy when unset
    pub providers_file: Option<PathBuf>,
}

/// Configuration for the HTTP server
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number to listen on
    pub port: u16,
}

/// Configuration for application logging
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: String,
    /// Directory for the daily log files
    pub directory: PathBuf,
}

/// Defaults for the table and chart views
#[derive(Debug, Deserialize, Clone)]
pub struct ViewsConfig {
    /// Sort column id used when a request names none
    pub default_sort: String,
    /// "asc" or "desc"
    pub default_direction: String,
    /// Most models a comparison accepts
    pub compare_limit: usize,
    /// Bars shown in a recommendation chart
    pub recommendation_count: usize,
}

/// Main settings struct that contains all configuration
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    #[serde(default)]
    pub data: DataConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub views: ViewsConfig,
}

/// Implementation for loading and parsing configuration
impl Settings {
    /// Loads settings from `./config`, in the following order of precedence
    /// (highest to lowest):
    /// 1. Environment variables prefixed with MODELBOARD_, nested keys
    ///    joined by `__` (e.g. `MODELBOARD_SERVER__PORT=9000`)
    /// 2. Local config file (local.toml) if present
    /// 3. Default config file (default.toml) if present
    /// 4. Built-in defaults
    pub fn new() -> Result<Self, ConfigError> {
        let config_dir = std::env::current_dir()
            .map_err(|e| ConfigError::Message(
                format!("Failed to get current directory: {}", e)
            ))?
            .join("config");
        Self::from_dir(&config_dir)
    }

    /// Same as [`Settings::new`] with an explicit config directory
    pub fn from_dir(config_dir: &Path) -> Result<Self, ConfigError> {
        let default_config = config_dir.join("default.toml");
        let local_config = config_dir.join("local.toml");

        let settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8086)?
            .set_default("logging.level", "info")?
            .set_default("logging.directory", "logs")?
            .set_default("views.default_sort", "operationalRank")?
            .set_default("views.default_direction", "asc")?
            .set_default("views.compare_limit", 4)?
            .set_default("views.recommendation_count", 5)?
            .add_source(File::from(default_config).required(false))
            .add_source(File::from(local_config).required(false))
            .add_source(
                Environment::with_prefix("MODELBOARD")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?;

        // Validate settings after loading
        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Message(
                "Port must be between 1 and 65535, got: 0".to_string()
            ));
        }

        if self.server.host.trim().is_empty() {
            return Err(ConfigError::Message("Server host must not be empty".to_string()));
        }

        // Validate logging level
        match self.logging.level.to_lowercase().as_str() {
            "error" | "warn" | "info" | "debug" | "trace" => Ok(()),
            _ => Err(ConfigError::Message(
                format!("Invalid logging level: {}. Must be one of: error, warn, info, debug, trace",
                    self.logging.level)
            )),
        }?;

        if self.views.compare_limit == 0 {
            return Err(ConfigError::Message(
                "compare_limit must be greater than 0".to_string()
            ));
        }

        if self.views.recommendation_count == 0 {
            return Err(ConfigError::Message(
                "recommendation_count must be greater than 0".to_string()
            ));
        }

        // Sort defaults must name a real column and direction
        self.view_defaults().map(|_| ())
    }

    /// View defaults resolved from the `[views]` table
    pub fn view_defaults(&self) -> Result<ViewDefaults, ConfigError> {
        let sort = self.views.default_sort.parse::<SortKey>().map_err(ConfigError::Message)?;
        let direction = self.views.default_direction.parse::<Direction>().map_err(ConfigError::Message)?;
        Ok(ViewDefaults {
            query: ViewQuery::sorted_by(sort, direction),
            compare_limit: self.views.compare_limit,
            recommendation_count: self.views.recommendation_count,
        })
    }

    pub fn models_source(&self) -> DataSource {
        DataSource::from_path(self.data.models_file.as_deref())
    }

    pub fn providers_source(&self) -> DataSource {
        DataSource::from_path(self.data.providers_file.as_deref())
    }

    /// Base URL clients use to reach the API server
    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_builtin_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::from_dir(dir.path()).unwrap();
        assert_eq!(settings.server.port, 8086);
        assert_eq!(settings.logging.level, "info");
        assert_eq!(settings.models_source(), DataSource::Bundled);

        let defaults = settings.view_defaults().unwrap();
        assert_eq!(defaults.query.sort, SortKey::OperationalRank);
        assert_eq!(defaults.query.direction, Direction::Asc);
        assert_eq!(defaults.compare_limit, 4);
        assert_eq!(defaults.recommendation_count, 5);
    }

    #[test]
    fn test_local_file_overrides_default() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("default.toml"), "[server]\nport = 9000\n").unwrap();
        fs::write(
            dir.path().join("local.toml"),
            "[server]\nport = 9100\n\n[views]\ndefault_sort = \"mathLiveBench\"\ndefault_direction = \"desc\"\n\n[data]\nmodels_file = \"my/models.json\"\n",
        ).unwrap();

        let settings = Settings::from_dir(dir.path()).unwrap();
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.server_url(), "http://127.0.0.1:9100");
        assert_eq!(settings.models_source(), DataSource::File(PathBuf::from("my/models.json")));
        assert_eq!(settings.providers_source(), DataSource::Bundled);
        assert_eq!(settings.view_defaults().unwrap().query.direction, Direction::Desc);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let cases = [
            "[logging]\nlevel = \"loud\"\n",
            "[views]\ndefault_sort = \"vibes\"\n",
            "[views]\ndefault_direction = \"up\"\n",
            "[views]\ncompare_limit = 0\n",
            "[server]\nport = 0\n",
        ];
        for case in cases {
            let dir = tempfile::tempdir().unwrap();
            fs::write(dir.path().join("local.toml"), case).unwrap();
            assert!(Settings::from_dir(dir.path()).is_err(), "accepted: {}", case);
        }
    }
}
