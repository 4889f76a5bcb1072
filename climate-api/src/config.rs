use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix, e.g. `CLIMATE_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "CLIMATE";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Path to the SQLite dataset file.
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseSettings {
                path: "Resources/hawaii.sqlite".to_string(),
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl Settings {
    /// Defaults, then `climate.{toml,yaml,json}` in the working directory if
    /// present, then `CLIMATE_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::build(None, ENV_PREFIX)
    }

    /// Same layering as [`Settings::load`], with an explicit config file that must exist.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::build(Some(path.as_ref()), ENV_PREFIX)
    }

    fn build(path: Option<&Path>, env_prefix: &str) -> Result<Self, ConfigError> {
        let mut builder =
            ConfigBuilder::builder().add_source(ConfigBuilder::try_from(&Settings::default())?);

        builder = match path {
            Some(path) => builder.add_source(File::from(path)),
            None => builder.add_source(File::with_name("climate").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(env_prefix)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_settings_default() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 5000);
        assert_eq!(settings.database.path, "Resources/hawaii.sqlite");
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_settings_load_from_toml_file() {
        let mut temp_file = NamedTempFile::with_suffix(".toml").unwrap();
        write!(
            temp_file,
            r#"
[server]
host = "0.0.0.0"
port = 8080

[database]
path = "/data/hawaii.sqlite"
"#
        )
        .unwrap();

        let settings = Settings::build(Some(temp_file.path()), "CLIMATE_TEST_TOML").unwrap();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.path, "/data/hawaii.sqlite");
        // Unset keys keep their defaults.
        assert_eq!(settings.logging.level, "info");
    }

    #[test]
    fn test_settings_load_from_yaml_file() {
        let yaml_content = r#"
logging:
  level: "debug"
"#;
        let mut temp_file = NamedTempFile::with_suffix(".yaml").unwrap();
        temp_file.write_all(yaml_content.as_bytes()).unwrap();

        let settings = Settings::build(Some(temp_file.path()), "CLIMATE_TEST_YAML").unwrap();
        assert_eq!(settings.logging.level, "debug");
        assert_eq!(settings.server.port, 5000);
    }

    #[test]
    fn test_settings_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = Settings::build(Some(&dir.path().join("nope.toml")), "CLIMATE_TEST_MISSING");
        assert!(result.is_err());
    }

    #[test]
    fn test_settings_env_overrides() {
        // A prefix no other test uses, so parallel tests are unaffected.
        std::env::set_var("CLIMATE_TEST_ENV_SERVER__PORT", "9191");
        std::env::set_var("CLIMATE_TEST_ENV_DATABASE__PATH", "/tmp/env.sqlite");
        let settings = Settings::build(None, "CLIMATE_TEST_ENV").unwrap();
        assert_eq!(settings.server.port, 9191);
        assert_eq!(settings.database.path, "/tmp/env.sqlite");
    }
}
