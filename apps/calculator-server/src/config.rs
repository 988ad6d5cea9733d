//! Layered application configuration.
//!
//! Precedence, lowest first: built-in defaults, YAML file, legacy `MYSQL_*`
//! variables, `CALC__*` variables, CLI flags.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::Context;
use calculator::config::duration_serde;
use calculator::{DatabaseConfig, DbEngine, ServiceConfig};
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, nested with `__`
/// (`CALC__DATABASE__HOST`).
pub const ENV_PREFIX: &str = "CALC__";

/// Legacy database variables and the keys they map to.
const LEGACY_DB_ENV: [(&str, &str); 4] = [
    ("MYSQL_HOST", "database.host"),
    ("MYSQL_DATABASE", "database.name"),
    ("MYSQL_USER", "database.user"),
    ("MYSQL_PASSWORD", "database.password"),
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
    pub calculator: ServiceConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,

    /// Requests running longer are answered with 504.
    #[serde(with = "duration_serde")]
    pub request_timeout: Duration,

    pub body_limit_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 80)),
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 64 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// `EnvFilter` directive used when `RUST_LOG` is not set.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

/// Command-line values that override file and environment settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub mock: bool,
}

impl AppConfig {
    /// Loads the layered configuration.
    ///
    /// # Errors
    /// Returns an error if the YAML file cannot be parsed or a value has the
    /// wrong type or an unknown key.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }

        figment
            .merge(legacy_db_env())
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(port) = args.port {
            self.server.bind_addr.set_port(port);
        }
        if args.mock {
            self.database.engine = DbEngine::Sqlite;
            self.database.sqlite_path = None;
        }
    }

    /// Effective configuration with the database password redacted.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_pretty_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("failed to render configuration")
    }
}

fn legacy_db_env() -> Env {
    let names: Vec<&str> = LEGACY_DB_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_DB_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map_or(key.as_str(), |(_, path)| *path)
            .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const ALL_VARS: [&str; 8] = [
        "MYSQL_HOST",
        "MYSQL_DATABASE",
        "MYSQL_USER",
        "MYSQL_PASSWORD",
        "CALC__DATABASE__HOST",
        "CALC__DATABASE__PORT",
        "CALC__SERVER__BIND_ADDR",
        "CALC__LOGGING__FORMAT",
    ];

    fn clean_env<R>(f: impl FnOnce() -> R) -> R {
        temp_env::with_vars_unset(ALL_VARS, f)
    }

    fn yaml_file(contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_without_file_or_env() {
        let config = clean_env(|| AppConfig::load_or_default(None).unwrap());

        assert_eq!(config.server.bind_addr, "0.0.0.0:80".parse().unwrap());
        assert_eq!(config.server.request_timeout, Duration::from_secs(30));
        assert_eq!(config.database.engine, DbEngine::Mysql);
        assert_eq!(config.database.host, "localhost");
        assert_eq!(config.database.name, "calculator_db");
        assert_eq!(config.database.user, "lantine");
        assert_eq!(config.database.password.expose(), "password");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert_eq!(config.calculator.history_limit, 50);
    }

    #[test]
    fn test_yaml_file_overrides_defaults() {
        let file = yaml_file(
            r#"
server:
  bind_addr: "127.0.0.1:8080"
  request_timeout: "5s"
database:
  engine: sqlite
  sqlite_path: "/tmp/calc.db"
logging:
  format: json
calculator:
  history_limit: 10
"#,
        );

        let config = clean_env(|| AppConfig::load_or_default(Some(file.path())).unwrap());

        assert_eq!(config.server.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.server.request_timeout, Duration::from_secs(5));
        assert_eq!(config.database.engine, DbEngine::Sqlite);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.calculator.history_limit, 10);
        // untouched sections keep their defaults
        assert_eq!(config.database.port, 3306);
    }

    #[test]
    fn test_sample_config_file_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../config/calculator.yaml");

        let config = clean_env(|| AppConfig::load_or_default(Some(&path)).unwrap());

        assert_eq!(config.server.body_limit_bytes, 65536);
        assert_eq!(config.database.acquire_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let file = yaml_file("database:\n  hostname: db\n");

        let result = clean_env(|| AppConfig::load_or_default(Some(file.path())));

        assert!(result.is_err());
    }

    #[test]
    fn test_legacy_mysql_variables_are_honoured() {
        let config = temp_env::with_vars(
            [
                ("MYSQL_HOST", Some("db.internal")),
                ("MYSQL_DATABASE", Some("calc")),
                ("MYSQL_USER", Some("calc_app")),
                ("MYSQL_PASSWORD", Some("s3cret")),
            ],
            || AppConfig::load_or_default(None).unwrap(),
        );

        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.name, "calc");
        assert_eq!(config.database.user, "calc_app");
        assert_eq!(config.database.password.expose(), "s3cret");
    }

    #[test]
    fn test_prefixed_variables_win_over_file_and_legacy() {
        let file = yaml_file("database:\n  port: 3310\n");

        let config = temp_env::with_vars(
            [
                ("MYSQL_HOST", Some("legacy-host")),
                ("CALC__DATABASE__HOST", Some("prefixed-host")),
                ("CALC__DATABASE__PORT", Some("3307")),
            ],
            || AppConfig::load_or_default(Some(file.path())).unwrap(),
        );

        assert_eq!(config.database.host, "prefixed-host");
        assert_eq!(config.database.port, 3307);
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = AppConfig::default();

        config.apply_cli_overrides(&CliArgs {
            port: Some(8081),
            mock: true,
        });

        assert_eq!(config.server.bind_addr.port(), 8081);
        assert!(config.database.is_in_memory());
    }

    #[test]
    fn test_rendered_config_redacts_password() {
        let mut config = AppConfig::default();
        config.database.password = calculator::SecretString::new("hunter2");

        let rendered = config.to_pretty_json().unwrap();

        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("[REDACTED]"));
        assert!(rendered.contains("\"request_timeout\": \"30s\""));
    }
}
