//! Configuration management for the Book API

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use sqlx::mysql::MySqlConnectOptions;
use std::env;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// MySQL settings. The store runs in memory when `host` is unset.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DatabaseConfig {
    /// `host` or `host:port`
    pub host: Option<String>,
    pub user: String,
    pub password: String,
    pub name: String,
    /// Truncate the books table at startup
    pub clear_on_reload: bool,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// `pretty` or `json`
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // e.g. BOOKAPI__SERVER__PORT=8080
            .add_source(
                Environment::with_prefix("BOOKAPI")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("database.host", env::var("MYSQL_HOST").ok())?
            .set_override_option("database.user", env::var("MYSQL_USER").ok())?
            .set_override_option("database.password", env::var("MYSQL_PASSWORD").ok())?
            .set_override_option("database.name", env::var("MYSQL_DB").ok())?
            .set_override_option(
                "database.clear_on_reload",
                env::var("CLEAR_DB_ON_RELOAD").ok().map(|v| v == "on"),
            )?
            .build()?;

        config.try_deserialize()
    }
}

impl DatabaseConfig {
    /// Whether books live in MySQL rather than in memory
    pub fn is_configured(&self) -> bool {
        self.host.as_deref().is_some_and(|h| !h.is_empty())
    }

    pub fn connect_options(&self) -> MySqlConnectOptions {
        let mut options = MySqlConnectOptions::new()
            .username(&self.user)
            .database(&self.name);

        if !self.password.is_empty() {
            options = options.password(&self.password);
        }

        if let Some(host) = &self.host {
            let (name, port) = split_host(host);
            options = options.host(name);
            if let Some(port) = port {
                options = options.port(port);
            }
        }

        options
    }
}

/// Split an optional `:port` suffix off a host.
///
/// IPv6 literals only carry a port in the bracketed `[addr]:port` form; a
/// bare address such as `::1` is returned whole.
fn split_host(host: &str) -> (&str, Option<u16>) {
    if let Some(rest) = host.strip_prefix('[') {
        return match rest.split_once(']') {
            Some((addr, "")) => (addr, None),
            Some((addr, port)) => match port.strip_prefix(':').and_then(|p| p.parse().ok()) {
                Some(port) => (addr, Some(port)),
                None => (host, None),
            },
            None => (host, None),
        };
    }

    match host.split_once(':') {
        Some((name, port)) if !port.contains(':') => match port.parse() {
            Ok(port) => (name, Some(port)),
            Err(_) => (host, None),
        },
        _ => (host, None),
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: None,
            user: "root".to_string(),
            password: String::new(),
            name: "books".to_string(),
            clear_on_reload: false,
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}
