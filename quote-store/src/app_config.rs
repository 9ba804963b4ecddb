use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub database: Option<DatabaseConfig>,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

/// Seed for the in-memory catalog, used when no database is configured.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    pub seed_file: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct NotificationConfig {
    /// Sales alerts are POSTed here as JSON when set; otherwise they are only logged.
    pub webhook_url: Option<String>,
    /// Shown as the addressee in logged alerts.
    pub sales_recipient: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            // Not checked in
            .add_source(config::File::with_name("config/local").required(false))
            // e.g. `QUOTE_DATABASE__URL=postgres://...`
            .add_source(config::Environment::with_prefix("QUOTE").separator("__"))
            .build()?;

        s.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optional_sections_default() {
        let cfg: Config = config::Config::builder()
            .set_override("server.port", 5000)
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(cfg.server.port, 5000);
        assert!(cfg.database.is_none());
        assert!(cfg.catalog.seed_file.is_none());
        assert!(cfg.notifications.webhook_url.is_none());
    }

    #[test]
    fn test_database_pool_size_defaults() {
        let cfg: Config = config::Config::builder()
            .set_override("server.port", 5000)
            .unwrap()
            .set_override("database.url", "postgres://localhost/quotes")
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        let db = cfg.database.unwrap();
        assert_eq!(db.url, "postgres://localhost/quotes");
        assert_eq!(db.max_connections, 5);
    }
}
