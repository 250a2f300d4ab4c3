use serde::Deserialize;

/// Default HTTP port for the API server
pub const DEFAULT_PORT: u16 = 5000;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigType {
    /// Syncing configuration
    Sync,
}

/// Rewrite the `postgres://` scheme to `postgresql://`.
///
/// Hosted providers hand out URLs with either spelling; the connection
/// layer only accepts the long form.
pub fn normalize_database_url(url: &str) -> String {
    match url.strip_prefix("postgres://") {
        Some(rest) => format!("postgresql://{}", rest),
        None => url.to_string(),
    }
}

/// Server configuration, read from the environment
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Database connection URL (required, from DATABASE_URL)
    pub database_url: String,
    /// HTTP listen port (from PORT, default: 5000)
    pub port: u16,
}

impl ServeConfig {
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| "DATABASE_URL environment variable is required".to_string())?;

        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| format!("invalid PORT value: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(ServeConfig { database_url, port })
    }
}

/// Sync configuration file structure
#[derive(Debug, Deserialize)]
pub struct SyncConfig {
    /// Configuration type (must be "sync")
    pub config_type: ConfigType,
    /// URL of the remote tracking server (e.g., https://tracker.example.com)
    pub remote_url: String,
    /// Connection URL of the local database that receives synced rounds
    pub database_url: String,
}

impl SyncConfig {
    /// Ensure both endpoints are filled in
    pub fn validate(&self) -> Result<(), String> {
        if self.remote_url.trim().is_empty() {
            return Err("remote_url must not be empty in sync config".to_string());
        }
        if self.database_url.trim().is_empty() {
            return Err("database_url must not be empty in sync config".to_string());
        }
        Ok(())
    }

    /// Remote URL without a trailing slash, ready for path concatenation
    pub fn remote_base(&self) -> &str {
        self.remote_url.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_rewrites_short_postgres_scheme() {
        assert_eq!(
            normalize_database_url("postgres://user:pw@host:5432/golf"),
            "postgresql://user:pw@host:5432/golf"
        );
    }

    #[test]
    fn normalize_leaves_long_scheme_alone() {
        assert_eq!(
            normalize_database_url("postgresql://host/golf"),
            "postgresql://host/golf"
        );
        assert_eq!(
            normalize_database_url("sqlite://golf.db"),
            "sqlite://golf.db"
        );
    }

    #[test]
    fn sync_config_parses_from_toml() {
        let config: SyncConfig = toml::from_str(
            r#"
            config_type = "sync"
            remote_url = "https://tracker.example.com/"
            database_url = "sqlite://local.db"
            "#,
        )
        .unwrap();
        assert_eq!(config.config_type, ConfigType::Sync);
        assert_eq!(config.remote_base(), "https://tracker.example.com");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn sync_config_rejects_other_config_types() {
        let result: Result<SyncConfig, _> = toml::from_str(
            r#"
            config_type = "record"
            remote_url = "https://tracker.example.com"
            database_url = "sqlite://local.db"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn sync_config_rejects_blank_urls() {
        let config: SyncConfig = toml::from_str(
            r#"
            config_type = "sync"
            remote_url = ""
            database_url = "sqlite://local.db"
            "#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }
}
