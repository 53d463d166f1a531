//! Runtime configuration for the RentRoot server.

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Cookie keys are derived from `secret` and need at least this many bytes.
pub const MIN_SECRET_LEN: usize = 64;

/// Configuration options for the RentRoot service.
#[derive(Clone, Debug, Deserialize)]
pub struct ServerConfig {
    /// Path to the SQLite database file.
    pub database_url: String,
    pub address: String,
    pub port: u16,
    /// Key material for the session, identity and flash-message cookies.
    pub secret: String,
    /// Directory holding the Tera templates.
    pub templates_dir: String,
    /// Directory served under `/assets`.
    pub static_dir: String,
    /// External service that signs users in and issues the identity cookie.
    pub auth_service_url: String,
}

impl ServerConfig {
    /// Loads `config/default.yaml`, then `config/{APP_ENV}.yaml`, then
    /// `APP__*` environment variables, each layer overriding the previous one.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = std::env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());

        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{app_env}")).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?;

        let server_config: Self = settings.try_deserialize()?;
        server_config.validate()?;
        Ok(server_config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::Message(format!(
                "secret must be at least {MIN_SECRET_LEN} bytes long"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config(secret: &str) -> ServerConfig {
        ServerConfig {
            database_url: "app.db".into(),
            address: "127.0.0.1".into(),
            port: 8080,
            secret: secret.into(),
            templates_dir: "templates".into(),
            static_dir: "assets".into(),
            auth_service_url: "http://localhost:8000".into(),
        }
    }

    #[test]
    fn rejects_short_secrets() {
        assert!(sample_config("short").validate().is_err());
        assert!(sample_config(&"x".repeat(MIN_SECRET_LEN)).validate().is_ok());
    }
}
