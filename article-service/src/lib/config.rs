use std::env;

use auth::HashingCost;
use auth::TokenService;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use secrecy::ExposeSecret;
use secrecy::Secret;
use serde::Deserialize;

/// Upper bound on `auth.access_token_expire_minutes` (one year).
pub const MAX_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: Secret<String>,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// HS256 signing secret (at least 32 bytes)
    pub jwt_secret: Secret<String>,
    pub access_token_expire_minutes: i64,
    pub hash_memory_kib: u32,
    pub hash_iterations: u32,
    pub hash_parallelism: u32,
}

impl AuthConfig {
    /// Argon2 work factor for newly hashed passwords.
    pub fn hashing_cost(&self) -> HashingCost {
        HashingCost {
            memory_kib: self.hash_memory_kib,
            iterations: self.hash_iterations,
            parallelism: self.hash_parallelism,
        }
    }

    /// Lifetime of issued access tokens.
    pub fn token_lifetime(&self) -> Result<chrono::Duration, ConfigError> {
        chrono::Duration::try_minutes(self.access_token_expire_minutes).ok_or_else(|| {
            ConfigError::Message(format!(
                "auth.access_token_expire_minutes out of range: {}",
                self.access_token_expire_minutes
            ))
        })
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, AUTH__JWT_SECRET, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    /// 4. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            .set_default("database.max_connections", 5)?
            .set_default("server.http_port", 8000)?
            .set_default("auth.access_token_expire_minutes", 60 * 24 * 7)?
            .set_default("auth.hash_memory_kib", 19 * 1024)?
            .set_default("auth.hash_iterations", 2)?
            .set_default("auth.hash_parallelism", 1)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Example: AUTH__JWT_SECRET=... overrides auth.jwt_secret
            .add_source(Environment::default().separator("__").try_parsing(true))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the auth core cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let secret_length = self.auth.jwt_secret.expose_secret().len();
        if secret_length < TokenService::MIN_SECRET_LENGTH {
            return Err(ConfigError::Message(format!(
                "auth.jwt_secret must be at least {} bytes, got {}",
                TokenService::MIN_SECRET_LENGTH,
                secret_length
            )));
        }

        let lifetime = self.auth.access_token_expire_minutes;
        if lifetime <= 0 || lifetime > MAX_ACCESS_TOKEN_EXPIRE_MINUTES {
            return Err(ConfigError::Message(format!(
                "auth.access_token_expire_minutes must be between 1 and {}, got {}",
                MAX_ACCESS_TOKEN_EXPIRE_MINUTES, lifetime
            )));
        }

        if self.database.max_connections == 0 {
            return Err(ConfigError::Message(
                "database.max_connections must be positive".to_string(),
            ));
        }

        Ok(())
    }
}
