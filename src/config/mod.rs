use serde::{Deserialize, Serialize};
use std::env;

/// Process configuration, loaded once in `main` and handed to `AppState`.
///
/// Deliberately not a global singleton: services receive the config they were
/// constructed with, which keeps tests free to build their own.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub uri: String,
    pub database_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub token_secret: String,
    pub token_expiry_hours: i64,
    pub bcrypt_cost: u32,
    pub cors_origin: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::default_config().with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("MONGODB_URI") {
            self.database.uri = v;
        }
        if let Ok(v) = env::var("DATABASE_NAME") {
            self.database.database_name = v;
        }
        if let Ok(v) = env::var("TOKEN_SECRET") {
            self.security.token_secret = v;
        }
        if let Ok(v) = env::var("TOKEN_EXPIRY_HOURS") {
            self.security.token_expiry_hours = v.parse().unwrap_or(self.security.token_expiry_hours);
        }
        if let Ok(v) = env::var("BCRYPT_COST") {
            self.security.bcrypt_cost = v.parse().unwrap_or(self.security.bcrypt_cost);
        }
        if let Ok(v) = env::var("ORIGIN") {
            self.security.cors_origin = v;
        }
        if let Ok(v) = env::var("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }

        self
    }

    fn default_config() -> Self {
        Self {
            database: DatabaseConfig {
                uri: "mongodb://localhost:27017".to_string(),
                database_name: "restaurants-api".to_string(),
            },
            security: SecurityConfig {
                token_secret: String::new(),
                token_expiry_hours: 6,
                bcrypt_cost: 10,
                cors_origin: "http://localhost:3000".to_string(),
            },
            server: ServerConfig { port: 5005 },
        }
    }
}
