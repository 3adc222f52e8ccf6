use serde::Deserialize;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt: JwtConfig,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl AppConfig {
    /// Loads configuration from the environment. DATABASE_URL and JWT_SECRET
    /// are required; a missing secret aborts startup instead of failing on
    /// the first request that needs it.
    pub fn from_env() -> anyhow::Result<Self> {
        use anyhow::Context;

        let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL is not set")?;
        let secret = std::env::var("JWT_SECRET").context("JWT_SECRET is not set")?;

        Ok(Self {
            database_url,
            database_max_connections: env_or("DATABASE_MAX_CONNECTIONS", 10),
            jwt: JwtConfig {
                secret,
                issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "tasknest".into()),
                audience: std::env::var("JWT_AUDIENCE")
                    .unwrap_or_else(|_| "tasknest-users".into()),
                ttl_minutes: env_or("JWT_TTL_MINUTES", 60),
            },
        })
    }
}
