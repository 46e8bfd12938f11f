use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_CALORIES_PER_DAY: i32 = 2000;

#[derive(Debug, Clone, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Postgres connection string; meals are kept in memory when absent.
    pub database_url: Option<String>,
    pub jwt: JwtConfig,
    pub calories_per_day: i32,
    pub host: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty());
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").context("JWT_SECRET must be set")?,
            issuer: lookup("JWT_ISSUER").unwrap_or_else(|| "mealtracker".into()),
            audience: lookup("JWT_AUDIENCE").unwrap_or_else(|| "mealtracker-users".into()),
            ttl_minutes: match lookup("JWT_TTL_MINUTES") {
                Some(v) => v
                    .parse::<i64>()
                    .with_context(|| format!("JWT_TTL_MINUTES is not a number: {v}"))?,
                None => 60,
            },
        };
        let calories_per_day = match lookup("CALORIES_PER_DAY") {
            Some(v) => v
                .parse::<i32>()
                .with_context(|| format!("CALORIES_PER_DAY is not a number: {v}"))?,
            None => DEFAULT_CALORIES_PER_DAY,
        };
        let port = match lookup("APP_PORT") {
            Some(v) => v
                .parse::<u16>()
                .with_context(|| format!("APP_PORT is not a port: {v}"))?,
            None => 8080,
        };
        Ok(Self {
            database_url,
            jwt,
            calories_per_day,
            host: lookup("APP_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port,
        })
    }
}
