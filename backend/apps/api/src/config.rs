//! Server Configuration
//!
//! Everything is read from the environment once at startup; library crates
//! receive typed config structs.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, anyhow, bail};
use auth::AuthConfig;
use auth::application::config::{MAX_TOKEN_TTL_SECS, MIN_SIGNING_KEY_LEN, PasswordHashCost};
use axum::http::HeaderValue;
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Runtime configuration of the API server
///
/// No `Debug`: the connect options carry the database password.
#[derive(Clone)]
pub struct ServerConfig {
    pub http_port: u16,
    pub database: PgConnectOptions,
    pub max_connections: u32,
    pub auth: AuthConfig,
    pub frontend_origins: Vec<HeaderValue>,
}

impl ServerConfig {
    /// Load from process environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let ssl_mode = PgSslMode::from_str(&var("DB_SSLMODE", "prefer"))
            .context("DB_SSLMODE is not a valid ssl mode")?;
        let database = PgConnectOptions::new()
            .host(&var("DB_HOST", "localhost"))
            .port(parse(&lookup, "DB_PORT", 5432)?)
            .username(&var("DB_USER", "postgres"))
            .password(&var("DB_PASSWORD", ""))
            .database(&var("DB_NAME", "workouts"))
            .ssl_mode(ssl_mode);

        let mut auth = match lookup("JWT_SECRET") {
            Some(secret) => {
                if secret.len() < MIN_SIGNING_KEY_LEN {
                    bail!("JWT_SECRET must be at least {MIN_SIGNING_KEY_LEN} bytes");
                }
                AuthConfig::new(secret.into_bytes())
            }
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set, using a random signing key");
                AuthConfig::with_random_secret()
            }
            None => bail!("JWT_SECRET must be set in production"),
        };

        auth.access_token_ttl = ttl(&lookup, "ACCESS_TOKEN_TTL_SECS", 3600)?;
        auth.refresh_token_ttl = ttl(&lookup, "REFRESH_TOKEN_TTL_SECS", 2_592_000)?;
        auth.password_hash_cost = PasswordHashCost {
            iterations: parse(&lookup, "PASSWORD_HASH_COST", 2)?,
            memory_kib: parse(&lookup, "PASSWORD_HASH_MEMORY_KIB", 19_456)?,
            ..PasswordHashCost::default()
        };
        auth.default_profile_image_url = lookup("DEFAULT_PROFILE_IMAGE_URL");

        let frontend_origins = var("FRONTEND_ORIGINS", "http://localhost:5173")
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        Ok(Self {
            http_port: parse(&lookup, "HTTP_PORT", 8080)?,
            database,
            max_connections: parse(&lookup, "DB_MAX_CONNECTIONS", 5)?,
            auth,
            frontend_origins,
        })
    }
}

fn parse<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow!("{key} is invalid: {e}")),
        None => Ok(default),
    }
}

/// Token lifetime in seconds, between one second and ten years
fn ttl<F>(lookup: &F, key: &str, default: u64) -> anyhow::Result<Duration>
where
    F: Fn(&str) -> Option<String>,
{
    let secs: u64 = parse(lookup, key, default)?;
    if !(1..=MAX_TOKEN_TTL_SECS).contains(&secs) {
        bail!("{key} must be between 1 and {MAX_TOKEN_TTL_SECS}");
    }
    Ok(Duration::from_secs(secs))
}
