use std::env;

use anyhow::Context;

/// Postgres connection settings, read once at startup from the
/// environment (a `.env` file is honored).
#[derive(Debug, Clone)]
pub struct DbConfig {
    pub host: String,
    pub name: String,
    pub user: String,
    pub password: String,
    pub port: u16,
}

impl DbConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        // ignore a missing .env; the variables may come from the shell
        dotenvy::dotenv().ok();

        let var = |key: &str| {
            env::var(key).with_context(|| format!("Missing environment variable {key}"))
        };

        let port = var("DB_PORT")?;
        let port = port
            .parse::<u16>()
            .with_context(|| format!("DB_PORT is not a valid port number: {port}"))?;

        Ok(DbConfig {
            host: var("DB_HOST")?,
            name: var("DB_NAME")?,
            user: var("DB_USER")?,
            password: var("DB_PASSWORD")?,
            port,
        })
    }
}
