use anyhow::{Context, Result};
use std::env;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_issuer: String,
    pub storage_url: String,
    pub storage_api_key: String,
}

fn required(name: &'static str) -> Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn defaulted(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

impl Config {
    /// Reads configuration from the environment, loading `.env` first when
    /// present.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            port: defaulted("PORT", "8080")
                .parse()
                .context("PORT must be a valid port number")?,
            jwt_secret: required("JWT_SECRET")?,
            jwt_issuer: defaulted("JWT_ISSUER", "foundly"),
            storage_url: required("STORAGE_URL")?,
            storage_api_key: required("STORAGE_API_KEY")?,
        })
    }
}
