use std::{env, time::Duration};

use anyhow::{Context, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub seed_sample_data: bool,
    pub auth: AuthConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub admin_username: String,
    /// Argon2 PHC string. `None` disables admin login.
    pub admin_password_hash: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").ok().filter(|url| !url.is_empty());
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);

        let store_backend = match env::var("STORE_BACKEND").ok().as_deref() {
            Some("postgres") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("unknown STORE_BACKEND '{other}', expected postgres or memory"),
            None if database_url.is_some() => StoreBackend::Postgres,
            None => StoreBackend::Memory,
        };
        if store_backend == StoreBackend::Postgres && database_url.is_none() {
            bail!("DATABASE_URL is required for the postgres store backend");
        }

        let seed_sample_data = env::var("SEED_SAMPLE_DATA")
            .map(|v| matches!(v.as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let auth = AuthConfig {
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET is not set")?,
            admin_username: env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string()),
            admin_password_hash: admin_password_hash_from_env()?,
        };

        let timeout_secs = env::var("ASSISTANT_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(10);
        let provider = ProviderConfig {
            api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o".to_string()),
            timeout: Duration::from_secs(timeout_secs.max(1)),
        };

        Ok(Self {
            host,
            port,
            store_backend,
            database_url,
            seed_sample_data,
            auth,
            provider,
        })
    }
}

fn admin_password_hash_from_env() -> anyhow::Result<Option<String>> {
    if let Ok(hash) = env::var("ADMIN_PASSWORD_HASH") {
        return Ok(Some(hash));
    }
    match env::var("ADMIN_PASSWORD") {
        Ok(plain) => {
            let hash = crate::services::auth_service::hash_password(&plain)
                .map_err(|e| anyhow::anyhow!("failed to hash ADMIN_PASSWORD: {e}"))?;
            Ok(Some(hash))
        }
        Err(_) => Ok(None),
    }
}
