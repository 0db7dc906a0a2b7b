use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use ledgerly_core::constants::{DEFAULT_REBASE_LOCK_TTL, DEFAULT_REF_AMOUNT_CACHE_TTL};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub db_path: String,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub rebase_lock_ttl: Duration,
    pub ref_amount_cache_ttl: Duration,
}

fn env_secs(name: &str, default: Duration) -> Duration {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("LG_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid LG_LISTEN_ADDR")?;
        let db_path = std::env::var("LG_DB_PATH").unwrap_or_else(|_| "./db/app.db".into());
        let cors_allow = std::env::var("LG_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let timeout_ms: u64 = std::env::var("LG_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        Ok(Self {
            listen_addr,
            db_path,
            cors_allow,
            request_timeout: Duration::from_millis(timeout_ms),
            rebase_lock_ttl: env_secs("LG_REBASE_LOCK_TTL_SECS", DEFAULT_REBASE_LOCK_TTL),
            ref_amount_cache_ttl: env_secs(
                "LG_REF_AMOUNT_CACHE_TTL_SECS",
                DEFAULT_REF_AMOUNT_CACHE_TTL,
            ),
        })
    }
}
