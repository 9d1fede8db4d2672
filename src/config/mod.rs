// src/config/mod.rs
// All tunables come from the environment (.env supported); the struct is
// built once in main and handed to AppState rather than living in a global.

use anyhow::Result;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct RelayConfig {
    // ── Gemini API
    pub api_key: String,
    pub gemini_base_url: String,
    pub model: String,
    pub gemini_timeout_secs: u64,

    // ── Database
    pub database_url: String,
    pub sqlite_max_connections: u32,

    // ── Context window
    pub history_limit: i64,

    // ── Server
    pub host: String,
    pub port: u16,
}

// Parses an env var, tolerating trailing comments and whitespace.
// A missing or unparseable value falls back to the default.
fn env_var_or<T>(key: &str, default: T) -> T
where
    T: FromStr,
{
    match std::env::var(key) {
        Ok(val) => {
            let clean_val = val.split('#').next().unwrap_or("").trim();
            match clean_val.parse::<T>() {
                Ok(parsed) => parsed,
                Err(_) => default,
            }
        }
        Err(_) => default,
    }
}

impl RelayConfig {
    /// Build configuration from the environment.
    ///
    /// Everything has a default except `GEMINI_API_KEY`; without it the
    /// process must not start, so this returns an error rather than a
    /// half-configured struct.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY must be set"))?;
        if api_key.trim().is_empty() {
            anyhow::bail!("GEMINI_API_KEY is empty");
        }

        Ok(Self {
            api_key,
            gemini_base_url: env_var_or(
                "GEMINI_BASE_URL",
                "https://generativelanguage.googleapis.com".to_string(),
            ),
            model: env_var_or("RELAY_MODEL", "gemini-2.5-flash".to_string()),
            gemini_timeout_secs: env_var_or("GEMINI_TIMEOUT_SECS", 60),
            database_url: env_var_or("DATABASE_URL", "sqlite:chat_history.db?mode=rwc".to_string()),
            sqlite_max_connections: env_var_or("SQLITE_MAX_CONNECTIONS", 5),
            // A negative LIMIT means "unlimited" to SQLite, which would
            // unbound the context window; floor at zero instead.
            history_limit: env_var_or("RELAY_HISTORY_LIMIT", 5).max(0),
            host: env_var_or("RELAY_HOST", "0.0.0.0".to_string()),
            port: env_var_or("RELAY_PORT", 5000),
        })
    }

    /// Get server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
