// src/history/migration.rs
//! Ensures the chat_history table matches the latest schema.
//! Run at startup; every statement is idempotent.

use anyhow::Result;
use sqlx::{Executor, SqlitePool};

const CREATE_CHAT_HISTORY: &str = r#"
CREATE TABLE IF NOT EXISTS chat_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id TEXT NOT NULL,
    session_id TEXT NOT NULL,
    query TEXT NOT NULL,
    response TEXT NOT NULL,
    timestamp TEXT NOT NULL
);
"#;

// Composite index: recent() always filters on both keys.
const CREATE_SESSION_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_chat_history_user_session
    ON chat_history(user_id, session_id);
"#;

/// Runs all required migrations. Safe to call at every startup.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    pool.execute(CREATE_CHAT_HISTORY).await?;
    pool.execute(CREATE_SESSION_INDEX).await?;
    Ok(())
}
