// src/history/mod.rs
//! Durable, append-only conversation history keyed by (user_id, session_id).

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod migration;
pub mod store;

pub use store::SqliteHistoryStore;

/// One persisted request/response pair. Immutable once written; this
/// system never updates or deletes rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRecord {
    pub id: i64,
    pub user_id: String,
    pub session_id: String,
    pub query: String,
    pub response: String,
    /// UTC, second precision ("%Y-%m-%d %H:%M:%S"), assigned at append.
    pub timestamp: String,
}

/// The (query, response) projection handed to the context builder.
#[derive(Debug, Clone, PartialEq)]
pub struct Exchange {
    pub query: String,
    pub response: String,
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Durably append one record; the store assigns id and timestamp.
    /// A storage fault here is fatal for the request.
    async fn append(
        &self,
        user_id: &str,
        session_id: &str,
        query: &str,
        response: &str,
    ) -> Result<ChatRecord>;

    /// At most `limit` most recent exchanges for the session, oldest-first.
    /// Empty history is `Ok(vec![])`, never an error.
    async fn recent(&self, user_id: &str, session_id: &str, limit: i64) -> Result<Vec<Exchange>>;
}
