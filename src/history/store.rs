//! Implements HistoryStore for SQLite.

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use super::{ChatRecord, Exchange, HistoryStore};

pub struct SqliteHistoryStore {
    pool: SqlitePool,
}

impl SqliteHistoryStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for SqliteHistoryStore {
    async fn append(
        &self,
        user_id: &str,
        session_id: &str,
        query: &str,
        response: &str,
    ) -> Result<ChatRecord> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();

        // Single-statement insert: the connection is acquired for this
        // call only and released before the caller does anything else.
        let row = sqlx::query(
            r#"
            INSERT INTO chat_history (user_id, session_id, query, response, timestamp)
            VALUES (?, ?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(query)
        .bind(response)
        .bind(&timestamp)
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");

        Ok(ChatRecord {
            id,
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            query: query.to_string(),
            response: response.to_string(),
            timestamp,
        })
    }

    async fn recent(&self, user_id: &str, session_id: &str, limit: i64) -> Result<Vec<Exchange>> {
        // Newest-first by id for the LIMIT, then reversed so the context
        // builder sees the exchanges in write order.
        let rows = sqlx::query(
            r#"
            SELECT query, response FROM chat_history
            WHERE user_id = ? AND session_id = ?
            ORDER BY id DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(session_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let mut exchanges: Vec<Exchange> = rows
            .into_iter()
            .map(|row| Exchange {
                query: row.get("query"),
                response: row.get("response"),
            })
            .collect();
        exchanges.reverse();

        Ok(exchanges)
    }
}
