// src/state.rs
// Shared application state handed to every handler via axum State.

use std::sync::Arc;

use anyhow::Result;
use sqlx::SqlitePool;

use crate::config::RelayConfig;
use crate::history::SqliteHistoryStore;
use crate::llm::{GeminiClient, GenerativeModel};
use crate::orchestrator::Orchestrator;

pub struct AppState {
    pub orchestrator: Orchestrator,
}

/// Wire the production components together: SQLite-backed history and
/// the Gemini client, both behind the orchestrator's trait seams.
/// The orchestrator copies what it needs out of the config; nothing
/// else reads configuration after startup.
pub fn create_app_state(config: RelayConfig, pool: SqlitePool) -> Result<AppState> {
    let store = Arc::new(SqliteHistoryStore::new(pool));
    let model: Arc<dyn GenerativeModel> = Arc::new(GeminiClient::new(&config)?);
    let orchestrator = Orchestrator::new(store, model, &config);

    Ok(AppState { orchestrator })
}

impl AppState {
    /// Assemble state with an arbitrary model implementation. Used by
    /// integration tests to stand in a stub for the Gemini client.
    pub fn with_model(
        config: RelayConfig,
        pool: SqlitePool,
        model: Arc<dyn GenerativeModel>,
    ) -> AppState {
        let store = Arc::new(SqliteHistoryStore::new(pool));
        let orchestrator = Orchestrator::new(store, model, &config);
        AppState { orchestrator }
    }
}
