// src/orchestrator/mod.rs
//! Per-request flow: filter, context, model call, persist.
//!
//! The flow is strictly linear. A filter match short-circuits before any
//! store or model access; a model or store fault is caught and reported
//! as a failed outcome for that request, never as a crash.

use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use tracing::{error, info, warn};

use crate::config::RelayConfig;
use crate::context::{assemble_prompt, build_context};
use crate::filter::{self, REFUSAL_MESSAGE};
use crate::history::HistoryStore;
use crate::llm::GenerativeModel;

/// Terminal result of one orchestrated request.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Completed {
        user_id: String,
        session_id: String,
        timestamp: String,
        response: String,
    },
    Blocked {
        message: String,
    },
    Failed {
        message: String,
    },
}

pub struct Orchestrator {
    store: Arc<dyn HistoryStore>,
    model: Arc<dyn GenerativeModel>,
    default_model: String,
    history_limit: i64,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        model: Arc<dyn GenerativeModel>,
        config: &RelayConfig,
    ) -> Self {
        Self {
            store,
            model,
            default_model: config.model.clone(),
            history_limit: config.history_limit,
        }
    }

    /// Run one query through filter, context assembly, the model call,
    /// and persistence. Empty-query validation happens at the HTTP
    /// boundary, not here.
    pub async fn generate(
        &self,
        user_id: &str,
        session_id: &str,
        query: &str,
        model_override: Option<&str>,
    ) -> Outcome {
        let timestamp = Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string();
        info!("user={}, session={}, query={}", user_id, session_id, query);

        if filter::is_blocked(query) {
            warn!("Blocked potentially malicious query");
            return Outcome::Blocked {
                message: REFUSAL_MESSAGE.to_string(),
            };
        }

        let model_name = model_override.unwrap_or(&self.default_model);
        match self
            .run(user_id, session_id, query, model_name)
            .await
        {
            Ok(response) => Outcome::Completed {
                user_id: user_id.to_string(),
                session_id: session_id.to_string(),
                timestamp,
                response,
            },
            Err(e) => {
                error!("Error while generating response: {:#}", e);
                Outcome::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    // Success path. Exactly one store append happens here, after the
    // model call returns; the blocked and failed paths never write.
    async fn run(
        &self,
        user_id: &str,
        session_id: &str,
        query: &str,
        model_name: &str,
    ) -> Result<String> {
        let history = self
            .store
            .recent(user_id, session_id, self.history_limit)
            .await?;
        let context = build_context(&history);
        let full_prompt = assemble_prompt(&context, query);

        let response = self.model.generate(model_name, &full_prompt).await?;

        self.store
            .append(user_id, session_id, query, &response)
            .await?;

        Ok(response)
    }
}
