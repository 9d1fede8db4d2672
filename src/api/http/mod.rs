// src/api/http/mod.rs
// Handlers and router for the relay's two routes.

use axum::{
    extract::State,
    http::{header, Method},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::api::error::{ApiError, ApiResult};
use crate::orchestrator::Outcome;
use crate::state::AppState;

fn default_user_id() -> String {
    "anonymous".to_string()
}

fn default_session_id() -> String {
    "default_session".to_string()
}

/// Typed request body with defaults applied at the boundary, before the
/// orchestrator is involved.
#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    #[serde(default)]
    pub prompt: String,
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
    /// Overrides the configured model for this request only.
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Health check handler
pub async fn health_handler() -> impl IntoResponse {
    Json(json!({
        "message": "Gemini relay with session management running!"
    }))
}

pub async fn generate_handler(
    State(app_state): State<Arc<AppState>>,
    Json(request): Json<GenerateRequest>,
) -> impl IntoResponse {
    let result: ApiResult<_> = async {
        if request.prompt.is_empty() {
            return Err(ApiError::bad_request("No prompt provided"));
        }

        info!(
            "Generate request: user={}, session={}",
            request.user_id, request.session_id
        );

        let outcome = app_state
            .orchestrator
            .generate(
                &request.user_id,
                &request.session_id,
                &request.prompt,
                request.model.as_deref(),
            )
            .await;

        match outcome {
            Outcome::Completed { response, .. } => Ok(Json(GenerateResponse { response })),
            Outcome::Blocked { message } | Outcome::Failed { message } => {
                Err(ApiError::bad_request(message))
            }
        }
    }
    .await;

    match result {
        Ok(response) => response.into_response(),
        Err(error) => error.into_response(),
    }
}

/// Main HTTP router: health check plus the single generation route.
/// CORS is wide open so browser clients can call the relay directly.
pub fn http_router(app_state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(health_handler).post(generate_handler))
        .layer(cors)
        .with_state(app_state)
}
