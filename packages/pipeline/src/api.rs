//! Thin HTTP transport around [`Describer`].

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::describe::{DescribeResult, Describer, ExcerptSource, InfoRequest, LlmClient};
use crate::error::PipelineError;

/// Body of a successful `/ask` response.
#[derive(Debug, Serialize)]
pub struct AskResponse {
    pub reply: DescribeResult,
}

/// Body of a failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Pipeline failure mapped onto an HTTP status.
#[derive(Debug)]
pub struct ApiError(pub PipelineError);

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_upstream() {
            StatusCode::BAD_GATEWAY
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "describe request failed");
        } else {
            tracing::info!(error = %self.0, "describe request rejected");
        }
        (
            status,
            Json(ErrorBody {
                error: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn ask<S, C>(
    State(describer): State<Arc<Describer<S, C>>>,
    Json(request): Json<InfoRequest>,
) -> Result<Json<AskResponse>, ApiError>
where
    S: ExcerptSource + 'static,
    C: LlmClient + 'static,
{
    let reply = describer.describe(&request).await?;
    Ok(Json(AskResponse { reply }))
}

/// Build the router: `POST /ask` and `GET /health`.
pub fn router<S, C>(describer: Arc<Describer<S, C>>) -> Router
where
    S: ExcerptSource + 'static,
    C: LlmClient + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/ask", post(ask::<S, C>))
        .with_state(describer)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
