//! Epic clone HTTP server.
//!
//! Exposes a liveness route and `POST /clone-epic`. The handler is the
//! single place where clone failures become HTTP responses.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::domain::errors::{CloneError, MISSING_FIELDS_MESSAGE};
use crate::domain::models::{CloneOutcome, CloneRequest, ServerConfig};
use crate::infrastructure::logging::SecretScrubber;
use crate::services::EpicCloneService;

/// Plain-text body served on `GET /`.
pub const LIVENESS_MESSAGE: &str = "Epic cloner API is live. POST /clone-epic to clone an epic.";

/// Error text returned with every downstream failure.
pub const CLONE_FAILED_MESSAGE: &str = "Failed to clone epic. See server logs.";

/// Configuration for the clone HTTP server.
#[derive(Debug, Clone)]
pub struct CloneHttpConfig {
    /// Host to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
}

impl Default for CloneHttpConfig {
    fn default() -> Self {
        ServerConfig::default().into()
    }
}

impl From<ServerConfig> for CloneHttpConfig {
    fn from(server: ServerConfig) -> Self {
        Self {
            host: server.host,
            port: server.port,
        }
    }
}

/// Body of `POST /clone-epic`. Every field is optional on the wire so that
/// missing fields are reported together.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneEpicBody {
    #[serde(default)]
    pub template_epic_key: Option<String>,
    #[serde(default)]
    pub target_project_key: Option<String>,
    #[serde(default)]
    pub new_epic_summary: Option<String>,
}

impl From<CloneEpicBody> for CloneRequest {
    fn from(body: CloneEpicBody) -> Self {
        Self {
            template_epic_key: body.template_epic_key.unwrap_or_default(),
            target_project_key: body.target_project_key.unwrap_or_default(),
            new_epic_summary: body.new_epic_summary.unwrap_or_default(),
        }
    }
}

/// Successful clone response.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloneEpicResponse {
    pub ok: bool,
    pub new_epic_key: String,
    pub created_children: Vec<String>,
}

impl From<CloneOutcome> for CloneEpicResponse {
    fn from(outcome: CloneOutcome) -> Self {
        Self {
            ok: true,
            new_epic_key: outcome.new_epic_key,
            created_children: outcome.created_children,
        }
    }
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Shared state for the clone HTTP server.
struct AppState {
    service: EpicCloneService,
    scrubber: SecretScrubber,
}

/// Build the router. Exposed separately from [`CloneHttpServer`] so it can
/// be driven without binding a socket.
pub fn build_router(service: EpicCloneService, scrubber: SecretScrubber) -> Router {
    let state = Arc::new(AppState { service, scrubber });

    Router::new()
        .route("/", get(liveness))
        .route("/clone-epic", post(clone_epic))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// Clone HTTP Server.
pub struct CloneHttpServer {
    config: CloneHttpConfig,
    service: EpicCloneService,
    scrubber: SecretScrubber,
}

impl CloneHttpServer {
    pub const fn new(
        service: EpicCloneService,
        scrubber: SecretScrubber,
        config: CloneHttpConfig,
    ) -> Self {
        Self {
            config,
            service,
            scrubber,
        }
    }

    fn addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(format!("{}:{}", self.config.host, self.config.port).parse()?)
    }

    /// Start the server with a shutdown signal.
    pub async fn serve_with_shutdown<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let addr = self.addr()?;
        let router = build_router(self.service, self.scrubber);

        let listener = TcpListener::bind(addr).await?;
        tracing::info!("Epic cloner API listening on {}", listener.local_addr()?);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

// Handler functions

async fn liveness() -> &'static str {
    LIVENESS_MESSAGE
}

async fn clone_epic(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<CloneEpicResponse>, HandlerError> {
    let request = parse_body(&body).map_err(|reason| {
        tracing::debug!(%reason, "rejecting unreadable clone body");
        missing_fields()
    })?;

    match state.service.clone_epic(&request).await {
        Ok(outcome) => Ok(Json(CloneEpicResponse::from(outcome))),
        Err(CloneError::MissingFields(fields)) => {
            tracing::info!(missing = ?fields, "rejecting clone request with missing fields");
            Err(missing_fields())
        }
        Err(err) => {
            log_clone_failure(&state.scrubber, &err);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: CLONE_FAILED_MESSAGE.to_string(),
                    details: Some(err.details()),
                }),
            ))
        }
    }
}

/// An empty body counts as a body with no fields.
fn parse_body(body: &[u8]) -> Result<CloneRequest, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CloneRequest::default());
    }
    serde_json::from_slice::<CloneEpicBody>(body).map(CloneRequest::from)
}

fn missing_fields() -> HandlerError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: MISSING_FIELDS_MESSAGE.to_string(),
            details: None,
        }),
    )
}

/// Log a failed clone with whatever was created before the failure, so the
/// leftovers can be cleaned up by hand.
fn log_clone_failure(scrubber: &SecretScrubber, err: &CloneError) {
    let details = scrubber.scrub_message(&err.details().to_string());
    tracing::error!(
        error = %scrubber.scrub_message(&err.to_string()),
        %details,
        provider_status = err.tracker_error().and_then(|e| e.status()),
        new_epic_key = err.new_epic_key(),
        created_children = ?err.created_children(),
        "Clone failed"
    );
}
