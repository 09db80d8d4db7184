// Route exports
pub mod accounts;
pub mod health;
pub mod matches;

use actix_web::{error, http::StatusCode, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use crate::core::MatchEngine;
use crate::models::{ErrorResponse, Session};
use crate::services::{AccountService, RecordStore, SessionKeys};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub accounts: Arc<AccountService>,
    pub sessions: Arc<SessionKeys>,
    pub engine: MatchEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, sessions: SessionKeys, bcrypt_cost: u32, engine: MatchEngine) -> Self {
        Self {
            accounts: Arc::new(AccountService::new(store.clone(), bcrypt_cost)),
            store,
            sessions: Arc::new(sessions),
            engine,
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(health::configure)
            .configure(accounts::configure)
            .configure(matches::configure),
    );
}

/// Build a JSON error response
pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// Resolve the session from the request's bearer token
pub(crate) fn authenticate(state: &AppState, req: &HttpRequest) -> Result<Session, HttpResponse> {
    let header = req
        .headers()
        .get(actix_web::http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    state.sessions.from_authorization(header).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", req.path(), e);
        error_response(StatusCode::UNAUTHORIZED, "unauthorized", e.to_string())
    })
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}
