use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{CredentialsRequest, Session, SessionResponse};
use crate::routes::{error_response, AppState};
use crate::services::AccountError;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/accounts/register", web::post().to(register))
        .route("/accounts/login", web::post().to(login));
}

/// Register endpoint
///
/// POST /api/v1/accounts/register
///
/// Request body:
/// ```json
/// { "username": "string", "password": "string" }
/// ```
async fn register(state: web::Data<AppState>, req: web::Json<CredentialsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.accounts.register(&req.username, &req.password).await {
        Ok(session) => session_response(&state, session, StatusCode::CREATED),
        Err(e) => account_error_response(e),
    }
}

/// Login endpoint
///
/// POST /api/v1/accounts/login
async fn login(state: web::Data<AppState>, req: web::Json<CredentialsRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.accounts.login(&req.username, &req.password).await {
        Ok(session) => session_response(&state, session, StatusCode::OK),
        Err(e) => account_error_response(e),
    }
}

fn session_response(state: &AppState, session: Session, status: StatusCode) -> HttpResponse {
    match state.sessions.issue(&session) {
        Ok(token) => HttpResponse::build(status).json(SessionResponse { token, session }),
        Err(e) => {
            tracing::error!("Failed to issue session token for {}: {}", session.username, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to issue session", e.to_string())
        }
    }
}

fn account_error_response(err: AccountError) -> HttpResponse {
    let status = match &err {
        AccountError::UsernameRequired => StatusCode::BAD_REQUEST,
        AccountError::UsernameTaken(_) => StatusCode::CONFLICT,
        AccountError::UnknownUser(_) | AccountError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        AccountError::HashError(_) | AccountError::StoreError(_) | AccountError::TaskFailed(_) => {
            tracing::error!("Account operation failed: {}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    error_response(status, "Account error", err.to_string())
}
