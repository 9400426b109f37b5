use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::services::{SharedRegistry, SignupError};

#[derive(Debug, Deserialize)]
pub struct ParticipantParams {
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResult {
    pub message: String,
}

/// Error body in the shape the front-end reads (`detail`).
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

fn error_reply(err: SignupError) -> (StatusCode, Json<ErrorBody>) {
    let status = match err {
        SignupError::ActivityNotFound => StatusCode::NOT_FOUND,
        SignupError::AlreadySignedUp | SignupError::NotRegistered => StatusCode::BAD_REQUEST,
    };
    (
        status,
        Json(ErrorBody {
            detail: err.to_string(),
        }),
    )
}

/// POST /activities/:activity_name/signup?email=...
///
/// The path segment arrives percent-decoded, so "Chess%20Club" looks up
/// the "Chess Club" key.
pub async fn signup_handler(
    Path(activity_name): Path<String>,
    Query(params): Query<ParticipantParams>,
    State(registry): State<SharedRegistry>,
) -> Result<Json<SignupResult>, (StatusCode, Json<ErrorBody>)> {
    let mut registry = registry.write().await;
    match registry.sign_up(&activity_name, &params.email) {
        Ok(message) => Ok(Json(SignupResult { message })),
        Err(e) => {
            warn!(activity = %activity_name, email = %params.email, "Signup rejected: {}", e);
            Err(error_reply(e))
        }
    }
}

/// POST /activities/:activity_name/unregister?email=...
pub async fn unregister_handler(
    Path(activity_name): Path<String>,
    Query(params): Query<ParticipantParams>,
    State(registry): State<SharedRegistry>,
) -> Result<Json<SignupResult>, (StatusCode, Json<ErrorBody>)> {
    let mut registry = registry.write().await;
    match registry.unregister(&activity_name, &params.email) {
        Ok(message) => Ok(Json(SignupResult { message })),
        Err(e) => {
            warn!(activity = %activity_name, email = %params.email, "Unregister rejected: {}", e);
            Err(error_reply(e))
        }
    }
}
