use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::{
    database::SignupOutcome,
    web::{routes::signup::join_waitlist, types::SignupRequest, WebResult},
    AppState,
};

/// JSON variant of the signup form.
/// A body that can't be read as JSON is treated like a missing email.
#[tracing::instrument(name = "api_waitlist", skip_all)]
pub async fn waitlist(
    State(app_state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> WebResult<(StatusCode, Json<Value>)> {
    let signup = payload
        .map(|Json(signup)| signup)
        .inspect_err(|rejection| debug!("unreadable signup body: {rejection}"))
        .unwrap_or_default();

    let (status, body) = match join_waitlist(&app_state, signup.email.as_deref()).await? {
        SignupOutcome::Added => (StatusCode::CREATED, json!({ "status": "added" })),
        SignupOutcome::AlreadyListed => (StatusCode::OK, json!({ "status": "already_listed" })),
    };

    Ok((status, Json(body)))
}
