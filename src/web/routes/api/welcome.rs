use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::{
    email_client,
    web::{routes::signup::EMAIL_REQUIRED_MSG, types::WelcomeRequest, ClientError, WebResult},
    AppState,
};

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum WelcomeError {
    #[error("method not allowed")]
    MethodNotAllowed,
    #[error("email is missing from the request")]
    EmailMissing,

    #[error("email client error: {0}")]
    EmailClient(#[from] email_client::Error),
    #[error("tera template render error: {0}")]
    Tera(#[from] tera::Error),
}

impl WelcomeError {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            WelcomeError::MethodNotAllowed => {
                (StatusCode::METHOD_NOT_ALLOWED, ClientError::MethodNotAllowed)
            }
            WelcomeError::EmailMissing => (
                StatusCode::BAD_REQUEST,
                ClientError::InvalidInput(EMAIL_REQUIRED_MSG.to_string()),
            ),
            // The upstream message is passed on as is.
            WelcomeError::EmailClient(er) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ClientError::Upstream(er.to_string()),
            ),
            WelcomeError::Tera(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

// ###################################
// ->   API
// ###################################
/// Forwards the welcome email for the posted address to the email provider.
/// Only the presence of the address is checked.
#[tracing::instrument(name = "Sending welcome email", skip_all)]
pub async fn send_welcome_email(
    State(app_state): State<AppState>,
    payload: Result<Json<WelcomeRequest>, JsonRejection>,
) -> WebResult<Json<Value>> {
    let request = payload
        .map(|Json(request)| request)
        .inspect_err(|rejection| debug!("unreadable welcome email body: {rejection}"))
        .unwrap_or_default();
    let recipient = request.recipient().ok_or(WelcomeError::EmailMissing)?;

    let data = dispatch_welcome_email(&app_state, recipient).await?;

    Ok(Json(json!({ "success": true, "data": data })))
}

pub async fn method_not_allowed() -> WebResult<()> {
    Err(WelcomeError::MethodNotAllowed.into())
}

// ###################################
// ->   HELPERS
// ###################################
pub fn welcome_subject(product_name: &str) -> String {
    format!("Welcome to {product_name} - You're on the Waiting List!")
}

/// Renders the welcome email for `recipient` and hands it to the email provider once.
/// Returns the provider's response payload.
pub(in crate::web::routes) async fn dispatch_welcome_email(
    app_state: &AppState,
    recipient: &str,
) -> Result<Value, WelcomeError> {
    let product_name = &app_state.site.product_name;
    let email = app_state
        .templ_mgr
        .render_welcome_email(product_name, recipient)?;

    let data = app_state
        .email_client
        .send_email(
            recipient,
            &welcome_subject(product_name),
            &email.html,
            Some(email.text.as_str()),
        )
        .await?;

    info!("SUCCESS");
    Ok(data)
}
