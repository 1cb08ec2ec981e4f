use axum::{
    extract::State,
    http::StatusCode,
    response::Html,
    Form,
};
use tracing::{debug, error, info};

use crate::{
    database::{SignupOutcome, WaitlistRepo},
    web::{
        types::{DataParsingError, Notice, PageState, SignupRequest, ValidEmail},
        ClientError, WebResult,
    },
    AppState,
};

use super::{api::welcome::dispatch_welcome_email, home::render_home};

/// Body of the 400 response when no email was submitted.
pub const EMAIL_REQUIRED_MSG: &str = "Email is required";

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum SignupError {
    #[error("data parsing error: {0}")]
    DataParsing(#[from] DataParsingError),
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

impl SignupError {
    pub fn status_code_and_client_error(&self) -> (StatusCode, ClientError) {
        match self {
            SignupError::DataParsing(DataParsingError::EmailMissing) => (
                StatusCode::BAD_REQUEST,
                ClientError::InvalidInput(EMAIL_REQUIRED_MSG.to_string()),
            ),
            SignupError::DataParsing(_) => (
                StatusCode::BAD_REQUEST,
                ClientError::InvalidInput("Invalid email".to_string()),
            ),
            SignupError::Sqlx(_) => (StatusCode::INTERNAL_SERVER_ERROR, ClientError::ServiceError),
        }
    }
}

// ###################################
// ->   HANDLERS
// ###################################
/// Signup through the landing page form. Always answers with the landing page,
/// the outcome is shown as a notice.
#[tracing::instrument(name = "signup_form", skip_all)]
pub async fn signup_form(
    State(app_state): State<AppState>,
    Form(signup): Form<SignupRequest>,
) -> WebResult<(StatusCode, Html<String>)> {
    let (status, notice, page_state) = match join_waitlist(&app_state, signup.email.as_deref())
        .await
    {
        Ok(outcome) => {
            let (notice, page_state) =
                Notice::for_outcome(outcome, &app_state.site.product_name);
            (StatusCode::OK, notice, page_state)
        }
        Err(SignupError::DataParsing(er)) => (
            StatusCode::BAD_REQUEST,
            Notice::for_parsing_error(&er),
            PageState::Form,
        ),
        Err(er) => {
            error!("failed to add email to the waitlist: {er}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Notice::failure(),
                PageState::Form,
            )
        }
    };
    debug!(notice = notice.variant.as_ref(), ?page_state);

    let page = render_home(&app_state, page_state, Some(&notice))?;

    Ok((status, page))
}

// ###################################
// ->   HELPERS
// ###################################
/// Validates the email and inserts it into the waitlist once. Nothing is written
/// when the email is missing or malformed.
///
/// With `welcome_on_signup` enabled a new entry also gets the welcome email,
/// a failed delivery is only logged.
#[tracing::instrument(name = "Adding email to the waitlist", skip_all)]
pub(super) async fn join_waitlist(
    app_state: &AppState,
    email: Option<&str>,
) -> Result<SignupOutcome, SignupError> {
    let email = ValidEmail::parse(email.unwrap_or_default())?;

    let outcome = WaitlistRepo::insert(app_state.database_mgr.db(), &email).await?;
    info!(?outcome);

    if outcome == SignupOutcome::Added && app_state.site.welcome_on_signup {
        if let Err(er) = dispatch_welcome_email(app_state, email.as_ref()).await {
            error!("welcome email after signup failed: {er}");
        }
    }

    Ok(outcome)
}
