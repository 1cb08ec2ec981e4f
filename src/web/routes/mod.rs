//! Contains all the routes that this application can handle.

mod api;
mod home;
mod signup;

// re-export errors
pub use api::welcome::WelcomeError;
pub use signup::SignupError;

use home::home;
use signup::signup_form;

use crate::AppState;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};

async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(home).post(signup_form))
        .with_state(app_state.clone())
        .nest("/api", api_routes(app_state))
        .route("/health-check", get(health_check))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/waitlist", post(api::waitlist))
        .route(
            "/send-welcome-email",
            post(api::send_welcome_email).fallback(api::method_not_allowed),
        )
        .with_state(app_state)
}
