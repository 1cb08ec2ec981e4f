pub mod app;
pub mod config;
pub mod database;
pub mod email_client;
mod error;
pub mod templ_manager;
pub mod web;

// re-exports
pub use app::{App, AppState};
pub use email_client::EmailClient;
pub use error::{Error, Result};
pub use web::serve::serve;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_DIRECTIVES: &str = "waitlist=info,tower_http=info";

/// Tracing used in debug builds and tests: compact, no timestamps, colored.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .without_time()
        .with_target(false)
        .with_env_filter(env_filter())
        .compact()
        .init();
}

/// Tracing used in release builds: full format without ANSI escape codes.
pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(env_filter())
        .init();
}

/// `RUST_LOG` if set, otherwise `DEFAULT_LOG_DIRECTIVES`.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_DIRECTIVES))
}
