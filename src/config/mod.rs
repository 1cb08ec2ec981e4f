//! Builds the `AppConfig` from layered sources with `figment`:
//! `config/base.toml`, then `config/{environment}.toml`, then `APP_`-prefixed environment
//! variables (nested with `__`) and finally `RESEND_API_KEY`.
//! Gets initialized with `OnceLock` so it only needs to get initialized once.

mod error;
mod structs;

use std::{path::Path, sync::OnceLock};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use tracing::info;

pub use error::{ConfigError, ConfigResult};
pub use structs::{
    AppConfig, DbConfig, EmailConfig, Environment, NetConfig, SiteConfig, SslRequire,
};

/// Environment variable that holds the email provider's API key.
pub const EMAIL_API_KEY_ENV: &str = "RESEND_API_KEY";

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!("{:<20} - Initializing the configuration", "get_or_init_config");
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");

        let mut config = AppConfig::load(&config_dir, &environment)
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        // Setup DbConfig for production
        if matches!(environment, Environment::Production) {
            // Panic early if there are any problems.
            let production_db = std::env::var("DATABASE_URL").unwrap_or_else(|er| {
                panic!("Fatal Error: While looking for DATABASE_URL env variable: {er:?}")
            });
            let prod_db_config = DbConfig::try_from(production_db.as_str()).unwrap_or_else(|er| {
                panic!("Fatal Error: While parsing DbConfig from String: {er:?}")
            });
            config.db_config = prod_db_config;
        }

        config
    })
}

impl AppConfig {
    /// Layers the config files found in `config_dir` for the given `Environment`
    /// and the process environment on top of each other.
    pub fn load(config_dir: &Path, environment: &Environment) -> ConfigResult<Self> {
        let base_file = config_dir.join("base.toml");
        let env_file = config_dir.join(format!("{}.toml", environment.as_ref().to_lowercase()));

        for file in [&base_file, &env_file] {
            if !file.is_file() {
                return Err(ConfigError::MissingFile(file.display().to_string()));
            }
        }

        let config = Figment::new()
            .merge(Toml::file(base_file))
            .merge(Toml::file(env_file))
            .merge(Env::prefixed("APP_").split("__"))
            .merge(
                Env::raw()
                    .only(&[EMAIL_API_KEY_ENV])
                    .map(|_| "email_config.auth_token".into()),
            )
            .extract()?;

        Ok(config)
    }
}
