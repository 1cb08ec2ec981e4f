pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to build the 'Environment' from the provided string: {0}")]
    StringToEnvironmentFail(String),
    #[error("failed to parse 'DbConfig' from the provided string.")]
    StringToDbConfigFail,
    #[error("invalid email: {0}")]
    InvalidEmail(String),
    #[error("missing configuration file: {0}")]
    MissingFile(String),

    #[error("figment error: {0}")]
    Figment(#[from] figment::Error),
}
