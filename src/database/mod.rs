mod waitlist;

pub use waitlist::{SignupOutcome, WaitlistRepo};

use std::time::Duration;

use sqlx::{postgres::PgPoolOptions, Connection, PgConnection, PgPool};
use tracing::info;

use crate::config::DbConfig;

#[derive(Clone, Debug)]
pub struct DbManager {
    db: PgPool,
}

impl DbManager {
    pub async fn init(db_config: &DbConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");

        let db_pool = pool_options(db_config)
            .connect_with(db_config.connection_options())
            .await
            .map_err(|ex| Error::FailToCreatePool(ex.to_string()))?;

        Ok(Self { db: db_pool })
    }

    /// Builds a pool that only connects once the first query runs.
    /// Lets the server start when the database is not reachable yet.
    pub fn init_lazy(db_config: &DbConfig) -> Self {
        info!("{:<20} - Initializing the lazy DB pool", "init_db");
        let db_pool = pool_options(db_config).connect_lazy_with(db_config.connection_options());

        Self { db: db_pool }
    }

    /// Creates the database named in `db_config` and runs all migrations on it.
    pub async fn create_and_migrate(db_config: &DbConfig) -> Result<()> {
        let mut connection =
            PgConnection::connect_with(&db_config.connection_options_without_db()).await?;

        let sql = format!(r#"CREATE DATABASE "{}";"#, db_config.db_name);
        sqlx::query(&sql).execute(&mut connection).await?;

        // Create pool only used to migrate the DB
        let db_pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_millis(1000))
            .connect_with(db_config.connection_options())
            .await
            .map_err(|ex| Error::FailToCreatePool(format!("Migration pool: {ex}")))?;
        sqlx::migrate!("./migrations").run(&db_pool).await?;

        Ok(())
    }

    pub fn db(&self) -> &PgPool {
        &self.db
    }
}

fn pool_options(db_config: &DbConfig) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(db_config.max_connections)
        .acquire_timeout(Duration::from_millis(500))
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create db pool: {0}")]
    FailToCreatePool(String),
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
}
