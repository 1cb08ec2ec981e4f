use sqlx::{
    postgres::{PgDatabaseError, PgQueryResult},
    PgPool,
};
use tracing::debug;

use crate::web::types::ValidEmail;

/// SQLSTATE of a `UNIQUE` constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// What happened to a single waitlist insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Added,
    AlreadyListed,
}

/// Access to the `emails` table.
pub struct WaitlistRepo;

impl WaitlistRepo {
    /// Inserts one waitlist entry. A duplicate email is not an error, it yields
    /// `SignupOutcome::AlreadyListed`. Every other database error is propagated.
    #[tracing::instrument(name = "Inserting waitlist entry", skip(db, email))]
    pub async fn insert(
        db: &PgPool,
        email: &ValidEmail,
    ) -> core::result::Result<SignupOutcome, sqlx::Error> {
        let query_result = sqlx::query(r#"INSERT INTO emails (email) VALUES ($1)"#)
            .bind(email.as_ref())
            .execute(db)
            .await;

        let outcome = classify_insert(query_result)?;
        debug!(?outcome);

        Ok(outcome)
    }
}

/// Turns the unique violation into `AlreadyListed`, propagates the rest.
fn classify_insert(
    query_result: core::result::Result<PgQueryResult, sqlx::Error>,
) -> core::result::Result<SignupOutcome, sqlx::Error> {
    let is_unique_violation_err = |er: Option<&PgDatabaseError>| {
        er.is_some_and(|er| er.code() == UNIQUE_VIOLATION)
    };

    match query_result {
        Ok(_) => Ok(SignupOutcome::Added),
        Err(sqlx::Error::Database(er))
            if is_unique_violation_err(er.try_downcast_ref::<PgDatabaseError>()) =>
        {
            Ok(SignupOutcome::AlreadyListed)
        }
        Err(error) => Err(error),
    }
}
