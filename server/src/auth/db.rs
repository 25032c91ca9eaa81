use crate::config::CsrAccount;
use crate::db::DbPool;
use crate::models::{NewSession, NewUser, User};
use crate::schema::{sessions, users};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use thiserror::Error;

use super::crypto::{generate_token, hash_password, hash_token};
use super::Role;

const SESSION_DAYS: i64 = 30;

/// Insert a session for `user_id` and return the plaintext token.
pub fn create_session(
    conn: &mut PgConnection,
    user_id: uuid::Uuid,
) -> Result<String, diesel::result::Error> {
    let token = generate_token();
    let token_hash = hash_token(&token);
    let expires_at = Utc::now() + Duration::days(SESSION_DAYS);

    let new_session = NewSession {
        user_id,
        token_hash: &token_hash,
        expires_at,
    };

    diesel::insert_into(sessions::table)
        .values(&new_session)
        .execute(conn)?;

    Ok(token)
}

/// Case-insensitive lookup of a live user.
pub fn find_user_by_username(
    conn: &mut PgConnection,
    username: &str,
) -> Result<Option<User>, diesel::result::Error> {
    users::table
        .filter(
            diesel::dsl::sql::<diesel::sql_types::Bool>("LOWER(username) = LOWER(")
                .bind::<diesel::sql_types::Text, _>(username)
                .sql(")"),
        )
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .first(conn)
        .optional()
}

pub fn get_user_from_token(pool: &DbPool, token: &str) -> Option<User> {
    let mut conn = pool.get().ok()?;
    let token_hash = hash_token(token);

    sessions::table
        .inner_join(users::table)
        .filter(sessions::token_hash.eq(&token_hash))
        .filter(sessions::expires_at.gt(Utc::now()))
        .filter(users::deleted_at.is_null())
        .select(User::as_select())
        .first(&mut conn)
        .ok()
}

#[derive(Error, Debug)]
pub enum EnsureUserError {
    #[error("Failed to get database connection: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),

    #[error("Failed to hash password: {0}")]
    Hash(argon2::password_hash::Error),

    #[error("Database error: {0}")]
    Query(#[from] diesel::result::Error),
}

/// Make sure the configured customer service account exists with the CSR
/// role and the configured password.
pub fn ensure_csr_user(pool: &DbPool, account: &CsrAccount) -> Result<(), EnsureUserError> {
    let mut conn = pool.get()?;
    let password_hash = hash_password(&account.password).map_err(EnsureUserError::Hash)?;

    match find_user_by_username(&mut conn, &account.username)? {
        Some(existing) => {
            diesel::update(users::table.find(existing.id))
                .set((
                    users::password_hash.eq(&password_hash),
                    users::role.eq(Role::Csr.as_str()),
                    users::updated_at.eq(Utc::now()),
                ))
                .execute(&mut conn)?;
            tracing::info!(username = %account.username, "Updated CSR account");
        }
        None => {
            diesel::insert_into(users::table)
                .values(&NewUser {
                    username: &account.username,
                    password_hash: &password_hash,
                    role: Role::Csr.as_str(),
                })
                .execute(&mut conn)?;
            tracing::info!(username = %account.username, "Created CSR account");
        }
    }

    Ok(())
}
