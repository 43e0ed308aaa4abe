use std::collections::HashMap;

use sqlx::postgres::{PgConnectOptions, PgRow};
use sqlx::{Connection, PgConnection, Postgres, QueryBuilder, Row};

use super::models::{Subscription, User};
use crate::routes::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum DbClientError {
    #[error("Mismatch between inserted {table} and returned rows: sent {expected}, got {returned}")]
    RowCountMismatch {
        table: &'static str,
        expected: usize,
        returned: usize,
    },
    #[error("No row returned from {table} insert matches {key}")]
    MissingReturnedRow { table: &'static str, key: String },
    #[error("Subscription with token {token} has no owning user id")]
    MissingUserId { token: String },
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl std::fmt::Debug for DbClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

/// Single connection used to seed and clean up fixture rows.
pub struct DatabaseClient {
    connection: PgConnection,
}

impl DatabaseClient {
    #[tracing::instrument(name = "Connecting to the fixture database", skip(options))]
    pub async fn connect(options: &PgConnectOptions) -> Result<Self, DbClientError> {
        let connection = PgConnection::connect_with(options).await?;
        Ok(Self { connection })
    }

    #[tracing::instrument(name = "Closing the fixture database connection", skip(self))]
    pub async fn close(self) -> Result<(), DbClientError> {
        self.connection.close().await?;
        Ok(())
    }

    /// Inserts all users in one statement and writes the generated ids back
    /// onto them and their subscriptions. Rows are matched by email.
    #[tracing::instrument(name = "Inserting fixture users", skip(self, users), fields(count = users.len()))]
    pub async fn insert_users(&mut self, users: &mut [User]) -> Result<(), DbClientError> {
        if users.is_empty() {
            return Ok(());
        }

        let rows = {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO users (email, created_at, updated_at, deleted_at) ",
            );
            builder.push_values(users.iter(), |mut row, user| {
                row.push_bind(user.email.clone())
                    .push_bind(user.created_at)
                    .push_bind(user.updated_at)
                    .push_bind(user.deleted_at);
            });
            builder.push(" RETURNING id::bigint AS id, email");

            builder.build().fetch_all(&mut self.connection).await?
        };

        let mut ids = returned_ids(&rows, "users", users.len(), "email")?;
        for user in users.iter_mut() {
            let id = ids
                .remove(&user.email)
                .ok_or_else(|| DbClientError::MissingReturnedRow {
                    table: "users",
                    key: user.email.clone(),
                })?;
            user.assign_id(id);
        }

        Ok(())
    }

    /// Inserts all subscriptions in one statement and writes the generated
    /// ids back. Rows are matched by confirmation token.
    #[tracing::instrument(
        name = "Inserting fixture subscriptions",
        skip(self, subscriptions),
        fields(count = subscriptions.len())
    )]
    pub async fn insert_subscriptions(
        &mut self,
        subscriptions: &mut [&mut Subscription],
    ) -> Result<(), DbClientError> {
        if subscriptions.is_empty() {
            return Ok(());
        }

        if let Some(orphan) = subscriptions.iter().find(|s| s.user_id.is_none()) {
            return Err(DbClientError::MissingUserId {
                token: orphan.confirm_token.clone(),
            });
        }

        let rows = {
            let mut builder = QueryBuilder::<Postgres>::new(
                "INSERT INTO subscriptions \
                 (city, frequency, user_id, is_confirmed, confirm_token, \
                 token_expires, confirmed_at, created_at, updated_at, deleted_at) ",
            );
            builder.push_values(subscriptions.iter(), |mut row, subscription| {
                row.push_bind(subscription.city.clone())
                    .push_bind(subscription.frequency.as_str())
                    .push_bind(subscription.user_id)
                    .push_bind(subscription.is_confirmed)
                    .push_bind(subscription.confirm_token.clone())
                    .push_bind(subscription.token_expires)
                    .push_bind(subscription.confirmed_at)
                    .push_bind(subscription.created_at)
                    .push_bind(subscription.updated_at)
                    .push_bind(subscription.deleted_at);
            });
            builder.push(" RETURNING id::bigint AS id, confirm_token");

            builder.build().fetch_all(&mut self.connection).await?
        };

        let mut ids = returned_ids(&rows, "subscriptions", subscriptions.len(), "confirm_token")?;
        for subscription in subscriptions.iter_mut() {
            let id = ids.remove(&subscription.confirm_token).ok_or_else(|| {
                DbClientError::MissingReturnedRow {
                    table: "subscriptions",
                    key: subscription.confirm_token.clone(),
                }
            })?;
            subscription.id = Some(id);
        }

        Ok(())
    }

    /// Deletes the subscriptions of every user with one of the given emails,
    /// then the users themselves, in one transaction.
    #[tracing::instrument(name = "Cleaning up fixture rows", skip(self, users))]
    pub async fn cleanup(&mut self, users: &[User]) -> Result<(), DbClientError> {
        let emails: Vec<String> = users
            .iter()
            .filter(|u| !u.email.is_empty())
            .map(|u| u.email.clone())
            .collect();

        if emails.is_empty() {
            return Ok(());
        }

        let mut transaction = self.connection.begin().await?;

        sqlx::query(
            "DELETE FROM subscriptions \
             WHERE user_id IN (SELECT id FROM users WHERE email = ANY($1))",
        )
        .bind(&emails[..])
        .execute(&mut *transaction)
        .await?;

        sqlx::query("DELETE FROM users WHERE email = ANY($1)")
            .bind(&emails[..])
            .execute(&mut *transaction)
            .await?;

        transaction.commit().await?;
        tracing::info!(count = emails.len(), "Removed fixture users");

        Ok(())
    }
}

/// Maps the correlation key of every returned row to its generated id,
/// after checking that the store returned one row per input.
fn returned_ids(
    rows: &[PgRow],
    table: &'static str,
    expected: usize,
    key_column: &str,
) -> Result<HashMap<String, i64>, DbClientError> {
    if rows.len() != expected {
        return Err(DbClientError::RowCountMismatch {
            table,
            expected,
            returned: rows.len(),
        });
    }

    let ids = rows
        .iter()
        .map(|row| -> Result<(String, i64), sqlx::Error> {
            Ok((row.try_get(key_column)?, row.try_get("id")?))
        })
        .collect::<Result<HashMap<_, _>, _>>()?;

    Ok(ids)
}
