//! Database repository for owners.

use crate::{
    db::{
        errors::Result,
        models::owners::{Owner, OwnerCreateDBRequest, OwnerDBResponse},
    },
};
use sqlx::PgConnection;
use tracing::instrument;

pub struct Owners<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Owners<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Insert a new owner and return the stored row with its generated id
    #[instrument(skip(self, request), fields(first_name = %request.first_name, last_name = %request.last_name), err)]
    pub async fn create(&mut self, request: &OwnerCreateDBRequest) -> Result<OwnerDBResponse> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (first_name, last_name)
            VALUES ($1, $2)
            RETURNING owner_id, first_name, last_name
            "#,
        )
        .bind(&request.first_name)
        .bind(&request.last_name)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(owner)
    }

    /// Find an owner whose first and last name both match exactly (case-sensitive).
    ///
    /// Names are not unique in the schema; when duplicates exist the oldest row wins so repeated
    /// lookups are stable.
    #[instrument(skip(self), err)]
    pub async fn find_by_name(&mut self, first_name: &str, last_name: &str) -> Result<Option<OwnerDBResponse>> {
        let owner = sqlx::query_as::<_, Owner>(
            r#"
            SELECT owner_id, first_name, last_name
            FROM owners
            WHERE first_name = $1 AND last_name = $2
            ORDER BY owner_id
            LIMIT 1
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(owner)
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<OwnerDBResponse>> {
        let owners = sqlx::query_as::<_, Owner>("SELECT owner_id, first_name, last_name FROM owners ORDER BY owner_id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(owners)
    }
}
