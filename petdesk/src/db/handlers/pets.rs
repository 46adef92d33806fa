//! Database repository for pets.

use crate::{
    db::{
        errors::Result,
        handlers::repository::Repository,
        models::pets::{Pet, PetCreateDBRequest, PetDBResponse, PetDetails, PetUpdateDBRequest},
    },
    types::PetId,
};
use sqlx::{PgConnection, Postgres, QueryBuilder};
use tracing::instrument;

const PET_DETAILS_SELECT: &str = r#"
    SELECT pets.pet_id, pets.pet_name, pets.age,
           owners.owner_id, owners.first_name, owners.last_name,
           pet_types.type_id, pet_types.type_name
    FROM pets
    JOIN owners ON pets.owner_id = owners.owner_id
    JOIN pet_types ON pets.type_id = pet_types.type_id
    WHERE 1=1"#;

/// Filter for listing pets. Each present term adds a substring match; terms are ANDed.
#[derive(Debug, Clone, Default)]
pub struct PetFilter {
    pub pet_name: Option<String>,
    pub type_name: Option<String>,
}

impl PetFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pet_name(mut self, pet_name: impl Into<String>) -> Self {
        self.pet_name = Some(pet_name.into());
        self
    }

    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }
}

/// Wrap a search term for `LIKE`, escaping the pattern metacharacters so they match literally.
fn contains_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

pub struct Pets<'c> {
    db: &'c mut PgConnection,
}

impl<'c> Pets<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    /// Get a single pet joined with its owner and type
    #[instrument(skip(self), err)]
    pub async fn get_details(&mut self, id: PetId) -> Result<Option<PetDetails>> {
        let mut query = QueryBuilder::<Postgres>::new(PET_DETAILS_SELECT);
        query.push(" AND pets.pet_id = ");
        query.push_bind(id);

        let pet = query.build_query_as::<PetDetails>().fetch_optional(&mut *self.db).await?;
        Ok(pet)
    }
}

#[async_trait::async_trait]
impl<'c> Repository for Pets<'c> {
    type CreateRequest = PetCreateDBRequest;
    type UpdateRequest = PetUpdateDBRequest;
    type Response = PetDBResponse;
    type Id = PetId;
    type Filter = PetFilter;
    type Listing = PetDetails;

    #[instrument(skip(self, request), fields(pet_name = %request.pet_name, owner_id = request.owner_id, type_id = request.type_id), err)]
    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            INSERT INTO pets (pet_name, age, owner_id, type_id)
            VALUES ($1, $2, $3, $4)
            RETURNING pet_id, pet_name, age, owner_id, type_id
            "#,
        )
        .bind(&request.pet_name)
        .bind(request.age)
        .bind(request.owner_id)
        .bind(request.type_id)
        .fetch_one(&mut *self.db)
        .await?;

        Ok(pet)
    }

    #[instrument(skip(self), err)]
    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>> {
        let pet = sqlx::query_as::<_, Pet>("SELECT pet_id, pet_name, age, owner_id, type_id FROM pets WHERE pet_id = $1")
            .bind(id)
            .fetch_optional(&mut *self.db)
            .await?;

        Ok(pet)
    }

    #[instrument(skip(self, filter), fields(pet_name = ?filter.pet_name, type_name = ?filter.type_name), err)]
    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Listing>> {
        let mut query = QueryBuilder::<Postgres>::new(PET_DETAILS_SELECT);

        if let Some(pet_name) = filter.pet_name.as_deref().filter(|s| !s.is_empty()) {
            query.push(" AND pets.pet_name LIKE ");
            query.push_bind(contains_pattern(pet_name));
        }

        if let Some(type_name) = filter.type_name.as_deref().filter(|s| !s.is_empty()) {
            query.push(" AND pet_types.type_name LIKE ");
            query.push_bind(contains_pattern(type_name));
        }

        query.push(" ORDER BY pets.pet_id");

        let pets = query.build_query_as::<PetDetails>().fetch_all(&mut *self.db).await?;
        tracing::debug!("Retrieved {} pets", pets.len());

        Ok(pets)
    }

    #[instrument(skip(self, request), fields(pet_name = %request.pet_name, owner_id = request.owner_id, type_id = request.type_id), err)]
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Option<Self::Response>> {
        let pet = sqlx::query_as::<_, Pet>(
            r#"
            UPDATE pets
            SET pet_name = $1, age = $2, owner_id = $3, type_id = $4
            WHERE pet_id = $5
            RETURNING pet_id, pet_name, age, owner_id, type_id
            "#,
        )
        .bind(&request.pet_name)
        .bind(request.age)
        .bind(request.owner_id)
        .bind(request.type_id)
        .bind(id)
        .fetch_optional(&mut *self.db)
        .await?;

        Ok(pet)
    }

    #[instrument(skip(self), err)]
    async fn delete(&mut self, id: Self::Id) -> Result<bool> {
        let result = sqlx::query("DELETE FROM pets WHERE pet_id = $1")
            .bind(id)
            .execute(&mut *self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
