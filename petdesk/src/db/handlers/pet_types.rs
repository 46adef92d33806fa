//! Database repository for pet types. Pet types are reference data; nothing here writes them.

use crate::db::{errors::Result, models::pet_types::PetType};
use sqlx::PgConnection;
use tracing::instrument;

pub struct PetTypes<'c> {
    db: &'c mut PgConnection,
}

impl<'c> PetTypes<'c> {
    pub fn new(db: &'c mut PgConnection) -> Self {
        Self { db }
    }

    #[instrument(skip(self), err)]
    pub async fn list(&mut self) -> Result<Vec<PetType>> {
        let types = sqlx::query_as::<_, PetType>("SELECT type_id, type_name FROM pet_types ORDER BY type_id")
            .fetch_all(&mut *self.db)
            .await?;

        Ok(types)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::pet_type_id;
    use sqlx::PgPool;

    #[sqlx::test]
    async fn test_seeded_pet_types_are_listed(pool: PgPool) {
        let mut conn = pool.acquire().await.unwrap();
        let mut repo = PetTypes::new(&mut conn);

        let types = repo.list().await.unwrap();
        let names: Vec<&str> = types.iter().map(|t| t.type_name.as_str()).collect();
        assert_eq!(names, vec!["Dog", "Cat", "Bird", "Rabbit", "Fish", "Hamster"]);
    }

    #[sqlx::test]
    async fn test_pet_types_are_ordered_by_id(pool: PgPool) {
        let cat = pet_type_id(&pool, "Cat").await;

        let mut conn = pool.acquire().await.unwrap();
        let types = PetTypes::new(&mut conn).list().await.unwrap();
        assert!(types.windows(2).all(|pair| pair[0].type_id < pair[1].type_id));
        assert_eq!(types[1].type_id, cat);
    }
}
