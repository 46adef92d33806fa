//! Record service: owner resolve-or-create plus pet writes.
//!
//! Each operation acquires one connection from the shared pool, runs its statements on it in
//! autocommit mode, and releases the connection when it returns. Nothing is wrapped in a
//! transaction. In particular [`Records::resolve_owner`] is a lookup followed by an insert, so two
//! concurrent requests naming the same new owner can both insert, leaving duplicate owner rows.
//! Later lookups pick the oldest of the duplicates.

use crate::{
    db::{
        errors::Result,
        handlers::{Owners, Pets, Repository},
        models::{
            owners::OwnerCreateDBRequest,
            pets::{PetCreateDBRequest, PetUpdateDBRequest},
        },
    },
    names::OwnerName,
    types::{OwnerId, PetId, PetTypeId},
};
use sqlx::PgPool;
use tracing::{debug, info, instrument};

/// Input to a pet write once validation has passed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PetRecord {
    pub pet_name: String,
    pub age: i64,
    pub owner: OwnerName,
    pub type_id: PetTypeId,
}

#[derive(Clone)]
pub struct Records {
    db: PgPool,
}

impl Records {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Return the id of the owner with exactly this name, inserting one if none exists.
    #[instrument(skip(self), err)]
    pub async fn resolve_owner(&self, first_name: &str, last_name: &str) -> Result<OwnerId> {
        let mut conn = self.db.acquire().await?;
        resolve_owner_on(&mut conn, first_name, last_name).await
    }

    #[instrument(skip(self), err)]
    pub async fn create_pet(&self, pet_name: &str, age: i64, owner_id: OwnerId, type_id: PetTypeId) -> Result<PetId> {
        let mut conn = self.db.acquire().await?;
        let pet = Pets::new(&mut conn)
            .create(&PetCreateDBRequest {
                pet_name: pet_name.to_string(),
                age,
                owner_id,
                type_id,
            })
            .await?;

        info!(pet_id = pet.pet_id, "Created pet");
        Ok(pet.pet_id)
    }

    /// Replace every column of a pet. Returns whether the pet existed; a missing id is not an error.
    #[instrument(skip(self), err)]
    pub async fn update_pet(&self, pet_id: PetId, pet_name: &str, age: i64, owner_id: OwnerId, type_id: PetTypeId) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let updated = Pets::new(&mut conn)
            .update(
                pet_id,
                &PetUpdateDBRequest {
                    pet_name: pet_name.to_string(),
                    age,
                    owner_id,
                    type_id,
                },
            )
            .await?;

        if updated.is_none() {
            debug!(pet_id, "Update matched no pet");
        }
        Ok(updated.is_some())
    }

    /// Returns whether a row was removed; deleting an absent pet is not an error.
    #[instrument(skip(self), err)]
    pub async fn delete_pet(&self, pet_id: PetId) -> Result<bool> {
        let mut conn = self.db.acquire().await?;
        let deleted = Pets::new(&mut conn).delete(pet_id).await?;
        if deleted {
            info!(pet_id, "Deleted pet");
        }
        Ok(deleted)
    }

    /// Resolve the owner then insert the pet. The two steps are independent statements: if the
    /// insert fails, a newly created owner is left behind.
    #[instrument(skip(self, record), fields(pet_name = %record.pet_name), err)]
    pub async fn create_pet_record(&self, record: &PetRecord) -> Result<PetId> {
        let owner_id = self.resolve_owner(&record.owner.first_name, &record.owner.last_name).await?;
        self.create_pet(&record.pet_name, record.age, owner_id, record.type_id).await
    }

    /// Resolve the (possibly new) owner then update the pet in place.
    #[instrument(skip(self, record), fields(pet_name = %record.pet_name), err)]
    pub async fn update_pet_record(&self, pet_id: PetId, record: &PetRecord) -> Result<bool> {
        let owner_id = self.resolve_owner(&record.owner.first_name, &record.owner.last_name).await?;
        self.update_pet(pet_id, &record.pet_name, record.age, owner_id, record.type_id).await
    }
}

async fn resolve_owner_on(conn: &mut sqlx::PgConnection, first_name: &str, last_name: &str) -> Result<OwnerId> {
    let mut owners = Owners::new(conn);

    if let Some(existing) = owners.find_by_name(first_name, last_name).await? {
        debug!(owner_id = existing.owner_id, "Reusing existing owner");
        return Ok(existing.owner_id);
    }

    let created = owners
        .create(&OwnerCreateDBRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
        .await?;

    info!(owner_id = created.owner_id, "Created owner");
    Ok(created.owner_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::names::split_owner_name;
    use crate::test_utils::{count_owners_named, count_pets, pet_type_id};

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_owner_is_idempotent(pool: PgPool) {
        let records = Records::new(pool.clone());

        let first = records.resolve_owner("John", "Smith").await.unwrap();
        let second = records.resolve_owner("John", "Smith").await.unwrap();
        assert_eq!(first, second);

        assert_eq!(count_owners_named(&pool, "John", "Smith").await, 1);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_resolve_owner_distinguishes_names(pool: PgPool) {
        let records = Records::new(pool.clone());

        let john = records.resolve_owner("John", "Smith").await.unwrap();
        let jane = records.resolve_owner("Jane", "Smith").await.unwrap();
        let lower = records.resolve_owner("john", "Smith").await.unwrap();
        let single = records.resolve_owner("John", "").await.unwrap();

        assert_ne!(john, jane);
        assert_ne!(john, lower);
        assert_ne!(john, single);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_create_pet_record(pool: PgPool) {
        let records = Records::new(pool.clone());
        let dog = pet_type_id(&pool, "Dog").await;

        let record = PetRecord {
            pet_name: "Rex".to_string(),
            age: 3,
            owner: split_owner_name("John Smith"),
            type_id: dog,
        };
        let pet_id = records.create_pet_record(&record).await.unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let pet = Pets::new(&mut conn).get_details(pet_id).await.unwrap().unwrap();
        assert_eq!(pet.pet_name, "Rex");
        assert_eq!(pet.age, 3);
        assert_eq!(pet.first_name, "John");
        assert_eq!(pet.last_name, "Smith");
        assert_eq!(pet.type_name, "Dog");

        // Second pet for the same owner reuses the owner row
        let second = records
            .create_pet_record(&PetRecord {
                pet_name: "Fido".to_string(),
                ..record
            })
            .await
            .unwrap();
        let second = Pets::new(&mut conn).get_by_id(second).await.unwrap().unwrap();
        assert_eq!(second.owner_id, pet.owner_id);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_failed_pet_insert_leaves_new_owner(pool: PgPool) {
        let records = Records::new(pool.clone());

        let result = records
            .create_pet_record(&PetRecord {
                pet_name: "Ghost".to_string(),
                age: 2,
                owner: split_owner_name("Orphan Owner"),
                type_id: 999_999,
            })
            .await;
        assert!(result.is_err());

        assert_eq!(count_owners_named(&pool, "Orphan", "Owner").await, 1);
        assert_eq!(count_pets(&pool).await, 0);
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_and_delete_missing_pet_are_noops(pool: PgPool) {
        let records = Records::new(pool.clone());
        let dog = pet_type_id(&pool, "Dog").await;
        let owner_id = records.resolve_owner("Jane", "Doe").await.unwrap();

        assert!(!records.update_pet(424_242, "Nobody", 1, owner_id, dog).await.unwrap());
        assert!(!records.delete_pet(424_242).await.unwrap());
    }

    #[sqlx::test]
    #[test_log::test]
    async fn test_update_pet_record_reassigns_owner(pool: PgPool) {
        let records = Records::new(pool.clone());
        let dog = pet_type_id(&pool, "Dog").await;
        let cat = pet_type_id(&pool, "Cat").await;

        let pet_id = records
            .create_pet_record(&PetRecord {
                pet_name: "Rex".to_string(),
                age: 3,
                owner: split_owner_name("John Smith"),
                type_id: dog,
            })
            .await
            .unwrap();

        let existed = records
            .update_pet_record(
                pet_id,
                &PetRecord {
                    pet_name: "Rex".to_string(),
                    age: 4,
                    owner: split_owner_name("Mary Ann Smith"),
                    type_id: cat,
                },
            )
            .await
            .unwrap();
        assert!(existed);

        let mut conn = pool.acquire().await.unwrap();
        let pet = Pets::new(&mut conn).get_details(pet_id).await.unwrap().unwrap();
        assert_eq!(pet.pet_id, pet_id);
        assert_eq!(pet.age, 4);
        assert_eq!(pet.first_name, "Mary");
        assert_eq!(pet.last_name, "Ann Smith");
        assert_eq!(pet.type_name, "Cat");
    }
}
