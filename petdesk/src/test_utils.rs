//! Test utilities for integration testing.

use crate::config::{Config, DatabaseConfig, PoolSettings};
use crate::db::handlers::{Owners, Pets, Repository};
use crate::db::models::{
    owners::{Owner, OwnerCreateDBRequest},
    pets::{Pet, PetCreateDBRequest},
};
use crate::names::split_owner_name;
use crate::records::Records;
use crate::types::PetTypeId;
use axum_test::TestServer;
use sqlx::PgPool;

pub fn create_test_config() -> Config {
    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: DatabaseConfig {
            // Tests hand the application a pool directly
            url: Some("postgres://localhost/petdesk_test".to_string()),
            pool: PoolSettings {
                max_connections: 2,
                min_connections: 0,
                ..Default::default()
            },
            ..Default::default()
        },
        enable_metrics: false,
        enable_otel_export: false,
    }
}

pub async fn create_test_app(pool: PgPool) -> TestServer {
    crate::Application::new_with_pool(create_test_config(), pool)
        .expect("Failed to create application")
        .into_test_server()
}

pub async fn create_test_owner(pool: &PgPool, first_name: &str, last_name: &str) -> Owner {
    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Owners::new(&mut conn)
        .create(&OwnerCreateDBRequest {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
        })
        .await
        .expect("Failed to create test owner")
}

/// Id of one of the seeded pet types
pub async fn pet_type_id(pool: &PgPool, type_name: &str) -> PetTypeId {
    sqlx::query_scalar::<_, PetTypeId>("SELECT type_id FROM pet_types WHERE type_name = $1")
        .bind(type_name)
        .fetch_optional(pool)
        .await
        .expect("Failed to look up pet type")
        .unwrap_or_else(|| panic!("Pet type {type_name} is not seeded"))
}

/// Insert a pet, reusing the owner with this full name if one exists.
pub async fn create_test_pet(pool: &PgPool, pet_name: &str, age: i64, owner_name: &str, type_name: &str) -> Pet {
    let owner = split_owner_name(owner_name);
    let owner_id = Records::new(pool.clone())
        .resolve_owner(&owner.first_name, &owner.last_name)
        .await
        .expect("Failed to resolve test owner");
    let type_id = pet_type_id(pool, type_name).await;

    let mut conn = pool.acquire().await.expect("Failed to acquire connection");
    Pets::new(&mut conn)
        .create(&PetCreateDBRequest {
            pet_name: pet_name.to_string(),
            age,
            owner_id,
            type_id,
        })
        .await
        .expect("Failed to create test pet")
}

pub async fn count_owners(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM owners")
        .fetch_one(pool)
        .await
        .expect("Failed to count owners")
}

pub async fn count_owners_named(pool: &PgPool, first_name: &str, last_name: &str) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM owners WHERE first_name = $1 AND last_name = $2")
        .bind(first_name)
        .bind(last_name)
        .fetch_one(pool)
        .await
        .expect("Failed to count owners")
}

pub async fn count_pets(pool: &PgPool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM pets")
        .fetch_one(pool)
        .await
        .expect("Failed to count pets")
}
