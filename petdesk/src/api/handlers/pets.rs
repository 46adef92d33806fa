use crate::AppState;
use crate::api::models::pets::{CreateView, DeleteView, EditView, IndexView, OwnerOption, PetForm, SearchQuery};
use crate::db::handlers::{Owners, PetFilter, PetTypes, Pets, Repository};
use crate::errors::{Error, Result};
use crate::names::join_owner_name;
use crate::types::parse_pet_id;
use axum::{
    Form,
    extract::{Path, Query, State, rejection::FormRejection},
    response::{Html, Redirect},
};
use tracing::debug;

async fn render_index(state: &AppState, search: SearchQuery) -> Result<Html<String>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let pets = Pets::new(&mut pool_conn).list(&PetFilter::from(&search)).await?;

    state.views.render("index.html", IndexView { pets, search })
}

/// `GET /`: every pet with its owner and type
#[tracing::instrument(skip_all)]
pub async fn list_pets(State(state): State<AppState>) -> Result<Html<String>> {
    render_index(&state, SearchQuery::default()).await
}

/// `GET /search`: pets whose name and type name contain the given terms
#[tracing::instrument(skip_all, fields(pet_name = ?query.pet_name, type_name = ?query.type_name))]
pub async fn search_pets(State(state): State<AppState>, Query(query): Query<SearchQuery>) -> Result<Html<String>> {
    render_index(&state, query).await
}

#[tracing::instrument(skip_all)]
pub async fn create_form(State(state): State<AppState>) -> Result<Html<String>> {
    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let pet_types = PetTypes::new(&mut pool_conn).list().await?;

    state.views.render("create.html", CreateView { pet_types })
}

#[tracing::instrument(skip_all)]
pub async fn create_pet(
    State(state): State<AppState>,
    form: std::result::Result<Form<PetForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form?;
    let record = form.validate()?;
    state.records.create_pet_record(&record).await?;

    Ok(Redirect::to("/"))
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let pet_id = parse_pet_id(&id).ok_or_else(|| Error::pet_not_found(&id))?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let pet = Pets::new(&mut pool_conn)
        .get_details(pet_id)
        .await?
        .ok_or_else(|| Error::pet_not_found(pet_id))?;
    let owners = Owners::new(&mut pool_conn).list().await?;
    let pet_types = PetTypes::new(&mut pool_conn).list().await?;

    let view = EditView {
        owner_name: join_owner_name(&pet.first_name, &pet.last_name),
        owners: owners.into_iter().map(OwnerOption::from).collect(),
        pet,
        pet_types,
    };
    state.views.render("edit.html", view)
}

/// `POST /edit/{id}`: replace the pet's fields. An id matching no pet still redirects.
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn update_pet(
    State(state): State<AppState>,
    Path(id): Path<String>,
    form: std::result::Result<Form<PetForm>, FormRejection>,
) -> Result<Redirect> {
    let Form(form) = form?;
    let record = form.validate()?;

    match parse_pet_id(&id) {
        Some(pet_id) => {
            state.records.update_pet_record(pet_id, &record).await?;
        }
        None => debug!("Ignoring update of non-numeric pet id"),
    }

    Ok(Redirect::to("/"))
}

#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let pet_id = parse_pet_id(&id).ok_or_else(|| Error::pet_not_found(&id))?;

    let mut pool_conn = state.db.acquire().await.map_err(|e| Error::Database(e.into()))?;
    let pet = Pets::new(&mut pool_conn)
        .get_details(pet_id)
        .await?
        .ok_or_else(|| Error::pet_not_found(pet_id))?;

    state.views.render("delete.html", DeleteView { pet })
}

/// `POST /delete/{id}`: remove the pet. Deleting an absent pet still redirects.
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_pet(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    match parse_pet_id(&id) {
        Some(pet_id) => {
            state.records.delete_pet(pet_id).await?;
        }
        None => debug!("Ignoring delete of non-numeric pet id"),
    }

    Ok(Redirect::to("/"))
}
