use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::director::{self, Entity as Director};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateDirectorRequest {
    name: String,
    dob: chrono::NaiveDate,
    nationality: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateDirectorRequest {
    name: Option<String>,
    dob: Option<chrono::NaiveDate>,
    nationality: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DirectorResponse {
    id: i32,
    name: String,
    dob: chrono::NaiveDate,
    nationality: String,
    created_at: chrono::NaiveDateTime,
}

impl From<director::Model> for DirectorResponse {
    fn from(director: director::Model) -> Self {
        DirectorResponse {
            id: director.id,
            name: director.name,
            dob: director.dob,
            nationality: director.nationality,
            created_at: director.created_at,
        }
    }
}

#[utoipa::path(
    post,
    path = "/director",
    request_body = CreateDirectorRequest,
    responses(
        (status = 201, description = "Director created", body = DirectorResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directors"
)]
pub async fn create_director(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateDirectorRequest>,
) -> Result<(StatusCode, Json<DirectorResponse>), AppError> {
    println!("Create director request: {}", payload.name);

    let now = chrono::Utc::now().naive_utc();
    let director = director::ActiveModel {
        name: Set(payload.name),
        dob: Set(payload.dob),
        nationality: Set(payload.nationality),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = director.insert(db.as_ref()).await?;
    Ok((StatusCode::CREATED, Json(DirectorResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/director",
    responses(
        (status = 200, description = "List of all directors", body = [DirectorResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directors"
)]
pub async fn list_directors(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<DirectorResponse>>, AppError> {
    let directors = Director::find().all(db.as_ref()).await?;
    let responses = directors.into_iter().map(DirectorResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/director/{id}",
    params(
        ("id" = i32, Path, description = "Director ID")
    ),
    responses(
        (status = 200, description = "Director details", body = DirectorResponse),
        (status = 404, description = "Director not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directors"
)]
pub async fn get_director(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<DirectorResponse>, AppError> {
    let director = Director::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("director not found".to_string()))?;

    Ok(Json(DirectorResponse::from(director)))
}

#[utoipa::path(
    patch,
    path = "/director/{id}",
    params(
        ("id" = i32, Path, description = "Director ID")
    ),
    request_body = UpdateDirectorRequest,
    responses(
        (status = 200, description = "Updated director", body = DirectorResponse),
        (status = 404, description = "Director not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directors"
)]
pub async fn update_director(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateDirectorRequest>,
) -> Result<Json<DirectorResponse>, AppError> {
    println!("Update director request for ID: {}", id);

    let director = Director::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("director not found".to_string()))?;

    let mut active = director.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    if let Some(dob) = payload.dob {
        active.dob = Set(dob);
    }
    if let Some(nationality) = payload.nationality {
        active.nationality = Set(nationality);
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db.as_ref()).await?;
    Ok(Json(DirectorResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/director/{id}",
    params(
        ("id" = i32, Path, description = "Director ID")
    ),
    responses(
        (status = 200, description = "Deleted director ID", body = i32),
        (status = 404, description = "Director not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Directors"
)]
pub async fn delete_director(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<i32>, AppError> {
    println!("Delete director request for ID: {}", id);

    let director = Director::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("director not found".to_string()))?;

    director.into_active_model().delete(db.as_ref()).await?;
    Ok(Json(id))
}
