use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::entities::genre::{self, Entity as Genre};
use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateGenreRequest {
    name: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateGenreRequest {
    name: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GenreResponse {
    id: i32,
    name: String,
    created_at: chrono::NaiveDateTime,
}

impl From<genre::Model> for GenreResponse {
    fn from(genre: genre::Model) -> Self {
        GenreResponse {
            id: genre.id,
            name: genre.name,
            created_at: genre.created_at,
        }
    }
}

fn map_unique_violation(err: sea_orm::DbErr) -> AppError {
    if err
        .to_string()
        .contains("duplicate key value violates unique constraint")
    {
        return AppError::Conflict("genre with this name already exists".to_string());
    }
    AppError::DatabaseError(err)
}

#[utoipa::path(
    post,
    path = "/genre",
    request_body = CreateGenreRequest,
    responses(
        (status = 201, description = "Genre created", body = GenreResponse),
        (status = 409, description = "Genre name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Genres"
)]
pub async fn create_genre(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateGenreRequest>,
) -> Result<(StatusCode, Json<GenreResponse>), AppError> {
    println!("Create genre request: {}", payload.name);

    let now = chrono::Utc::now().naive_utc();
    let genre = genre::ActiveModel {
        name: Set(payload.name),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let created = genre.insert(db.as_ref()).await.map_err(map_unique_violation)?;
    Ok((StatusCode::CREATED, Json(GenreResponse::from(created))))
}

#[utoipa::path(
    get,
    path = "/genre",
    responses(
        (status = 200, description = "List of all genres", body = [GenreResponse]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Genres"
)]
pub async fn list_genres(
    State(db): State<Arc<DatabaseConnection>>,
) -> Result<Json<Vec<GenreResponse>>, AppError> {
    let genres = Genre::find().all(db.as_ref()).await?;
    let responses = genres.into_iter().map(GenreResponse::from).collect();
    Ok(Json(responses))
}

#[utoipa::path(
    get,
    path = "/genre/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Genre details", body = GenreResponse),
        (status = 404, description = "Genre not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Genres"
)]
pub async fn get_genre(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<GenreResponse>, AppError> {
    let genre = Genre::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("genre not found".to_string()))?;

    Ok(Json(GenreResponse::from(genre)))
}

#[utoipa::path(
    patch,
    path = "/genre/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    request_body = UpdateGenreRequest,
    responses(
        (status = 200, description = "Updated genre", body = GenreResponse),
        (status = 404, description = "Genre not found"),
        (status = 409, description = "Genre name already exists"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Genres"
)]
pub async fn update_genre(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateGenreRequest>,
) -> Result<Json<GenreResponse>, AppError> {
    println!("Update genre request for ID: {}", id);

    let genre = Genre::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("genre not found".to_string()))?;

    let mut active = genre.into_active_model();
    if let Some(name) = payload.name {
        active.name = Set(name);
    }
    active.updated_at = Set(chrono::Utc::now().naive_utc());

    let updated = active.update(db.as_ref()).await.map_err(map_unique_violation)?;
    Ok(Json(GenreResponse::from(updated)))
}

#[utoipa::path(
    delete,
    path = "/genre/{id}",
    params(
        ("id" = i32, Path, description = "Genre ID")
    ),
    responses(
        (status = 200, description = "Deleted genre ID", body = i32),
        (status = 404, description = "Genre not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Genres"
)]
pub async fn delete_genre(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<i32>, AppError> {
    println!("Delete genre request for ID: {}", id);

    let genre = Genre::find_by_id(id)
        .one(db.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("genre not found".to_string()))?;

    genre.into_active_model().delete(db.as_ref()).await?;
    Ok(Json(id))
}
