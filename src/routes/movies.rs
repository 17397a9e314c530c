use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::AppError;
use crate::services::movies::{self, CreateMovieInput, MovieAggregate, UpdateMovieInput};

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMovieRequest {
    title: String,
    director_id: i32,
    genre_ids: Vec<i32>,
    detail: String,
}

#[derive(Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMovieRequest {
    title: Option<String>,
    director_id: Option<i32>,
    genre_ids: Option<Vec<i32>>,
    detail: Option<String>,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct MovieListQuery {
    /// Substring match on the movie title.
    title: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct DirectorSummary {
    id: i32,
    name: String,
    dob: chrono::NaiveDate,
    nationality: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct GenreSummary {
    id: i32,
    name: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MovieResponse {
    id: i32,
    title: String,
    director: DirectorSummary,
    genres: Vec<GenreSummary>,
    detail: Option<String>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MovieListResponse {
    data: Vec<MovieResponse>,
    count: u64,
}

impl From<MovieAggregate> for MovieResponse {
    fn from(aggregate: MovieAggregate) -> Self {
        MovieResponse {
            id: aggregate.movie.id,
            title: aggregate.movie.title,
            director: DirectorSummary {
                id: aggregate.director.id,
                name: aggregate.director.name,
                dob: aggregate.director.dob,
                nationality: aggregate.director.nationality,
            },
            genres: aggregate
                .genres
                .into_iter()
                .map(|g| GenreSummary {
                    id: g.id,
                    name: g.name,
                })
                .collect(),
            detail: aggregate.detail.map(|d| d.detail),
        }
    }
}

#[utoipa::path(
    get,
    path = "/movie",
    params(
        MovieListQuery
    ),
    responses(
        (status = 200, description = "List of movies with total count", body = MovieListResponse),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn list_movies(
    State(db): State<Arc<DatabaseConnection>>,
    Query(query): Query<MovieListQuery>,
) -> Result<Json<MovieListResponse>, AppError> {
    let (aggregates, count) = movies::find_all(&db, query.title.as_deref()).await?;

    let data = aggregates.into_iter().map(MovieResponse::from).collect();
    Ok(Json(MovieListResponse { data, count }))
}

#[utoipa::path(
    get,
    path = "/movie/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Movie with director, genres and detail", body = MovieResponse),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn get_movie(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<MovieResponse>, AppError> {
    let aggregate = movies::find_one(&db, id).await?;
    Ok(Json(MovieResponse::from(aggregate)))
}

#[utoipa::path(
    post,
    path = "/movie",
    request_body = CreateMovieRequest,
    responses(
        (status = 201, description = "Movie created", body = MovieResponse),
        (status = 404, description = "Director or genre not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn create_movie(
    State(db): State<Arc<DatabaseConnection>>,
    Json(payload): Json<CreateMovieRequest>,
) -> Result<(StatusCode, Json<MovieResponse>), AppError> {
    println!("Create movie request: {}", payload.title);

    let aggregate = movies::create(
        &db,
        CreateMovieInput {
            title: payload.title,
            director_id: payload.director_id,
            genre_ids: payload.genre_ids,
            detail: payload.detail,
        },
    )
    .await?;

    println!("Movie '{}' created successfully", aggregate.movie.title);
    Ok((StatusCode::CREATED, Json(MovieResponse::from(aggregate))))
}

#[utoipa::path(
    patch,
    path = "/movie/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Updated movie", body = MovieResponse),
        (status = 404, description = "Movie, director or genre not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn update_movie(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateMovieRequest>,
) -> Result<Json<MovieResponse>, AppError> {
    println!("Update movie request for ID: {}", id);

    let aggregate = movies::update(
        &db,
        id,
        UpdateMovieInput {
            title: payload.title,
            director_id: payload.director_id,
            genre_ids: payload.genre_ids,
            detail: payload.detail,
        },
    )
    .await?;

    Ok(Json(MovieResponse::from(aggregate)))
}

#[utoipa::path(
    delete,
    path = "/movie/{id}",
    params(
        ("id" = i32, Path, description = "Movie ID")
    ),
    responses(
        (status = 200, description = "Deleted movie ID", body = i32),
        (status = 404, description = "Movie not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Movies"
)]
pub async fn delete_movie(
    State(db): State<Arc<DatabaseConnection>>,
    Path(id): Path<i32>,
) -> Result<Json<i32>, AppError> {
    println!("Delete movie request for ID: {}", id);

    let deleted = movies::remove(&db, id).await?;

    println!("Movie ID {} deleted successfully", deleted);
    Ok(Json(deleted))
}
