//! Movie catalog workflows.
//!
//! Create, update and remove each resolve their foreign associations up front
//! (director by id, genres by id set) and then apply all writes inside a
//! single database transaction, so a failure partway through cannot leave a
//! movie pointing at half-applied associations.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, ModelTrait,
    QueryFilter, Set, TransactionTrait,
};

use crate::entities::director::Entity as Director;
use crate::entities::genre::Entity as Genre;
use crate::entities::movie::Entity as Movie;
use crate::entities::movie_detail::Entity as MovieDetail;
use crate::entities::movie_genre::Entity as MovieGenre;
use crate::entities::{director, genre, movie, movie_detail, movie_genre};
use crate::error::AppError;

/// A movie with its associations materialized.
///
/// `detail` is only loaded on the single-movie paths; the list path leaves it
/// as `None`.
#[derive(Debug, Clone)]
pub struct MovieAggregate {
    pub movie: movie::Model,
    pub director: director::Model,
    pub genres: Vec<genre::Model>,
    pub detail: Option<movie_detail::Model>,
}

#[derive(Debug, Clone)]
pub struct CreateMovieInput {
    pub title: String,
    pub director_id: i32,
    pub genre_ids: Vec<i32>,
    pub detail: String,
}

/// Partial update payload. Every field is optional and independent; absent
/// fields leave the corresponding state untouched, including the genre set.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovieInput {
    pub title: Option<String>,
    pub director_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
    pub detail: Option<String>,
}

/// List all movies, optionally filtered by a title substring, with director
/// and genres loaded. Returns the movies plus the total count of the
/// filtered set.
pub async fn find_all(
    db: &DatabaseConnection,
    title: Option<&str>,
) -> Result<(Vec<MovieAggregate>, u64), AppError> {
    let mut query = Movie::find();
    if let Some(title) = title {
        query = query.filter(movie::Column::Title.contains(title));
    }

    let movies = query.all(db).await?;
    let count = movies.len() as u64;

    let mut aggregates = Vec::with_capacity(movies.len());
    for m in movies {
        let director = load_director(db, &m).await?;
        let genres = m.find_related(Genre).all(db).await?;
        aggregates.push(MovieAggregate {
            movie: m,
            director,
            genres,
            detail: None,
        });
    }

    Ok((aggregates, count))
}

/// Fetch one movie with director, genres and detail populated.
pub async fn find_one(db: &DatabaseConnection, id: i32) -> Result<MovieAggregate, AppError> {
    let m = Movie::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("movie not found".to_string()))?;

    let director = load_director(db, &m).await?;
    let genres = m.find_related(Genre).all(db).await?;
    let detail = load_detail(db, &m).await?;

    Ok(MovieAggregate {
        movie: m,
        director,
        genres,
        detail: Some(detail),
    })
}

/// Create a movie together with its detail row and genre associations.
pub async fn create(
    db: &DatabaseConnection,
    input: CreateMovieInput,
) -> Result<MovieAggregate, AppError> {
    let director = Director::find_by_id(input.director_id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("director not found".to_string()))?;

    let genres = resolve_genres(db, &input.genre_ids).await?;

    let now = Utc::now().naive_utc();
    let txn = db.begin().await?;

    let detail = movie_detail::ActiveModel {
        detail: Set(input.detail),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let created = movie::ActiveModel {
        title: Set(input.title),
        director_id: Set(director.id),
        detail_id: Set(detail.id),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    for g in &genres {
        movie_genre::ActiveModel {
            movie_id: Set(created.id),
            genre_id: Set(g.id),
        }
        .insert(&txn)
        .await?;
    }

    txn.commit().await?;

    Ok(MovieAggregate {
        movie: created,
        director,
        genres,
        detail: Some(detail),
    })
}

/// Apply a partial update to a movie.
///
/// A supplied `director_id` or `genre_ids` must resolve completely or the
/// whole update fails with NotFound. A supplied `detail` only touches the
/// detail row's text. An absent `genre_ids` leaves the existing genre
/// associations untouched.
pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateMovieInput,
) -> Result<MovieAggregate, AppError> {
    let m = Movie::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("movie not found".to_string()))?;

    let new_director = match input.director_id {
        Some(director_id) => Some(
            Director::find_by_id(director_id)
                .one(db)
                .await?
                .ok_or_else(|| AppError::NotFound("director not found".to_string()))?,
        ),
        None => None,
    };

    let new_genres = match &input.genre_ids {
        Some(genre_ids) => Some(resolve_genres(db, genre_ids).await?),
        None => None,
    };

    let detail_id = m.detail_id;
    let txn = db.begin().await?;

    let mut active = m.into_active_model();
    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(d) = &new_director {
        active.director_id = Set(d.id);
    }
    active.updated_at = Set(Utc::now().naive_utc());
    let updated = active.update(&txn).await?;

    if let Some(text) = input.detail {
        movie_detail::ActiveModel {
            id: Set(detail_id),
            detail: Set(text),
        }
        .update(&txn)
        .await?;
    }

    if let Some(genres) = &new_genres {
        MovieGenre::delete_many()
            .filter(movie_genre::Column::MovieId.eq(updated.id))
            .exec(&txn)
            .await?;
        for g in genres {
            movie_genre::ActiveModel {
                movie_id: Set(updated.id),
                genre_id: Set(g.id),
            }
            .insert(&txn)
            .await?;
        }
    }

    txn.commit().await?;

    find_one(db, id).await
}

/// Delete a movie, its genre associations and its detail row. Returns the
/// deleted id.
pub async fn remove(db: &DatabaseConnection, id: i32) -> Result<i32, AppError> {
    let m = Movie::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("movie not found".to_string()))?;

    let txn = db.begin().await?;

    MovieGenre::delete_many()
        .filter(movie_genre::Column::MovieId.eq(id))
        .exec(&txn)
        .await?;
    Movie::delete_by_id(id).exec(&txn).await?;
    // The detail row is not store-cascaded; it is removed explicitly.
    MovieDetail::delete_by_id(m.detail_id).exec(&txn).await?;

    txn.commit().await?;

    Ok(id)
}

/// Fetch every genre in `genre_ids`, failing if any id does not resolve.
/// Set-membership validation: the row count must match the id count.
async fn resolve_genres(
    db: &DatabaseConnection,
    genre_ids: &[i32],
) -> Result<Vec<genre::Model>, AppError> {
    let genres = Genre::find()
        .filter(genre::Column::Id.is_in(genre_ids.to_vec()))
        .all(db)
        .await?;

    if genres.len() != genre_ids.len() {
        return Err(AppError::NotFound("genre not found".to_string()));
    }

    Ok(genres)
}

async fn load_director(
    db: &DatabaseConnection,
    m: &movie::Model,
) -> Result<director::Model, AppError> {
    m.find_related(Director).one(db).await?.ok_or_else(|| {
        AppError::InternalServerError(format!("movie {} references a missing director", m.id))
    })
}

async fn load_detail(
    db: &DatabaseConnection,
    m: &movie::Model,
) -> Result<movie_detail::Model, AppError> {
    m.find_related(MovieDetail).one(db).await?.ok_or_else(|| {
        AppError::InternalServerError(format!("movie {} references a missing detail", m.id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn test_director(id: i32, name: &str) -> director::Model {
        director::Model {
            id,
            name: name.to_string(),
            dob: chrono::NaiveDate::from_ymd_opt(1970, 1, 1).unwrap(),
            nationality: "British".to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    fn test_genre(id: i32, name: &str) -> genre::Model {
        genre::Model {
            id,
            name: name.to_string(),
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    fn test_movie(id: i32, title: &str, director_id: i32, detail_id: i32) -> movie::Model {
        movie::Model {
            id,
            title: title.to_string(),
            director_id,
            detail_id,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }

    fn test_detail(id: i32, text: &str) -> movie_detail::Model {
        movie_detail::Model {
            id,
            detail: text.to_string(),
        }
    }

    #[tokio::test]
    async fn find_one_returns_populated_aggregate() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .append_query_results([[test_detail(1, "A boy discovers he is a wizard.")]])
            .into_connection();

        let aggregate = find_one(&db, 1).await.unwrap();

        assert_eq!(aggregate.movie.title, "해리포터");
        assert_eq!(aggregate.director.id, 1);
        assert_eq!(aggregate.genres.len(), 1);
        assert_eq!(aggregate.genres[0].name, "Fantasy");
        assert_eq!(
            aggregate.detail.unwrap().detail,
            "A boy discovers he is a wizard."
        );
    }

    #[tokio::test]
    async fn find_one_missing_movie_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()])
            .into_connection();

        let err = find_one(&db, 999).await.unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "movie not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn find_all_loads_director_and_genres_per_movie() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[
                test_movie(1, "해리포터", 1, 1),
                test_movie(2, "반지의 제왕", 2, 2),
            ]])
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .append_query_results([[test_director(2, "Peter Jackson")]])
            .append_query_results([[test_genre(1, "Fantasy"), test_genre(2, "Adventure")]])
            .into_connection();

        let (movies, count) = find_all(&db, None).await.unwrap();

        assert_eq!(count, 2);
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].director.name, "Chris Columbus");
        assert_eq!(movies[1].genres.len(), 2);
        assert!(movies.iter().all(|m| m.detail.is_none()));
    }

    #[tokio::test]
    async fn create_with_missing_director_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<director::Model>::new()])
            .into_connection();

        let err = create(
            &db,
            CreateMovieInput {
                title: "Harry Potter".to_string(),
                director_id: 42,
                genre_ids: vec![1],
                detail: "wizards".to_string(),
            },
        )
        .await
        .unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "director not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_with_unresolved_genre_id_is_not_found() {
        // Two genre ids requested, only one resolves.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .into_connection();

        let err = create(
            &db,
            CreateMovieInput {
                title: "Harry Potter".to_string(),
                director_id: 1,
                genre_ids: vec![1, 99],
                detail: "wizards".to_string(),
            },
        )
        .await
        .unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "genre not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn create_persists_movie_detail_and_genres() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .append_query_results([[test_detail(7, "A boy discovers he is a wizard.")]])
            .append_query_results([[test_movie(3, "Harry Potter", 1, 7)]])
            .append_query_results([[movie_genre::Model {
                movie_id: 3,
                genre_id: 1,
            }]])
            .into_connection();

        let aggregate = create(
            &db,
            CreateMovieInput {
                title: "Harry Potter".to_string(),
                director_id: 1,
                genre_ids: vec![1],
                detail: "A boy discovers he is a wizard.".to_string(),
            },
        )
        .await
        .unwrap();

        assert_eq!(aggregate.movie.id, 3);
        assert_eq!(aggregate.movie.detail_id, 7);
        assert_eq!(aggregate.director.id, 1);
        assert_eq!(aggregate.genres[0].name, "Fantasy");
        assert!(aggregate.detail.is_some());
    }

    #[tokio::test]
    async fn update_title_only_preserves_associations() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            // fetch
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            // movie row update (returning)
            .append_query_results([[test_movie(1, "Harry Potter", 1, 1)]])
            // reload: movie, director, genres, detail
            .append_query_results([[test_movie(1, "Harry Potter", 1, 1)]])
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .append_query_results([[test_detail(1, "A boy discovers he is a wizard.")]])
            .into_connection();

        let aggregate = update(
            &db,
            1,
            UpdateMovieInput {
                title: Some("Harry Potter".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(aggregate.movie.title, "Harry Potter");
        assert_eq!(aggregate.director.id, 1);
        assert_eq!(aggregate.genres[0].name, "Fantasy");
    }

    #[tokio::test]
    async fn update_detail_only_touches_detail_text() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_movie(1, "해리포터", 1, 5)]])
            .append_query_results([[test_movie(1, "해리포터", 1, 5)]])
            // detail row update (returning)
            .append_query_results([[test_detail(5, "rewritten synopsis")]])
            // reload
            .append_query_results([[test_movie(1, "해리포터", 1, 5)]])
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(1, "Fantasy")]])
            .append_query_results([[test_detail(5, "rewritten synopsis")]])
            .into_connection();

        let aggregate = update(
            &db,
            1,
            UpdateMovieInput {
                detail: Some("rewritten synopsis".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(aggregate.movie.title, "해리포터");
        assert_eq!(aggregate.detail.unwrap().detail, "rewritten synopsis");
    }

    #[tokio::test]
    async fn update_replaces_genre_set_when_supplied() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            // genre resolution
            .append_query_results([[test_genre(2, "Adventure")]])
            // movie row update (returning)
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            // join table insert (returning), after the delete_many exec
            .append_query_results([[movie_genre::Model {
                movie_id: 1,
                genre_id: 2,
            }]])
            // reload
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            .append_query_results([[test_director(1, "Chris Columbus")]])
            .append_query_results([[test_genre(2, "Adventure")]])
            .append_query_results([[test_detail(1, "A boy discovers he is a wizard.")]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let aggregate = update(
            &db,
            1,
            UpdateMovieInput {
                genre_ids: Some(vec![2]),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(aggregate.genres.len(), 1);
        assert_eq!(aggregate.genres[0].name, "Adventure");
    }

    #[tokio::test]
    async fn update_missing_movie_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()])
            .into_connection();

        let err = update(&db, 999, UpdateMovieInput::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn update_with_missing_director_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_movie(1, "해리포터", 1, 1)]])
            .append_query_results([Vec::<director::Model>::new()])
            .into_connection();

        let err = update(
            &db,
            1,
            UpdateMovieInput {
                director_id: Some(42),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "director not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn remove_deletes_movie_and_detail() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[test_movie(1, "해리포터", 1, 5)]])
            .append_exec_results([
                // join rows, movie row, detail row
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
                MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                },
            ])
            .into_connection();

        let deleted = remove(&db, 1).await.unwrap();

        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn remove_missing_movie_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<movie::Model>::new()])
            .into_connection();

        let err = remove(&db, 999).await.unwrap_err();

        match err {
            AppError::NotFound(msg) => assert_eq!(msg, "movie not found"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }
}
