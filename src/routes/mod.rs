mod directors;
mod genres;
mod home;
mod movies;

use std::sync::Arc;

use axum::{routing::get, Router};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Define the OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // General endpoints
        home::root,
        // Movie endpoints
        movies::list_movies,
        movies::get_movie,
        movies::create_movie,
        movies::update_movie,
        movies::delete_movie,
        // Director endpoints
        directors::create_director,
        directors::list_directors,
        directors::get_director,
        directors::update_director,
        directors::delete_director,
        // Genre endpoints
        genres::create_genre,
        genres::list_genres,
        genres::get_genre,
        genres::update_genre,
        genres::delete_genre,
    ),
    components(
        schemas(
            // Home schemas
            home::RootResponse,
            // Movie schemas
            movies::CreateMovieRequest,
            movies::UpdateMovieRequest,
            movies::MovieResponse,
            movies::MovieListResponse,
            movies::DirectorSummary,
            movies::GenreSummary,
            // Director schemas
            directors::CreateDirectorRequest,
            directors::UpdateDirectorRequest,
            directors::DirectorResponse,
            // Genre schemas
            genres::CreateGenreRequest,
            genres::UpdateGenreRequest,
            genres::GenreResponse,
        )
    ),
    tags(
        (name = "General", description = "General API information"),
        (name = "Movies", description = "Movie catalog endpoints with director, genre and detail associations"),
        (name = "Directors", description = "Director management endpoints"),
        (name = "Genres", description = "Genre management endpoints")
    ),
    info(
        title = "MovieCatalogKit API",
        version = "0.1.0",
        description = "A Rust/Axum movie catalog backend mapping movies to directors, genres and details over a relational store",
    )
)]
struct ApiDoc;

pub fn create_routes(db: DatabaseConnection) -> Router {
    // Swagger UI (stateless)
    let swagger_router: Router = SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into();

    let app_routes = Router::new()
        .route("/", get(home::root))
        .route(
            "/movie",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movie/{id}",
            get(movies::get_movie)
                .patch(movies::update_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/director",
            get(directors::list_directors).post(directors::create_director),
        )
        .route(
            "/director/{id}",
            get(directors::get_director)
                .patch(directors::update_director)
                .delete(directors::delete_director),
        )
        .route(
            "/genre",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/genre/{id}",
            get(genres::get_genre)
                .patch(genres::update_genre)
                .delete(genres::delete_genre),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(db));

    // Merge Swagger UI (which has no state) with the rest
    Router::new().merge(swagger_router).merge(app_routes)
}
