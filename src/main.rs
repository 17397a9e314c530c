mod config;
mod entities;
mod error;
mod routes;
mod services;

use migration::{Migrator, MigratorTrait};
use routes::create_routes;
use sea_orm::Database;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    let config = config::get_config();

    let db = Database::connect(config.database_url.as_str())
        .await
        .expect("Failed to connect to database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    // build our application using the routes module
    let app = create_routes(db);

    // run our app with hyper
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap();
    println!("Listening on {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.unwrap();
}
