pub use sea_orm_migration::prelude::*;

mod m20250601_000001_create_directors_table;
mod m20250601_000002_create_genres_table;
mod m20250601_000003_create_movie_details_table;
mod m20250601_000004_create_movies_table;
mod m20250601_000005_create_movie_genres_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_directors_table::Migration),
            Box::new(m20250601_000002_create_genres_table::Migration),
            Box::new(m20250601_000003_create_movie_details_table::Migration),
            Box::new(m20250601_000004_create_movies_table::Migration),
            Box::new(m20250601_000005_create_movie_genres_table::Migration),
        ]
    }
}
