use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Movie::Movies)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Movie::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Movie::Title).string().not_null())
                    .col(ColumnDef::new(Movie::DirectorId).integer().not_null())
                    .col(
                        ColumnDef::new(Movie::DetailId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Movie::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Movie::UpdatedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_director")
                            .from(Movie::Movies, Movie::DirectorId)
                            .to(Director::Directors, Director::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_movie_detail")
                            .from(Movie::Movies, Movie::DetailId)
                            .to(MovieDetail::MovieDetails, MovieDetail::Id),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Movie::Movies).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Movie {
    Movies,
    Id,
    Title,
    DirectorId,
    DetailId,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Director {
    Directors,
    Id,
}

#[derive(DeriveIden)]
enum MovieDetail {
    MovieDetails,
    Id,
}
