use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Director::Directors)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Director::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Director::Name).string().not_null())
                    .col(ColumnDef::new(Director::Dob).date().not_null())
                    .col(ColumnDef::new(Director::Nationality).string().not_null())
                    .col(ColumnDef::new(Director::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Director::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Director::Directors).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Director {
    Directors,
    Id,
    Name,
    Dob,
    Nationality,
    CreatedAt,
    UpdatedAt,
}
