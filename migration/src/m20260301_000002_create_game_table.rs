use sea_orm_migration::prelude::*;

/// Creates the `game` table. Every game references one platform.
#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Game {
    Table,
    Id,
    CreatedAt,
    UpdatedAt,
    Name,
    Slug,
    PlatformId,
    Summary,
    Genre,
    ReleaseYear,
    CoverUrl,
}

#[derive(DeriveIden)]
enum Platform {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Game::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Game::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Game::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Game::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Game::Name).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Game::Slug)
                            .string_len(200)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Game::PlatformId).uuid().not_null())
                    .col(ColumnDef::new(Game::Summary).text().null())
                    .col(ColumnDef::new(Game::Genre).string_len(100).null())
                    .col(ColumnDef::new(Game::ReleaseYear).integer().null())
                    .col(ColumnDef::new(Game::CoverUrl).string_len(500).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_game_platform_id")
                            .from(Game::Table, Game::PlatformId)
                            .to(Platform::Table, Platform::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Game::Table).to_owned())
            .await
    }
}
