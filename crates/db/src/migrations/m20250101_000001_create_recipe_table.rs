//! Create recipe table.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Recipe::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Recipe::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Recipe::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Recipe::Ingredients).text().not_null())
                    .col(ColumnDef::new(Recipe::Instructions).text().not_null())
                    .col(ColumnDef::new(Recipe::PrepTime).string_len(128).not_null())
                    .col(ColumnDef::new(Recipe::Servings).string_len(128).not_null())
                    .col(ColumnDef::new(Recipe::PersonalNote).text().null())
                    .col(ColumnDef::new(Recipe::UniqueLink).string_len(256).not_null())
                    .col(
                        ColumnDef::new(Recipe::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_unique_link")
                    .table(Recipe::Table)
                    .col(Recipe::UniqueLink)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_recipe_created_at")
                    .table(Recipe::Table)
                    .col(Recipe::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Recipe::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub(super) enum Recipe {
    Table,
    Id,
    Title,
    Ingredients,
    Instructions,
    PrepTime,
    Servings,
    PersonalNote,
    UniqueLink,
    CreatedAt,
}
