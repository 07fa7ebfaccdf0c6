//! Initial schema: todos plus the guestbook tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Todo::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Todo::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Todo::CreatorId).uuid().not_null())
                    .col(ColumnDef::new(Todo::UpdaterId).uuid())
                    .col(ColumnDef::new(Todo::Name).text().not_null())
                    .col(ColumnDef::new(Todo::Key).text().not_null().unique_key())
                    .col(ColumnDef::new(Todo::IsActive).boolean().not_null())
                    .col(ColumnDef::new(Todo::Code).text().not_null().unique_key())
                    .col(ColumnDef::new(Todo::Description).text())
                    .col(
                        ColumnDef::new(Todo::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Todo::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Todo::DeletedAt).timestamp_with_time_zone())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(GuestUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GuestUser::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    // Guests are resolved by name on every signing, so the
                    // name must identify exactly one row.
                    .col(
                        ColumnDef::new(GuestUser::Username)
                            .text()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(GuestUser::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GuestUser::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ObjectMedia::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ObjectMedia::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ObjectMedia::CreatorId).uuid())
                    .col(ColumnDef::new(ObjectMedia::Name).text().not_null())
                    .col(ColumnDef::new(ObjectMedia::ObjectType).text().not_null())
                    .col(ColumnDef::new(ObjectMedia::FileType).text().not_null())
                    .col(ColumnDef::new(ObjectMedia::Url).text().not_null())
                    .col(ColumnDef::new(ObjectMedia::Size).big_integer().not_null())
                    .col(
                        ColumnDef::new(ObjectMedia::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ObjectMedia::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Comment::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Comment::ObjectId).uuid().not_null())
                    .col(ColumnDef::new(Comment::UserId).uuid().not_null())
                    .col(ColumnDef::new(Comment::Body).text().not_null())
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Comment::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_user")
                            .from(Comment::Table, Comment::UserId)
                            .to(GuestUser::Table, GuestUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comment_object")
                            .from(Comment::Table, Comment::ObjectId)
                            .to(ObjectMedia::Table, ObjectMedia::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(WeddingWish::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(WeddingWish::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(WeddingWish::UserId).uuid().not_null())
                    .col(ColumnDef::new(WeddingWish::Body).text().not_null())
                    .col(
                        ColumnDef::new(WeddingWish::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(WeddingWish::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_wedding_wish_user")
                            .from(WeddingWish::Table, WeddingWish::UserId)
                            .to(GuestUser::Table, GuestUser::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comment_created_at")
                    .table(Comment::Table)
                    .col(Comment::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_wedding_wish_created_at")
                    .table(WeddingWish::Table)
                    .col(WeddingWish::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(WeddingWish::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ObjectMedia::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(GuestUser::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Todo::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Todo {
    Table,
    Id,
    CreatorId,
    UpdaterId,
    Name,
    Key,
    IsActive,
    Code,
    Description,
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}

#[derive(DeriveIden)]
enum GuestUser {
    Table,
    Id,
    Username,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum ObjectMedia {
    Table,
    Id,
    CreatorId,
    Name,
    ObjectType,
    FileType,
    Url,
    Size,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Comment {
    Table,
    Id,
    ObjectId,
    UserId,
    Body,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum WeddingWish {
    Table,
    Id,
    UserId,
    Body,
    CreatedAt,
    UpdatedAt,
}
