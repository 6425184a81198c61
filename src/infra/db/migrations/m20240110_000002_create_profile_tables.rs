//! Migration: Create provider_details, client_details, and favorites tables.

use sea_orm_migration::prelude::*;

use super::m20240110_000001_create_accounts_table::Accounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProviderDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ProviderDetails::AccountId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ProviderDetails::Bio).text().not_null())
                    .col(
                        ColumnDef::new(ProviderDetails::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderDetails::LicenseNumber)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderDetails::Specialty)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(ProviderDetails::IsActivated)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(ProviderDetails::Line1).string().not_null())
                    .col(ColumnDef::new(ProviderDetails::Line2).string().null())
                    .col(ColumnDef::new(ProviderDetails::City).string().not_null())
                    .col(ColumnDef::new(ProviderDetails::State).string().not_null())
                    .col(ColumnDef::new(ProviderDetails::Pincode).string().not_null())
                    .col(ColumnDef::new(ProviderDetails::Picture).string().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_provider_details_account")
                            .from(ProviderDetails::Table, ProviderDetails::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ClientDetails::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClientDetails::AccountId)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ClientDetails::PhoneNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ClientDetails::Bio).text().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_client_details_account")
                            .from(ClientDetails::Table, ClientDetails::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Favorites::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Favorites::AccountId).uuid().not_null())
                    .col(ColumnDef::new(Favorites::FavoriteId).uuid().not_null())
                    .primary_key(
                        Index::create()
                            .col(Favorites::AccountId)
                            .col(Favorites::FavoriteId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_account")
                            .from(Favorites::Table, Favorites::AccountId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_favorites_favorite")
                            .from(Favorites::Table, Favorites::FavoriteId)
                            .to(Accounts::Table, Accounts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Favorites::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClientDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ProviderDetails::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ProviderDetails {
    Table,
    AccountId,
    Bio,
    PhoneNumber,
    LicenseNumber,
    Specialty,
    IsActivated,
    Line1,
    Line2,
    City,
    State,
    Pincode,
    Picture,
}

#[derive(Iden)]
enum ClientDetails {
    Table,
    AccountId,
    PhoneNumber,
    Bio,
}

#[derive(Iden)]
enum Favorites {
    Table,
    AccountId,
    FavoriteId,
}
