//! Initial schema: clients, staff, catalog, products, schedules, transactions.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Contacts::Table)
                    .if_not_exists()
                    .col(pk(Contacts::Id))
                    .col(ColumnDef::new(Contacts::Name).string_len(1000).not_null())
                    .col(ColumnDef::new(Contacts::Phone).string_len(20).not_null())
                    .col(ColumnDef::new(Contacts::Address).text().not_null())
                    .col(ColumnDef::new(Contacts::PassportSeries).string_len(10).not_null())
                    .col(ColumnDef::new(Contacts::PassportNumber).string_len(10).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Clients::Table)
                    .if_not_exists()
                    .col(pk(Clients::Id))
                    .col(ColumnDef::new(Clients::ContactId).integer().not_null().unique_key())
                    .col(ColumnDef::new(Clients::Salary).decimal_len(12, 2).null())
                    .col(ColumnDef::new(Clients::WorkPlace).string_len(255).null())
                    .col(ColumnDef::new(Clients::BirthDate).date().null())
                    .col(ColumnDef::new(Clients::Gender).string_len(1).null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_clients_contact")
                            .from(Clients::Table, Clients::ContactId)
                            .to(Contacts::Table, Contacts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(pk(Roles::Id))
                    .col(ColumnDef::new(Roles::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(RolePermissions::Table)
                    .if_not_exists()
                    .col(pk(RolePermissions::Id))
                    .col(ColumnDef::new(RolePermissions::RoleId).integer().not_null())
                    .col(ColumnDef::new(RolePermissions::Codename).string_len(100).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_role_permissions_role")
                            .from(RolePermissions::Table, RolePermissions::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_role_permissions_unique")
                    .table(RolePermissions::Table)
                    .col(RolePermissions::RoleId)
                    .col(RolePermissions::Codename)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Managers::Table)
                    .if_not_exists()
                    .col(pk(Managers::Id))
                    .col(ColumnDef::new(Managers::Username).string_len(150).not_null().unique_key())
                    .col(ColumnDef::new(Managers::PasswordHash).string_len(255).not_null())
                    .col(ColumnDef::new(Managers::FullName).string_len(1000).null())
                    .col(ColumnDef::new(Managers::Phone).string_len(20).null())
                    .col(ColumnDef::new(Managers::RoleId).integer().null())
                    .col(ColumnDef::new(Managers::IsSuperuser).boolean().not_null().default(false))
                    .col(ColumnDef::new(Managers::IsActive).boolean().not_null().default(true))
                    .col(
                        ColumnDef::new(Managers::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_managers_role")
                            .from(Managers::Table, Managers::RoleId)
                            .to(Roles::Table, Roles::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ProductTypes::Table)
                    .if_not_exists()
                    .col(pk(ProductTypes::Id))
                    .col(ColumnDef::new(ProductTypes::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(ProductTypes::Behavior)
                            .string_len(20)
                            .not_null()
                            .default("credit"),
                    )
                    .to_owned(),
            )
            .await?;

        for table in [
            StatusTable::ProductStatuses,
            StatusTable::PaymentStatuses,
            StatusTable::TransactionStatuses,
        ] {
            manager
                .create_table(
                    Table::create()
                        .table(table)
                        .if_not_exists()
                        .col(pk(StatusTable::Id))
                        .col(ColumnDef::new(StatusTable::Name).string_len(50).not_null().unique_key())
                        .to_owned(),
                )
                .await?;
        }

        manager
            .create_table(
                Table::create()
                    .table(Products::Table)
                    .if_not_exists()
                    .col(pk(Products::Id))
                    .col(ColumnDef::new(Products::ClientId).integer().not_null())
                    .col(ColumnDef::new(Products::ProductTypeId).integer().not_null())
                    .col(ColumnDef::new(Products::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Products::InterestRate).decimal_len(5, 2).not_null())
                    .col(ColumnDef::new(Products::Duration).integer().not_null())
                    .col(ColumnDef::new(Products::StatusId).integer().not_null())
                    .col(
                        ColumnDef::new(Products::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_client")
                            .from(Products::Table, Products::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_type")
                            .from(Products::Table, Products::ProductTypeId)
                            .to(ProductTypes::Table, ProductTypes::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_products_status")
                            .from(Products::Table, Products::StatusId)
                            .to(StatusTable::ProductStatuses, StatusTable::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TransactionTypes::Table)
                    .if_not_exists()
                    .col(pk(TransactionTypes::Id))
                    .col(ColumnDef::new(TransactionTypes::Name).string_len(50).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(pk(Transactions::Id))
                    .col(ColumnDef::new(Transactions::ClientId).integer().not_null())
                    .col(ColumnDef::new(Transactions::ProductId).integer().not_null())
                    .col(ColumnDef::new(Transactions::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(Transactions::TransactionTypeId).integer().null())
                    .col(
                        ColumnDef::new(Transactions::Date)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(Transactions::Approved).boolean().null())
                    .col(ColumnDef::new(Transactions::ApprovedBy).integer().null())
                    .col(ColumnDef::new(Transactions::StatusId).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_client")
                            .from(Transactions::Table, Transactions::ClientId)
                            .to(Clients::Table, Clients::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_product")
                            .from(Transactions::Table, Transactions::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_type")
                            .from(Transactions::Table, Transactions::TransactionTypeId)
                            .to(TransactionTypes::Table, TransactionTypes::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_approved_by")
                            .from(Transactions::Table, Transactions::ApprovedBy)
                            .to(Managers::Table, Managers::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_transactions_status")
                            .from(Transactions::Table, Transactions::StatusId)
                            .to(StatusTable::TransactionStatuses, StatusTable::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(PaymentSchedules::Table)
                    .if_not_exists()
                    .col(pk(PaymentSchedules::Id))
                    .col(ColumnDef::new(PaymentSchedules::ProductId).integer().not_null())
                    .col(ColumnDef::new(PaymentSchedules::Amount).decimal_len(12, 2).not_null())
                    .col(ColumnDef::new(PaymentSchedules::ScheduledDate).date().not_null())
                    .col(ColumnDef::new(PaymentSchedules::ActualDate).date().null())
                    .col(ColumnDef::new(PaymentSchedules::StatusId).integer().null())
                    .col(
                        ColumnDef::new(PaymentSchedules::TransactionId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_schedules_product")
                            .from(PaymentSchedules::Table, PaymentSchedules::ProductId)
                            .to(Products::Table, Products::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_schedules_status")
                            .from(PaymentSchedules::Table, PaymentSchedules::StatusId)
                            .to(StatusTable::PaymentStatuses, StatusTable::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_schedules_transaction")
                            .from(PaymentSchedules::Table, PaymentSchedules::TransactionId)
                            .to(Transactions::Table, Transactions::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payment_schedules_product_date")
                    .table(PaymentSchedules::Table)
                    .col(PaymentSchedules::ProductId)
                    .col(PaymentSchedules::ScheduledDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_transactions_pending")
                    .table(Transactions::Table)
                    .col(Transactions::Approved)
                    .col(Transactions::Date)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let tables: [TableRef; 13] = [
            PaymentSchedules::Table.into_table_ref(),
            Transactions::Table.into_table_ref(),
            TransactionTypes::Table.into_table_ref(),
            Products::Table.into_table_ref(),
            StatusTable::TransactionStatuses.into_table_ref(),
            StatusTable::PaymentStatuses.into_table_ref(),
            StatusTable::ProductStatuses.into_table_ref(),
            ProductTypes::Table.into_table_ref(),
            Managers::Table.into_table_ref(),
            RolePermissions::Table.into_table_ref(),
            Roles::Table.into_table_ref(),
            Clients::Table.into_table_ref(),
            Contacts::Table.into_table_ref(),
        ];
        for table in tables {
            manager
                .drop_table(Table::drop().table(table).if_exists().to_owned())
                .await?;
        }
        Ok(())
    }
}

/// Auto-increment integer primary key.
fn pk<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

#[derive(DeriveIden)]
enum Contacts {
    Table,
    Id,
    Name,
    Phone,
    Address,
    PassportSeries,
    PassportNumber,
}

#[derive(DeriveIden)]
enum Clients {
    Table,
    Id,
    ContactId,
    Salary,
    WorkPlace,
    BirthDate,
    Gender,
}

#[derive(DeriveIden)]
enum Roles {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum RolePermissions {
    Table,
    Id,
    RoleId,
    Codename,
}

#[derive(DeriveIden)]
enum Managers {
    Table,
    Id,
    Username,
    PasswordHash,
    FullName,
    Phone,
    RoleId,
    IsSuperuser,
    IsActive,
    CreatedAt,
}

#[derive(DeriveIden)]
enum ProductTypes {
    Table,
    Id,
    Name,
    Behavior,
}

/// The three status tables share one shape.
#[derive(DeriveIden, Clone, Copy)]
enum StatusTable {
    ProductStatuses,
    PaymentStatuses,
    TransactionStatuses,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Products {
    Table,
    Id,
    ClientId,
    ProductTypeId,
    Amount,
    InterestRate,
    Duration,
    StatusId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum TransactionTypes {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
enum Transactions {
    Table,
    Id,
    ClientId,
    ProductId,
    Amount,
    TransactionTypeId,
    Date,
    Approved,
    ApprovedBy,
    StatusId,
}

#[derive(DeriveIden)]
enum PaymentSchedules {
    Table,
    Id,
    ProductId,
    Amount,
    ScheduledDate,
    ActualDate,
    StatusId,
    TransactionId,
}
