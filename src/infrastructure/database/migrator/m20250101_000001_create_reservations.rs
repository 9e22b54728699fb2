//! Create reservations table
//!
//! Stores room reservations with their payment mode, payment reference and
//! lifecycle status. The payment-reference index serves the bank-transfer
//! confirmation lookup; the status index serves the overdue sweep.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reservations::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Reservations::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Reservations::CustomerName)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::RoomNumber)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::StartDate).date().not_null())
                    .col(ColumnDef::new(Reservations::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Reservations::RoomSegment)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Reservations::PaymentMode)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Reservations::PaymentReference).string())
                    .col(
                        ColumnDef::new(Reservations::Status)
                            .string()
                            .not_null()
                            .default("PENDING_PAYMENT"),
                    )
                    .col(
                        ColumnDef::new(Reservations::CreationDate)
                            .date()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_payment_reference")
                    .table(Reservations::Table)
                    .col(Reservations::PaymentReference)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reservations_status")
                    .table(Reservations::Table)
                    .col(Reservations::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reservations::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Reservations {
    Table,
    Id,
    CustomerName,
    RoomNumber,
    StartDate,
    EndDate,
    RoomSegment,
    PaymentMode,
    PaymentReference,
    Status,
    CreationDate,
}
