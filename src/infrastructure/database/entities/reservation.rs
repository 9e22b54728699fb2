//! Reservation entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "reservations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub customer_name: String,
    pub room_number: String,

    pub start_date: Date,
    pub end_date: Date,

    /// Room size category: SMALL, MEDIUM, LARGE
    pub room_segment: String,

    /// Payment mode: CASH, CREDIT_CARD, BANK_TRANSFER
    pub payment_mode: String,

    #[sea_orm(nullable)]
    pub payment_reference: Option<String>,

    /// Reservation status: CONFIRMED, PENDING_PAYMENT, CANCELLED
    pub status: String,

    pub creation_date: Date,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
