//! SeaORM implementation of ReservationRepository

use async_trait::async_trait;
use chrono::NaiveDate;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::domain::{
    DomainError, DomainResult, PaymentMode, Reservation, ReservationRepository, ReservationStatus,
    RoomSegment,
};
use crate::infrastructure::database::entities::reservation;

pub struct SeaOrmReservationRepository {
    db: DatabaseConnection,
}

impl SeaOrmReservationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn model_to_domain(m: reservation::Model) -> DomainResult<Reservation> {
    let status = ReservationStatus::from_str(&m.status)
        .ok_or_else(|| DomainError::Storage(format!("unknown reservation status: {}", m.status)))?;
    let payment_mode = PaymentMode::from_str(&m.payment_mode).ok_or_else(|| {
        DomainError::Storage(format!("unknown payment mode: {}", m.payment_mode))
    })?;
    let room_segment = RoomSegment::from_str(&m.room_segment).ok_or_else(|| {
        DomainError::Storage(format!("unknown room segment: {}", m.room_segment))
    })?;

    Ok(Reservation {
        id: Some(m.id),
        customer_name: m.customer_name,
        room_number: m.room_number,
        start_date: m.start_date,
        end_date: m.end_date,
        room_segment,
        payment_mode,
        payment_reference: m.payment_reference,
        status,
        creation_date: m.creation_date,
    })
}

fn db_err(e: sea_orm::DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

// ── ReservationRepository impl ──────────────────────────────────

#[async_trait]
impl ReservationRepository for SeaOrmReservationRepository {
    async fn save(&self, r: Reservation) -> DomainResult<Reservation> {
        debug!("Saving reservation for room {}", r.room_number);

        let model = reservation::ActiveModel {
            id: sea_orm::ActiveValue::NotSet,
            customer_name: Set(r.customer_name),
            room_number: Set(r.room_number),
            start_date: Set(r.start_date),
            end_date: Set(r.end_date),
            room_segment: Set(r.room_segment.as_str().to_string()),
            payment_mode: Set(r.payment_mode.as_str().to_string()),
            payment_reference: Set(r.payment_reference),
            status: Set(r.status.as_str().to_string()),
            creation_date: Set(r.creation_date),
        };
        let inserted = model.insert(&self.db).await.map_err(db_err)?;
        model_to_domain(inserted)
    }

    async fn find_by_id(&self, id: i64) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_payment_reference(
        &self,
        reference: &str,
    ) -> DomainResult<Option<Reservation>> {
        let model = reservation::Entity::find()
            .filter(reservation::Column::PaymentReference.eq(reference))
            .one(&self.db)
            .await
            .map_err(db_err)?;
        model.map(model_to_domain).transpose()
    }

    async fn find_by_status_created_on_or_before(
        &self,
        status: ReservationStatus,
        cutoff: NaiveDate,
    ) -> DomainResult<Vec<Reservation>> {
        let models = reservation::Entity::find()
            .filter(reservation::Column::Status.eq(status.as_str()))
            .filter(reservation::Column::CreationDate.lte(cutoff))
            .order_by_asc(reservation::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        models.into_iter().map(model_to_domain).collect()
    }

    async fn transition_status(
        &self,
        id: i64,
        from: ReservationStatus,
        to: ReservationStatus,
    ) -> DomainResult<bool> {
        debug!("Transitioning reservation {}: {} -> {}", id, from, to);

        // Conditional update filtered on the current status; a concurrent
        // writer that already moved the record leaves rows_affected at 0.
        let result = reservation::Entity::update_many()
            .col_expr(reservation::Column::Status, Expr::value(to.as_str()))
            .filter(reservation::Column::Id.eq(id))
            .filter(reservation::Column::Status.eq(from.as_str()))
            .exec(&self.db)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected > 0)
    }
}
