//! Background task that cancels overdue bank-transfer reservations.
//!
//! Runs in a tokio::spawn loop, invoking the daily sweep on every tick.
//! The production configuration ticks once per day; tests run it directly
//! through [`ReservationService::run_daily_sweep`].

use std::sync::Arc;

use chrono::Utc;
use tokio::time::Duration;
use tracing::{info, warn};

use crate::application::services::ReservationService;
use crate::shared::shutdown::ShutdownSignal;

/// Start the overdue-cancellation background task.
///
/// Every `sweep_interval_secs` the task cancels reservations that are still
/// `PENDING_PAYMENT` two days after their creation date.
pub fn start_overdue_cancellation_task(
    service: Arc<ReservationService>,
    shutdown: ShutdownSignal,
    sweep_interval_secs: u64,
) {
    tokio::spawn(async move {
        info!(
            sweep_interval = sweep_interval_secs,
            "overdue cancellation task started"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(sweep_interval_secs));
        // The first tick fires immediately; skip it so startup does not race migrations.
        interval.tick().await;

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    info!("running scheduled task to cancel overdue bank transfer reservations");
                    match service.run_daily_sweep(Utc::now().date_naive()).await {
                        Ok(checked) => {
                            info!(checked, "finished scheduled cancellation task");
                        }
                        Err(e) => {
                            warn!(error = %e, "overdue cancellation sweep error");
                        }
                    }
                }
                _ = shutdown.notified().wait() => {
                    info!("overdue cancellation task shutting down");
                    break;
                }
            }
        }

        info!("overdue cancellation task stopped");
    });
}
