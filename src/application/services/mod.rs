pub mod overdue_sweep;
pub mod reservation;

pub use overdue_sweep::start_overdue_cancellation_task;
pub use reservation::{CreateReservation, ReservationService, OVERDUE_AFTER_DAYS};
