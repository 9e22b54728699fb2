//!
//! Room reservation service: REST API for creating reservations, Kafka
//! listener for bank-transfer payment updates, and a periodic sweep that
//! cancels overdue pending reservations.

use std::path::PathBuf;
use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::{error, info, warn};

use room_reservation::application::ports::CardPaymentVerifier;
use room_reservation::application::services::{
    start_overdue_cancellation_task, ReservationService,
};
use room_reservation::config::{default_config_path, AppConfig};
use room_reservation::domain::ReservationRepository;
use room_reservation::infrastructure::database::migrator::Migrator;
use room_reservation::infrastructure::messaging::start_payment_update_listener;
use room_reservation::infrastructure::{
    init_database, DatabaseConfig, HttpCardPaymentVerifier, SeaOrmReservationRepository,
};
use room_reservation::shared::shutdown::ShutdownCoordinator;
use room_reservation::create_api_router;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("RESERVATION_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let app_cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            // Initialize logging with configured level
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    info!("Starting Room Reservation Service...");

    // ── Database ───────────────────────────────────────────────
    let db_config = DatabaseConfig {
        url: app_cfg.database.url.clone(),
    };
    info!("Database: {}", db_config.url);

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return Err(e.into());
        }
    };

    info!("Running database migrations...");
    if let Err(e) = Migrator::up(&db, None).await {
        error!("Failed to run migrations: {}", e);
        return Err(e.into());
    }
    info!("Migrations completed");

    // ── Wire the lifecycle service ─────────────────────────────
    let repository: Arc<dyn ReservationRepository> =
        Arc::new(SeaOrmReservationRepository::new(db.clone()));
    let card_payments: Arc<dyn CardPaymentVerifier> = Arc::new(HttpCardPaymentVerifier::new(
        app_cfg.payments.card_service_url.clone(),
    )?);
    let service = Arc::new(ReservationService::new(repository, card_payments));

    // Initialize shutdown coordinator
    let shutdown = ShutdownCoordinator::new();
    let shutdown_signal = shutdown.signal();

    // Start listening for shutdown signals (SIGTERM, SIGINT)
    shutdown.start_signal_listener();

    // ── Background tasks ───────────────────────────────────────
    start_overdue_cancellation_task(
        service.clone(),
        shutdown_signal.clone(),
        app_cfg.sweep.interval_secs,
    );

    if app_cfg.messaging.enabled {
        start_payment_update_listener(
            service.clone(),
            shutdown_signal.clone(),
            app_cfg.messaging.brokers.clone(),
            app_cfg.messaging.topic.clone(),
            app_cfg.messaging.group_id.clone(),
        );
    } else {
        warn!("payment update listener disabled; bank-transfer reservations will stay pending");
    }

    // ── REST API server with graceful shutdown ─────────────────
    let api_router = create_api_router(service);
    let api_addr = app_cfg.server.address();
    let listener = tokio::net::TcpListener::bind(&api_addr).await?;
    info!("REST API server listening on http://{}", api_addr);
    info!("Swagger UI available at http://{}/docs/", api_addr);

    let api_shutdown = shutdown_signal.clone();
    axum::serve(listener, api_router)
        .with_graceful_shutdown(async move {
            api_shutdown.wait().await;
            info!("REST API server received shutdown signal");
        })
        .await?;

    // Perform final cleanup
    if let Err(e) = db.close().await {
        warn!("Error closing database connection: {}", e);
    } else {
        info!("Database connection closed");
    }

    info!("Room Reservation Service shutdown complete");
    Ok(())
}
