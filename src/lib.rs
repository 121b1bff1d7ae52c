//! Booking and bookkeeping API for a small beauty salon.
//!
//! The public booking endpoint sits behind an admission gate: a per-client
//! fixed-window rate limiter followed by cheap anti-spam heuristics reported
//! by the booking form. Admin endpoints manage bookings and purchases, and
//! `/api/finances` turns paid bookings into a monthly breakdown with the
//! progressive tax on card income.

use axum::{
    Router,
    routing::{get, put},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

pub mod client_ip;
pub mod config;
pub mod error;
pub mod finance;
pub mod gate;
pub mod handlers;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod rate_limit;
pub mod spam;
pub mod state;
pub mod store;
pub mod validation;

use config::Args;
use handlers::{
    create_purchase_handler, create_record_handler, delete_purchase_handler, delete_record_handler,
    finances_handler, get_record_handler, health_handler, list_purchases_handler,
    list_records_handler, metrics_handler, update_purchase_handler, update_record_handler,
};
use rate_limit::sweeper;
use state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/records", get(list_records_handler).post(create_record_handler))
        .route(
            "/api/records/{id}",
            get(get_record_handler)
                .put(update_record_handler)
                .delete(delete_record_handler),
        )
        .route("/api/purchases", get(list_purchases_handler).post(create_purchase_handler))
        .route(
            "/api/purchases/{id}",
            put(update_purchase_handler).delete(delete_purchase_handler),
        )
        .route("/api/finances", get(finances_handler))
        .with_state(state)
}

pub async fn start_server(args: Args) -> std::io::Result<()> {
    let state = AppState::from_args(&args);

    // spawn the background sweeper
    let limiter = Arc::clone(state.gate.limiter());
    tokio::spawn(sweeper(limiter, args.sweep_interval(), args.idle_ttl()));

    let app = router(state);

    let addr = format!("0.0.0.0:{}", args.port);
    let listener = TcpListener::bind(&addr).await?;

    info!("Salon gateway running on http://localhost:{}", args.port);
    info!(
        "Rate limit: {} bookings per {} seconds per client",
        args.rate_limit, args.rate_window
    );
    info!(
        "Tax: {:.0}% up to {:.2}, {:.0}% above",
        args.tax_rate_low * 100.0,
        args.tax_threshold,
        args.tax_rate_high * 100.0
    );
    match &args.notify_url {
        Some(url) => info!("New bookings notify {}", url),
        None => info!("Booking notifications disabled"),
    }

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
