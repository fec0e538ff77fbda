//! Survey ingestion pipeline and notification service for the Linkize
//! business/WhatsApp-usage questionnaire.
//!
//! The pipeline collects id-keyed answers, flattens them onto the fixed
//! storage columns, persists the record through the Supabase REST gateway
//! and, when the respondent opted in, sends a thank-you message over the
//! channel matching the contact they left (email or WhatsApp). The same
//! binary hosts the two notification endpoints the original deployment ran
//! as serverless functions.

use std::time::Duration;

use axum::{
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post},
    Router,
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

pub mod catalog;
pub mod config;
pub mod contact;
pub mod error;
pub mod notify;
pub mod record;
pub mod routes;
pub mod state;
pub mod storage;
pub mod submit;

use routes::{questions_handler, send_email_handler, send_whatsapp_handler, submit_handler};
use state::AppState;

pub async fn start_server() -> Result<(), String> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new()?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/questions", get(questions_handler))
        .route("/submit", post(submit_handler))
        .route("/send-email", post(send_email_handler))
        .route("/send-whatsapp", post(send_whatsapp_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| format!("Unable to bind {address}: {e}"))?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {e}"))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
