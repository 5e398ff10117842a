use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use dotenv::dotenv;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use cardiopredict_api::api::create_application;
use cardiopredict_api::api::handlers::health::initialize_server_start_time;
use cardiopredict_model::artifacts::ModelArtifacts;

/// Application error type for the main function
///
/// This custom error type handles the specific errors that can occur
/// during server initialization and running.
#[derive(Debug)]
enum AppError {
    /// Error that occurs during server operations
    Server(std::io::Error),
    /// Error that occurs when parsing the port number
    PortParse(std::num::ParseIntError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Server(e) => write!(f, "Server error: {}", e),
            AppError::PortParse(e) => write!(f, "Port parsing error: {}", e),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Server(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::PortParse(err)
    }
}

/// The main entry point for the CardioPredict API server
///
/// This function:
/// 1. Initializes environment variables from .env file
/// 2. Sets up tracing for logging
/// 3. Loads the model artifacts (classifier, scaler, feature names)
/// 4. Creates and starts the Axum web application
/// 5. Handles graceful shutdown
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    if dotenv().is_err() {
        eprintln!("Warning: .env file not found or couldn't be read. Using environment variables.");
    }

    // Initialize tracing for structured logging
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_target(false)
                .with_ansi(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stdout),
        )
        .with(env_filter)
        .init();

    info!("🚀 Starting CardioPredict API server");

    // Load model artifacts once; the server still starts without them and
    // answers 503 on /predict until a classifier is available.
    let model_dir = std::env::var("MODEL_DIR").unwrap_or_else(|_| "models".to_string());
    let artifacts = Arc::new(ModelArtifacts::load(PathBuf::from(&model_dir)));
    if !artifacts.classifier_loaded() {
        warn!("No classifier loaded from {model_dir}; /predict will be unavailable");
    }

    // Initialize server start time for uptime reporting in health checks
    initialize_server_start_time();

    // Create the Axum application with all routes and middleware
    let app = create_application(artifacts);

    // Get the port from environment or use default 8000
    let port = std::env::var("PORT")
        .unwrap_or_else(|_| "8000".to_string())
        .parse::<u16>()
        .map_err(AppError::PortParse)?;

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Listening on {}", addr);

    // Create a TCP listener and bind to the address
    let listener = TcpListener::bind(addr).await.map_err(AppError::Server)?;

    // Serve the application with graceful shutdown support
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::Server)?;

    info!("Server shutdown complete");
    Ok(())
}

/// Sets up a signal handler for graceful shutdown
///
/// This function creates an async task that waits for either:
/// - CTRL+C signal
/// - SIGTERM (on Unix systems)
///
/// When either signal is received, the function returns and triggers
/// the graceful shutdown process.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutting down server...");
}
