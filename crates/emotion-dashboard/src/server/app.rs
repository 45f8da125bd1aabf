use crate::server::{pages, routes, static_files};
use crate::state::DashboardState;
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tokio::signal;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Build the Axum application
pub fn build_app(state: DashboardState) -> Router {
    // CORS defaults to local origins; override only for explicit demo use.
    let allow_any_origin = std::env::var("EMOTION_DASHBOARD_ALLOW_ANY_ORIGIN")
        .ok()
        .is_some_and(|v| v == "1" || v.eq_ignore_ascii_case("true"));
    let cors = if allow_any_origin {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list([
                HeaderValue::from_static("http://localhost:8501"),
                HeaderValue::from_static("http://127.0.0.1:8501"),
            ]))
            .allow_methods(Any)
            .allow_headers(Any)
    };

    // API routes
    let api_routes = Router::new()
        // Health
        .route("/health", get(routes::health))
        // Classification
        .route("/classify", post(routes::classify))
        // History
        .route("/predictions", get(routes::list_predictions))
        .route("/stats/labels", get(routes::label_stats));

    let upload_limit = state.config.upload_limit_bytes;

    Router::new()
        // Pages
        .route("/", get(pages::home))
        .route(
            "/classify",
            get(pages::classify_form).post(pages::classify_submit),
        )
        .route("/csv", get(pages::csv_form).post(pages::csv_upload))
        .route("/pdf", get(pages::pdf_form).post(pages::pdf_upload))
        .route("/recent", get(pages::recent))
        .route("/alert", get(pages::alert_form).post(pages::alert_submit))
        .route("/credits", get(pages::credits))
        .route("/report", get(pages::download_report))
        // Machine endpoints
        .route("/metrics", get(routes::metrics))
        .nest("/api", api_routes)
        .route("/assets/*path", get(static_files::serve_asset))
        .fallback(routes::fallback)
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server until Ctrl+C or SIGTERM
pub async fn run_server(state: DashboardState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = build_app(state);

    info!("Starting emotion dashboard on {}", addr);
    info!("Open http://{} in your browser", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    let shutdown = async {
        shutdown_signal().await;
        warn!("Shutdown signal received, stopping server...");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Listen for shutdown signals (SIGTERM, SIGINT)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
