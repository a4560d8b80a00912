//! TaskHub Server — project and task management backend.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing_subscriber::{EnvFilter, fmt};

use taskhub_api::state::AppState;
use taskhub_auth::jwt::{JwtDecoder, JwtEncoder};
use taskhub_auth::password::PasswordHasher;
use taskhub_core::config::AppConfig;
use taskhub_core::error::AppError;
use taskhub_core::types::OrderKeyGenerator;
use taskhub_service::comment::CommentService;
use taskhub_service::folder::FolderService;
use taskhub_service::group::GroupService;
use taskhub_service::hierarchy::{Cascade, TreeBuilder};
use taskhub_service::record::RecordService;
use taskhub_service::scope::AccessScope;
use taskhub_service::task::TaskService;
use taskhub_service::user::UserService;
use taskhub_store::{FolderStore, GroupStore, LogStore, RecordStore, TaskStore, UserStore};
use taskhub_worker::queue::OutboundQueue;
use taskhub_worker::runner::DeliveryRunner;
use taskhub_worker::transport::HttpTransport;

#[tokio::main]
async fn main() {
    let env = std::env::var("TASKHUB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting TaskHub v{}", env!("CARGO_PKG_VERSION"));

    // ── Stores ───────────────────────────────────────────────────
    let folders = Arc::new(FolderStore::new());
    let tasks = Arc::new(TaskStore::new());
    let logs = Arc::new(LogStore::new());
    let users = Arc::new(UserStore::new());
    let groups = Arc::new(GroupStore::new());
    let records = Arc::new(RecordStore::new());

    // ── Auth ─────────────────────────────────────────────────────
    let password_hasher = Arc::new(PasswordHasher::new());
    let jwt_encoder = Arc::new(JwtEncoder::new(&config.auth));
    let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));

    // ── Engines ──────────────────────────────────────────────────
    let order_keys = Arc::new(OrderKeyGenerator::new());
    let tree = Arc::new(TreeBuilder::new(Arc::clone(&folders), Arc::clone(&tasks)));
    let cascade = Arc::new(Cascade::new(
        Arc::clone(&folders),
        Arc::clone(&tasks),
        Arc::clone(&logs),
    ));
    let scope = Arc::new(AccessScope::new(Arc::clone(&folders), Arc::clone(&groups)));

    // ── Outbound delivery worker ─────────────────────────────────
    let (queue, outbound_rx) = OutboundQueue::new(config.worker.queue_capacity);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let worker_handle = if config.worker.enabled {
        tracing::info!("Starting delivery worker...");
        let transport = Arc::new(HttpTransport::new(
            config.mail.delivery_endpoint.clone(),
            Duration::from_secs(config.worker.request_timeout_seconds),
        )?);
        let runner = DeliveryRunner::new(outbound_rx, transport, shutdown_rx.clone());
        Some(tokio::spawn(runner.run()))
    } else {
        tracing::info!("Delivery worker disabled");
        None
    };

    // ── Services ─────────────────────────────────────────────────
    let folder_service = Arc::new(FolderService::new(
        Arc::clone(&folders),
        Arc::clone(&users),
        Arc::clone(&scope),
        Arc::clone(&tree),
        Arc::clone(&cascade),
        Arc::clone(&order_keys),
    ));
    let task_service = Arc::new(TaskService::new(
        Arc::clone(&tasks),
        Arc::clone(&folders),
        Arc::clone(&logs),
        Arc::clone(&tree),
        Arc::clone(&cascade),
        Arc::clone(&order_keys),
    ));
    let comment_service = Arc::new(CommentService::new(
        Arc::clone(&logs),
        Arc::clone(&tasks),
        Arc::clone(&folders),
        Arc::clone(&users),
        Arc::clone(&tree),
        queue.clone(),
    ));
    let user_service = Arc::new(UserService::new(
        Arc::clone(&users),
        Arc::clone(&folders),
        Arc::clone(&groups),
        Arc::clone(&password_hasher),
        Arc::clone(&jwt_encoder),
        queue.clone(),
        config.mail.clone(),
        Arc::clone(&order_keys),
    ));
    let group_service = Arc::new(GroupService::new(Arc::clone(&groups), Arc::clone(&users)));
    let record_service = Arc::new(RecordService::new(Arc::clone(&records), Arc::clone(&tasks)));

    // ── HTTP server ──────────────────────────────────────────────
    let app_state = AppState {
        config: Arc::new(config.clone()),
        jwt_decoder,
        folder_service,
        task_service,
        comment_service,
        user_service,
        group_service,
        record_service,
    };

    let app = taskhub_api::router::build_router(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("TaskHub server listening on {addr}");

    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received, starting graceful shutdown...");
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    if let Some(handle) = worker_handle {
        let _ = tokio::time::timeout(Duration::from_secs(10), handle).await;
    }

    tracing::info!("TaskHub server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
