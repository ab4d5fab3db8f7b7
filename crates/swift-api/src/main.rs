use std::sync::Arc;

use swift_api::config::ApiConfig;
use swift_api::routes;
use swift_api::seed;
use swift_api::state::AppState;
use swift_db::MemoryStore;
use swift_service::{QuestionCatalog, ServiceConfig, SongQueryService};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let config = ApiConfig::from_env();

    let songs = seed::load_songs(&config.data_path).unwrap_or_else(|e| {
        eprintln!("failed to load {}: {e}", config.data_path.display());
        std::process::exit(1);
    });

    let store = MemoryStore::new();
    let count = store
        .insert_many(&config.collection, songs)
        .unwrap_or_else(|e| {
            eprintln!("failed to seed {}: {e}", config.collection);
            std::process::exit(1);
        });
    tracing::info!(collection = %config.collection, count, "store seeded");

    let catalog = QuestionCatalog::builtin();
    tracing::info!(questions = ?catalog.names(), "question catalog ready");

    let service_config = ServiceConfig {
        collection: config.collection.clone(),
        ..ServiceConfig::default()
    };
    let state = AppState {
        service: Arc::new(SongQueryService::new(
            Arc::new(store),
            Arc::new(catalog),
            service_config,
        )),
    };

    let app = routes::router().with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .unwrap_or_else(|e| {
            eprintln!("failed to bind {}: {e}", config.addr);
            std::process::exit(1);
        });

    tracing::info!("swift-api listening on {}", config.addr);
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "server error");
        std::process::exit(1);
    }
    tracing::info!("swift-api stopped");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c().await.ok();
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
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
