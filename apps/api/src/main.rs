use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

use keepnote_api::api::{self, AppState};
use keepnote_api::config::{AppConfig, StoreBackend};
use keepnote_api::infrastructure::{self, Repositories};

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("keepnote_api=info,tower_http=info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    let config = AppConfig::from_env().expect("Invalid configuration");
    if config.uses_default_secret() {
        tracing::warn!("JWT_SECRET not set, using development secret");
    }

    let repositories = match config.store {
        StoreBackend::Postgres => {
            tracing::info!("Connecting to database...");
            let pool = infrastructure::connect(&config.database_url, config.database_max_connections)
                .await
                .expect("Failed to connect to database");
            tracing::info!("Database connected successfully");
            Repositories::postgres(pool)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store, data will not persist");
            Repositories::in_memory()
        }
    };

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = api::router(AppState::new(repositories, &config))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    tracing::info!("Server listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("Failed to bind address");

    axum::serve(listener, app)
        .await
        .expect("Server failed");
}
