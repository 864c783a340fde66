use gigboard_db::AppState;
use gigboard_server::config::ServerConfig;
use sea_orm_migration::MigratorTrait;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Database connection
    let db_config = gigboard_db::DatabaseConfig::from_env();
    tracing::info!("connecting to database...");
    let db = gigboard_db::connect(&db_config)
        .await
        .expect("failed to connect to database");

    // Run migrations
    tracing::info!("running database migrations...");
    gigboard_migration::Migrator::up(&db, None)
        .await
        .expect("failed to run migrations");
    tracing::info!("migrations complete");

    let config = ServerConfig::from_env();
    tracing::info!(delete_policy = %config.delete_policy, "catalog delete policy");

    let state = Arc::new(AppState {
        db,
        delete_policy: config.delete_policy,
    });

    let app = gigboard_server::app(state);

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .expect("failed to bind listen address");
    tracing::info!(addr = %config.bind, "server started");

    axum::serve(listener, app)
        .await
        .expect("server error");
}
