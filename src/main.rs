//! Server binary: reads settings, prepares the store, serves the API.

use foo_service::{
    app, ensure_database_exists, ensure_tables, Alerts, AppState, FooRepository, InMemoryFooRepository,
    PgFooRepository, Settings,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("foo_service=info")),
        )
        .init();

    let foos: Arc<dyn FooRepository> = if settings.uses_memory_store() {
        tracing::warn!("DATABASE_URL=memory: records are kept in memory only");
        Arc::new(InMemoryFooRepository::new())
    } else {
        ensure_database_exists(&settings.database_url).await?;
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;
        ensure_tables(&pool).await?;
        Arc::new(PgFooRepository::new(pool))
    };

    let state = AppState::new(foos, Alerts::new(&settings.app_name)?);
    let router = app(state, settings.body_limit_bytes);

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, router).await?;
    Ok(())
}
