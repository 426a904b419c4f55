use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trolley::{api, auth::jwt::AuthService, db::Store, utils::config::Config, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "trolley=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config =
        Config::from_env().map_err(|e| anyhow::anyhow!("failed to load configuration: {}", e))?;

    let store = Store::open(&config.database.path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to open database: {}", e))?;

    let auth = AuthService::new(config.auth.jwt_secret.clone(), config.auth.token_ttl);

    let addr = format!("{}:{}", config.server.host, config.server.port);

    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(store),
        auth: Arc::new(auth),
    };

    let app = api::routes::create_router(state);

    tracing::info!(%addr, "trolley server listening");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
