use portfolio_api::{app, config, database, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL and JWT_SECRET.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portfolio_api=info,tower_http=info".into()),
        )
        .init();

    let config = config::config();
    tracing::info!("starting portfolio API in {:?} mode", config.environment);

    if config.database.url.is_empty() {
        anyhow::bail!("DATABASE_URL is not set");
    }
    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET is not set");
    }

    let pool = database::connect(&config.database)?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app = app(AppState { db: pool });

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
