use std::sync::Arc;

use nomado_api::{
    config::AppConfig,
    create_router, db,
    notifications::{DisabledMailer, Mailer, SmtpMailer},
    AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nomado_api=debug,tower_http=info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Nomado API - Starting...");

    let config = AppConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(&pool).await?;

    let mailer: Arc<dyn Mailer> = match &config.smtp {
        Some(smtp) => {
            tracing::info!("Sending email through {}:{}", smtp.host, smtp.port);
            Arc::new(SmtpMailer::new(smtp, config.frontend_url.clone())?)
        }
        None => {
            tracing::warn!("SMTP_HOST not set, outgoing email is disabled");
            Arc::new(DisabledMailer)
        }
    };

    let state = AppState::new(pool, &config, mailer)?;
    if !state.pricing.is_configured() {
        tracing::warn!("TRAVEL_PAYOUTS_API_KEY not set, pricing endpoints will fail");
    }

    let app = create_router(state);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Nomado API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
