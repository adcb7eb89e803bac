use actix_cors::Cors;
use actix_web::{App, HttpServer};
use anyhow::Context;
use contractdesk::app::{self, AppServices};
use contractdesk::config::{Config, LogFormat};
use contractdesk::middleware::RequestId;
use tracing_actix_web::TracingLogger;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("contractdesk={},actix_web=info", config.app.log_level).into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.app.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;

    init_tracing(&config);

    tracing::info!("Starting contractdesk");
    tracing::info!("Environment: {}", config.app.env);
    tracing::info!("Server binding to: {}", config.server.bind_address());

    let services = AppServices::build(&config.database)
        .await
        .context("Failed to initialize storage")?;

    tracing::info!(
        backend = ?services.storage.backend(),
        "Storage initialized ({} pooled connections)",
        config.database.pool_size
    );

    let development = config.app.is_development();
    let bind_address = config.server.bind_address();
    let server = HttpServer::new(move || {
        let cors = if development {
            Cors::permissive()
        } else {
            Cors::default()
        };

        let services = services.clone();
        App::new()
            .wrap(cors)
            .wrap(RequestId)
            .wrap(TracingLogger::default())
            .configure(move |cfg| app::configure(&services, cfg))
    })
    .workers(config.server.workers)
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    tracing::info!("Server started at http://{}", bind_address);

    server.await?;
    Ok(())
}
