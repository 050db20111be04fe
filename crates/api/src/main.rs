use anyhow::Context;

use fruitstand_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;
    let log_format = fruitstand_api::app::log_format(&config).context("invalid LOG_FORMAT")?;
    fruitstand_observability::init(log_format);

    let app = fruitstand_api::app::build_app(&config)
        .await
        .context("failed to initialize fruit storage")?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
