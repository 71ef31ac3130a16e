use anyhow::Context;

use leafscan_api::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    leafscan_observability::init();

    let config = ServerConfig::from_env();
    let services = leafscan_api::app::build_services(&config).await?;
    let app = leafscan_api::app::build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on http://{}/", listener.local_addr()?);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
