use api_versioning::api::{add_http_layers, create_api_registry};
use api_versioning::versioning::VersionConfig;

use axum::routing::get;
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3001";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api_versioning=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = VersionConfig::from_env()?;
    tracing::info!(
        default = %config.default_version(),
        header = %config.header_name(),
        versions = ?config.supported_versions(),
        "Loaded version configuration"
    );

    let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();

    let mut registry = create_api_registry(config)?;
    registry.merge(Router::new().route("/metrics", get(|| async move { metric_handle.render() })));

    let app = add_http_layers(registry.into_router()).layer(prometheus_layer);

    let bind_address =
        std::env::var("BIND_ADDRESS").unwrap_or_else(|_| DEFAULT_BIND_ADDRESS.to_string());
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;

    tracing::debug!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
