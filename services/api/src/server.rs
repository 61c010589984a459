use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use tracing::info;

use crate::cli::ServeArgs;
use crate::infra::{reference_service, AppState, InMemoryFragmentStore};
use crate::routes::with_framework_routes;
use ladder::config::AppConfig;
use ladder::error::AppError;
use ladder::telemetry;

pub(crate) async fn run(args: ServeArgs) -> Result<(), AppError> {
    let config = load_config(args)?;
    telemetry::init(&config.telemetry)?;

    let readiness = Arc::new(AtomicBool::new(false));
    let (metric_layer, metric_handle) = PrometheusMetricLayer::pair();

    let store = Arc::new(InMemoryFragmentStore::default());
    let session = Arc::new(Mutex::new(reference_service(store)));

    let app = with_framework_routes(session)
        .layer(Extension(AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(metric_handle),
        }))
        .layer(metric_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness.store(true, Ordering::Release);

    info!(environment = ?config.environment, %addr, "ladder service listening");

    axum::serve(listener, app).await?;
    Ok(())
}

fn load_config(mut args: ServeArgs) -> Result<AppConfig, AppError> {
    let mut config = AppConfig::load()?;
    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    Ok(config)
}
