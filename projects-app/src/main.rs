//! # Projects Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the project use cases
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{
    Resource, metrics::SdkMeterProvider, propagation::TraceContextPropagator, trace as sdktrace,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use projects_hex::{ProjectService, inbound::HttpServer};
use projects_repo::build_repo;

fn init_tracer(
    endpoint: &str,
    service_name: &str,
) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer(service_name.to_string()), provider))
}

/// Installs the global meter provider read by the HTTP metrics layer.
fn init_meter(endpoint: &str, service_name: &str) -> anyhow::Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = SdkMeterProvider::builder()
        .with_periodic_exporter(exporter)
        .with_resource(
            Resource::builder()
                .with_service_name(service_name.to_string())
                .build(),
        )
        .build();

    global::set_meter_provider(provider.clone());
    Ok(provider)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    // OpenTelemetry export only when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| init_tracer(endpoint, &config.app_name))
        .transpose()?;
    let (telemetry, otel_provider) = match otel {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    // Must run before the router builds its metrics layer.
    let meter_provider = match (&config.otlp_endpoint, config.metrics_enabled) {
        (Some(endpoint), true) => {
            tracing::info!(endpoint = %endpoint, "exporting HTTP metrics");
            Some(init_meter(endpoint, &config.app_name)?)
        }
        _ => None,
    };

    tracing::info!(app = %config.app_name, "Starting projects server on port {}", config.port);
    tracing::info!("Using database: {}", config.database_url);

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url, config.repo_timeout).await?;
    tracing::info!(backend = repo.backend(), timeout = ?config.repo_timeout, "repository ready");

    let service = ProjectService::new(repo);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    let addr = format!("0.0.0.0:{}", config.port);

    server.run(&addr).await?;

    // Flush traces and metrics before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    if let Some(provider) = meter_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
