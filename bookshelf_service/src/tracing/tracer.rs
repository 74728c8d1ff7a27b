use std::error::Error;

use opentelemetry::{KeyValue, global};
use opentelemetry_sdk::{Resource, propagation::TraceContextPropagator, trace::SdkTracerProvider};
use opentelemetry_stdout::SpanExporter;
use tracing_subscriber::{EnvFilter, fmt::format::Format, prelude::*};

use crate::config::{AppConfig, TracingKind};

/// Installs the global tracing subscriber.
pub struct Tracer;

impl Tracer {
    /// Installs the subscriber selected by `config.tracing.kind`.
    ///
    /// `RUST_LOG` takes precedence over the configured level.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter directives are invalid or a global
    /// subscriber is already set.
    pub fn install(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        match config.tracing.kind {
            TracingKind::Stdout => Self::install_stdout(config),
            TracingKind::Compact => Self::install_compact(config),
        }
    }

    /// Installs pretty stdout logging, and a global OpenTelemetry tracer
    /// provider with a stdout span exporter.
    ///
    /// The provider only receives spans created through the OpenTelemetry
    /// API. `tracing` spans go to the fmt layer, they are not bridged.
    ///
    /// # Errors
    ///
    /// Returns an error if tracer initialization fails.
    pub fn install_stdout(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        global::set_text_map_propagator(TraceContextPropagator::new());

        let mut resource = Resource::builder().with_service_name(config.distribution.name.clone());
        if let Some(version) = config.distribution.version.clone() {
            resource = resource.with_attribute(KeyValue::new("version", version));
        }

        let provider = SdkTracerProvider::builder()
            .with_resource(resource.build())
            .with_simple_exporter(SpanExporter::default())
            .build();
        global::set_tracer_provider(provider);

        let layer = tracing_subscriber::fmt::layer()
            .event_format(Format::default().pretty())
            .with_filter(Self::env_filter(config)?);

        tracing_subscriber::registry().with(layer).try_init()?;

        Ok(())
    }

    /// Installs compact single-line logging.
    ///
    /// # Errors
    ///
    /// Returns an error if tracer initialization fails.
    pub fn install_compact(config: &AppConfig) -> Result<(), Box<dyn Error + Send + Sync>> {
        let layer = tracing_subscriber::fmt::layer()
            .event_format(Format::default().compact())
            .with_filter(Self::env_filter(config)?);

        tracing_subscriber::registry().with(layer).try_init()?;

        Ok(())
    }

    fn env_filter(config: &AppConfig) -> Result<EnvFilter, Box<dyn Error + Send + Sync>> {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => Ok(filter),
            Err(_) => Ok(EnvFilter::try_new(&config.tracing.level)?),
        }
    }
}
