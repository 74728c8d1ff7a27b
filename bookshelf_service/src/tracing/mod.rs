//! Logging and tracing setup.

/// Subscriber and exporter installation.
pub mod tracer;
