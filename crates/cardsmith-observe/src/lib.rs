//! Observability setup for Cardsmith: structured logging and optional
//! OpenTelemetry trace export.

pub mod tracing_setup;
