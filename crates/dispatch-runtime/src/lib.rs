//! `dispatch-runtime` – request orchestration and process telemetry.
//!
//! # Modules
//!
//! - [`dispatcher`] – [`Dispatcher`][dispatcher::Dispatcher]: runs
//!   fetch → enrich → select for one load request against a shared
//!   [`RobotSource`][dispatch_source::RobotSource].
//! - [`telemetry`] – [`init_tracing`][telemetry::init_tracing]:
//!   initialises the global `tracing` subscriber with an optional OTLP span
//!   exporter.  Set `OTEL_EXPORTER_OTLP_ENDPOINT` to enable live trace export.

pub mod dispatcher;
pub mod telemetry;

pub use dispatcher::Dispatcher;
pub use telemetry::{init_tracing, TracerProviderGuard};
