//! Observability helpers for Botique.
//!
//! Owns tracing subscriber setup and the optional OpenTelemetry bridge so
//! the application layer only decides *whether* to trace, not *how*.

pub mod tracing_setup;
