//! Lambda-facing adapters and handlers for the upload relay.
//!
//! This crate owns runtime integration details (environment configuration,
//! the webhook HTTP adapter and tracing setup) on top of the pure decoding
//! and formatting primitives in `upload_relay_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
