//! Observability for the AirTech cart.
//!
//! This crate provides:
//! - `StructuredLogger` - Structured logging with component/page context
//! - `LogBuilder` - Fluent builder for entries with typed fields
//! - `LogLevel` / `LogFormat` - Filtering and output selection

mod logging;

pub use logging::*;
