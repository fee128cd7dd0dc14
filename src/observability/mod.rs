//! Observability infrastructure for the Mailgun client.
//!
//! Provides request spans and logging helpers that keep secrets and
//! recipient addresses out of log output.

pub mod logging;
pub mod tracing_utils;

pub use logging::*;
pub use tracing_utils::*;
