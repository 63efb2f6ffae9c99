//! # Observability
//!
//! Structured logging for the server's operational events.

pub mod logger;

pub use logger::{Logger, Severity};
