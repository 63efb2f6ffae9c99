//! rosterd - a small, self-hostable mock user directory HTTP service
//!
//! Serves a process-lifetime in-memory user collection over a JSON API:
//! collection queries behind an action selector, validated CRUD by id,
//! and a uniform response envelope.

pub mod cli;
pub mod directory;
pub mod http_server;
pub mod observability;
