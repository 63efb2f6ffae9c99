//! # HTTP Server Module
//!
//! Axum server exposing the user directory.
//!
//! # Endpoints
//!
//! - `GET /health` - Health check
//! - `GET /api/users` - Collection queries (list, stats, search, filter, limited)
//! - `POST /api/users` - Create a user
//! - `GET/PUT/DELETE /api/users/{id}` - Single-record operations

pub mod config;
pub mod observability_routes;
pub mod response;
pub mod server;
pub mod user_routes;

pub use config::HttpServerConfig;
pub use response::{Envelope, ErrorEnvelope};
pub use server::HttpServer;
pub use user_routes::{user_routes, DirectoryState};
