//! # HTTP Server Module
//!
//! Axum server exposing the cheat sheet store as a JSON API.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/cheatsheets` - List cheat sheets
//! - `/api/cheatsheets/` - Create (name in body)
//! - `/api/cheatsheets/{name}` - Get, save, update, delete

pub mod cheatsheet_routes;
pub mod config;
pub mod observability_routes;
pub mod server;

pub use cheatsheet_routes::CheatSheetState;
pub use config::HttpServerConfig;
pub use server::{build_router, HttpServer};
