//! cheatsheeter - A small HTTP backend storing cheat sheets as YAML files
//!
//! One YAML file per cheat sheet lives in a single data directory, which is
//! the only copy of state. The HTTP layer maps CRUD verbs onto that store.

pub mod cli;
pub mod document_store;
pub mod http_server;
pub mod observability;
