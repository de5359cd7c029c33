// Library target exists for integration tests; the service ships as a binary.
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod models;
pub mod server;
