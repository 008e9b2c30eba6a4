//! Mode routing
//!
//! - Server mode (HTTP server, default)
//! - Config mode (sample config generation)

pub mod config;
pub mod server;

pub use config::run_config_generate;
pub use server::run_server;
