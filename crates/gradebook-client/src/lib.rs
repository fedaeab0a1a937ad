//! gradebook-client — access to the external records API.
//!
//! Implements `RecordsApi` over HTTP for the real system of record, loads
//! the application configuration, and provides an in-memory `MockApi` for
//! testing the store without a server.

pub mod config;
pub mod mock;
pub mod rest;

pub use config::{load_config, load_config_from, GradebookConfig};
pub use mock::MockApi;
pub use rest::RestClient;
