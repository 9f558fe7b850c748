//! Configuration loading
//!
//! Builds a validated [`baasic_domain::ClientConfig`] from environment
//! variables, a `.env` file, or a JSON/TOML file.

pub mod loader;

// Re-export commonly used items
pub use loader::{load, load_from_env, load_from_file, probe_config_paths};
