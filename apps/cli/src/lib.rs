// Export our modules for use in the binary and in tests
pub mod cli;
pub mod config;
pub mod logging;
pub mod render;
pub mod summary;

pub use config::AppConfig;
