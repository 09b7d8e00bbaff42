//! Configuration file support

pub mod file_config;
pub mod loader;

pub use file_config::{FileConfig, FileCouncilConfig, FileOpenRouterConfig, FileStorageConfig};
pub use loader::ConfigLoader;
