//! Infrastructure layer for llm-council
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod auth;
pub mod config;
pub mod providers;
pub mod storage;

// Re-export commonly used types
pub use auth::InMemorySessionStore;
pub use config::{ConfigLoader, FileConfig, FileCouncilConfig, FileOpenRouterConfig};
pub use providers::OpenRouterGateway;
pub use storage::FileConversationStore;
