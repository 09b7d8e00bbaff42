//! Core value objects shared across the domain

pub mod error;
pub mod model;
pub mod prompt;

pub use error::DomainError;
pub use model::Model;
pub use prompt::UserPrompt;
