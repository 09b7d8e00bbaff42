//! Model provider adapters

pub mod openrouter;

pub use openrouter::OpenRouterGateway;
