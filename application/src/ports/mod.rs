//! Ports (interfaces) for external collaborators
//!
//! Adapters live in the infrastructure layer and are injected by the
//! composition root.

pub mod conversation_store;
pub mod llm_gateway;
pub mod session_auth;
