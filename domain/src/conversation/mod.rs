//! Conversation entities persisted by the storage collaborator

pub mod entities;

pub use entities::{Conversation, Message};
