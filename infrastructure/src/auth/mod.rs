//! Session authentication adapters

pub mod session;

pub use session::InMemorySessionStore;
