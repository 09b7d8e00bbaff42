//! Session authentication port
//!
//! Cookie/session auth lives outside the deliberation core; the core
//! only ever asks whether a token is valid. Modeled as an injected
//! capability rather than a process-global session registry.

/// Validates session tokens issued by the outer shell
pub trait SessionAuth: Send + Sync {
    /// Whether the given session token is currently valid
    fn is_authenticated(&self, token: &str) -> bool;
}
