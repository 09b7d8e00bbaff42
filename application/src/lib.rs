//! Application layer for llm-council
//!
//! Use cases orchestrate the three-stage deliberation over ports; the
//! ports are implemented by infrastructure adapters and injected at the
//! composition root.

pub mod ports;
pub mod use_cases;

pub use ports::conversation_store::{ConversationStore, StoreError};
pub use ports::llm_gateway::{CompletionRequest, GatewayError, LlmGateway};
pub use ports::session_auth::SessionAuth;
pub use use_cases::generate_title::GenerateTitleUseCase;
pub use use_cases::run_council::{RunCouncilError, RunCouncilInput, RunCouncilUseCase};
pub use use_cases::send_message::{SendMessageError, SendMessageUseCase};
