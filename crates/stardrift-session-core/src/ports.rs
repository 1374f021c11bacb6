use thiserror::Error;

use crate::domain::AccountId;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("signing agent unavailable: {0}")]
    AgentUnavailable(String),
    #[error("signing request rejected by the user")]
    UserRejected,
    #[error("not implemented: {0}")]
    NotImplemented(&'static str),
    #[error("no wallet session is connected")]
    NotConnected,
    #[error("conflicting operation: {0}")]
    Conflict(String),
    #[error("validation error: {0}")]
    Validation(String),
    #[error("transport error: {0}")]
    Transport(String),
}

/// The one operation exercised against the ambient signing agent. The agent
/// holds the key material; this boundary only ever sees the public identity.
pub trait SigningAgentPort {
    fn request_address(&self) -> Result<AccountId, SessionError>;
}

pub trait ClockPort {
    fn now_ms(&self) -> Result<u64, SessionError>;
}
