use serde::{Deserialize, Serialize};

use crate::ports::SessionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionStatus {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Failed,
}

impl SessionStatus {
    pub fn is_connected(self) -> bool {
        self == SessionStatus::Connected
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    ConnectStart,
    ConnectSuccess,
    ConnectFailure,
    Disconnect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateTransition {
    pub from: SessionStatus,
    pub to: SessionStatus,
    pub reason: &'static str,
}

pub fn session_transition(
    from: SessionStatus,
    action: SessionAction,
) -> Result<(SessionStatus, StateTransition), SessionError> {
    use SessionAction as A;
    use SessionStatus as S;

    let (to, reason) = match (from, action) {
        (S::Disconnected | S::Failed, A::ConnectStart) => (S::Connecting, "connect_requested"),
        (S::Connecting, A::ConnectStart) => {
            return Err(SessionError::Conflict(
                "a connect request is already in flight".to_owned(),
            ))
        }
        (S::Connected, A::ConnectStart) => {
            return Err(SessionError::Conflict(
                "session is already connected".to_owned(),
            ))
        }
        (S::Connecting, A::ConnectSuccess) => (S::Connected, "agent_attested_address"),
        (S::Connecting, A::ConnectFailure) => (S::Failed, "agent_request_failed"),
        // Disconnect is local-only and always succeeds, including as a no-op.
        (_, A::Disconnect) => (S::Disconnected, "disconnected_locally"),
        (from, action) => {
            return Err(SessionError::Validation(format!(
                "illegal session transition: {from:?} via {action:?}"
            )))
        }
    };

    Ok((to, StateTransition { from, to, reason }))
}
