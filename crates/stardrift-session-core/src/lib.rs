pub mod config;
pub mod domain;
pub mod orchestrator;
pub mod ports;
pub mod state_machine;

pub use config::{ContractEndpoints, GameConfig, NetworkConfig, ResourceKind, ShipType};
pub use domain::{AccountId, TimestampMs, TransitionRecord, WalletSession};
pub use orchestrator::{command_kind, CommandResult, GameCommand, SessionOrchestrator};
pub use ports::{ClockPort, SessionError, SigningAgentPort};
pub use state_machine::{session_transition, SessionAction, SessionStatus, StateTransition};
