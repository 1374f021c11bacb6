//! Bridge between the egui shell and the session workspace crates.
//! This must remain the only shell-facing boundary for session operations.

use std::sync::Arc;

use stardrift_session_adapters::{AgentAdapterConfig, FreighterAgentAdapter, SystemClockAdapter};
use stardrift_session_core::{
    AccountId, CommandResult, GameCommand, GameConfig, SessionError, SessionOrchestrator,
    WalletSession,
};

type GameOrchestrator = SessionOrchestrator<FreighterAgentAdapter, SystemClockAdapter>;

#[derive(Clone)]
pub struct SessionBridge {
    orchestrator: Arc<GameOrchestrator>,
}

impl Default for SessionBridge {
    fn default() -> Self {
        Self {
            orchestrator: Arc::new(GameOrchestrator::new(
                FreighterAgentAdapter::with_config(AgentAdapterConfig::from_env()),
                SystemClockAdapter,
                GameConfig::default(),
            )),
        }
    }
}

impl SessionBridge {
    pub fn config(&self) -> &GameConfig {
        self.orchestrator.config()
    }

    pub fn connect(&self) -> Result<CommandResult, SessionError> {
        self.orchestrator.connect()
    }

    pub fn disconnect(&self) -> Result<CommandResult, SessionError> {
        self.orchestrator.disconnect()
    }

    pub fn session(&self) -> Result<WalletSession, SessionError> {
        self.orchestrator.session()
    }

    pub fn current_address(&self) -> Result<Option<AccountId>, SessionError> {
        self.orchestrator.current_address()
    }

    pub fn dispatch(&self, command: GameCommand) -> Result<CommandResult, SessionError> {
        self.orchestrator.handle(command)
    }
}
