pub mod clock;
pub mod config;
pub mod freighter;

pub use clock::SystemClockAdapter;
pub use config::{AgentAdapterConfig, RuntimeProfile};
pub use freighter::FreighterAgentAdapter;
