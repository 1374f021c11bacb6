#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuntimeProfile {
    #[default]
    Dev,
    Production,
}

#[derive(Debug, Clone)]
pub struct AgentAdapterConfig {
    pub runtime_profile: RuntimeProfile,
    pub agent_bridge_url: Option<String>,
    pub agent_timeout_ms: u64,
}

impl Default for AgentAdapterConfig {
    fn default() -> Self {
        Self {
            runtime_profile: RuntimeProfile::default(),
            agent_bridge_url: None,
            agent_timeout_ms: 15_000,
        }
    }
}

impl AgentAdapterConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(profile) = std::env::var("STARDRIFT_RUNTIME_PROFILE") {
            if profile.eq_ignore_ascii_case("production") {
                config.runtime_profile = RuntimeProfile::Production;
            }
        }
        if let Ok(url) = std::env::var("STARDRIFT_AGENT_BRIDGE_URL") {
            if !url.trim().is_empty() {
                config.agent_bridge_url = Some(url);
            }
        }
        if let Ok(raw) = std::env::var("STARDRIFT_AGENT_TIMEOUT_MS") {
            if let Ok(timeout) = raw.parse() {
                config.agent_timeout_ms = timeout;
            }
        }
        config
    }

    /// Production refuses to fall back to the deterministic test agent.
    pub fn strict_runtime_required(&self) -> bool {
        self.runtime_profile == RuntimeProfile::Production
    }
}
