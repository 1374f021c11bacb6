use serde_json::Value;

use stardrift_session_core::{AccountId, SessionError, SigningAgentPort};

use crate::AgentAdapterConfig;

// Fixed key behind the deterministic dev-profile address.
const DETERMINISTIC_KEY: [u8; 32] = [
    0x10, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x01,
];

// JSON-RPC code the Freighter bridge uses when the user declines a prompt.
const RPC_USER_REJECTED: i64 = -4;

/// Signing-agent adapter for the Freighter browser extension, reached
/// through a local HTTP bridge. Without a configured bridge the adapter
/// falls back to a deterministic test identity in the dev profile, and is
/// disabled outright in production.
#[derive(Debug, Clone)]
pub struct FreighterAgentAdapter {
    mode: AgentMode,
}

#[derive(Debug, Clone)]
enum AgentMode {
    Disabled(String),
    Deterministic,
    Bridge(BridgeRuntime),
}

#[derive(Debug, Clone)]
struct BridgeRuntime {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl Default for FreighterAgentAdapter {
    fn default() -> Self {
        Self::with_config(AgentAdapterConfig::from_env())
    }
}

impl FreighterAgentAdapter {
    pub fn with_config(config: AgentAdapterConfig) -> Self {
        let mode = if let Some(ref base_url) = config.agent_bridge_url {
            let timeout = std::time::Duration::from_millis(config.agent_timeout_ms);
            match reqwest::blocking::Client::builder().timeout(timeout).build() {
                Ok(client) => AgentMode::Bridge(BridgeRuntime {
                    base_url: base_url.clone(),
                    client,
                }),
                Err(e) => {
                    if config.strict_runtime_required() {
                        AgentMode::Disabled(format!(
                            "failed to initialize signing bridge client in production profile: {e}"
                        ))
                    } else {
                        AgentMode::Deterministic
                    }
                }
            }
        } else if config.strict_runtime_required() {
            AgentMode::Disabled(
                "signing bridge URL not configured in production runtime profile".to_owned(),
            )
        } else {
            AgentMode::Deterministic
        };

        Self { mode }
    }

    fn bridge_call(&self, runtime: &BridgeRuntime, method: &str) -> Result<Value, SessionError> {
        let payload = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": [],
        });
        let response = runtime
            .client
            .post(&runtime.base_url)
            .json(&payload)
            .send()
            .map_err(|e| SessionError::AgentUnavailable(format!("signing bridge unreachable: {e}")))?;
        let status = response.status();
        let body: Value = response.json().map_err(|e| {
            SessionError::Transport(format!("signing bridge json decode failed: {e}"))
        })?;
        if !status.is_success() {
            return Err(SessionError::AgentUnavailable(format!(
                "signing bridge status {status}: {body}"
            )));
        }
        if let Some(err) = body.get("error") {
            return Err(map_rpc_error(err));
        }
        body.get("result")
            .cloned()
            .ok_or_else(|| SessionError::Transport("signing bridge missing result".to_owned()))
    }
}

impl SigningAgentPort for FreighterAgentAdapter {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        match &self.mode {
            AgentMode::Disabled(reason) => Err(SessionError::AgentUnavailable(reason.clone())),
            AgentMode::Deterministic => Ok(AccountId::from_key_bytes(&DETERMINISTIC_KEY)),
            AgentMode::Bridge(runtime) => {
                let result = self.bridge_call(runtime, "getPublicKey")?;
                let raw = result.as_str().ok_or_else(|| {
                    SessionError::Transport("getPublicKey result must be a string".to_owned())
                })?;
                AccountId::parse(raw)
            }
        }
    }
}

fn map_rpc_error(err: &Value) -> SessionError {
    let code = err.get("code").and_then(Value::as_i64);
    let message = err
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let lowered = message.to_lowercase();
    if code == Some(RPC_USER_REJECTED) || lowered.contains("declined") || lowered.contains("rejected")
    {
        return SessionError::UserRejected;
    }
    SessionError::AgentUnavailable(format!("signing bridge returned error: {err}"))
}
