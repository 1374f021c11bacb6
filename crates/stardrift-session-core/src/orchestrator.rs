use std::sync::Mutex;

use crate::config::GameConfig;
use crate::domain::{AccountId, TimestampMs, TransitionRecord, WalletSession};
use crate::ports::{ClockPort, SessionError, SigningAgentPort};
use crate::state_machine::{session_transition, SessionAction, SessionStatus, StateTransition};

#[derive(Debug, Clone)]
pub enum GameCommand {
    Connect,
    Disconnect,
    InitializePlayer {
        player: AccountId,
    },
    CreateShip {
        name: String,
        ship_type: String,
    },
    DiscoverStar {
        star_name: String,
    },
    CheckMissionCompletion {
        mission_id: String,
    },
    CreateTradeOffer {
        sell_resource: String,
        sell_amount: i64,
        buy_resource: String,
        buy_amount: i64,
    },
    AcceptTradeOffer {
        offer_id: u32,
    },
}

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub address: Option<AccountId>,
    pub transition: Option<TransitionRecord>,
}

pub struct SessionOrchestrator<A, C>
where
    A: SigningAgentPort,
    C: ClockPort,
{
    pub agent: A,
    pub clock: C,
    config: GameConfig,
    session: Mutex<WalletSession>,
    log: Mutex<Vec<TransitionRecord>>,
}

impl<A, C> SessionOrchestrator<A, C>
where
    A: SigningAgentPort,
    C: ClockPort,
{
    pub fn new(agent: A, clock: C, config: GameConfig) -> Self {
        Self {
            agent,
            clock,
            config,
            session: Mutex::new(WalletSession::default()),
            log: Mutex::new(Vec::new()),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn session(&self) -> Result<WalletSession, SessionError> {
        Ok(self.lock_session()?.clone())
    }

    pub fn status(&self) -> Result<SessionStatus, SessionError> {
        Ok(self.lock_session()?.status)
    }

    pub fn current_address(&self) -> Result<Option<AccountId>, SessionError> {
        Ok(self.lock_session()?.address.clone())
    }

    pub fn transition_log(&self) -> Result<Vec<TransitionRecord>, SessionError> {
        Ok(self.lock_log()?.clone())
    }

    pub fn handle(&self, command: GameCommand) -> Result<CommandResult, SessionError> {
        match command {
            GameCommand::Connect => self.connect(),
            GameCommand::Disconnect => self.disconnect(),
            GameCommand::InitializePlayer { player } => self.initialize_player(&player),
            GameCommand::CreateShip { name, ship_type } => self.create_ship(&name, &ship_type),
            GameCommand::DiscoverStar { star_name } => self.discover_star(&star_name),
            GameCommand::CheckMissionCompletion { mission_id } => {
                self.check_mission_completion(&mission_id)
            }
            GameCommand::CreateTradeOffer {
                sell_resource,
                sell_amount,
                buy_resource,
                buy_amount,
            } => self.create_trade_offer(&sell_resource, sell_amount, &buy_resource, buy_amount),
            GameCommand::AcceptTradeOffer { offer_id } => self.accept_trade_offer(offer_id),
        }
    }

    /// Request the public identity from the signing agent. The session lock
    /// is released while the agent call is outstanding; a concurrent connect
    /// observes `Connecting` and is rejected by the transition table.
    pub fn connect(&self) -> Result<CommandResult, SessionError> {
        let start = {
            let mut session = self.lock_session()?;
            let (next, transition) = session_transition(session.status, SessionAction::ConnectStart)?;
            session.status = next;
            transition
        };
        self.record("connect", &start, None)?;

        match self.agent.request_address() {
            Ok(address) => {
                let transition = {
                    let mut session = self.lock_session()?;
                    let (next, transition) =
                        session_transition(session.status, SessionAction::ConnectSuccess)?;
                    session.status = next;
                    session.address = Some(address.clone());
                    session.last_failure = None;
                    transition
                };
                let record = self.record("connect", &transition, Some(address.to_string()))?;
                Ok(CommandResult {
                    address: Some(address),
                    transition: Some(record),
                })
            }
            Err(e) => {
                // A local disconnect may have raced the agent call; the
                // original failure still wins over the bookkeeping.
                let mut session = self.lock_session()?;
                if let Ok((next, transition)) =
                    session_transition(session.status, SessionAction::ConnectFailure)
                {
                    session.status = next;
                    session.address = None;
                    session.last_failure = Some(e.to_string());
                    drop(session);
                    self.record("connect", &transition, Some(e.to_string()))?;
                }
                Err(e)
            }
        }
    }

    /// Local-only: clears the held address. Never reaches the agent, since
    /// any external authorization is outside this system's control.
    pub fn disconnect(&self) -> Result<CommandResult, SessionError> {
        let transition = {
            let mut session = self.lock_session()?;
            let (next, transition) = session_transition(session.status, SessionAction::Disconnect)?;
            session.status = next;
            session.address = None;
            session.last_failure = None;
            transition
        };
        let record = self.record("disconnect", &transition, None)?;
        Ok(CommandResult {
            address: None,
            transition: Some(record),
        })
    }

    // The six game actions below are the documented entry points of the four
    // deployed contracts (space game, star system, missions, trading). None
    // of them is wired to an invocation yet; each validates its payload and
    // then signals not-implemented so callers can tell "not yet built" from
    // "failed".

    pub fn initialize_player(&self, player: &AccountId) -> Result<CommandResult, SessionError> {
        let connected = self.ensure_connected()?;
        if *player != connected {
            return Err(SessionError::Validation(
                "player must be the connected address".to_owned(),
            ));
        }
        Err(SessionError::NotImplemented("initialize_player"))
    }

    pub fn create_ship(&self, name: &str, ship_type: &str) -> Result<CommandResult, SessionError> {
        let _ = self.ensure_connected()?;
        if name.trim().is_empty() {
            return Err(SessionError::Validation("ship name is empty".to_owned()));
        }
        if self.config.ship_type(ship_type).is_none() {
            return Err(SessionError::Validation(format!(
                "unknown ship type: {ship_type}"
            )));
        }
        Err(SessionError::NotImplemented("create_ship"))
    }

    pub fn discover_star(&self, star_name: &str) -> Result<CommandResult, SessionError> {
        let _ = self.ensure_connected()?;
        if star_name.trim().is_empty() {
            return Err(SessionError::Validation("star name is empty".to_owned()));
        }
        Err(SessionError::NotImplemented("discover_star"))
    }

    pub fn check_mission_completion(
        &self,
        mission_id: &str,
    ) -> Result<CommandResult, SessionError> {
        let _ = self.ensure_connected()?;
        if mission_id.trim().is_empty() {
            return Err(SessionError::Validation("mission id is empty".to_owned()));
        }
        Err(SessionError::NotImplemented("check_mission_completion"))
    }

    pub fn create_trade_offer(
        &self,
        sell_resource: &str,
        sell_amount: i64,
        buy_resource: &str,
        buy_amount: i64,
    ) -> Result<CommandResult, SessionError> {
        let _ = self.ensure_connected()?;
        if sell_amount <= 0 || buy_amount <= 0 {
            return Err(SessionError::Validation(
                "trade amounts must be positive".to_owned(),
            ));
        }
        for id in [sell_resource, buy_resource] {
            if self.config.resource(id).is_none() {
                return Err(SessionError::Validation(format!("unknown resource: {id}")));
            }
        }
        Err(SessionError::NotImplemented("create_offer"))
    }

    pub fn accept_trade_offer(&self, _offer_id: u32) -> Result<CommandResult, SessionError> {
        let _ = self.ensure_connected()?;
        Err(SessionError::NotImplemented("accept_offer"))
    }

    fn ensure_connected(&self) -> Result<AccountId, SessionError> {
        let session = self.lock_session()?;
        match (&session.status, &session.address) {
            (SessionStatus::Connected, Some(address)) => Ok(address.clone()),
            _ => Err(SessionError::NotConnected),
        }
    }

    fn record(
        &self,
        command_kind: &str,
        transition: &StateTransition,
        note: Option<String>,
    ) -> Result<TransitionRecord, SessionError> {
        let now = TimestampMs(self.clock.now_ms()?);
        let mut log = self.lock_log()?;
        let sequence = log.last().map(|r| r.sequence + 1).unwrap_or(1);
        let record = TransitionRecord {
            sequence,
            command_kind: command_kind.to_owned(),
            state_before: transition.from,
            state_after: transition.to,
            note,
            recorded_at_ms: now,
        };
        log.push(record.clone());
        Ok(record)
    }

    fn lock_session(&self) -> Result<std::sync::MutexGuard<'_, WalletSession>, SessionError> {
        self.session
            .lock()
            .map_err(|e| SessionError::Transport(format!("session lock poisoned: {e}")))
    }

    fn lock_log(&self) -> Result<std::sync::MutexGuard<'_, Vec<TransitionRecord>>, SessionError> {
        self.log
            .lock()
            .map_err(|e| SessionError::Transport(format!("transition log lock poisoned: {e}")))
    }
}

pub fn command_kind(command: &GameCommand) -> &'static str {
    match command {
        GameCommand::Connect => "connect",
        GameCommand::Disconnect => "disconnect",
        GameCommand::InitializePlayer { .. } => "initialize_player",
        GameCommand::CreateShip { .. } => "create_ship",
        GameCommand::DiscoverStar { .. } => "discover_star",
        GameCommand::CheckMissionCompletion { .. } => "check_mission_completion",
        GameCommand::CreateTradeOffer { .. } => "create_offer",
        GameCommand::AcceptTradeOffer { .. } => "accept_offer",
    }
}
