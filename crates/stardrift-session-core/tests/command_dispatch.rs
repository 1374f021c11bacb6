use std::sync::mpsc::{self, Receiver};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use stardrift_session_core::{
    AccountId, ClockPort, GameCommand, GameConfig, SessionError, SessionOrchestrator,
    SessionStatus, SigningAgentPort,
};

struct FixedClock;

impl ClockPort for FixedClock {
    fn now_ms(&self) -> Result<u64, SessionError> {
        Ok(1_739_750_400_000)
    }
}

struct AttestingAgent(AccountId);

impl SigningAgentPort for AttestingAgent {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        Ok(self.0.clone())
    }
}

struct RejectingAgent;

impl SigningAgentPort for RejectingAgent {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        Err(SessionError::UserRejected)
    }
}

struct UnreachableAgent;

impl SigningAgentPort for UnreachableAgent {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        Err(SessionError::AgentUnavailable("bridge not running".to_owned()))
    }
}

/// Fails the first request, succeeds afterwards.
struct FlakyAgent {
    address: AccountId,
    failed_once: Mutex<bool>,
}

impl SigningAgentPort for FlakyAgent {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        let mut failed = self.failed_once.lock().expect("flaky lock");
        if !*failed {
            *failed = true;
            return Err(SessionError::AgentUnavailable("first attempt".to_owned()));
        }
        Ok(self.address.clone())
    }
}

/// Blocks inside the agent call until released, so tests can observe the
/// session mid-connect.
struct GatedAgent {
    address: AccountId,
    release: Mutex<Receiver<()>>,
}

impl SigningAgentPort for GatedAgent {
    fn request_address(&self) -> Result<AccountId, SessionError> {
        self.release
            .lock()
            .expect("gate lock")
            .recv()
            .map_err(|e| SessionError::Transport(e.to_string()))?;
        Ok(self.address.clone())
    }
}

fn test_address() -> AccountId {
    AccountId::from_key_bytes(&[7u8; 32])
}

fn connected_orchestrator() -> SessionOrchestrator<AttestingAgent, FixedClock> {
    let orchestrator = SessionOrchestrator::new(
        AttestingAgent(test_address()),
        FixedClock,
        GameConfig::default(),
    );
    orchestrator.connect().expect("connect");
    orchestrator
}

#[test]
fn successful_connect_holds_exact_address() {
    let orchestrator = SessionOrchestrator::new(
        AttestingAgent(test_address()),
        FixedClock,
        GameConfig::default(),
    );

    let result = orchestrator.connect().expect("connect");
    assert_eq!(result.address, Some(test_address()));
    assert_eq!(orchestrator.status().expect("status"), SessionStatus::Connected);
    assert_eq!(
        orchestrator.current_address().expect("address"),
        Some(test_address())
    );
}

#[test]
fn connect_then_disconnect_lands_disconnected() {
    let orchestrator = connected_orchestrator();

    orchestrator.disconnect().expect("disconnect");
    assert_eq!(
        orchestrator.status().expect("status"),
        SessionStatus::Disconnected
    );
    assert_eq!(orchestrator.current_address().expect("address"), None);
}

#[test]
fn failed_connect_never_lands_connected() {
    let orchestrator =
        SessionOrchestrator::new(RejectingAgent, FixedClock, GameConfig::default());

    let err = orchestrator.connect().expect_err("connect must fail");
    assert!(matches!(err, SessionError::UserRejected));

    let session = orchestrator.session().expect("session");
    assert_eq!(session.status, SessionStatus::Failed);
    assert_eq!(session.address, None);
    assert!(session
        .last_failure
        .as_deref()
        .expect("failure retained")
        .contains("rejected"));
}

#[test]
fn unreachable_agent_failure_is_surfaced() {
    let orchestrator =
        SessionOrchestrator::new(UnreachableAgent, FixedClock, GameConfig::default());

    let err = orchestrator.connect().expect_err("connect must fail");
    assert!(matches!(err, SessionError::AgentUnavailable(_)));
    assert_eq!(orchestrator.current_address().expect("address"), None);
}

#[test]
fn reconnect_after_failure_succeeds() {
    let orchestrator = SessionOrchestrator::new(
        FlakyAgent {
            address: test_address(),
            failed_once: Mutex::new(false),
        },
        FixedClock,
        GameConfig::default(),
    );

    orchestrator.connect().expect_err("first connect fails");
    assert_eq!(orchestrator.status().expect("status"), SessionStatus::Failed);

    let result = orchestrator.connect().expect("second connect");
    assert_eq!(result.address, Some(test_address()));
    assert_eq!(orchestrator.status().expect("status"), SessionStatus::Connected);
}

#[test]
fn disconnect_when_disconnected_is_a_noop() {
    let orchestrator = SessionOrchestrator::new(
        AttestingAgent(test_address()),
        FixedClock,
        GameConfig::default(),
    );

    orchestrator.disconnect().expect("disconnect is error-free");
    assert_eq!(
        orchestrator.status().expect("status"),
        SessionStatus::Disconnected
    );
    assert_eq!(orchestrator.current_address().expect("address"), None);
}

#[test]
fn address_is_none_while_connecting_and_overlap_is_rejected() {
    let (release, gate) = mpsc::channel();
    let orchestrator = Arc::new(SessionOrchestrator::new(
        GatedAgent {
            address: test_address(),
            release: Mutex::new(gate),
        },
        FixedClock,
        GameConfig::default(),
    ));

    let worker = {
        let orchestrator = Arc::clone(&orchestrator);
        thread::spawn(move || orchestrator.connect())
    };

    while orchestrator.status().expect("status") != SessionStatus::Connecting {
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(orchestrator.current_address().expect("address"), None);

    let err = orchestrator.connect().expect_err("overlapping connect");
    assert!(matches!(err, SessionError::Conflict(_)));

    release.send(()).expect("release agent");
    let result = worker.join().expect("join").expect("gated connect");
    assert_eq!(result.address, Some(test_address()));
    assert_eq!(orchestrator.status().expect("status"), SessionStatus::Connected);
}

#[test]
fn game_action_stubs_signal_not_implemented_and_do_not_mutate() {
    let orchestrator = connected_orchestrator();
    let address = test_address();
    let before = orchestrator.session().expect("session");

    let commands: Vec<(GameCommand, &str)> = vec![
        (
            GameCommand::InitializePlayer {
                player: address.clone(),
            },
            "initialize_player",
        ),
        (
            GameCommand::CreateShip {
                name: "Explorer I".to_owned(),
                ship_type: "EXPLORER".to_owned(),
            },
            "create_ship",
        ),
        (
            GameCommand::DiscoverStar {
                star_name: "Proxima Centauri".to_owned(),
            },
            "discover_star",
        ),
        (
            GameCommand::CheckMissionCompletion {
                mission_id: "FIRST_STEPS".to_owned(),
            },
            "check_mission_completion",
        ),
        (
            GameCommand::CreateTradeOffer {
                sell_resource: "ENERGY".to_owned(),
                sell_amount: 500,
                buy_resource: "IRON".to_owned(),
                buy_amount: 200,
            },
            "create_offer",
        ),
        (GameCommand::AcceptTradeOffer { offer_id: 1 }, "accept_offer"),
    ];

    for (command, entry_point) in commands {
        let err = orchestrator.handle(command).expect_err("stub must signal");
        match err {
            SessionError::NotImplemented(name) => assert_eq!(name, entry_point),
            other => panic!("expected NotImplemented, got {other:?}"),
        }
        assert_eq!(orchestrator.session().expect("session"), before);
    }
}

#[test]
fn game_actions_are_rejected_while_disconnected() {
    let orchestrator = SessionOrchestrator::new(
        AttestingAgent(test_address()),
        FixedClock,
        GameConfig::default(),
    );

    let err = orchestrator
        .handle(GameCommand::DiscoverStar {
            star_name: "Proxima Centauri".to_owned(),
        })
        .expect_err("must be rejected");
    assert!(matches!(err, SessionError::NotConnected));
}

#[test]
fn invalid_payloads_fail_validation_before_the_stub() {
    let orchestrator = connected_orchestrator();

    let err = orchestrator
        .create_ship("Void Runner", "BATTLESHIP")
        .expect_err("unknown ship type");
    assert!(matches!(err, SessionError::Validation(_)));

    let err = orchestrator
        .create_trade_offer("ENERGY", 0, "IRON", 200)
        .expect_err("non-positive amount");
    assert!(matches!(err, SessionError::Validation(_)));

    let err = orchestrator
        .create_trade_offer("ENERGY", 500, "PLUTONIUM", 200)
        .expect_err("unknown resource");
    assert!(matches!(err, SessionError::Validation(_)));
}

#[test]
fn transition_log_records_the_observed_path() {
    let orchestrator = connected_orchestrator();
    orchestrator.disconnect().expect("disconnect");

    let log = orchestrator.transition_log().expect("log");
    assert_eq!(log.len(), 3);
    for (i, record) in log.iter().enumerate() {
        assert_eq!(record.sequence, i as u64 + 1);
    }
    assert_eq!(log[0].state_before, SessionStatus::Disconnected);
    assert_eq!(log[0].state_after, SessionStatus::Connecting);
    assert_eq!(log[1].state_after, SessionStatus::Connected);
    assert_eq!(log[2].state_after, SessionStatus::Disconnected);
    assert_eq!(log[2].command_kind, "disconnect");
}
