use stardrift_session_core::{
    AccountId, GameConfig, SessionStatus, TimestampMs, TransitionRecord, WalletSession,
};

// Canonical valid ed25519 public-key strkey.
const VALID_ADDRESS: &str = "GA7QYNF7SOWQ3GLR2BGMZEHXAVIRZA4KVWLTJJFC7MGXUA74P7UJVSGZ";

#[test]
fn valid_strkey_parses() {
    let address = AccountId::parse(VALID_ADDRESS).expect("valid address");
    assert_eq!(address.as_str(), VALID_ADDRESS);
    assert_eq!(address.short(), "GA7QYN…VSGZ");
}

#[test]
fn encoded_key_bytes_round_trip() {
    let address = AccountId::from_key_bytes(&[0x42u8; 32]);
    assert_eq!(address.as_str().len(), 56);
    assert!(address.as_str().starts_with('G'));
    let reparsed = AccountId::parse(address.as_str()).expect("own encoding parses");
    assert_eq!(reparsed, address);
}

#[test]
fn corrupted_checksum_is_rejected() {
    let mut corrupted = VALID_ADDRESS.to_owned();
    corrupted.pop();
    corrupted.push('X');
    let err = AccountId::parse(&corrupted).expect_err("must fail");
    assert!(err.to_string().contains("checksum"));
}

#[test]
fn wrong_length_is_rejected() {
    let err = AccountId::parse("GA7QYNF7").expect_err("must fail");
    assert!(err.to_string().contains("56"));
}

#[test]
fn non_alphabet_characters_are_rejected() {
    let lowercase = VALID_ADDRESS.to_lowercase();
    assert!(AccountId::parse(&lowercase).is_err());

    let mut with_padding = VALID_ADDRESS.to_owned();
    with_padding.pop();
    with_padding.push('0');
    assert!(AccountId::parse(&with_padding).is_err());
}

#[test]
fn non_public_key_version_is_rejected() {
    // 'S' selects the secret-seed version byte.
    let seed_shaped = format!("S{}", "A".repeat(55));
    let err = AccountId::parse(&seed_shaped).expect_err("must fail");
    assert!(err.to_string().contains("public-key"));
}

#[test]
fn account_id_serializes_as_its_string_form() {
    let address = AccountId::parse(VALID_ADDRESS).expect("valid address");
    let json = serde_json::to_string(&address).expect("serialize");
    assert_eq!(json, format!("\"{VALID_ADDRESS}\""));

    let decoded: AccountId = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(decoded, address);

    let bad = serde_json::from_str::<AccountId>("\"not-an-address\"");
    assert!(bad.is_err());
}

#[test]
fn wallet_session_round_trips() {
    let session = WalletSession {
        status: SessionStatus::Connected,
        address: Some(AccountId::parse(VALID_ADDRESS).expect("valid address")),
        last_failure: None,
    };
    let encoded = serde_json::to_vec(&session).expect("serialize session");
    let decoded: WalletSession = serde_json::from_slice(&encoded).expect("deserialize session");
    assert_eq!(decoded, session);
}

#[test]
fn transition_record_round_trips() {
    let record = TransitionRecord {
        sequence: 1,
        command_kind: "connect".to_owned(),
        state_before: SessionStatus::Disconnected,
        state_after: SessionStatus::Connecting,
        note: None,
        recorded_at_ms: TimestampMs(1_739_750_400_000),
    };
    let encoded = serde_json::to_string(&record).expect("serialize record");
    let decoded: TransitionRecord = serde_json::from_str(&encoded).expect("deserialize record");
    assert_eq!(decoded.recorded_at_ms.0, 1_739_750_400_000);
    assert_eq!(decoded, record);
}

#[test]
fn default_config_reproduces_the_shipped_metadata() {
    let config = GameConfig::default();

    assert_eq!(config.ship_types.len(), 3);
    let explorer = config.ship_type("EXPLORER").expect("explorer type");
    assert_eq!(explorer.name, "Explorer");
    assert_eq!(explorer.cost, 100);

    assert_eq!(config.resources.len(), 4);
    assert!(config.resource("CRYSTAL").is_some());
    assert!(config.resource("PLUTONIUM").is_none());

    assert_eq!(config.contracts.space_game, "space_game_contract_id");
    assert!(config.network.horizon_url.contains("horizon"));
}

#[test]
fn config_round_trips_through_json() {
    let config = GameConfig::default();
    let encoded = serde_json::to_string(&config).expect("serialize config");
    let decoded: GameConfig = serde_json::from_str(&encoded).expect("deserialize config");
    assert_eq!(decoded, config);
}
