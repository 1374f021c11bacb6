use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ports::SessionError;
use crate::state_machine::SessionStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampMs(pub u64);

const STRKEY_LEN: usize = 56;
// Version byte for an ed25519 public key; its top five bits select 'G' in base32.
const VERSION_PUBLIC_KEY: u8 = 6 << 3;
const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A checksummed public-key address as issued by the signing agent.
///
/// Construction validates the full strkey envelope (length, alphabet,
/// version byte, CRC16 trailer), so holding an `AccountId` means holding a
/// well-formed address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    pub fn parse(raw: &str) -> Result<Self, SessionError> {
        if raw.len() != STRKEY_LEN {
            return Err(SessionError::Validation(format!(
                "address must be {STRKEY_LEN} characters, got {}",
                raw.len()
            )));
        }
        let decoded = base32_decode(raw).ok_or_else(|| {
            SessionError::Validation("address contains non-base32 characters".to_owned())
        })?;
        if decoded[0] != VERSION_PUBLIC_KEY {
            return Err(SessionError::Validation(
                "address is not a public-key strkey".to_owned(),
            ));
        }
        let expected = crc16_xmodem(&decoded[..33]);
        let found = u16::from_le_bytes([decoded[33], decoded[34]]);
        if expected != found {
            return Err(SessionError::Validation(
                "address checksum mismatch".to_owned(),
            ));
        }
        Ok(Self(raw.to_owned()))
    }

    /// Strkey-encode a raw ed25519 public key.
    pub fn from_key_bytes(key: &[u8; 32]) -> Self {
        let mut payload = Vec::with_capacity(35);
        payload.push(VERSION_PUBLIC_KEY);
        payload.extend_from_slice(key);
        let crc = crc16_xmodem(&payload);
        payload.extend_from_slice(&crc.to_le_bytes());
        Self(base32_encode(&payload))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Truncated display form for headers and cards.
    pub fn short(&self) -> String {
        format!("{}…{}", &self.0[..6], &self.0[self.0.len() - 4..])
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for AccountId {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for AccountId {
    type Error = SessionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AccountId> for String {
    fn from(value: AccountId) -> Self {
        value.0
    }
}

fn base32_decode(input: &str) -> Option<Vec<u8>> {
    let mut bits: u32 = 0;
    let mut nbits = 0u32;
    let mut out = Vec::with_capacity(input.len() * 5 / 8);
    for c in input.bytes() {
        let value = BASE32_ALPHABET.iter().position(|&a| a == c)? as u32;
        bits = (bits << 5) | value;
        nbits += 5;
        if nbits >= 8 {
            nbits -= 8;
            out.push((bits >> nbits) as u8);
        }
    }
    // 56 * 5 bits divides evenly into bytes; leftover bits mean bad input.
    if nbits > 0 && bits & ((1 << nbits) - 1) != 0 {
        return None;
    }
    Some(out)
}

fn base32_encode(data: &[u8]) -> String {
    let mut bits: u32 = 0;
    let mut nbits = 0u32;
    let mut out = String::with_capacity(data.len().div_ceil(5) * 8);
    for &byte in data {
        bits = (bits << 8) | byte as u32;
        nbits += 8;
        while nbits >= 5 {
            nbits -= 5;
            out.push(BASE32_ALPHABET[((bits >> nbits) & 0x1f) as usize] as char);
        }
    }
    if nbits > 0 {
        out.push(BASE32_ALPHABET[((bits << (5 - nbits)) & 0x1f) as usize] as char);
    }
    out
}

fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for &byte in data {
        crc ^= (byte as u16) << 8;
        for _ in 0..8 {
            crc = if crc & 0x8000 != 0 {
                (crc << 1) ^ 0x1021
            } else {
                crc << 1
            };
        }
    }
    crc
}

/// The in-process record of whether, and as whom, the user is connected to
/// the signing agent. At most one per UI instance; never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WalletSession {
    pub status: SessionStatus,
    pub address: Option<AccountId>,
    pub last_failure: Option<String>,
}

impl WalletSession {
    pub fn is_connected(&self) -> bool {
        self.status.is_connected()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRecord {
    pub sequence: u64,
    pub command_kind: String,
    pub state_before: SessionStatus,
    pub state_after: SessionStatus,
    pub note: Option<String>,
    pub recorded_at_ms: TimestampMs,
}
