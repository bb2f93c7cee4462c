//! Store-assigned, time-ordered project identifier.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::sync::LazyLock;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::DomainError;

/// Random bytes fixed for the lifetime of the process.
static PROCESS_UNIQUE: LazyLock<[u8; 5]> = LazyLock::new(rand::random);

static COUNTER: AtomicU32 = AtomicU32::new(0);

/// Unique identifier for a Project.
///
/// 12 bytes: big-endian seconds since the epoch, 5 process-random bytes and a
/// 24-bit counter. Byte order equals generation order within a process, so
/// ids sort the same way as their hex form and as their creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectId([u8; 12]);

impl ProjectId {
    /// Number of characters in the hex form.
    pub const HEX_LEN: usize = 24;

    /// Generates a fresh identifier.
    pub fn generate() -> Self {
        let seconds = Utc::now().timestamp().clamp(0, u32::MAX as i64) as u32;
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[..4].copy_from_slice(&seconds.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..].copy_from_slice(&counter.to_be_bytes()[1..]);
        Self(bytes)
    }

    /// Parses a 24-character hex identifier.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        let mut bytes = [0u8; 12];
        if s.len() != Self::HEX_LEN {
            return Err(DomainError::InvalidIdentifier(s.to_string()));
        }
        hex::decode_to_slice(s, &mut bytes)
            .map_err(|_| DomainError::InvalidIdentifier(s.to_string()))?;
        Ok(Self(bytes))
    }

    /// Parses a pagination cursor: blank means "from the beginning".
    pub fn parse_cursor(s: &str) -> Result<Option<Self>, DomainError> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        Self::parse(s).map(Some)
    }

    /// Generation time embedded in the identifier (second precision).
    pub fn timestamp(&self) -> DateTime<Utc> {
        let mut seconds = [0u8; 4];
        seconds.copy_from_slice(&self.0[..4]);
        Utc.timestamp_opt(u32::from_be_bytes(seconds) as i64, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl std::fmt::Display for ProjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl std::str::FromStr for ProjectId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for ProjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for ProjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_increasing() {
        let ids: Vec<ProjectId> = (0..1000).map(|_| ProjectId::generate()).collect();
        for pair in ids.windows(2) {
            assert!(pair[0] < pair[1]);
            assert!(pair[0].to_hex() < pair[1].to_hex());
        }
    }

    #[test]
    fn test_hex_roundtrip() {
        let id = ProjectId::generate();
        let hex = id.to_string();
        assert_eq!(hex.len(), ProjectId::HEX_LEN);
        assert_eq!(hex.parse::<ProjectId>().unwrap(), id);
        assert_eq!(ProjectId::parse(&hex.to_uppercase()).unwrap(), id);
    }

    #[test]
    fn test_malformed_ids_are_rejected() {
        for bad in ["", "abc", "zzzzzzzzzzzzzzzzzzzzzzzz", "64b7f0c2a1e4d5f6a7b8c9d0ff"] {
            assert!(matches!(
                ProjectId::parse(bad),
                Err(DomainError::InvalidIdentifier(_))
            ));
        }
    }

    #[test]
    fn test_parse_cursor() {
        assert_eq!(ProjectId::parse_cursor("").unwrap(), None);
        assert_eq!(ProjectId::parse_cursor("   ").unwrap(), None);
        let id = ProjectId::generate();
        assert_eq!(ProjectId::parse_cursor(&id.to_hex()).unwrap(), Some(id));
        assert!(ProjectId::parse_cursor("nope").is_err());
    }

    #[test]
    fn test_timestamp_is_recent() {
        let id = ProjectId::generate();
        let age = Utc::now() - id.timestamp();
        assert!(age.num_seconds() >= 0 && age.num_seconds() < 5);
    }
}
