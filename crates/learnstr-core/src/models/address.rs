use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Address of a parameterized replaceable event, `kind:pubkey:d-tag`.
/// This is the value carried in `a` tags and the stable way to refer
/// to content independent of its event id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventAddress {
    pub kind: u16,
    pub pubkey: String,
    pub identifier: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("expected kind:pubkey:identifier, got {0:?}")]
    Malformed(String),
    #[error("invalid event kind in address: {0:?}")]
    InvalidKind(String),
}

impl EventAddress {
    pub fn new(kind: u16, pubkey: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            kind,
            pubkey: pubkey.into(),
            identifier: identifier.into(),
        }
    }
}

impl fmt::Display for EventAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.kind, self.pubkey, self.identifier)
    }
}

impl FromStr for EventAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // d-tag values may themselves contain ':', so split at most twice
        let mut parts = s.splitn(3, ':');
        let (kind, pubkey, identifier) = match (parts.next(), parts.next(), parts.next()) {
            (Some(kind), Some(pubkey), Some(identifier)) if !pubkey.is_empty() => {
                (kind, pubkey, identifier)
            }
            _ => return Err(AddressParseError::Malformed(s.to_string())),
        };
        let kind: u16 = kind
            .parse()
            .map_err(|_| AddressParseError::InvalidKind(kind.to_string()))?;
        Ok(Self::new(kind, pubkey, identifier))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_round_trip() {
        let address = EventAddress::new(30023, "a".repeat(64), "intro-to-nostr");
        let parsed: EventAddress = address.to_string().parse().unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn test_identifier_may_contain_colon() {
        let parsed: EventAddress = "30004:pubkey:lesson:one".parse().unwrap();
        assert_eq!(parsed.identifier, "lesson:one");
    }

    #[test]
    fn test_malformed_rejected() {
        assert_eq!(
            "30023:onlyonecolon".parse::<EventAddress>().unwrap_err(),
            AddressParseError::Malformed("30023:onlyonecolon".to_string())
        );
        assert!("::d".parse::<EventAddress>().is_err());
    }

    #[test]
    fn test_non_numeric_kind_rejected() {
        assert_eq!(
            "course:pubkey:d".parse::<EventAddress>().unwrap_err(),
            AddressParseError::InvalidKind("course".to_string())
        );
    }
}
