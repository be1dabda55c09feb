use std::{fmt, str::FromStr};

use thiserror::Error;
use uuid::Uuid;

/// Portable public identifier.
///
/// Every externally referenced entity carries such an opaque
/// identifier that is distinct from its internal row id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(Uuid);

impl Id {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for Id {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for Id {
    fn from(from: Uuid) -> Self {
        Self(from)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Invalid id format")]
pub struct IdParseError;

impl FromStr for Id {
    type Err = IdParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self).map_err(|_| IdParseError)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.as_hyphenated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display_round_trip() {
        let id = Id::new();
        assert_eq!(id, id.to_string().parse().unwrap());
    }

    #[test]
    fn reject_malformed_ids() {
        assert!("".parse::<Id>().is_err());
        assert!("123".parse::<Id>().is_err());
        assert!("not-a-uuid-at-all-not-a-uuid-at-all".parse::<Id>().is_err());
    }

    #[test]
    fn new_ids_are_unique() {
        assert_ne!(Id::new(), Id::new());
    }
}
