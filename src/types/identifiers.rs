//! Identifier types for the lounge simulator
//!
//! Passengers are numbered sequentially in the order the arrival generator
//! produces them, so identifiers are stable for a seeded run.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for a generated passenger
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PassengerId(pub u64);

impl PassengerId {
    /// Create a passenger ID from its generation index
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// The generation index of this passenger
    pub fn index(&self) -> u64 {
        self.0
    }

    /// The identifier following this one
    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PAX_{:06}", self.0)
    }
}

impl Serialize for PassengerId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PassengerId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let digits = s.strip_prefix("PAX_").unwrap_or(&s);
        let index = digits.parse::<u64>().map_err(serde::de::Error::custom)?;
        Ok(PassengerId(index))
    }
}

/// Sequential source of passenger identifiers
#[derive(Debug, Clone, Default)]
pub struct PassengerIdSequence {
    next: PassengerId,
}

impl Default for PassengerId {
    fn default() -> Self {
        Self(0)
    }
}

impl PassengerIdSequence {
    /// Create a sequence starting at `PAX_000000`
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next identifier
    pub fn issue(&mut self) -> PassengerId {
        let id = self.next;
        self.next = id.next();
        id
    }

    /// Number of identifiers issued so far
    pub fn issued(&self) -> u64 {
        self.next.0
    }
}
