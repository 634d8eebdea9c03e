use crate::constants::SYSTEM_PARTY;
use serde::{Deserialize, Serialize};

/// Opaque identifier of a transfer participant
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Party(pub String);

impl Party {
    pub fn new<S: Into<String>>(id: S) -> Self {
        Self(id.into())
    }

    /// Sentinel sender of minted funds and sealing rewards
    pub fn system() -> Self {
        Self(SYSTEM_PARTY.to_string())
    }

    pub fn is_system(&self) -> bool {
        self.0 == SYSTEM_PARTY
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Party {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Party {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
