use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// The kind of entity a note is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoteTarget {
    User,
    Company,
}

impl NoteTarget {
    /// Wire and storage representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            NoteTarget::User => "user",
            NoteTarget::Company => "company",
        }
    }
}

impl fmt::Display for NoteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NoteTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(NoteTarget::User),
            "company" => Ok(NoteTarget::Company),
            other => Err(DomainError::invalid(format!(
                "target must be one of [user, company], got {other:?}"
            ))),
        }
    }
}
