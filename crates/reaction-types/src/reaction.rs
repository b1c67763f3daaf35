//! The fixed reaction table

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;

/// A reaction a user can attach to a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Heart,
    Approve,
    Disapprove,
    Laugh,
    Anger,
    Sad,
}

/// Button order on every panel, left to right.
pub const REACTIONS: [Reaction; 6] = [
    Reaction::Heart,
    Reaction::Approve,
    Reaction::Disapprove,
    Reaction::Laugh,
    Reaction::Anger,
    Reaction::Sad,
];

impl Reaction {
    /// Glyph shown on the button
    pub fn emoji(&self) -> &'static str {
        match self {
            Self::Heart => "❤",
            Self::Approve => "👍",
            Self::Disapprove => "👎",
            Self::Laugh => "😂",
            Self::Anger => "😠",
            Self::Sad => "😢",
        }
    }

    /// Tag used inside button payloads
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Heart => "heart",
            Self::Approve => "approve",
            Self::Disapprove => "disapprove",
            Self::Laugh => "laugh",
            Self::Anger => "anger",
            Self::Sad => "sad",
        }
    }

    /// Position of this reaction in [`REACTIONS`]
    pub fn position(&self) -> usize {
        match self {
            Self::Heart => 0,
            Self::Approve => 1,
            Self::Disapprove => 2,
            Self::Laugh => 3,
            Self::Anger => 4,
            Self::Sad => 5,
        }
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Reaction {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        REACTIONS
            .iter()
            .copied()
            .find(|r| r.tag() == s)
            .ok_or_else(|| DecodeError::UnknownReaction(s.to_string()))
    }
}
