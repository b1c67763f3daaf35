//! Error types for reaction panels

use thiserror::Error;

use crate::reaction::Reaction;

/// A button payload that could not be turned back into a reaction and its voters
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("payload is empty")]
    Empty,

    #[error("malformed payload: {0}")]
    Malformed(String),

    #[error("unknown reaction tag: {0:?}")]
    UnknownReaction(String),

    #[error("invalid user id: {0:?}")]
    InvalidUserId(String),

    #[error("user {0} appears more than once")]
    DuplicateVoter(i64),
}

/// A button row that does not form a complete panel
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PanelError {
    #[error("message has no button row")]
    MissingRow,

    #[error("button {index} failed to decode: {source}")]
    Button {
        index: usize,
        #[source]
        source: DecodeError,
    },

    #[error("reaction {0} appears more than once")]
    DuplicateReaction(Reaction),

    #[error("reaction {0} is missing from the row")]
    MissingReaction(Reaction),
}

/// Text that looked like a command but could not be understood
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandParseError {
    #[error("not a command")]
    NotACommand,

    #[error("unknown command: /{0}")]
    Unknown(String),

    #[error("command addressed to @{0}")]
    OtherBot(String),
}
