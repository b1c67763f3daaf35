//! Behavior switches for panels

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a press does to the presser's other reactions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PressPolicy {
    /// One reaction per user: pressing one drops the user from all others
    #[default]
    Exclusive,
    /// Reactions are independent: only the pressed one changes
    Independent,
}

/// Which messages a panel may be attached to
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyTargetPolicy {
    /// Any message in the chat
    #[default]
    AnyMessage,
    /// Only messages the bot itself sent
    BotMessagesOnly,
}

impl ReplyTargetPolicy {
    /// Check whether a panel may be attached to a message written by `author_id`
    pub fn allows(&self, author_id: Option<i64>, bot_id: i64) -> bool {
        match self {
            Self::AnyMessage => true,
            Self::BotMessagesOnly => author_id == Some(bot_id),
        }
    }
}

impl FromStr for PressPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exclusive" => Ok(Self::Exclusive),
            "independent" => Ok(Self::Independent),
            other => Err(format!("unknown press policy: {}", other)),
        }
    }
}

impl FromStr for ReplyTargetPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "any_message" | "any" => Ok(Self::AnyMessage),
            "bot_messages_only" | "bot" => Ok(Self::BotMessagesOnly),
            other => Err(format!("unknown reply target policy: {}", other)),
        }
    }
}
