//! Chat commands understood by the bot

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::CommandParseError;
use crate::reaction::Reaction;

/// A parsed chat command
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    /// `/r` - attach an empty panel to the replied-to message
    React,
    /// `/heart`, `/up`, `/down` - attach a panel with the issuer's vote already cast
    Shortcut(Reaction),
    /// `/s` - list who reacted on the replied-to panel
    Show,
    /// `/help`
    Help,
}

struct CommandEntry {
    names: &'static [&'static str],
    command: Command,
    description: &'static str,
}

const COMMANDS: &[CommandEntry] = &[
    CommandEntry {
        names: &["r", "react"],
        command: Command::React,
        description: "react to the message you are replying to",
    },
    CommandEntry {
        names: &["heart"],
        command: Command::Shortcut(Reaction::Heart),
        description: "react with ❤ right away",
    },
    CommandEntry {
        names: &["up"],
        command: Command::Shortcut(Reaction::Approve),
        description: "react with 👍 right away",
    },
    CommandEntry {
        names: &["down"],
        command: Command::Shortcut(Reaction::Disapprove),
        description: "react with 👎 right away",
    },
    CommandEntry {
        names: &["s", "show"],
        command: Command::Show,
        description: "show who reacted, in reply to a reaction message",
    },
    CommandEntry {
        names: &["help"],
        command: Command::Help,
        description: "display this text",
    },
];

impl Command {
    /// Parse the text of a message.
    ///
    /// `/cmd@name` is only accepted when `name` matches `bot_username`
    /// (case-insensitive). Without a known username every mention is accepted.
    pub fn parse(text: &str, bot_username: Option<&str>) -> Result<Self, CommandParseError> {
        let token = text
            .split_whitespace()
            .next()
            .and_then(|t| t.strip_prefix('/'))
            .filter(|t| !t.is_empty())
            .ok_or(CommandParseError::NotACommand)?;

        let name = match token.split_once('@') {
            Some((name, mention)) => {
                if let Some(me) = bot_username {
                    if !mention.eq_ignore_ascii_case(me) {
                        return Err(CommandParseError::OtherBot(mention.to_string()));
                    }
                }
                name
            }
            None => token,
        };

        COMMANDS
            .iter()
            .find(|entry| entry.names.iter().any(|n| *n == name))
            .map(|entry| entry.command)
            .ok_or_else(|| CommandParseError::Unknown(name.to_string()))
    }

    /// Whether this command creates a new panel
    pub fn creates_panel(&self) -> bool {
        matches!(self, Self::React | Self::Shortcut(_))
    }

    /// The `/help` text
    pub fn descriptions() -> String {
        let mut text = String::from("These commands are supported:");
        for entry in COMMANDS {
            let names = entry
                .names
                .iter()
                .map(|n| format!("/{}", n))
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!("\n{} - {}", names, entry.description));
        }
        text
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = COMMANDS
            .iter()
            .find(|entry| entry.command == *self)
            .map(|entry| entry.names[0])
            .unwrap_or("?");
        write!(f, "/{}", name)
    }
}
