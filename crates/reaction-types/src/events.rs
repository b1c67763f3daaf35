//! Platform-neutral views of the updates the handlers consume

use serde::{Deserialize, Serialize};

use crate::commands::Command;

/// Someone who sent a message or pressed a button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Sender {
    pub id: i64,
    pub is_bot: bool,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
}

impl Sender {
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// The message a command replied to
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepliedMessage {
    pub message_id: i32,
    /// Author id, absent for channel posts
    pub author_id: Option<i64>,
    /// Callback data of every inline button, row by row
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buttons: Option<Vec<Vec<String>>>,
}

/// A command message sent to the chat
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommandEvent {
    pub chat_id: i64,
    /// Id of the command message itself
    pub message_id: i32,
    pub from: Option<Sender>,
    pub reply_to: Option<RepliedMessage>,
    pub command: Command,
}

/// The message holding the button that was pressed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelMessage {
    pub chat_id: i64,
    pub message_id: i32,
    /// Callback data of every inline button, row by row
    pub buttons: Option<Vec<Vec<String>>>,
}

/// A button press
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PressEvent {
    pub query_id: String,
    pub user_id: i64,
    /// Callback data of the pressed button
    pub data: Option<String>,
    /// Absent when the message is too old or was sent inline
    pub message: Option<PanelMessage>,
}
