//! Handlers for commands and button presses
//!
//! The handlers are written against [`ReactionPlatform`] and consume the
//! platform-neutral events from `reaction-types`. The teloxide endpoints at the
//! bottom only convert updates and open a tracing span.

mod callback;
mod command;

use std::fmt;
use std::future::Future;

use reaction_types::Command;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Message};
use tracing::{info_span, Instrument};

use crate::bridge;
use crate::config::ReactionConfig;
use crate::errors::{log_failure, Classify};
use crate::health::AppState;
use crate::platform::{ReactionPlatform, TelegramPlatform};

/// Who the bot is, as reported by `getMe`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotIdentity {
    pub id: i64,
    pub username: Option<String>,
}

/// Everything the handlers need, shared across updates
#[derive(Clone)]
pub struct Reactor<P: ReactionPlatform> {
    pub platform: P,
    pub settings: ReactionConfig,
    pub identity: BotIdentity,
    pub health: AppState,
}

impl<P: ReactionPlatform> Reactor<P> {
    pub fn new(platform: P, settings: ReactionConfig, identity: BotIdentity, health: AppState) -> Self {
        Self {
            platform,
            settings,
            identity,
            health,
        }
    }

    /// Parse a message text as a command for this bot
    pub fn parse_command(&self, text: &str) -> Option<Command> {
        Command::parse(text, self.identity.username.as_deref()).ok()
    }
}

/// Run a platform call whose failure must not stop the handler.
///
/// Failures are logged through [`log_failure`] and turned into `None`.
pub async fn best_effort<T, E, F>(action: &str, call: F) -> Option<T>
where
    F: Future<Output = Result<T, E>>,
    E: Classify + fmt::Display,
{
    match call.await {
        Ok(value) => Some(value),
        Err(e) => {
            log_failure(action, &e);
            None
        }
    }
}

/// Endpoint for messages that parsed as a command
pub async fn on_command(
    msg: Message,
    command: Command,
    reactor: Reactor<TelegramPlatform>,
) -> ResponseResult<()> {
    let span = info_span!(
        "command",
        command = %command,
        chat_id = msg.chat.id.0,
        message_id = msg.id.0,
    );

    reactor
        .handle_command(bridge::command_event(&msg, command))
        .instrument(span)
        .await;

    Ok(())
}

/// Endpoint for callback queries
pub async fn on_callback_query(
    query: CallbackQuery,
    reactor: Reactor<TelegramPlatform>,
) -> ResponseResult<()> {
    let event = bridge::press_event(&query);
    let span = info_span!(
        "press",
        query_id = %event.query_id,
        user_id = event.user_id,
        chat_id = event.message.as_ref().map(|m| m.chat_id),
        message_id = event.message.as_ref().map(|m| m.message_id),
    );

    reactor.handle_callback(event).instrument(span).await;

    Ok(())
}
