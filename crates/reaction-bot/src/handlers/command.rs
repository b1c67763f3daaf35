//! Command handling: panel creation, voter listing and help

#[cfg(test)]
#[path = "command_tests.rs"]
mod command_tests;

use reaction_types::{Command, CommandEvent, Panel, Reaction, RepliedMessage};
use tracing::{debug, info, warn};

use super::{best_effort, Reactor};
use crate::errors::log_failure;
use crate::platform::ReactionPlatform;

/// Reply to `/s` on a panel nobody reacted to
pub const NO_REACTIONS_TEXT: &str = "No one reacted to this message.";

/// Shown instead of a voter name that cannot be resolved
const UNKNOWN_MEMBER: &str = "(unknown)";

impl<P: ReactionPlatform> Reactor<P> {
    /// Handle one command message. Never fails; every problem is logged.
    pub async fn handle_command(&self, event: CommandEvent) {
        self.health.increment_commands().await;

        match event.command {
            Command::Help => {
                best_effort(
                    "send help",
                    self.platform
                        .send_text(event.chat_id, Some(event.message_id), Command::descriptions()),
                )
                .await;
                return;
            }
            Command::React => self.create_panel(&event, None).await,
            Command::Shortcut(reaction) => self.create_panel(&event, Some(reaction)).await,
            Command::Show => self.show_voters(&event).await,
        }

        // The trigger goes away whether or not anything was posted
        best_effort(
            "delete command message",
            self.platform.delete_message(event.chat_id, event.message_id),
        )
        .await;
    }

    async fn create_panel(&self, event: &CommandEvent, shortcut: Option<Reaction>) {
        let Some(target) = self.panel_target(event) else {
            return;
        };

        let mut panel = Panel::new();
        if let Some(reaction) = shortcut {
            match &event.from {
                Some(sender) => {
                    panel.press(sender.id, reaction, self.settings.press_policy);
                }
                None => debug!("Shortcut without a sender, posting an empty panel"),
            }
        }

        let buttons = panel.render(&self.settings.payload_format);
        match self
            .platform
            .send_panel(event.chat_id, target.message_id, buttons)
            .await
        {
            Ok(panel_id) => {
                info!(
                    panel_id,
                    reply_to = target.message_id,
                    "Posted reaction panel"
                );
                self.health.increment_panels_created().await;
            }
            Err(e) => {
                log_failure("send reaction panel", &e);
                self.health.increment_errors().await;
            }
        }
    }

    /// The message a new panel should reply to, if the command allows one
    fn panel_target<'a>(&self, event: &'a CommandEvent) -> Option<&'a RepliedMessage> {
        let Some(target) = event.reply_to.as_ref() else {
            debug!("Command is not a reply, no panel");
            return None;
        };

        if !self
            .settings
            .reply_target
            .allows(target.author_id, self.identity.id)
        {
            debug!(
                author_id = target.author_id,
                "Reply target not allowed by policy, no panel"
            );
            return None;
        }

        Some(target)
    }

    async fn show_voters(&self, event: &CommandEvent) {
        let Some(target) = event.reply_to.as_ref() else {
            debug!("Show command is not a reply");
            return;
        };

        if target.author_id != Some(self.identity.id) {
            debug!(author_id = target.author_id, "Show command does not reply to a panel");
            return;
        }

        let panel = match Panel::decode_keyboard(&self.settings.payload_format, target.buttons.as_deref()) {
            Ok(panel) => panel,
            Err(e) => {
                warn!(error = %e, "Show command target is not a reaction panel");
                return;
            }
        };

        let text = if panel.is_untouched() {
            NO_REACTIONS_TEXT.to_string()
        } else {
            let mut lines = Vec::new();
            for (reaction, users) in panel.reacted() {
                let mut names = Vec::with_capacity(users.len());
                for user_id in users {
                    let name = best_effort(
                        "look up chat member",
                        self.platform.member_name(event.chat_id, *user_id),
                    )
                    .await
                    .unwrap_or_else(|| UNKNOWN_MEMBER.to_string());
                    names.push(name);
                }
                lines.push(format!("{} — {}", reaction.emoji(), names.join(", ")));
            }
            lines.join("\n")
        };

        best_effort(
            "send voter list",
            self.platform
                .send_text(event.chat_id, Some(target.message_id), text),
        )
        .await;
    }
}
