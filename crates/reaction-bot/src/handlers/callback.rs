//! Button presses on a reaction panel

#[cfg(test)]
#[path = "callback_tests.rs"]
mod callback_tests;

use reaction_types::{
    DecodeError, Panel, PanelError, PayloadFormat, PressEvent, PressOutcome, Reaction,
};
use thiserror::Error;
use tracing::{debug, warn};

use super::{best_effort, Reactor};
use crate::errors::log_failure;
use crate::platform::{PressAnswer, ReactionPlatform};

/// Alert shown when the pressed button's message is unavailable
pub const MISSING_MESSAGE_ALERT: &str =
    "Something's wrong with that message. Try this on another message.";

/// Alert shown when a vote would not fit into the button's callback data
pub const PANEL_FULL_ALERT: &str = "This reaction is full. Try another one.";

/// Answer text after a vote was withdrawn
pub const REMOVED_ANSWER: &str = "❎";

/// Why a press did not change the panel
#[derive(Debug, Error)]
pub enum PressRejected {
    #[error("button carries no callback data")]
    MissingData,

    #[error("undecodable press payload: {0}")]
    Payload(#[from] DecodeError),

    #[error("panel message is not available")]
    NoMessage,

    #[error("message is not a reaction panel: {0}")]
    Panel(#[from] PanelError),

    #[error("{reaction} payload with {voters} voters exceeds the callback data limit")]
    PanelFull { reaction: Reaction, voters: usize },

    #[error("failed to edit panel: {0}")]
    Edit(String),
}

impl<P: ReactionPlatform> Reactor<P> {
    /// Handle one button press. The query is always answered.
    pub async fn handle_callback(&self, event: PressEvent) {
        let answer = match self.resolve_press(&event).await {
            Ok((reaction, outcome)) => {
                debug!(reaction = %reaction, ?outcome, "Press applied");
                self.health.increment_presses_applied().await;
                match outcome {
                    PressOutcome::Added => PressAnswer::toast(reaction.emoji()),
                    PressOutcome::Removed => PressAnswer::toast(REMOVED_ANSWER),
                }
            }
            Err(PressRejected::NoMessage) => {
                warn!("Press on an unavailable message");
                self.health.increment_presses_rejected().await;
                PressAnswer::alert(MISSING_MESSAGE_ALERT)
            }
            Err(e @ PressRejected::PanelFull { .. }) => {
                warn!(error = %e, "Press not applied");
                self.health.increment_presses_rejected().await;
                PressAnswer::alert(PANEL_FULL_ALERT)
            }
            Err(e @ PressRejected::Edit(_)) => {
                warn!(error = %e, "Press not applied");
                self.health.increment_errors().await;
                PressAnswer::silent()
            }
            Err(e) => {
                warn!(error = %e, data = ?event.data, "Press rejected");
                self.health.increment_presses_rejected().await;
                PressAnswer::silent()
            }
        };

        best_effort(
            "answer callback query",
            self.platform.answer_press(&event.query_id, answer),
        )
        .await;
    }

    /// Decode, toggle and re-render. Returns the pressed reaction and what
    /// happened to the presser's vote. Nothing is edited when a payload would
    /// outgrow the callback data limit.
    async fn resolve_press(&self, event: &PressEvent) -> Result<(Reaction, PressOutcome), PressRejected> {
        let format = &self.settings.payload_format;

        let data = event.data.as_deref().ok_or(PressRejected::MissingData)?;
        let pressed = format.decode(data)?;

        let message = event.message.as_ref().ok_or(PressRejected::NoMessage)?;
        let mut panel = Panel::decode_keyboard(format, message.buttons.as_deref())?;

        let outcome = panel.press(event.user_id, pressed.reaction, self.settings.press_policy);

        if let Some(payload) = panel
            .payloads()
            .into_iter()
            .find(|p| !format.fits_callback_limit(p))
        {
            return Err(PressRejected::PanelFull {
                reaction: payload.reaction,
                voters: payload.users.len(),
            });
        }

        self.platform
            .replace_buttons(message.chat_id, message.message_id, panel.render(format))
            .await
            .map_err(|e| {
                log_failure("edit reaction panel", &e);
                PressRejected::Edit(e.to_string())
            })?;

        Ok((pressed.reaction, outcome))
    }
}
