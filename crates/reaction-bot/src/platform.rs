//! The chat calls the handlers need, and their Telegram implementation

use std::future::Future;

use reaction_types::RenderedButton;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyMarkup, ReplyParameters, UserId};
use teloxide::RequestError;

use crate::bridge::to_inline_keyboard;
use crate::errors::Classify;

/// Text shown on the panel message itself (U+034F, renders as nothing)
pub const PANEL_TEXT: &str = "\u{034f}";

/// How to answer a callback query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PressAnswer {
    pub text: Option<String>,
    pub show_alert: bool,
}

impl PressAnswer {
    /// Just clear the spinner on the user's client
    pub fn silent() -> Self {
        Self::default()
    }

    pub fn toast(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: false,
        }
    }

    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            show_alert: true,
        }
    }
}

/// Chat operations used by the reaction handlers.
///
/// One implementation talks to Telegram; tests use a recording mock.
pub trait ReactionPlatform: Send + Sync + Clone + 'static {
    type Error: std::error::Error + Classify + Send + Sync + 'static;

    /// Post a panel as a silent reply. Returns the new message id.
    fn send_panel(
        &self,
        chat_id: i64,
        reply_to: i32,
        buttons: Vec<RenderedButton>,
    ) -> impl Future<Output = Result<i32, Self::Error>> + Send;

    /// Replace the whole button row of a message
    fn replace_buttons(
        &self,
        chat_id: i64,
        message_id: i32,
        buttons: Vec<RenderedButton>,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn delete_message(
        &self,
        chat_id: i64,
        message_id: i32,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn answer_press(
        &self,
        query_id: &str,
        answer: PressAnswer,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Post plain text, optionally as a reply
    fn send_text(
        &self,
        chat_id: i64,
        reply_to: Option<i32>,
        text: String,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    /// Display name of a chat member
    fn member_name(
        &self,
        chat_id: i64,
        user_id: i64,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// [`ReactionPlatform`] backed by the Telegram Bot API
#[derive(Clone)]
pub struct TelegramPlatform {
    bot: Bot,
}

impl TelegramPlatform {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

impl ReactionPlatform for TelegramPlatform {
    type Error = RequestError;

    async fn send_panel(
        &self,
        chat_id: i64,
        reply_to: i32,
        buttons: Vec<RenderedButton>,
    ) -> Result<i32, Self::Error> {
        let mut req = self.bot.send_message(ChatId(chat_id), PANEL_TEXT);
        req.reply_parameters = Some(ReplyParameters::new(MessageId(reply_to)));
        req.reply_markup = Some(ReplyMarkup::InlineKeyboard(to_inline_keyboard(buttons)));
        req.disable_notification = Some(true);

        let sent = req.await?;
        Ok(sent.id.0)
    }

    async fn replace_buttons(
        &self,
        chat_id: i64,
        message_id: i32,
        buttons: Vec<RenderedButton>,
    ) -> Result<(), Self::Error> {
        let mut req = self
            .bot
            .edit_message_reply_markup(ChatId(chat_id), MessageId(message_id));
        req.reply_markup = Some(to_inline_keyboard(buttons));

        req.await?;
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), Self::Error> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await?;
        Ok(())
    }

    async fn answer_press(&self, query_id: &str, answer: PressAnswer) -> Result<(), Self::Error> {
        let mut req = self.bot.answer_callback_query(query_id);
        req.text = answer.text;
        if answer.show_alert {
            req.show_alert = Some(true);
        }

        req.await?;
        Ok(())
    }

    async fn send_text(
        &self,
        chat_id: i64,
        reply_to: Option<i32>,
        text: String,
    ) -> Result<(), Self::Error> {
        let mut req = self.bot.send_message(ChatId(chat_id), text);
        if let Some(reply_to) = reply_to {
            req.reply_parameters = Some(ReplyParameters::new(MessageId(reply_to)));
        }
        req.disable_notification = Some(true);

        req.await?;
        Ok(())
    }

    async fn member_name(&self, chat_id: i64, user_id: i64) -> Result<String, Self::Error> {
        let member = self
            .bot
            .get_chat_member(ChatId(chat_id), UserId(user_id as u64))
            .await?;
        Ok(member.user.full_name())
    }
}
