//! Conversions between teloxide types and the handlers' event types

#[cfg(test)]
#[path = "bridge_tests.rs"]
mod bridge_tests;

use reaction_types::{
    Command, CommandEvent, PanelMessage, PressEvent, RenderedButton, RepliedMessage, Sender,
};
use teloxide::types::{
    CallbackQuery, InlineKeyboardButton, InlineKeyboardButtonKind, InlineKeyboardMarkup, Message,
    User,
};

/// Build the event for a command message
pub fn command_event(msg: &Message, command: Command) -> CommandEvent {
    CommandEvent {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        from: msg.from.as_ref().map(convert_user),
        reply_to: msg.reply_to_message().map(replied_message),
        command,
    }
}

/// Build the event for a button press
pub fn press_event(query: &CallbackQuery) -> PressEvent {
    // Inaccessible (too old) messages carry no keyboard, treat them as absent
    let message = query.regular_message().map(|msg| PanelMessage {
        chat_id: msg.chat.id.0,
        message_id: msg.id.0,
        buttons: msg.reply_markup().map(keyboard_data),
    });

    PressEvent {
        query_id: query.id.clone(),
        user_id: query.from.id.0 as i64,
        data: query.data.clone(),
        message,
    }
}

fn replied_message(msg: &Message) -> RepliedMessage {
    RepliedMessage {
        message_id: msg.id.0,
        author_id: msg.from.as_ref().map(|u| u.id.0 as i64),
        buttons: msg.reply_markup().map(keyboard_data),
    }
}

/// Convert teloxide User to our Sender type
pub fn convert_user(user: &User) -> Sender {
    Sender {
        id: user.id.0 as i64,
        is_bot: user.is_bot,
        first_name: user.first_name.clone(),
        last_name: user.last_name.clone(),
        username: user.username.clone(),
    }
}

/// Callback data of every button, row by row.
///
/// Buttons that carry no callback data (links, etc.) map to an empty string,
/// which never decodes as a payload.
pub fn keyboard_data(markup: &InlineKeyboardMarkup) -> Vec<Vec<String>> {
    markup
        .inline_keyboard
        .iter()
        .map(|row| {
            row.iter()
                .map(|button| match &button.kind {
                    InlineKeyboardButtonKind::CallbackData(data) => data.clone(),
                    _ => String::new(),
                })
                .collect()
        })
        .collect()
}

/// A single-row inline keyboard from rendered panel buttons
pub fn to_inline_keyboard(buttons: Vec<RenderedButton>) -> InlineKeyboardMarkup {
    let row: Vec<InlineKeyboardButton> = buttons
        .into_iter()
        .map(|button| InlineKeyboardButton::callback(button.caption, button.data))
        .collect();

    InlineKeyboardMarkup::new(vec![row])
}
