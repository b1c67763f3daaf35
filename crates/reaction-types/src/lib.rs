//! Shared types for the reaction panel bot
//!
//! Everything here is pure: the reaction table, the button payload codec,
//! the panel model with its press transform, command parsing, and the
//! platform-neutral event types the bot handlers consume. Nothing depends on
//! a chat client.

pub mod codec;
pub mod commands;
pub mod errors;
pub mod events;
pub mod panel;
pub mod policies;
pub mod reaction;

// Re-export commonly used types
pub use codec::{ButtonPayload, CompactFormat, JsonFormat, PayloadCodec, PayloadFormat, MAX_CALLBACK_DATA_LEN};
pub use commands::Command;
pub use errors::{CommandParseError, DecodeError, PanelError};
pub use events::{CommandEvent, PanelMessage, PressEvent, RepliedMessage, Sender};
pub use panel::{caption, Panel, PressOutcome, RenderedButton};
pub use policies::{PressPolicy, ReplyTargetPolicy};
pub use reaction::{Reaction, REACTIONS};
