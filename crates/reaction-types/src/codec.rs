//! Button payload codec
//!
//! Every button on a panel carries its own reaction and the ids of the users
//! who picked it. The chat platform round-trips that string untouched, so the
//! codec is the whole persistence layer: a panel is rebuilt from its buttons
//! each time someone presses one.
//!
//! Telegram caps callback data at [`MAX_CALLBACK_DATA_LEN`] bytes. Two formats
//! are available behind [`PayloadFormat`]:
//!
//! | Format | Example | Notes |
//! |--------|---------|-------|
//! | [`JsonFormat`] | `{"reaction":"approve","users":[42]}` | default |
//! | [`CompactFormat`] | `approve:42` | roughly twice the voters per button |

use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;
use crate::reaction::Reaction;

/// Telegram's limit for `callback_data`, in bytes
pub const MAX_CALLBACK_DATA_LEN: usize = 64;

/// State carried by a single button
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ButtonPayload {
    pub reaction: Reaction,
    pub users: Vec<i64>,
}

impl ButtonPayload {
    pub fn new(reaction: Reaction, users: Vec<i64>) -> Self {
        Self { reaction, users }
    }

    /// Payload for a button nobody has pressed yet
    pub fn empty(reaction: Reaction) -> Self {
        Self::new(reaction, Vec::new())
    }
}

/// A reversible text encoding for [`ButtonPayload`].
///
/// `decode` must never panic: callback data can come from anywhere.
pub trait PayloadFormat {
    fn encode(&self, payload: &ButtonPayload) -> String;

    fn decode(&self, raw: &str) -> Result<ButtonPayload, DecodeError>;

    /// True when the encoded payload fits in Telegram's callback data
    fn fits_callback_limit(&self, payload: &ButtonPayload) -> bool {
        self.encode(payload).len() <= MAX_CALLBACK_DATA_LEN
    }
}

/// `{"reaction":"<tag>","users":[<ids>]}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawJsonPayload {
    reaction: String,
    users: Vec<i64>,
}

impl PayloadFormat for JsonFormat {
    fn encode(&self, payload: &ButtonPayload) -> String {
        serde_json::json!({
            "reaction": payload.reaction.tag(),
            "users": payload.users,
        })
        .to_string()
    }

    fn decode(&self, raw: &str) -> Result<ButtonPayload, DecodeError> {
        if raw.trim().is_empty() {
            return Err(DecodeError::Empty);
        }

        let parsed: RawJsonPayload =
            serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;
        let reaction = parsed.reaction.parse()?;
        ensure_unique(&parsed.users)?;

        Ok(ButtonPayload::new(reaction, parsed.users))
    }
}

/// `<tag>:<id>,<id>,...`
#[derive(Debug, Clone, Copy, Default)]
pub struct CompactFormat;

impl PayloadFormat for CompactFormat {
    fn encode(&self, payload: &ButtonPayload) -> String {
        let users = payload
            .users
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        format!("{}:{}", payload.reaction.tag(), users)
    }

    fn decode(&self, raw: &str) -> Result<ButtonPayload, DecodeError> {
        if raw.is_empty() {
            return Err(DecodeError::Empty);
        }

        let (tag, ids) = raw
            .split_once(':')
            .ok_or_else(|| DecodeError::Malformed(format!("missing ':' in {:?}", raw)))?;
        let reaction = tag.parse()?;

        let users = if ids.is_empty() {
            Vec::new()
        } else {
            ids.split(',')
                .map(|id| {
                    id.parse::<i64>()
                        .map_err(|_| DecodeError::InvalidUserId(id.to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?
        };
        ensure_unique(&users)?;

        Ok(ButtonPayload::new(reaction, users))
    }
}

/// Format selected by configuration
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PayloadCodec {
    #[default]
    Json,
    Compact,
}

impl PayloadFormat for PayloadCodec {
    fn encode(&self, payload: &ButtonPayload) -> String {
        match self {
            Self::Json => JsonFormat.encode(payload),
            Self::Compact => CompactFormat.encode(payload),
        }
    }

    fn decode(&self, raw: &str) -> Result<ButtonPayload, DecodeError> {
        match self {
            Self::Json => JsonFormat.decode(raw),
            Self::Compact => CompactFormat.decode(raw),
        }
    }
}

impl FromStr for PayloadCodec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "compact" => Ok(Self::Compact),
            other => Err(format!("unknown payload format: {}", other)),
        }
    }
}

/// Encode with the default format
pub fn encode(reaction: Reaction, users: &[i64]) -> String {
    PayloadCodec::default().encode(&ButtonPayload::new(reaction, users.to_vec()))
}

/// Decode with the default format
pub fn decode(raw: &str) -> Result<ButtonPayload, DecodeError> {
    PayloadCodec::default().decode(raw)
}

fn ensure_unique(users: &[i64]) -> Result<(), DecodeError> {
    let mut seen = HashSet::with_capacity(users.len());
    for &id in users {
        if !seen.insert(id) {
            return Err(DecodeError::DuplicateVoter(id));
        }
    }
    Ok(())
}
