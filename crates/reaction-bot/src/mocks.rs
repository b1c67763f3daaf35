//! Recording [`ReactionPlatform`] for handler tests.

use std::collections::HashMap;
use std::fmt;
use std::sync::{
    atomic::{AtomicBool, AtomicI32, Ordering},
    Arc, Mutex,
};

use reaction_types::RenderedButton;

use crate::config::ReactionConfig;
use crate::errors::{Classify, FailureKind};
use crate::handlers::{BotIdentity, Reactor};
use crate::health::AppState;
use crate::platform::{PressAnswer, ReactionPlatform};

pub const BOT_ID: i64 = 7000;
pub const BOT_USERNAME: &str = "ReactionBot";

/// A reactor over `platform` for a bot with id [`BOT_ID`]
pub fn reactor(platform: MockPlatform, settings: ReactionConfig) -> Reactor<MockPlatform> {
    let identity = BotIdentity {
        id: BOT_ID,
        username: Some(BOT_USERNAME.to_string()),
    };
    let health = AppState::new(identity.username.clone());
    Reactor::new(platform, settings, identity, health)
}

// ── MockError ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError(pub FailureKind);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mock failure: {:?}", self.0)
    }
}

impl std::error::Error for MockError {}

impl Classify for MockError {
    fn failure_kind(&self) -> FailureKind {
        self.0
    }
}

// ── MockPlatform ──────────────────────────────────────────────────────────────

/// One recorded platform call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Sent {
        chat_id: i64,
        reply_to: i32,
        buttons: Vec<RenderedButton>,
    },
    Edited {
        chat_id: i64,
        message_id: i32,
        buttons: Vec<RenderedButton>,
    },
    Deleted {
        chat_id: i64,
        message_id: i32,
    },
    Answered {
        query_id: String,
        answer: PressAnswer,
    },
    Text {
        chat_id: i64,
        reply_to: Option<i32>,
        text: String,
    },
}

/// Records every call; individual operations can be switched to fail.
#[derive(Clone, Default)]
pub struct MockPlatform {
    calls: Arc<Mutex<Vec<Call>>>,
    next_message_id: Arc<AtomicI32>,
    fail_send: Arc<AtomicBool>,
    fail_edit: Arc<AtomicBool>,
    fail_delete: Arc<AtomicBool>,
    fail_answer: Arc<AtomicBool>,
    members: Arc<Mutex<HashMap<i64, String>>>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Panels sent, as `(reply_to, buttons)`
    pub fn sent(&self) -> Vec<(i32, Vec<RenderedButton>)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Sent { reply_to, buttons, .. } => Some((reply_to, buttons)),
                _ => None,
            })
            .collect()
    }

    pub fn edits(&self) -> Vec<Vec<RenderedButton>> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Edited { buttons, .. } => Some(buttons),
                _ => None,
            })
            .collect()
    }

    pub fn deleted(&self) -> Vec<i32> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Deleted { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    pub fn answers(&self) -> Vec<PressAnswer> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Answered { answer, .. } => Some(answer),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::Text { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn fail_send(&self, fail: bool) {
        self.fail_send.store(fail, Ordering::SeqCst);
    }

    pub fn fail_edit(&self, fail: bool) {
        self.fail_edit.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn fail_answer(&self, fail: bool) {
        self.fail_answer.store(fail, Ordering::SeqCst);
    }

    pub fn add_member(&self, user_id: i64, name: &str) {
        self.members.lock().unwrap().insert(user_id, name.to_string());
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

impl ReactionPlatform for MockPlatform {
    type Error = MockError;

    async fn send_panel(
        &self,
        chat_id: i64,
        reply_to: i32,
        buttons: Vec<RenderedButton>,
    ) -> Result<i32, Self::Error> {
        if self.fail_send.load(Ordering::SeqCst) {
            return Err(MockError(FailureKind::PermissionDenied));
        }
        self.record(Call::Sent {
            chat_id,
            reply_to,
            buttons,
        });
        Ok(self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1000)
    }

    async fn replace_buttons(
        &self,
        chat_id: i64,
        message_id: i32,
        buttons: Vec<RenderedButton>,
    ) -> Result<(), Self::Error> {
        if self.fail_edit.load(Ordering::SeqCst) {
            return Err(MockError(FailureKind::NotFound));
        }
        self.record(Call::Edited {
            chat_id,
            message_id,
            buttons,
        });
        Ok(())
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), Self::Error> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(MockError(FailureKind::PermissionDenied));
        }
        self.record(Call::Deleted {
            chat_id,
            message_id,
        });
        Ok(())
    }

    async fn answer_press(&self, query_id: &str, answer: PressAnswer) -> Result<(), Self::Error> {
        if self.fail_answer.load(Ordering::SeqCst) {
            return Err(MockError(FailureKind::StaleQuery));
        }
        self.record(Call::Answered {
            query_id: query_id.to_string(),
            answer,
        });
        Ok(())
    }

    async fn send_text(
        &self,
        chat_id: i64,
        reply_to: Option<i32>,
        text: String,
    ) -> Result<(), Self::Error> {
        self.record(Call::Text {
            chat_id,
            reply_to,
            text,
        });
        Ok(())
    }

    async fn member_name(&self, _chat_id: i64, user_id: i64) -> Result<String, Self::Error> {
        self.members
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(MockError(FailureKind::NotFound))
    }
}
