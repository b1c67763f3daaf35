//! Telegram-specific error handling
//!
//! Platform calls never abort a handler. Failures are sorted into a
//! [`FailureKind`] so each one is logged at a level that matches how
//! surprising it is: a missing delete permission is routine, an unknown API
//! error is not.

use std::fmt;

use teloxide::{ApiError, RequestError};
use tracing::{debug, error, warn};

/// Coarse classification of a failed platform call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The bot lacks the rights for this call (e.g. deleting in a group)
    PermissionDenied,
    /// The chat, message or user is gone
    NotFound,
    /// The callback query was answered too late or twice
    StaleQuery,
    /// The edit would not change anything
    NotModified,
    /// Flood control
    RateLimited,
    /// Network or I/O trouble
    Network,
    /// Anything else
    Other,
}

/// Errors that can be sorted into a [`FailureKind`]
pub trait Classify {
    fn failure_kind(&self) -> FailureKind;
}

impl Classify for RequestError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            RequestError::RetryAfter(_) => FailureKind::RateLimited,
            RequestError::MigrateToChatId(_) => FailureKind::NotFound,
            RequestError::Network(_) | RequestError::Io(_) => FailureKind::Network,
            RequestError::InvalidJson { .. } => FailureKind::Other,
            RequestError::Api(api_err) => classify_api(api_err),
        }
    }
}

fn classify_api(api_err: &ApiError) -> FailureKind {
    match api_err {
        // Permissions ─────────────────────────────────────────────────────────
        ApiError::MessageCantBeDeleted
        | ApiError::MessageCantBeEdited
        | ApiError::NotEnoughRightsToPostMessages
        | ApiError::BotBlocked
        | ApiError::BotKicked
        | ApiError::BotKickedFromSupergroup => FailureKind::PermissionDenied,

        // Gone ────────────────────────────────────────────────────────────────
        ApiError::MessageToDeleteNotFound
        | ApiError::MessageToEditNotFound
        | ApiError::MessageToReplyNotFound
        | ApiError::MessageIdInvalid
        | ApiError::ChatNotFound
        | ApiError::UserNotFound
        | ApiError::GroupDeactivated => FailureKind::NotFound,

        // Callbacks ───────────────────────────────────────────────────────────
        ApiError::InvalidQueryId => FailureKind::StaleQuery,

        ApiError::MessageNotModified => FailureKind::NotModified,

        _ => FailureKind::Other,
    }
}

/// Log a failed platform call. `action` names what was attempted.
pub fn log_failure<E>(action: &str, err: &E)
where
    E: Classify + fmt::Display,
{
    match err.failure_kind() {
        FailureKind::PermissionDenied => {
            warn!("Cannot {}: missing rights ({})", action, err);
        }
        FailureKind::NotFound => {
            warn!("Cannot {}: target no longer exists ({})", action, err);
        }
        FailureKind::StaleQuery => {
            warn!("Cannot {}: callback query expired, answered too late ({})", action, err);
        }
        FailureKind::NotModified => {
            debug!("Skipped {}: nothing changed", action);
        }
        FailureKind::RateLimited => {
            warn!("Cannot {}: rate limited ({})", action, err);
        }
        FailureKind::Network => {
            warn!("Cannot {}: network error ({})", action, err);
        }
        FailureKind::Other => {
            error!("Failed to {}: {}", action, err);
        }
    }
}
