//! Configuration management for reaction-bot

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;

use anyhow::{bail, Context, Result};
use reaction_types::{PayloadCodec, PressPolicy, ReplyTargetPolicy};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

/// Complete bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub telegram: TelegramBotConfig,
    #[serde(default)]
    pub reactions: ReactionConfig,
}

/// Telegram bot specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramBotConfig {
    /// Bot token from BotFather
    #[serde(default = "default_bot_token")]
    pub bot_token: String,
}

/// How panels behave
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReactionConfig {
    /// Whether a press drops the user's other reactions
    #[serde(default)]
    pub press_policy: PressPolicy,
    /// Which messages panels may be attached to
    #[serde(default)]
    pub reply_target: ReplyTargetPolicy,
    /// Encoding of button callback data
    #[serde(default)]
    pub payload_format: PayloadCodec,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        Self::from_toml(&content).with_context(|| format!("Failed to parse config file: {}", path))
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load from `path` when it exists, otherwise from the environment.
    /// A `bot_token` given on the command line wins over both.
    pub fn load(path: &str, bot_token: Option<String>) -> Result<Self> {
        Self::load_with(path, bot_token, |key| std::env::var(key).ok())
    }

    /// [`Config::load`] with an arbitrary variable lookup
    pub fn load_with<F>(path: &str, bot_token: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = if Path::new(path).exists() {
            info!("Loading config from file: {}", path);
            Self::from_file(path)?
        } else {
            info!("Config file not found, using environment variables");
            Self::from_lookup(|key| match key {
                "TELEGRAM_BOT_TOKEN" => bot_token.clone().or_else(|| lookup(key)),
                _ => lookup(key),
            })?
        };

        if let Some(bot_token) = bot_token {
            config.telegram.bot_token = bot_token;
        }

        Ok(config)
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN").context("TELEGRAM_BOT_TOKEN not set")?;

        let mut reactions = ReactionConfig::default();
        if let Some(value) = lookup("REACTION_PRESS_POLICY") {
            reactions.press_policy = value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid REACTION_PRESS_POLICY")?;
        }
        if let Some(value) = lookup("REACTION_REPLY_TARGET") {
            reactions.reply_target = value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid REACTION_REPLY_TARGET")?;
        }
        if let Some(value) = lookup("REACTION_PAYLOAD_FORMAT") {
            reactions.payload_format = value
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid REACTION_PAYLOAD_FORMAT")?;
        }

        Ok(Config {
            telegram: TelegramBotConfig { bot_token },
            reactions,
        })
    }

    /// Reject configurations the bot cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.telegram.bot_token.trim().is_empty() {
            bail!("Telegram bot token is empty; set TELEGRAM_BOT_TOKEN or telegram.bot_token");
        }
        Ok(())
    }
}

fn default_bot_token() -> String {
    std::env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default()
}
