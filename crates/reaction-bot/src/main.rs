//! Reaction panel bot for Telegram
//!
//! Replying `/r` to a message posts a row of reaction buttons under it.
//! Pressing a button toggles the presser's vote; the voters live in the
//! buttons' callback data, so the bot keeps no state of its own.

mod bridge;
mod config;
mod errors;
mod handlers;
mod health;
#[cfg(test)]
mod mocks;
mod platform;

use anyhow::Result;
use clap::Parser;
use teloxide::prelude::*;
use teloxide::types::Message;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::handlers::{BotIdentity, Reactor};
use crate::platform::TelegramPlatform;

/// Reaction panel bot CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/reaction-bot.toml")]
    config: String,

    /// Telegram bot token (overrides config file)
    #[arg(long, env = "TELEGRAM_BOT_TOKEN")]
    bot_token: Option<String>,

    /// Health check server port
    #[arg(long, env = "HEALTH_CHECK_PORT", default_value = "3000")]
    health_port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "reaction_bot=debug,reaction_types=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting reaction bot");

    let args = Args::parse();

    // Load configuration
    let config = Config::load(&args.config, args.bot_token)
        .inspect_err(|e| error!("Failed to load configuration: {:#}", e))?;

    if let Err(e) = config.validate() {
        error!("Invalid configuration: {:#}", e);
        return Err(e);
    }

    info!(
        press_policy = ?config.reactions.press_policy,
        reply_target = ?config.reactions.reply_target,
        payload_format = ?config.reactions.payload_format,
        "Configuration loaded successfully"
    );

    let bot = Bot::new(&config.telegram.bot_token);

    // Verify bot token and learn our own id
    let identity = match bot.get_me().await {
        Ok(me) => {
            let username = me.username().to_string();
            info!("Bot authenticated as: @{}", username);
            BotIdentity {
                id: me.id.0 as i64,
                username: Some(username),
            }
        }
        Err(e) => {
            error!("Failed to authenticate bot: {}", e);
            return Err(e.into());
        }
    };

    let health_state = health::AppState::new(identity.username.clone());

    // Start health check server
    let health_state_clone = health_state.clone();
    let health_port = args.health_port;
    tokio::spawn(async move {
        if let Err(e) = health::start_health_server(health_state_clone, health_port).await {
            error!("Health check server error: {}", e);
        }
    });

    let reactor = Reactor::new(
        TelegramPlatform::new(bot.clone()),
        config.reactions.clone(),
        identity,
        health_state.clone(),
    );

    let command_handler = Update::filter_message()
        .filter_map(|msg: Message, reactor: Reactor<TelegramPlatform>| {
            msg.text().and_then(|text| reactor.parse_command(text))
        })
        .endpoint(handlers::on_command);

    let callback_handler = Update::filter_callback_query().endpoint(handlers::on_callback_query);

    let all_handlers = dptree::entry()
        .branch(command_handler)
        .branch(callback_handler);

    health_state.set_ready(true).await;
    info!("Bot initialized, starting dispatcher...");

    Dispatcher::builder(bot, all_handlers)
        .dependencies(dptree::deps![reactor])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    health_state.set_ready(false).await;
    info!("Reaction bot stopped");
    Ok(())
}
