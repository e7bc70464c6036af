//! Bot initialization and command definitions
//!
//! This module contains:
//! - Command enum definition
//! - Bot instance creation
//! - Command menu registration

use reqwest::ClientBuilder;
use teloxide::prelude::*;
use teloxide::utils::command::{BotCommands, ParseError};

use crate::core::config;

/// Bot commands enum with descriptions
#[derive(BotCommands, Clone, Copy, Debug, PartialEq, Eq)]
#[command(rename_rule = "snake_case", description = "Я умею:")]
pub enum Command {
    #[command(description = "главное меню")]
    Start,
    #[command(description = "регистрация")]
    Register,
    #[command(description = "прервать ввод данных")]
    Cancel,
    #[command(description = "внести баллы по предмету")]
    EnterScores,
    #[command(description = "справка")]
    Help,
    #[command(description = "посмотреть свои баллы")]
    ViewScores,
}

/// Recognizes a command addressed to this bot in a text message.
///
/// Only the first whitespace-separated token is parsed, so `/help please`
/// is still `/help`. A command for another bot (`/start@other_bot`), an
/// unknown command or plain text yields `None`.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let token = text.split_whitespace().next()?;

    match Command::parse(token, bot_username) {
        Ok(command) => Some(command),
        Err(ParseError::WrongBotName(name)) => {
            log::debug!("Command {} is addressed to @{}, treated as text", token, name);
            None
        }
        Err(_) => None,
    }
}

/// Creates a Bot instance with custom or default API URL
///
/// # Returns
/// * `Ok(Bot)` - Successfully created bot instance
/// * `Err(anyhow::Error)` - Missing token or invalid `BOT_API_URL`
pub fn create_bot() -> anyhow::Result<Bot> {
    let token = config::bot_token()?;
    let client = ClientBuilder::new().timeout(config::network::timeout()).build()?;
    let bot = Bot::with_client(token, client);

    // Local Bot API server, if configured
    let bot = match config::BOT_API_URL.as_deref() {
        Some(bot_api_url) => {
            log::info!("Using custom Bot API URL: {}", bot_api_url);
            let url = url::Url::parse(bot_api_url).map_err(|e| anyhow::anyhow!("Invalid BOT_API_URL: {}", e))?;
            bot.set_api_url(url)
        }
        None => bot,
    };

    Ok(bot)
}

/// Sets up bot commands in Telegram UI, as declared on [`Command`]
pub async fn setup_bot_commands(bot: &Bot) -> Result<(), teloxide::RequestError> {
    bot.set_my_commands(Command::bot_commands()).await?;

    Ok(())
}
