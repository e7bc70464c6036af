use anyhow::Result;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tokio::time::sleep;

use examscore_bot::cli::{Cli, Commands};
use examscore_bot::core::{config, init_logger, log_startup_configuration};
use examscore_bot::storage::{create_pool, db, get_connection};
use examscore_bot::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};
use examscore_bot::ScoreBot;

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, database, bot creation).
#[tokio::main]
async fn main() -> Result<()> {
    // Must run before any config static is read
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    // Initialize logger (console + file)
    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Run) | None => run_bot().await,
        Some(Commands::InitDb) => init_db(),
        Some(Commands::Scores { user_id }) => print_scores(user_id),
    }
}

fn init_db() -> Result<()> {
    create_pool(&config::DATABASE_PATH, 1)?;
    log::info!("Database initialized at {}", config::DATABASE_PATH.as_str());
    Ok(())
}

fn print_scores(user_id: i64) -> Result<()> {
    let pool = create_pool(&config::DATABASE_PATH, 1)?;
    let conn = get_connection(&pool)?;

    let scores = db::get_subject_scores(&conn, user_id)?;
    if scores.is_empty() {
        println!("No scores stored for user {}", user_id);
        return Ok(());
    }
    for score in scores {
        println!("{}\t{}", score.subject_name, score.points);
    }
    Ok(())
}

async fn run_bot() -> Result<()> {
    log_startup_configuration();

    let bot = create_bot()?;
    let pool = create_pool(&config::DATABASE_PATH, *config::DATABASE_POOL_SIZE)?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}", e);
    }

    let me = bot.get_me().await?;
    log::info!("Bot @{} started", me.username());
    let score_bot = Arc::new(ScoreBot::new(pool, config::LOGIN_PHOTO_PATH.as_str(), me.username()));

    let handler = schema(HandlerDeps::new(score_bot));
    let mut retry_count = 0;
    let max_retries = config::retry::MAX_DISPATCHER_RETRIES;

    // Run the dispatcher with retry logic
    loop {
        let bot_clone = bot.clone();
        let handler_clone = handler.clone();

        // A panic inside the dispatcher surfaces through the JoinHandle
        let handle = tokio::spawn(async move {
            use teloxide::update_listeners::Polling;

            // Updates sent while the bot was offline are dropped
            let listener = Polling::builder(bot_clone.clone()).drop_pending_updates().build();

            Dispatcher::builder(bot_clone, handler_clone)
                .dependencies(DependencyMap::new())
                .enable_ctrlc_handler()
                .build()
                .dispatch_with_listener(
                    listener,
                    LoggingErrorHandler::with_custom_text("An error from the update listener"),
                )
                .await
        });

        match handle.await {
            Ok(()) => {
                log::info!("Dispatcher shutdown gracefully");
                break;
            }
            Err(join_err) if join_err.is_panic() => {
                log::error!("Dispatcher panicked: {}", join_err);

                if retry_count >= max_retries {
                    log::error!("Max retries reached after panic. Exiting...");
                    break;
                }
                retry_count += 1;
                log::info!(
                    "Retrying dispatcher connection after panic (attempt {}/{})...",
                    retry_count,
                    max_retries
                );
                exponential_backoff(retry_count).await;
            }
            Err(join_err) => {
                log::warn!("Dispatcher task was cancelled: {}", join_err);
                break;
            }
        }

        sleep(config::retry::dispatcher_delay()).await;
    }

    Ok(())
}

async fn exponential_backoff(retry_count: u32) {
    let delay = Duration::from_secs(config::retry::EXPONENTIAL_BACKOFF_BASE.pow(retry_count));
    sleep(delay).await;
}
