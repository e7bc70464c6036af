use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "examscore-bot")]
#[command(author, version, about = "Telegram bot that keeps track of exam scores", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the bot with long polling (default)
    Run,

    /// Create the database tables and exit
    InitDb,

    /// Print the stored scores of a user
    Scores {
        /// Telegram user ID
        user_id: i64,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
