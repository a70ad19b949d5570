//! Implementation of the Debatron CLI commands.

use std::path::PathBuf;

use crate::bot::{Bot, ModerationEngine};
use crate::scorer::{CriteriaStore, OpenAiScorer};
use crate::telegram::TelegramApi;
use crate::types::config::Config;
use crate::{BotError, BotResult};

/// Environment variable holding the Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_BOT_TOKEN";

/// Environment variable holding the OpenAI API key.
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

/// Criteria written by `init` when no criteria file exists yet.
const DEFAULT_CRITERIA: &str = "\
Messages should be respectful and on topic.
Personal attacks, insults and bad-faith arguments score low.
Well-argued, constructive contributions score high.
";

fn env_var(name: &str) -> BotResult<String> {
    std::env::var(name)
        .map_err(|_| BotError::config(format!("environment variable {} is not set", name)))
}

/// Starts the polling loop.
pub async fn run(config: &Config) -> BotResult<()> {
    let token = env_var(TELEGRAM_TOKEN_VAR)?;
    let api_key = env_var(OPENAI_KEY_VAR)?;

    let api = TelegramApi::new(&config.telegram, &token)?;
    let scorer = OpenAiScorer::new(config.scorer.clone(), api_key)?;
    let engine = ModerationEngine::new(config, Box::new(scorer))?;

    let mut bot = Bot::new(api, engine);
    bot.run().await
}

/// Initializes configuration and criteria in the specified directory.
pub async fn init(path: Option<PathBuf>) -> BotResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join("debatron.toml");
    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    let config = Config::default_config();
    config.save(&config_path)?;

    let criteria_path = target_dir.join(&config.scorer.criteria_path);
    if !criteria_path.exists() {
        std::fs::write(&criteria_path, DEFAULT_CRITERIA)?;
        println!("Default criteria written to: {}", criteria_path.display());
    }

    println!("Debatron initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Export {} and {}", TELEGRAM_TOKEN_VAR, OPENAI_KEY_VAR);
    println!("  2. Edit the scoring criteria: {}", criteria_path.display());
    println!("  3. Start the bot: debatron run");

    Ok(())
}

/// Diagnoses configuration and connectivity problems.
pub async fn doctor(config: &Config) -> BotResult<()> {
    println!("Debatron doctor");
    println!();

    let mut healthy = true;

    for var in [TELEGRAM_TOKEN_VAR, OPENAI_KEY_VAR] {
        match std::env::var(var) {
            Ok(value) if !value.is_empty() => println!("  [ok] {} is set", var),
            _ => {
                println!("  [!!] {} is not set", var);
                healthy = false;
            }
        }
    }

    let criteria = CriteriaStore::new(&config.scorer.criteria_path);
    match criteria.read().await {
        Ok(text) if !text.trim().is_empty() => {
            println!("  [ok] criteria file readable: {}", criteria.path().display())
        }
        Ok(_) => {
            println!("  [!!] criteria file is empty: {}", criteria.path().display());
            healthy = false;
        }
        Err(error) => {
            println!(
                "  [!!] criteria file unreadable: {} ({})",
                criteria.path().display(),
                error
            );
            healthy = false;
        }
    }

    if let Ok(token) = std::env::var(TELEGRAM_TOKEN_VAR) {
        match TelegramApi::new(&config.telegram, &token) {
            Ok(api) => match api.get_me().await {
                Ok(me) => println!("  [ok] Telegram reachable, bot: {}", me.full_name()),
                Err(error) => {
                    println!("  [!!] getMe failed: {}", error);
                    healthy = false;
                }
            },
            Err(error) => {
                println!("  [!!] Telegram client: {}", error);
                healthy = false;
            }
        }
    }

    println!();
    if healthy {
        println!("Everything looks good.");
        Ok(())
    } else {
        Err(BotError::config("doctor found problems, see above"))
    }
}

/// Shows version.
pub fn version() {
    println!("debatron {}", env!("CARGO_PKG_VERSION"));
}
