use clap::Parser;
use debatron::cli::{Cli, Commands};
use debatron::types::config::Config;
use debatron::BotResult;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> BotResult<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = if cli.config.exists() {
        Config::load(&cli.config).unwrap_or_else(|_| Config::default_config())
    } else {
        Config::default_config()
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("debatron={}", log_level)
            .parse()
            .unwrap_or_else(|_| "debatron=info".parse().expect("fallback directive is valid")),
    );

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Run => {
            debatron::cli::commands::run(&config).await?;
        }
        Commands::Init { path } => {
            debatron::cli::commands::init(path).await?;
        }
        Commands::Doctor => {
            debatron::cli::commands::doctor(&config).await?;
        }
        Commands::Version => {
            debatron::cli::commands::version();
        }
    }

    Ok(())
}
