use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use kurs::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Free-text conversion query, e.g. `kurs 10 usd eur`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    query: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// List the supported currency codes
    Values,
    /// Show the query format
    Usage,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Values) => {
            kurs::run_command(kurs::AppCommand::Values, cli.config_path.as_deref()).await
        }
        Some(Commands::Usage) => {
            kurs::run_command(kurs::AppCommand::Usage, cli.config_path.as_deref()).await
        }
        None if cli.query.is_empty() => {
            Cli::command().print_help()?;
            Ok(())
        }
        None => {
            let raw = cli.query.join(" ");
            kurs::run_command(kurs::AppCommand::Price(raw), cli.config_path.as_deref()).await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = kurs::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
providers:
  cbr:
    base_url: "https://www.cbr-xml-daily.ru"
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    tracing::info!("Created default configuration at {}", path.display());
    Ok(())
}
