pub mod cli;
pub mod config;
pub mod core;
pub mod engine;
pub mod providers;

use crate::engine::PriceEngine;
use crate::providers::cbr::{self, CbrProvider};
use anyhow::Result;
use tracing::{debug, info};

/// Commands the binary dispatches into the library.
pub enum AppCommand {
    /// A raw free-text conversion query.
    Price(String),
    /// List the supported currencies.
    Values,
    /// Print the query format reminder.
    Usage,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    // Usage needs neither config nor network.
    if let AppCommand::Usage = command {
        println!("{}", core::messages::QUERY_FORMAT);
        return Ok(());
    }

    info!("kurs starting...");

    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config
        .providers
        .cbr
        .as_ref()
        .map_or(cbr::DEFAULT_BASE_URL, |p| &p.base_url);
    let engine = PriceEngine::new(CbrProvider::new(base_url));

    match command {
        AppCommand::Price(raw) => cli::price::run(&engine, &raw).await,
        AppCommand::Values => cli::values::run(&engine).await,
        AppCommand::Usage => unreachable!("Usage is handled before config loading"),
    }
}
