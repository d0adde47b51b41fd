//! teamcal library root.
//! Exposes the CLI parser, the high-level run() function, and the core
//! modules: holiday calendar, store, resolver and mutation coordinator.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod holidays;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands as c;

    match &cli.command {
        Commands::Init => c::init::handle(cli),
        Commands::Config { .. } => c::config::handle(&cli.command, cfg),
        Commands::Db { .. } => c::db::handle(&cli.command, cfg),
        Commands::Log { .. } => c::log::handle(&cli.command, cfg),
        Commands::User { .. } => c::user::handle(&cli.command, cfg),
        Commands::Add { .. } => c::add::handle(&cli.command, cfg),
        Commands::Edit { .. } => c::edit::handle(&cli.command, cfg),
        Commands::Del { .. } => c::del::handle(&cli.command, cfg),
        Commands::List { .. } => c::list::handle(&cli.command, cfg),
        Commands::Rule { .. } => c::rule::handle(&cli.command, cfg),
        Commands::Show { .. } => c::show::handle(&cli.command, cfg),
        Commands::Holidays { .. } => c::holidays::handle(&cli.command, cfg),
        Commands::RefreshHolidays { .. } => c::holidays::handle_refresh(&cli.command, cfg),
        Commands::Export { .. } => c::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // test mode never reads the user's config file
    let mut cfg = if cli.test {
        Config::default()
    } else {
        Config::load()?
    };

    // command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = utils::path::resolve_under(&Config::config_dir(), custom_db)
            .to_string_lossy()
            .to_string();
    }
    if let Some(user) = &cli.user {
        cfg.current_user = Some(user.clone());
    }

    logging::init_logging(&cfg.log_level)?;

    dispatch(&cli, &cfg)
}
