mod cli;
mod config;
mod db;
mod error;
mod models;
mod stats;
mod tui;
mod utils;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rusqlite::Connection;

use cli::args::{Cli, Commands};
use cli::handlers;
use config::AppConfig;
use db::migrations::run_migrations;
use db::repository::UserRepo;

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let mut config = AppConfig::load().context("Loading config")?;

    // Ensure data directory exists and open DB
    let db_path = AppConfig::db_path()?;
    match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)?,
        _ => {
            AppConfig::ensure_data_dir()?;
        }
    }
    debug!("Opening database at {:?}", db_path);
    let conn = Connection::open(&db_path)
        .with_context(|| format!("Opening database at {:?}", db_path))?;

    // Enable WAL mode for better concurrent access
    conn.execute_batch("PRAGMA journal_mode=WAL;")?;

    // Run migrations on every startup
    run_migrations(&conn)?;
    restore_session(&conn, &config)?;

    match cli.command {
        Some(Commands::Login { email, name }) => {
            handlers::handle_login(&conn, &mut config, email.as_deref(), name.as_deref())?;
        }
        Some(Commands::Logout) => handlers::handle_logout(&conn, &mut config)?,
        Some(Commands::Whoami) => handlers::handle_whoami(&conn)?,
        Some(Commands::Profile { name }) => handlers::handle_profile(&conn, &name)?,
        Some(Commands::Log(args)) => handlers::handle_log(&conn, &config, &args)?,
        Some(Commands::List { date, month }) => {
            handlers::handle_list(&conn, date.as_deref(), month.as_deref())?;
        }
        Some(Commands::Edit(args)) => handlers::handle_edit(&conn, &config, &args)?,
        Some(Commands::Delete { id }) => handlers::handle_delete(&conn, id)?,
        Some(Commands::Today) => handlers::handle_today(&conn)?,
        Some(Commands::Stats { month, json }) => {
            handlers::handle_stats(&conn, &config, month.as_deref(), json)?;
        }
        Some(Commands::Months) => handlers::handle_months(&conn)?,
        Some(Commands::Progression { upto, json }) => {
            handlers::handle_progression(&conn, &config, upto.as_deref(), json)?;
        }
        Some(Commands::Export) => handlers::handle_export(&conn)?,

        // No subcommand → launch TUI
        None => tui::app::run(conn, config)?,
    }

    Ok(())
}

/// Signs in the configured e-mail when nobody is signed in yet.
fn restore_session(conn: &Connection, config: &AppConfig) -> Result<()> {
    if UserRepo::active(conn)?.is_some() {
        return Ok(());
    }
    if let Some(email) = config.user.email.as_deref() {
        let user = UserRepo::get_or_create_by_email(conn, email, None)?;
        UserRepo::set_active(conn, user.id)?;
        info!("Signed in as {} from config", user.email);
    }
    Ok(())
}
