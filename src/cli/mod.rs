//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for doajsync using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// doajsync - DOAJ article metadata synchronization tool
#[derive(Parser, Debug)]
#[command(name = "doajsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "doajsync.toml", env = "DOAJSYNC_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "DOAJSYNC_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Push published articles to DOAJ
    Push(commands::push::PushArgs),

    /// Delete an article's DOAJ record
    Delete(commands::delete::DeleteArgs),

    /// Reconcile local articles with DOAJ records
    Sync(commands::sync::SyncArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
