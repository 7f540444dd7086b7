//! CLI interface and argument parsing
//!
//! Command-line interface for ontex using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// ontex - Ontology export and graph import tool
#[derive(Parser, Debug)]
#[command(name = "ontex")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "ontex.toml", env = "ONTEX_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "ONTEX_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Export a project revision, optionally importing it into the graph store
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
