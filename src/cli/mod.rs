//! CLI command definitions for waste-registry.
//!
//! This module defines the CLI structure using clap's derive macros.
//! The main entry point is the `Cli` struct which contains subcommands.

pub mod add;
pub mod export;
pub mod import;

use add::AddArgs;
use clap::{Parser, Subcommand};
use export::ExportArgs;
use import::ImportArgs;

/// Municipal waste and wastewater record keeper
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Path to the local store file (overrides config)
    #[arg(short, long, global = true)]
    pub store: Option<String>,

    /// Spreadsheet identifier (overrides config)
    #[arg(long, global = true)]
    pub sheet_id: Option<String>,

    /// Subsheet name (overrides config)
    #[arg(long, global = true)]
    pub sheet_name: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2", global = true)]
    pub log: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show the reconciled record set (default if no subcommand given)
    List {
        /// Output format: markdown or json
        #[arg(long, default_value = "markdown")]
        format: String,
    },

    /// Show aggregate statistics over the reconciled record set
    Stats,

    /// Add a single record
    Add(AddArgs),

    /// Bulk-import records from a CSV file
    Import(ImportArgs),

    /// Export pending rows or a full report
    Export(ExportArgs),

    /// Delete a record by id
    Delete {
        /// Record id (local- prefixed or sheet-origin)
        id: String,
    },
}
