//! Command-line interface for aulatrust.
//!
//! This module provides the CLI structure and command handlers for the
//! `aulat` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    ArchiveCommand, CasesCommand, CleanCommand, ConfigCommand, ExportCommand, ListCommand,
    SaveCommand, SectionArg, ShowCommand, TemplateCommand, TopicArg,
};

/// aulat - UD3 distributed-trust worksheet submissions
///
/// Collects worksheet section state from an editable TOML file, stores each
/// submission as a timestamped markdown document on the server, and manages
/// the stored documents: listing, per-file export, bulk ZIP download, and
/// confirmed bulk deletion.
#[derive(Debug, Parser)]
#[command(name = "aulat")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Save a worksheet section as a timestamped submission
    Save(SaveCommand),

    /// Generate and store the reading guide
    Guide,

    /// List stored documents
    List(ListCommand),

    /// Export a single stored document
    Export(ExportCommand),

    /// Export all documents in a folder as a ZIP archive
    Archive(ArchiveCommand),

    /// Delete all stored submissions (requires --yes)
    Clean(CleanCommand),

    /// Show the case-reference table
    Cases(CasesCommand),

    /// Emit a worksheet state template for editing
    Template(TemplateCommand),

    /// Show didactic content for the unit
    Show(ShowCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
