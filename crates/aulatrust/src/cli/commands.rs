//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::assemble::Section;

/// Save command arguments.
#[derive(Debug, Args)]
pub struct SaveCommand {
    /// The worksheet section to save
    #[arg(value_enum)]
    pub section: SectionArg,

    /// Path to the worksheet state TOML (missing file saves the defaults)
    #[arg(short, long, value_name = "FILE", default_value = "worksheet.toml")]
    pub state: PathBuf,
}

/// List command arguments.
#[derive(Debug, Args)]
pub struct ListCommand {
    /// List the materials folder instead of submissions
    #[arg(short, long)]
    pub materials: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Export command arguments.
#[derive(Debug, Args)]
pub struct ExportCommand {
    /// Name of the stored document to export
    pub name: String,

    /// Export from the materials folder instead of submissions
    #[arg(short, long)]
    pub materials: bool,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Archive command arguments.
#[derive(Debug, Args)]
pub struct ArchiveCommand {
    /// Archive the materials folder instead of submissions
    #[arg(short, long)]
    pub materials: bool,

    /// Write the ZIP to this file (defaults to the folder's archive name)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Clean command arguments.
#[derive(Debug, Args)]
pub struct CleanCommand {
    /// Confirm that saved submissions have been downloaded and may be
    /// deleted from the server
    #[arg(short, long)]
    pub yes: bool,
}

/// Cases command arguments.
#[derive(Debug, Args)]
pub struct CasesCommand {
    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Template command arguments.
#[derive(Debug, Args)]
pub struct TemplateCommand {
    /// Write the template to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// Show command arguments.
#[derive(Debug, Args)]
pub struct ShowCommand {
    /// The didactic content to display
    #[arg(value_enum)]
    pub topic: TopicArg,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Savable worksheet section argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectionArg {
    /// S1 — comparative trust matrix
    S1,
    /// S2 — validation protocol
    S2,
    /// Debate essay
    Debate,
}

impl From<SectionArg> for Section {
    fn from(arg: SectionArg) -> Self {
        match arg {
            SectionArg::S1 => Self::Matrix,
            SectionArg::S2 => Self::Protocol,
            SectionArg::Debate => Self::Debate,
        }
    }
}

/// Didactic content topics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TopicArg {
    /// Three trust models and their compared keys
    Theory,
    /// Debate prompt and suggested argument lines
    Debate,
    /// Reading axes and guiding questions
    Reading,
    /// Deliverables rubric
    Rubric,
}
