//! Configuration management for the etext checker.
//!
//! Handles:
//! - Command-line argument parsing
//! - Rule directory configuration

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::validation::Options;

/// Command-line arguments for the etext checker
#[derive(Debug, Parser)]
#[command(name = "tengyur-lint")]
#[command(about = "Checks digitized Tengyur volumes for transcription errors")]
#[command(version)]
pub struct Args {
    /// Directory holding the volume files to check
    #[arg(help = "Directory containing volume .txt files")]
    pub input_dir: PathBuf,

    /// Where to write the error report
    #[arg(
        short,
        long,
        default_value = "errors.txt",
        help = "File the error report is written to"
    )]
    pub output: PathBuf,

    /// Resolve variant readings to their corrected form
    #[arg(long, help = "Keep the corrected reading of each (X,Y) variant")]
    pub fix_errors: bool,

    /// Keep editorial square brackets in the checked text
    #[arg(long, help = "Leave [] error indications in place during checks")]
    pub keep_errors_indications: bool,

    /// Report verses deviating from the seven-syllable meter
    #[arg(long, help = "Check verse lines against the expected meter")]
    pub check_verses: bool,

    /// Custom rule directory to search for rule files
    #[arg(long, help = "Directory containing additional rule TOML files")]
    pub rules_dir: Option<PathBuf>,

    /// Log level for the checker
    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the volume files
    pub input_dir: PathBuf,
    /// Report destination
    pub output: PathBuf,
    /// Validation behavior switches
    pub options: Options,
    /// Custom rule directories to search
    pub rules_dirs: Vec<PathBuf>,
    /// Log level
    pub log_level: String,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments (useful for testing)
    pub fn from_args(args: Args) -> Result<Self> {
        // Determine rule directories
        let mut rules_dirs = Vec::new();

        // Add user-specified directory if provided
        if let Some(custom_dir) = args.rules_dir {
            rules_dirs.push(custom_dir);
        }

        // Add default user config directory
        if let Some(config_dir) = dirs::config_dir() {
            rules_dirs.push(config_dir.join("tengyur-lint").join("rules"));
        }

        Ok(Config {
            input_dir: args.input_dir,
            output: args.output,
            options: Options {
                fix_errors: args.fix_errors,
                keep_errors_indications: args.keep_errors_indications,
                check_verses: args.check_verses,
            },
            rules_dirs,
            log_level: args.log_level,
        })
    }
}
