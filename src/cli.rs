//! Command-line interface definitions and parsing
//!
//! This module defines the CLI structure for iquote using the `clap` crate.
//!
//! # Commands
//!
//! - **tui**: Interactive search screen (default)
//! - **search**: One-shot search that prints every match
//! - **config**: Show or initialise the configuration file
//!
//! Global flags (`--translation`, `--endpoint`, `--limit`, `--whole`) override
//! the configuration file for a single run.
//!
//! # Examples
//!
//! ```
//! use iquote::cli::{Cli, Commands};
//! use clap::Parser;
//!
//! let cli = Cli::parse_from(["iquote", "search", "love", "one", "another"]);
//! match cli.get_command() {
//!     Commands::Search { .. } => {
//!         assert_eq!(cli.get_command().search_term(), Some("love one another".to_string()));
//!     }
//!     _ => unreachable!(),
//! }
//! ```

use crate::config::IquoteConfig;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Print the config file location
    Path,

    /// Print the effective configuration (file, environment and flags applied)
    Show,

    /// Write the effective configuration to the config file
    Init {
        /// Overwrite an existing config file
        #[arg(short = 'f', long = "force")]
        force: bool,
    },
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Open the interactive search screen (default)
    #[command(visible_alias = "t")]
    Tui {
        /// Start with this search term
        #[arg(value_name = "TERM")]
        term: Option<String>,

        /// Pause in typing before searching, in milliseconds
        #[arg(long = "debounce-ms", value_name = "MS")]
        debounce_ms: Option<u64>,
    },

    /// Search once and print every matching verse
    #[command(visible_alias = "s")]
    Search {
        /// Words to search for (joined with spaces)
        #[arg(value_name = "TERM", required = true, num_args = 1..)]
        term: Vec<String>,

        /// Print results as JSON
        #[arg(long = "json", conflicts_with = "share")]
        json: bool,

        /// Print a share link after each verse
        #[arg(long = "share")]
        share: bool,
    },

    /// Manage configuration settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Commands {
    /// Search term for `search`, joined into one string
    #[must_use]
    pub fn search_term(&self) -> Option<String> {
        match self {
            Self::Search { term, .. } => Some(term.join(" ")),
            _ => None,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "iquote")]
#[command(about = "Find scripture verses by keyword", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Translation code to search (e.g. NKJV, KJV, ESV)
    #[arg(short = 't', long = "translation", global = true, value_name = "CODE")]
    pub translation: Option<String>,

    /// Verse search endpoint URL
    #[arg(long = "endpoint", global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Maximum number of results (1-128)
    #[arg(short = 'n', long = "limit", global = true, value_name = "N",
          value_parser = clap::value_parser!(u32).range(1..=128))]
    pub limit: Option<u32>,

    /// Match whole words only
    #[arg(short = 'w', long = "whole", global = true)]
    pub whole: bool,

    /// Use this config file instead of the default location
    #[arg(long = "config", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// The command to run, defaulting to the interactive screen
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Tui {
            term: None,
            debounce_ms: None,
        })
    }

    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut IquoteConfig) {
        if let Some(translation) = &self.translation {
            config.translation.clone_from(translation);
        }
        if let Some(endpoint) = &self.endpoint {
            config.endpoint.clone_from(endpoint);
        }
        if let Some(limit) = self.limit {
            config.limit = limit;
        }
        if self.whole {
            config.match_whole = true;
        }
        if let Some(Commands::Tui {
            debounce_ms: Some(ms),
            ..
        }) = &self.command
        {
            config.debounce_ms = *ms;
        }
    }
}
