//! iquote CLI application entry point
//!
//! Type a keyword, page through matching verses, copy or share them.
//!
//! # Usage
//!
//! ```bash
//! # Interactive search screen (default command)
//! iquote
//! iquote tui grace
//!
//! # One-shot search
//! iquote search love one another
//! iquote -t KJV search faith --json
//! iquote search mercy --share
//!
//! # Configuration
//! iquote config path
//! iquote config show
//! iquote config init
//! ```
//!
//! # Configuration
//!
//! Settings come from `~/.config/iquote/config.toml` (on Linux) when it
//! exists, then `IQUOTE_*` environment variables, then command-line flags.
//! Logging is controlled with `IQUOTE_LOG` (or `RUST_LOG`); the interactive
//! screen logs to a file so the terminal stays clean.

use iquote::{
    IquoteError,
    cli::{Cli, Commands, ConfigCommands},
    config::IquoteConfig,
    search::{FetchWorker, MIN_TERM_CHARS, SearchController},
    share,
    source::{BollsClient, SearchQuery, VerseSource},
    ui::{OutputWriter, StdoutWriter, TuiApp, format_verse},
};
use std::fs::{self, File};
use std::path::Path;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

type Result<T> = std::result::Result<T, IquoteError>;

/// Build the log filter: `IQUOTE_LOG`, then `RUST_LOG`, then the verbosity flag
fn log_filter(verbose: u8) -> EnvFilter {
    let default = match verbose {
        0 => "warn",
        1 => "iquote=debug",
        _ => "iquote=trace",
    };
    EnvFilter::try_from_env("IQUOTE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(default))
}

/// Install the tracing subscriber
///
/// The full-screen view owns the terminal, so it logs to a file; every other
/// command logs to stderr.
fn init_logging(verbose: u8, to_file: bool) {
    let filter = log_filter(verbose);

    if !to_file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        return;
    }

    let Ok(path) = IquoteConfig::log_path() else {
        return;
    };
    let file = path
        .parent()
        .map_or(Ok(()), fs::create_dir_all)
        .and_then(|()| File::options().create(true).append(true).open(&path));

    // Without a log file the TUI simply runs without logging
    if let Ok(file) = file {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    }
}

/// Load the configuration and apply command-line overrides
fn load_config(cli: &Cli) -> Result<IquoteConfig> {
    let mut config = match &cli.config {
        Some(path) => IquoteConfig::load_from(path)?,
        None => IquoteConfig::load()?,
    };
    cli.apply_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

fn handle_tui_command(config: &IquoteConfig, term: Option<String>) -> Result<()> {
    let client = BollsClient::new(config.endpoint.as_str(), config.timeout())?;
    let worker = FetchWorker::new(Arc::new(client));
    let controller = SearchController::new(config.search_options());

    info!(translation = %config.translation, "starting interactive search");
    TuiApp::new(worker, config.share.clone()).run(controller, term)?;
    Ok(())
}

fn handle_search_command(
    config: &IquoteConfig,
    term: &str,
    json: bool,
    share_links: bool,
    output: &dyn OutputWriter,
) -> Result<()> {
    let term = term.trim();
    if term.chars().count() < MIN_TERM_CHARS {
        return Err(IquoteError::InvalidInput(format!(
            "search term must be at least {MIN_TERM_CHARS} characters"
        )));
    }

    let client = BollsClient::new(config.endpoint.as_str(), config.timeout())?;
    let query = SearchQuery::new(term, config.translation.as_str())
        .with_match_whole(config.match_whole)
        .with_limit(config.limit);
    let verses = client.find(&query)?;
    debug!(term, count = verses.len(), "search finished");

    if json {
        output.write(&serde_json::to_string_pretty(&verses)?);
        return Ok(());
    }

    if verses.is_empty() {
        output.warning(&format!("No verses found for \"{term}\""));
        return Ok(());
    }

    for (i, verse) in verses.iter().enumerate() {
        if i > 0 {
            output.write("");
        }
        output.write(&format_verse(verse, &config.translation));
        if share_links {
            output.write(&format!("  {}", share::share_url(verse, &config.share)));
        }
    }

    let noun = if verses.len() == 1 { "verse" } else { "verses" };
    output.info(&format!("\n{} {noun} found", verses.len()));
    Ok(())
}

fn handle_config_command(
    config: &IquoteConfig,
    command: &ConfigCommands,
    config_path: Option<&Path>,
    output: &dyn OutputWriter,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => IquoteConfig::config_path()?,
    };

    match command {
        ConfigCommands::Path => output.write(&path.display().to_string()),
        ConfigCommands::Show => output.write(config.to_toml()?.trim_end()),
        ConfigCommands::Init { force } => {
            if path.exists() && !force {
                return Err(IquoteError::InvalidInput(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            config.save_to(&path)?;
            output.success(&format!("Wrote {}", path.display()));
        }
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    let command = cli.get_command();
    let output = StdoutWriter::new(cli.quiet);
    let config = load_config(cli)?;

    match &command {
        Commands::Tui { term, .. } => handle_tui_command(&config, term.clone()),
        Commands::Search { json, share, .. } => {
            let term = command.search_term().unwrap_or_default();
            handle_search_command(&config, &term, *json, *share, &output)
        }
        Commands::Config { command } => {
            handle_config_command(&config, command, cli.config.as_deref(), &output)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.verbose, matches!(cli.get_command(), Commands::Tui { .. }));

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            StdoutWriter::default().error(&e.to_string());
            match e {
                IquoteError::InvalidInput(_) | IquoteError::ConfigError(_) => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
