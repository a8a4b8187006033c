//! Interval clock CLI - a 25 + 5 session/break timer
//!
//! Counts down a work session, plays a cue, counts down a break, and
//! repeats until stopped:
//! - 25 minutes of focused work
//! - 5 minutes of break

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tokio::io::BufReader;
use tracing::info;

use interval_clock::cli::{build_notifier, run_controls, Cli, Commands, Display, RunArgs};
use interval_clock::clock::TimerEngine;

/// Main entry point
#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_tracing(cli.verbose);

    if let Err(e) = execute(cli).await {
        Display::show_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

/// Initializes the tracing subscriber for logging.
fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// Executes the CLI command.
async fn execute(cli: Cli) -> Result<()> {
    if cli.verbose {
        tracing::info!("Verbose mode enabled");
    }

    match cli.command {
        Some(Commands::Run(args)) => run(args).await?,
        Some(Commands::Completions { shell }) => generate_completions(shell),
        None => run(RunArgs::default()).await?,
    }

    Ok(())
}

/// Runs the clock until the controls say quit, input ends, or Ctrl-C.
async fn run(args: RunArgs) -> Result<()> {
    let format = args.output_format();
    let engine = TimerEngine::with_config(args.clock_config(), build_notifier(&args));

    Display::render(&engine.snapshot(), format);
    let subscription = engine.subscribe(Display::subscriber(format));

    if args.autostart {
        engine.start();
    }

    let input = BufReader::new(tokio::io::stdin());
    let (result, interrupted) = tokio::select! {
        result = run_controls(&engine, input, format) => (result, false),
        _ = tokio::signal::ctrl_c() => (Ok(()), true),
    };

    engine.unsubscribe(subscription);
    engine.stop();

    if interrupted {
        info!("Interrupted");
        // A blocking stdin read would otherwise hold up runtime shutdown.
        std::process::exit(130);
    }
    result
}

/// Generates shell completion scripts.
fn generate_completions(shell: clap_complete::Shell) {
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut io::stdout());
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["interval-clock"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from(["interval-clock", "run", "--session", "30"]);
        match cli.command {
            Some(Commands::Run(args)) => assert_eq!(args.session, 30),
            _ => panic!("Expected Run command"),
        }
    }

    #[test]
    fn test_cli_parse_verbose() {
        let cli = Cli::parse_from(["interval-clock", "--verbose", "run"]);
        assert!(cli.verbose);
    }
}
