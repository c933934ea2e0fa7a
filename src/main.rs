//! cwatch - CLI entry point

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use cwatch::config;
use cwatch::event::SignalSource;
use cwatch::render::RenderOptions;
use cwatch::screen::TermScreen;
use cwatch::watch;

#[derive(Parser, Debug)]
#[command(name = "cwatch")]
#[command(about = "Run a command periodically, highlighting its output with regex rules")]
#[command(version)]
struct Cli {
    /// Seconds to wait between updates
    #[arg(short = 'n', long, default_value_t = 2, value_parser = clap::value_parser!(u64).range(1..))]
    interval: u64,

    /// Rule file (one YAML rule group, applied after the rule directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule directory (every file is one rule group, in path order)
    #[arg(long)]
    config_dir: Option<PathBuf>,

    /// Turn off the header line
    #[arg(short = 't', long)]
    no_title: bool,

    /// The command to run, joined with spaces and passed to /bin/sh -c
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let _log_guard = init_logging();

    let command = cli.command.join(" ");

    let rule_file = match cli.config {
        Some(path) => path,
        None => config::default_rule_file()?,
    };
    let rule_dir = match cli.config_dir {
        Some(path) => path,
        None => config::default_rule_dir()?,
    };
    let rules = config::load(&rule_file, &rule_dir)?;
    info!(target: "startup", groups = rules.len(), %command, "loaded rules");

    let options = RenderOptions {
        interval: Duration::from_secs(cli.interval),
        no_title: cli.no_title,
    };

    let mut screen = TermScreen::new().context("failed to initialize terminal")?;
    let signals = SignalSource::spawn();
    signal_hook::flag::register(signal_hook::consts::SIGTERM, signals.cancel_flag())
        .context("failed to register SIGTERM handler")?;

    watch::run(&mut screen, &signals, &command, &rules, &options)
}

/// Optional file logging, opt-in through `CWATCH_LOG=<path>` so log output
/// never lands on the alternate screen.
fn init_logging() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let path = PathBuf::from(std::env::var_os("CWATCH_LOG")?);
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path
        .file_name()
        .map(|name| Path::new(name).to_path_buf())
        .unwrap_or_else(|| PathBuf::from("cwatch.log"));

    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok()?;

    Some(guard)
}
