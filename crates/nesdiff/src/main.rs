//! nesdiff CLI - CPU trace differ

mod cli;
mod commands;
mod terminal;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize metrics recorder if enabled
    let metrics_handle = if cli.metrics {
        nesdiff::metrics::CliRecorder::new().install()
    } else {
        None
    };
    nesdiff::metrics::init();

    // stdout carries the report, so logs go to stderr
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = cli.log_directive().parse() {
        filter = filter.add_directive(directive);
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = commands::run_command(&cli);

    if let Some(handle) = metrics_handle {
        handle.print_summary();
    }

    std::process::exit(exit_code);
}
