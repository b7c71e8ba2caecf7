//! Command implementation: load both traces, diff them, summarize.

use std::io::{self, BufWriter};

use nesdiff::{RunState, RunSummary, Severity, load_trace};

use crate::cli::{Cli, EXIT_FAILURE, EXIT_SUCCESS};
use crate::terminal::{self, Spinner};

/// Run the comparison described by `cli` and return the process exit code.
///
/// Discrepancies are reported as text, so a completed or desynchronized pass
/// both exit successfully; only unreadable input or output fails.
pub fn run_command(cli: &Cli) -> i32 {
    let (reference, candidate) = match load_traces(cli) {
        Ok(traces) => traces,
        Err(e) => {
            terminal::error(&e.to_string());
            return EXIT_FAILURE;
        }
    };

    if !cli.silent {
        terminal::info(&format!(
            "reference: {} lines, candidate: {} lines",
            reference.len(),
            candidate.len()
        ));
    }

    let out = BufWriter::new(io::stdout().lock());
    let summary = match nesdiff::run(&reference, &candidate, out) {
        Ok(summary) => summary,
        Err(e) => {
            terminal::error(&nesdiff::Error::Report(e).to_string());
            return EXIT_FAILURE;
        }
    };

    print_summary(cli, &summary);
    EXIT_SUCCESS
}

fn load_traces(cli: &Cli) -> nesdiff::Result<(Vec<String>, Vec<String>)> {
    let spinner = if cli.silent {
        Spinner::hidden()
    } else {
        Spinner::new("Loading traces...")
    };
    let reference = load_trace(&cli.reference)?;
    let candidate = load_trace(&cli.candidate)?;
    spinner.finish_and_clear();
    Ok((reference, candidate))
}

fn print_summary(cli: &Cli, summary: &RunSummary) {
    if let RunState::FatalStopped { line } = summary.state {
        terminal::error(&format!(
            "{} at line {line} ({} discrepancies)",
            Severity::Desync,
            summary.errors
        ));
        return;
    }
    if cli.silent {
        return;
    }

    if summary.malformed > 0 {
        terminal::warning(&format!("{} malformed lines skipped", summary.malformed));
    }
    if summary.errors == 0 {
        terminal::success(&format!("{} lines matched", summary.lines_compared));
    } else {
        terminal::warning(&format!(
            "{} lines compared, {} discrepancies ({} repeats not shown)",
            summary.lines_compared, summary.errors, summary.suppressed
        ));
    }
}
